use glam::{Vec2, Vec4};
use ndarray::{s, Array3};
use plume_fluids::MacGrid2D;

use crate::{palette::to_rgba8, DrawMode, Palette, Segment};

/// Distance past the far edge, in pixels, still treated as lying on it.
const BORDER_SNAP: f32 = 1e-3;

/// An RGBA image of the grid. Row `0` is the bottom of the domain.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Pixels, shaped `(height, width, 4)`.
    pub pixels: Array3<u8>,
    /// Pixels per meter.
    pub scale: f32,
}

impl Frame {
    pub fn new(width: usize, height: usize, scale: f32) -> Self {
        Self {
            pixels: Array3::zeros((height, width, 4)),
            scale,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let p = self.pixels.slice(s![y, x, ..]);
        [p[0], p[1], p[2], p[3]]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        for (c, v) in rgba.into_iter().enumerate() {
            self.pixels[(y, x, c)] = v;
        }
    }

    /// Renders one pixel per cell.
    pub fn render(grid: &MacGrid2D, mode: DrawMode, palette: &Palette, opacity: f32) -> Self {
        let mut frame = Frame::new(grid.nx, grid.ny, grid.inv_spacing);

        for j in 0..grid.ny {
            for i in 0..grid.nx {
                let idx = grid.idx(i, j);

                let color = if grid.is_solid(i, j) {
                    palette.solid
                } else {
                    match mode {
                        DrawMode::Density => Palette::gray(grid.density[idx]),
                        DrawMode::Divergence => Palette::signed(
                            palette.divergence_positive,
                            palette.divergence_negative,
                            grid.divergence[idx],
                            palette.divergence_scale,
                        ),
                        DrawMode::Pressure => Palette::signed(
                            palette.pressure_positive,
                            palette.pressure_negative,
                            grid.pressure[idx],
                            palette.pressure_scale,
                        ),
                        DrawMode::Velocity => Palette::gray(grid.cell_velocity(i, j).length()),
                    }
                };

                frame.set_pixel(i, j, to_rgba8(color.truncate().extend(color.w * opacity)));
            }
        }

        frame
    }

    /// Nearest-neighbor enlargement by an integer factor.
    pub fn upscale(&self, factor: usize) -> Self {
        let factor = factor.max(1);
        let mut pixels = Array3::zeros((self.height() * factor, self.width() * factor, 4));

        for ((y, x, c), v) in pixels.indexed_iter_mut() {
            *v = self.pixels[(y / factor, x / factor, c)];
        }

        Self {
            pixels,
            scale: self.scale * factor as f32,
        }
    }

    /// Alpha-blends `color` over the pixel at `(x, y)`.
    fn blend(&mut self, x: usize, y: usize, color: Vec4) {
        let dst = Vec4::from_array(self.pixel(x, y).map(|c| c as f32 / 255.0));
        let a = color.w.clamp(0.0, 1.0);
        let rgb = color.truncate() * a + dst.truncate() * (1.0 - a);

        self.set_pixel(x, y, to_rgba8(rgb.extend(a + dst.w * (1.0 - a))));
    }

    /// Rasterizes line segments given in meters.
    pub fn draw_segments(&mut self, segments: &[Segment]) {
        let far = Vec2::new(self.width() as f32, self.height() as f32);

        for segment in segments {
            let a = segment.a * self.scale;
            let b = segment.b * self.scale;
            let steps = (b - a).abs().max_element().ceil().max(1.0) as usize;

            // Segments lying on the far border are drawn on the last pixel. Anything else
            // past the border is clipped.
            let on_border = |p: Vec2| p.cmpge(far) & p.cmple(far + BORDER_SNAP);
            let along = on_border(a) & on_border(b);

            let mut last = None;
            for k in 0..=steps {
                let q = a.lerp(b, k as f32 / steps as f32);
                let p = Vec2::select(along, far - 1.0, q.floor());

                if p.cmplt(Vec2::ZERO).any() || p.cmpge(far).any() || last == Some(p) {
                    continue;
                }

                self.blend(p.x as usize, p.y as usize, segment.color);
                last = Some(p);
            }
        }
    }
}
