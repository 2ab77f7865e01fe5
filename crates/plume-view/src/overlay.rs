use std::str::FromStr;

use glam::{Vec2, Vec4};
use plume_fluids::MacGrid2D;

use crate::{Palette, ViewError};

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[repr(transparent)]
    pub struct Overlay: u32 {
        const NONE = 0;
        const GRID_LINES = 1 << 0;
        const VECTORS = 1 << 1;
    }
}

impl FromStr for Overlay {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Overlay::NONE),
            "grid" => Ok(Overlay::GRID_LINES),
            "vectors" => Ok(Overlay::VECTORS),
            "all" => Ok(Overlay::all()),
            _ => Err(ViewError::UnknownOverlay(s.to_owned())),
        }
    }
}

/// Speeds at or below this are not drawn as vectors.
const MIN_VECTOR_SPEED: f32 = 0.01;

/// A colored line between two points, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
    pub color: Vec4,
}

/// Line segments for the requested overlays, in the grid's physical coordinates.
pub fn overlay_segments(grid: &MacGrid2D, overlay: Overlay, vector_scale: f32, palette: &Palette) -> Vec<Segment> {
    let mut segments = vec![];
    let h = grid.spacing;
    let size = grid.size();

    if overlay.contains(Overlay::GRID_LINES) {
        for i in 0..=grid.nx {
            let x = i as f32 * h;
            segments.push(Segment { a: Vec2::new(x, 0.0), b: Vec2::new(x, size.y), color: palette.grid_lines });
        }

        for j in 0..=grid.ny {
            let y = j as f32 * h;
            segments.push(Segment { a: Vec2::new(0.0, y), b: Vec2::new(size.x, y), color: palette.grid_lines });
        }
    }

    if overlay.contains(Overlay::VECTORS) {
        for j in 0..grid.ny {
            for i in 0..grid.nx {
                let vel = grid.cell_velocity(i, j);
                if vel.length() <= MIN_VECTOR_SPEED {
                    continue;
                }

                let center = Vec2::new(i as f32 + 0.5, j as f32 + 0.5) * h;
                segments.push(Segment { a: center, b: center + vel * vector_scale, color: palette.vectors });
            }
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use plume_fluids::MacGrid2D;

    use super::{overlay_segments, Overlay};
    use crate::Palette;

    #[test]
    fn grid_lines_cover_every_cell_boundary() {
        let grid = MacGrid2D::new(4, 3, 0.5).unwrap();
        let segments = overlay_segments(&grid, Overlay::GRID_LINES, 1.0, &Palette::default());

        assert_eq!(segments.len(), 5 + 4);
        assert_eq!(segments[4].a, Vec2::new(2.0, 0.0));
        assert_eq!(segments[4].b, Vec2::new(2.0, 1.5));
    }

    #[test]
    fn vectors_start_at_moving_cell_centers() {
        let mut grid = MacGrid2D::new(4, 4, 1.0).unwrap();
        let (l, r) = (grid.u_idx(1, 2), grid.u_idx(2, 2));
        grid.u[l] = 1.0;
        grid.u[r] = 1.0;

        let segments = overlay_segments(&grid, Overlay::VECTORS, 0.5, &Palette::default());

        // The outer neighbors each share one moving edge.
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].a, Vec2::new(1.5, 2.5));
        assert_eq!(segments[1].b, Vec2::new(2.0, 2.5));
        assert!(overlay_segments(&grid, Overlay::NONE, 0.5, &Palette::default()).is_empty());
    }

    #[test]
    fn parses_overlay_names() {
        assert_eq!("all".parse::<Overlay>().unwrap(), Overlay::GRID_LINES | Overlay::VECTORS);
        assert_eq!("Grid".parse::<Overlay>().unwrap(), Overlay::GRID_LINES);
        assert!("lines".parse::<Overlay>().is_err());
    }
}
