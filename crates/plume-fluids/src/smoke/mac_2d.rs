use glam::{UVec2, Vec2};
use log::debug;
use ndarray::{ArrayView2, ShapeError};
use thiserror::Error;

use super::FLUID;

/// Largest cell size difference that [`MacGrid2D::resize`] treats as unchanged.
const SPACING_EPSILON: f32 = 1e-6;

/// Staggered grid holding every field of the smoke simulation.
///
/// Horizontal velocities live on vertical cell edges, vertical velocities on horizontal cell
/// edges, and all scalars at cell centers. Every field is a flat row-major `Vec` addressed with
/// [`Self::idx`], [`Self::u_idx`] or [`Self::v_idx`].
///
/// Collaborators may read and write the public fields between steps, but must never change
/// their lengths. Use [`Self::resize`] for that.
#[derive(Debug, Clone)]
pub struct MacGrid2D {
    /// Size of the grid, in cells.
    pub grid_size: UVec2,
    /// Number of cells in the X direction.
    pub nx: usize,
    /// Number of cells in the Y direction.
    pub ny: usize,
    /// Cell size.
    pub spacing: f32,
    /// 1.0 / spacing.
    pub inv_spacing: f32,

    /// Grid velocities in the X direction, `(nx + 1) * ny` samples.
    pub u: Vec<f32>,
    /// Grid velocities in the Y direction, `nx * (ny + 1)` samples.
    pub v: Vec<f32>,
    /// Smoke density per cell.
    pub density: Vec<f32>,
    /// Pressure per cell. Recomputed by every step.
    pub pressure: Vec<f32>,
    /// Right hand side of the pressure equation per cell. Recomputed by every step.
    pub divergence: Vec<f32>,
    /// Solid cells. `0` is fluid, anything else is an impermeable obstacle.
    pub solid: Vec<u8>,

    /// X velocities at the start of the current step.
    pub(crate) u_prev: Vec<f32>,
    /// Y velocities at the start of the current step.
    pub(crate) v_prev: Vec<f32>,
    /// Densities at the start of the current step.
    pub(crate) density_prev: Vec<f32>,
    /// Jacobi scratch buffer.
    pub(crate) pressure_next: Vec<f32>,
}

impl MacGrid2D {
    pub fn new(width: usize, height: usize, spacing: f32) -> Result<Self, GridError> {
        let grid_size = validate(width, height, spacing)?;

        let nx = width;
        let ny = height;
        let cells = nx * ny;

        debug!("allocating {nx}x{ny} MAC grid with cell size {spacing}");

        Ok(Self {
            grid_size,
            nx,
            ny,
            spacing,
            inv_spacing: spacing.recip(),
            u: vec![0.0; (nx + 1) * ny],
            v: vec![0.0; nx * (ny + 1)],
            density: vec![0.0; cells],
            pressure: vec![0.0; cells],
            divergence: vec![0.0; cells],
            solid: vec![FLUID; cells],
            u_prev: vec![0.0; (nx + 1) * ny],
            v_prev: vec![0.0; nx * (ny + 1)],
            density_prev: vec![0.0; cells],
            pressure_next: vec![0.0; cells],
        })
    }

    /// Reallocates every field for new dimensions, discarding all simulation state including
    /// the solid mask.
    ///
    /// Returns `Ok(false)` without touching anything when the dimensions are unchanged.
    pub fn resize(&mut self, width: usize, height: usize, spacing: f32) -> Result<bool, GridError> {
        if width == self.nx && height == self.ny && (spacing - self.spacing).abs() <= SPACING_EPSILON {
            return Ok(false);
        }

        *self = Self::new(width, height, spacing)?;
        Ok(true)
    }

    /// Zeroes every field in place except the solid mask.
    pub fn clear(&mut self) {
        self.u.fill(0.0);
        self.v.fill(0.0);
        self.density.fill(0.0);
        self.pressure.fill(0.0);
        self.divergence.fill(0.0);
        self.u_prev.fill(0.0);
        self.v_prev.fill(0.0);
        self.density_prev.fill(0.0);
        self.pressure_next.fill(0.0);
    }

    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        i + self.nx * j
    }

    #[inline]
    pub fn u_idx(&self, i: usize, j: usize) -> usize {
        i + (self.nx + 1) * j
    }

    #[inline]
    pub fn v_idx(&self, i: usize, j: usize) -> usize {
        i + self.nx * j
    }

    #[inline]
    pub fn is_solid(&self, i: usize, j: usize) -> bool {
        self.solid[self.idx(i, j)] != FLUID
    }

    /// Size of the domain, in meters.
    pub fn size(&self) -> Vec2 {
        self.grid_size.as_vec2() * self.spacing
    }

    /// Velocity at the center of cell `(i, j)`, averaged from its four edges.
    pub fn cell_velocity(&self, i: usize, j: usize) -> Vec2 {
        Vec2::new(
            0.5 * (self.u[self.u_idx(i, j)] + self.u[self.u_idx(i + 1, j)]),
            0.5 * (self.v[self.v_idx(i, j)] + self.v[self.v_idx(i, j + 1)]),
        )
    }

    pub fn total_density(&self) -> f32 {
        self.density.iter().sum()
    }

    /// Net outflow of cell `(i, j)` per unit length, measured from the current velocities.
    pub fn velocity_divergence(&self, i: usize, j: usize) -> f32 {
        (self.u[self.u_idx(i + 1, j)] - self.u[self.u_idx(i, j)]
            + self.v[self.v_idx(i, j + 1)] - self.v[self.v_idx(i, j)]) * self.inv_spacing
    }

    /// Largest divergence magnitude over the interior fluid cells.
    pub fn max_abs_divergence(&self) -> f32 {
        let mut max: f32 = 0.0;

        for j in 1..self.ny.saturating_sub(1) {
            for i in 1..self.nx.saturating_sub(1) {
                if !self.is_solid(i, j) {
                    max = max.max(self.velocity_divergence(i, j).abs());
                }
            }
        }

        max
    }

    /// Density as a `(ny, nx)` view, indexed `[[j, i]]`.
    pub fn density_view(&self) -> Result<ArrayView2<'_, f32>, GridError> {
        Ok(ArrayView2::from_shape((self.ny, self.nx), &self.density)?)
    }

    /// Pressure as a `(ny, nx)` view, indexed `[[j, i]]`.
    pub fn pressure_view(&self) -> Result<ArrayView2<'_, f32>, GridError> {
        Ok(ArrayView2::from_shape((self.ny, self.nx), &self.pressure)?)
    }

    /// Divergence as a `(ny, nx)` view, indexed `[[j, i]]`.
    pub fn divergence_view(&self) -> Result<ArrayView2<'_, f32>, GridError> {
        Ok(ArrayView2::from_shape((self.ny, self.nx), &self.divergence)?)
    }

    /// X velocities as a `(ny, nx + 1)` view, indexed `[[j, i]]`.
    pub fn u_view(&self) -> Result<ArrayView2<'_, f32>, GridError> {
        Ok(ArrayView2::from_shape((self.ny, self.nx + 1), &self.u)?)
    }

    /// Y velocities as a `(ny + 1, nx)` view, indexed `[[j, i]]`.
    pub fn v_view(&self) -> Result<ArrayView2<'_, f32>, GridError> {
        Ok(ArrayView2::from_shape((self.ny + 1, self.nx), &self.v)?)
    }
}

/// Checks the grid arguments and returns the size in cells. Every field must be addressable
/// without overflow.
fn validate(width: usize, height: usize, spacing: f32) -> Result<UVec2, GridError> {
    let invalid = |name: &'static str, value: usize| GridError::InvalidArgument { name, value: value as f32 };

    let nx = u32::try_from(width).ok().filter(|&w| w > 0).ok_or(invalid("width", width))?;
    let ny = u32::try_from(height).ok().filter(|&h| h > 0).ok_or(invalid("height", height))?;

    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(GridError::InvalidArgument { name: "cell size", value: spacing });
    }

    let max_samples = isize::MAX as usize / std::mem::size_of::<f32>();
    let samples = width
        .checked_add(1)
        .and_then(|w| w.checked_mul(height))
        .zip(height.checked_add(1).and_then(|h| h.checked_mul(width)))
        .map(|(u, v)| u.max(v))
        .filter(|&n| n <= max_samples);

    if samples.is_none() {
        return Err(invalid("cell count", width.saturating_mul(height)));
    }

    Ok(UVec2::new(nx, ny))
}

/// Bilinearly samples a `cols` by `rows` lattice stored row-major in `g`.
///
/// `p` is in lattice coordinates, so sample `(a, b)` sits at `(a, b)`. Coordinates outside the
/// lattice are clamped to its border.
pub(crate) fn bilerp(g: &[f32], cols: usize, rows: usize, p: Vec2) -> f32 {
    let max = UVec2::new(cols as u32 - 1, rows as u32 - 1);
    let p = p.clamp(Vec2::ZERO, max.as_vec2());

    let p0 = p.floor().as_uvec2().min(max);
    let p1 = (p0 + 1).min(max);
    let t = p - p0.as_vec2();
    let s = 1.0 - t;

    let (x0, y0) = (p0.x as usize, p0.y as usize);
    let (x1, y1) = (p1.x as usize, p1.y as usize);

    let g00 = g[x0 + cols * y0];
    let g10 = g[x1 + cols * y0];
    let g01 = g[x0 + cols * y1];
    let g11 = g[x1 + cols * y1];

    g00 * s.x * s.y
        + g10 * t.x * s.y
        + g01 * s.x * t.y
        + g11 * t.x * t.y
}

#[derive(Debug, Error)]
pub enum GridError {
    #[error("invalid {name}: {value}")]
    InvalidArgument {
        name: &'static str,
        value: f32,
    },
    #[error(transparent)]
    Shape(#[from] ShapeError),
}
