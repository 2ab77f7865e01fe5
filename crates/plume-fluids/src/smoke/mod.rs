pub mod mac_2d;
mod advect;
mod project;
mod solid;
mod step;

/// Number of Jacobi sweeps run by every pressure projection.
pub const DEFAULT_PRESSURE_ITERS: usize = 40;
/// Factor every velocity sample is multiplied by once per step.
pub const DEFAULT_VELOCITY_DECAY: f32 = 0.99;

/// Cell is open to the fluid.
pub const FLUID: u8 = 0;
/// Cell was marked solid by a brush or the host.
pub const SOLID_PAINTED: u8 = 1;
/// Cell was marked solid by obstacle rasterization.
pub const SOLID_OBSTACLE: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmokeParams {
    /// Accepted for completeness. Viscous relaxation is replaced by [`Self::velocity_decay`].
    pub viscosity: f32,
    /// Accepted for completeness. Density is only moved by advection.
    pub diffusion: f32,
    /// Upward acceleration per unit of density.
    pub buoyancy: f32,
    /// Multiplicative velocity damping applied once per step.
    pub velocity_decay: f32,
    /// Number of Jacobi iterations in the pressure solve. Never exits early.
    pub num_pressure_iters: usize,
}

impl Default for SmokeParams {
    fn default() -> Self {
        Self {
            viscosity: 0.00001,
            diffusion: 0.00001,
            buoyancy: 0.0,
            velocity_decay: DEFAULT_VELOCITY_DECAY,
            num_pressure_iters: DEFAULT_PRESSURE_ITERS,
        }
    }
}
