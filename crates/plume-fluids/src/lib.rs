use obstacle::ObstacleSet;

pub mod brush;
pub mod obstacle;
pub mod scene;
pub mod smoke;

pub use smoke::{mac_2d::{GridError, MacGrid2D}, SmokeParams};

pub trait Fluid<const D: usize> {
    type Params;

    fn step(&mut self, dt: f32, params: &Self::Params, obstacles: &ObstacleSet<D>);

    /// Zeroes the simulated state, keeping the domain and its solid cells.
    fn clear(&mut self);
}
