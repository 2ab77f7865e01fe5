use log::trace;
use ndarray::azip;

use crate::{obstacle::ObstacleSet, Fluid};

use super::{mac_2d::MacGrid2D, SmokeParams};

impl MacGrid2D {
    /// Advances the simulation by `dt` with the default solver constants.
    ///
    /// `viscosity` and `diffusion` are accepted but not solved for. Velocities are instead
    /// damped by a constant factor each step.
    pub fn step(&mut self, dt: f32, viscosity: f32, diffusion: f32, buoyancy: f32) {
        let params = SmokeParams {
            viscosity,
            diffusion,
            buoyancy,
            ..SmokeParams::default()
        };

        self.step_with(dt, &params);
    }

    /// Advances the simulation by `dt`. Does nothing unless `dt` is positive.
    pub fn step_with(&mut self, dt: f32, params: &SmokeParams) {
        if dt <= 0.0 || !dt.is_finite() {
            trace!("skipping step with dt = {dt}");
            return;
        }

        self.snapshot();

        self.advect_u(dt);
        self.advect_v(dt);
        self.advect_density(dt);

        self.decay_velocities(params.velocity_decay);

        if params.buoyancy != 0.0 {
            self.apply_buoyancy(dt, params.buoyancy);
        }

        self.project(dt, params.num_pressure_iters);
    }

    fn decay_velocities(&mut self, factor: f32) {
        self.u.iter_mut().for_each(|u| *u *= factor);
        self.v.iter_mut().for_each(|v| *v *= factor);
    }

    /// Pushes every interior Y edge by the average density of the two cells it separates.
    fn apply_buoyancy(&mut self, dt: f32, buoyancy: f32) {
        let nx = self.nx;
        if self.ny < 2 {
            return;
        }

        let k = 0.5 * buoyancy * dt;
        let below = &self.density[..nx * (self.ny - 1)];
        let above = &self.density[nx..];
        let interior = &mut self.v[nx..nx * self.ny];

        azip!((v in interior, &d0 in below, &d1 in above) {
            *v += k * (d0 + d1);
        });
    }
}

impl Fluid<2> for MacGrid2D {
    type Params = SmokeParams;

    fn step(&mut self, dt: f32, params: &Self::Params, obstacles: &ObstacleSet<2>) {
        self.set_obstacles(obstacles);
        self.step_with(dt, params);
    }

    fn clear(&mut self) {
        MacGrid2D::clear(self);
    }
}
