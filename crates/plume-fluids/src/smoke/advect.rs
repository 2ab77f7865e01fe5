use glam::Vec2;

use super::mac_2d::{bilerp, MacGrid2D};

impl MacGrid2D {
    /// Copies the current velocities and densities into the buffers read by advection.
    pub(crate) fn snapshot(&mut self) {
        self.u_prev.copy_from_slice(&self.u);
        self.v_prev.copy_from_slice(&self.v);
        self.density_prev.copy_from_slice(&self.density);
    }

    /// Keeps a backtraced position, in cell units, half a cell away from the domain walls.
    #[inline]
    fn clamp_backtrace(&self, p: Vec2) -> Vec2 {
        p.clamp(Vec2::splat(0.5), self.grid_size.as_vec2() - 0.5)
    }

    /// Semi-Lagrangian advection of the X velocities through the snapshot velocity field.
    pub(crate) fn advect_u(&mut self, dt: f32) {
        let nx = self.nx;
        let ny = self.ny;
        let k = dt * self.inv_spacing;

        for j in 0..ny {
            for i in 0..=nx {
                let u_idx = self.u_idx(i, j);

                if i == 0 || i == nx || self.is_solid(i - 1, j) || self.is_solid(i, j) {
                    self.u[u_idx] = 0.0;
                    continue;
                }

                let v = 0.25 * (self.v_prev[self.v_idx(i - 1, j)]
                    + self.v_prev[self.v_idx(i, j)]
                    + self.v_prev[self.v_idx(i - 1, j + 1)]
                    + self.v_prev[self.v_idx(i, j + 1)]);
                let vel = Vec2::new(self.u_prev[u_idx], v);

                let p = self.clamp_backtrace(Vec2::new(i as f32, j as f32 + 0.5) - k * vel);
                self.u[u_idx] = bilerp(&self.u_prev, nx + 1, ny, p - Vec2::new(0.0, 0.5));
            }
        }
    }

    /// Semi-Lagrangian advection of the Y velocities through the snapshot velocity field.
    pub(crate) fn advect_v(&mut self, dt: f32) {
        let nx = self.nx;
        let ny = self.ny;
        let k = dt * self.inv_spacing;

        for j in 0..=ny {
            for i in 0..nx {
                let v_idx = self.v_idx(i, j);

                if j == 0 || j == ny || self.is_solid(i, j - 1) || self.is_solid(i, j) {
                    self.v[v_idx] = 0.0;
                    continue;
                }

                let u = 0.25 * (self.u_prev[self.u_idx(i, j - 1)]
                    + self.u_prev[self.u_idx(i + 1, j - 1)]
                    + self.u_prev[self.u_idx(i, j)]
                    + self.u_prev[self.u_idx(i + 1, j)]);
                let vel = Vec2::new(u, self.v_prev[v_idx]);

                let p = self.clamp_backtrace(Vec2::new(i as f32 + 0.5, j as f32) - k * vel);
                self.v[v_idx] = bilerp(&self.v_prev, nx, ny + 1, p - Vec2::new(0.5, 0.0));
            }
        }
    }

    /// Semi-Lagrangian advection of the cell-centered density. Solid cells end up empty.
    pub(crate) fn advect_density(&mut self, dt: f32) {
        let nx = self.nx;
        let ny = self.ny;
        let k = dt * self.inv_spacing;

        for j in 0..ny {
            for i in 0..nx {
                let idx = self.idx(i, j);

                if self.is_solid(i, j) {
                    self.density[idx] = 0.0;
                    continue;
                }

                let vel = Vec2::new(
                    0.5 * (self.u_prev[self.u_idx(i, j)] + self.u_prev[self.u_idx(i + 1, j)]),
                    0.5 * (self.v_prev[self.v_idx(i, j)] + self.v_prev[self.v_idx(i, j + 1)]),
                );

                let p = self.clamp_backtrace(Vec2::new(i as f32 + 0.5, j as f32 + 0.5) - k * vel);
                self.density[idx] = bilerp(&self.density_prev, nx, ny, p - 0.5);
            }
        }
    }
}
