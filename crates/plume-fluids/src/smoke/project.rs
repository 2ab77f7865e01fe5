use super::mac_2d::MacGrid2D;

impl MacGrid2D {
    /// Makes the velocity field divergence free inside the domain, then seals solid cells and
    /// the domain walls.
    pub(crate) fn project(&mut self, dt: f32, num_iters: usize) {
        self.compute_divergence(dt);
        self.solve_pressure(num_iters);
        self.subtract_pressure_gradient(dt);
        self.enforce_solid_boundaries();
    }

    fn compute_divergence(&mut self, dt: f32) {
        self.pressure.fill(0.0);
        self.divergence.fill(0.0);

        let scale = -self.spacing * self.spacing / dt;

        for j in 1..self.ny.saturating_sub(1) {
            for i in 1..self.nx.saturating_sub(1) {
                let idx = self.idx(i, j);
                self.divergence[idx] = scale * self.velocity_divergence(i, j);
            }
        }
    }

    /// Pressure of the neighbor at `n`, or of the cell itself when the neighbor is solid.
    #[inline]
    fn neighbor_pressure(&self, p: &[f32], idx: usize, n: usize) -> f32 {
        if self.solid[n] != super::FLUID { p[idx] } else { p[n] }
    }

    /// Runs exactly `num_iters` Jacobi sweeps over the interior fluid cells.
    fn solve_pressure(&mut self, num_iters: usize) {
        let nx = self.nx;
        let ny = self.ny;

        for _iter in 0..num_iters {
            apply_pressure_bc(&mut self.pressure, nx, ny);
            self.pressure_next.copy_from_slice(&self.pressure);

            for j in 1..ny.saturating_sub(1) {
                for i in 1..nx.saturating_sub(1) {
                    let idx = self.idx(i, j);
                    if self.solid[idx] != super::FLUID {
                        continue;
                    }

                    let p = &self.pressure;
                    let sum = self.neighbor_pressure(p, idx, idx - 1)
                        + self.neighbor_pressure(p, idx, idx + 1)
                        + self.neighbor_pressure(p, idx, idx - nx)
                        + self.neighbor_pressure(p, idx, idx + nx);

                    self.pressure_next[idx] = 0.25 * (self.divergence[idx] + sum);
                }
            }

            std::mem::swap(&mut self.pressure, &mut self.pressure_next);
        }

        apply_pressure_bc(&mut self.pressure, nx, ny);
    }

    fn subtract_pressure_gradient(&mut self, dt: f32) {
        let nx = self.nx;
        let k = dt * self.inv_spacing;

        for j in 1..self.ny.saturating_sub(1) {
            for i in 1..nx.saturating_sub(1) {
                let idx = self.idx(i, j);
                if self.solid[idx] != super::FLUID {
                    continue;
                }

                let p = &self.pressure;
                let dx = p[idx] - self.neighbor_pressure(p, idx, idx - 1);
                let dy = p[idx] - self.neighbor_pressure(p, idx, idx - nx);

                let u_idx = self.u_idx(i, j);
                let v_idx = self.v_idx(i, j);
                self.u[u_idx] -= k * dx;
                self.v[v_idx] -= k * dy;
            }
        }
    }

    /// Zeroes the edges of every solid cell, then the domain walls.
    pub(crate) fn enforce_solid_boundaries(&mut self) {
        let nx = self.nx;
        let ny = self.ny;

        for j in 0..ny {
            for i in 0..nx {
                if !self.is_solid(i, j) {
                    continue;
                }

                let (l, r) = (self.u_idx(i, j), self.u_idx(i + 1, j));
                let (b, t) = (self.v_idx(i, j), self.v_idx(i, j + 1));
                self.u[l] = 0.0;
                self.u[r] = 0.0;
                self.v[b] = 0.0;
                self.v[t] = 0.0;
            }
        }

        for j in 0..ny {
            let (l, r) = (self.u_idx(0, j), self.u_idx(nx, j));
            self.u[l] = 0.0;
            self.u[r] = 0.0;
        }

        for i in 0..nx {
            let (b, t) = (self.v_idx(i, 0), self.v_idx(i, ny));
            self.v[b] = 0.0;
            self.v[t] = 0.0;
        }
    }
}

/// Zero-gradient walls: every border cell copies its nearest interior neighbor.
fn apply_pressure_bc(p: &mut [f32], nx: usize, ny: usize) {
    if ny >= 2 {
        for i in 0..nx {
            p[i] = p[i + nx];
            p[i + nx * (ny - 1)] = p[i + nx * (ny - 2)];
        }
    }

    if nx >= 2 {
        for j in 0..ny {
            p[nx * j] = p[1 + nx * j];
            p[(nx - 1) + nx * j] = p[(nx - 2) + nx * j];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::apply_pressure_bc;
    use crate::smoke::{mac_2d::MacGrid2D, DEFAULT_PRESSURE_ITERS, SOLID_OBSTACLE};

    #[test]
    fn projection_reduces_divergence_of_a_single_edge() {
        let mut grid = MacGrid2D::new(10, 10, 1.0).unwrap();
        let i = grid.v_idx(5, 6);
        grid.v[i] = 5.0;

        let before = grid.max_abs_divergence();
        grid.project(0.1, DEFAULT_PRESSURE_ITERS);
        let after = grid.max_abs_divergence();

        assert_eq!(before, 5.0);
        assert!(after < 0.1 * before, "divergence went from {before} to {after}");
    }

    #[test]
    fn projection_reduces_divergence_around_obstacles() {
        let mut grid = MacGrid2D::new(12, 12, 0.5).unwrap();
        for j in 4..7 {
            let s = grid.idx(6, j);
            grid.solid[s] = SOLID_OBSTACLE;
        }

        let i = grid.u_idx(4, 5);
        grid.u[i] = 3.0;
        let i = grid.v_idx(8, 3);
        grid.v[i] = -2.0;

        let before = grid.max_abs_divergence();
        grid.project(0.05, DEFAULT_PRESSURE_ITERS);

        assert!(grid.max_abs_divergence() < before);
    }

    #[test]
    fn rhs_is_scaled_divergence() {
        let mut grid = MacGrid2D::new(5, 5, 0.5).unwrap();
        let i = grid.u_idx(3, 2);
        grid.u[i] = 1.0;

        grid.compute_divergence(0.25);

        // div = 1 / 0.5 = 2, rhs = -2 * 0.25 / 0.25
        assert_eq!(grid.divergence[grid.idx(2, 2)], -2.0);
        assert_eq!(grid.divergence[grid.idx(3, 2)], 2.0);
        assert!(grid.pressure.iter().all(|&p| p == 0.0));
    }

    #[test]
    fn zero_iterations_leave_interior_velocities_alone() {
        let mut grid = MacGrid2D::new(6, 6, 1.0).unwrap();
        let i = grid.u_idx(3, 3);
        grid.u[i] = 2.0;

        grid.project(0.1, 0);

        assert_eq!(grid.u[i], 2.0);
    }

    #[test]
    fn runs_exactly_the_requested_sweeps() {
        let mut grid = MacGrid2D::new(10, 10, 1.0).unwrap();
        let e = grid.v_idx(5, 6);
        grid.v[e] = 5.0;
        grid.compute_divergence(0.1);

        let mut one = grid.clone();
        one.solve_pressure(1);
        for (p, d) in one.pressure.iter().zip(&one.divergence) {
            if *d != 0.0 {
                assert_eq!(*p, 0.25 * d);
            }
        }

        let mut forty = grid.clone();
        forty.solve_pressure(DEFAULT_PRESSURE_ITERS);
        let mut forty_one = grid.clone();
        forty_one.solve_pressure(DEFAULT_PRESSURE_ITERS + 1);

        let c = grid.idx(5, 5);
        assert_ne!(forty.pressure[c], forty_one.pressure[c]);
        assert_ne!(forty.pressure, one.pressure);

        let mut projected = grid.clone();
        projected.project(0.1, DEFAULT_PRESSURE_ITERS);
        assert_eq!(projected.pressure, forty.pressure);
    }

    #[test]
    fn solid_and_wall_edges_are_sealed() {
        let mut grid = MacGrid2D::new(7, 5, 1.0).unwrap();
        grid.u.fill(1.0);
        grid.v.fill(-1.0);
        let s = grid.idx(3, 2);
        grid.solid[s] = SOLID_OBSTACLE;

        grid.project(0.1, DEFAULT_PRESSURE_ITERS);

        assert_eq!(grid.u[grid.u_idx(3, 2)], 0.0);
        assert_eq!(grid.u[grid.u_idx(4, 2)], 0.0);
        assert_eq!(grid.v[grid.v_idx(3, 2)], 0.0);
        assert_eq!(grid.v[grid.v_idx(3, 3)], 0.0);
        assert!((0..grid.ny).all(|j| grid.u[grid.u_idx(0, j)] == 0.0 && grid.u[grid.u_idx(grid.nx, j)] == 0.0));
        assert!((0..grid.nx).all(|i| grid.v[grid.v_idx(i, 0)] == 0.0 && grid.v[grid.v_idx(i, grid.ny)] == 0.0));
    }

    #[test]
    fn pressure_bc_copies_interior_neighbors() {
        let (nx, ny) = (4, 3);
        let mut p: Vec<f32> = (0..nx * ny).map(|i| i as f32).collect();

        apply_pressure_bc(&mut p, nx, ny);

        // Rows first, then columns, so corners take the column copy.
        assert_eq!(p, vec![
            5.0, 5.0, 6.0, 6.0,
            5.0, 5.0, 6.0, 6.0,
            5.0, 5.0, 6.0, 6.0,
        ]);
    }

    #[test]
    fn degenerate_grids_project_without_panicking() {
        for &(w, h) in &[(1, 1), (1, 5), (5, 1), (2, 2)] {
            let mut grid = MacGrid2D::new(w, h, 1.0).unwrap();
            grid.u.fill(1.0);
            grid.v.fill(1.0);

            grid.project(0.1, DEFAULT_PRESSURE_ITERS);

            assert!(grid.pressure.iter().all(|&p| p == 0.0));
        }
    }
}
