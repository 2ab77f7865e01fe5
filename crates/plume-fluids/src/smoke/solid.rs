use glam::Vec2;
use log::trace;

use crate::obstacle::{Obstacle, ObstacleSet};

use super::{mac_2d::MacGrid2D, FLUID, SOLID_OBSTACLE, SOLID_PAINTED};

impl MacGrid2D {
    /// Marks or unmarks cell `(i, j)` as a painted solid. Marking a cell empties its density.
    ///
    /// Cells owned by obstacles are left alone.
    pub fn set_solid(&mut self, i: usize, j: usize, solid: bool) {
        let idx = self.idx(i, j);

        match (self.solid[idx], solid) {
            (FLUID, true) => {
                self.solid[idx] = SOLID_PAINTED;
                self.density[idx] = 0.0;
            }
            (SOLID_PAINTED, false) => self.solid[idx] = FLUID,
            _ => {}
        }
    }

    /// Rasterizes the obstacles into the solid mask, sampling their distance at cell centers.
    ///
    /// Cells newly covered by an obstacle lose their density. Cells an obstacle no longer covers
    /// become fluid again. Painted solids are never touched.
    pub fn set_obstacles(&mut self, obstacles: &ObstacleSet<2>) {
        let mut covered = 0;

        for j in 0..self.ny {
            for i in 0..self.nx {
                let idx = self.idx(i, j);
                if self.solid[idx] == SOLID_PAINTED {
                    continue;
                }

                let p = Vec2::new(i as f32 + 0.5, j as f32 + 0.5) * self.spacing;
                let inside = !obstacles.obstacles.is_empty() && obstacles.contains(p.into());

                if inside {
                    if self.solid[idx] != SOLID_OBSTACLE {
                        self.density[idx] = 0.0;
                    }

                    self.solid[idx] = SOLID_OBSTACLE;
                    covered += 1;
                } else if self.solid[idx] == SOLID_OBSTACLE {
                    self.solid[idx] = FLUID;
                }
            }
        }

        trace!("{covered} cells covered by {} obstacles", obstacles.obstacles.len());
    }
}
