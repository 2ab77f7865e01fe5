use log::trace;

use super::{obstacle::{Obstacle, ObstacleId, ObstacleSet}, Fluid};

/// Owns a fluid together with everything the host loop feeds it every frame.
pub struct Scene<const D: usize, F, P> {
    /// The fluid for this scene.
    pub fluid: F,
    /// The parameters for this scene's fluid.
    pub params: P,
    /// The obstacles in this scene.
    obstacles: ObstacleSet<D>,
    /// The number of obstacles ever added (used for IDs).
    n_obstacles: usize,
    /// Simulated time, in seconds.
    time: f32,
    /// Number of steps taken.
    frame: u64,
}

impl<const D: usize, F: Fluid<D, Params = P>, P> Scene<D, F, P> {
    #[inline(always)]
    pub fn new(fluid: F, params: P) -> Self {
        Self {
            fluid,
            params,
            obstacles: ObstacleSet::default(),
            n_obstacles: 0,
            time: 0.0,
            frame: 0,
        }
    }

    #[inline(always)]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline(always)]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn obstacles(&self) -> &ObstacleSet<D> {
        &self.obstacles
    }

    /// Adds an obstacle to the set, returning its ID.
    pub fn add_obstacle<T: Obstacle<D> + 'static>(&mut self, obstacle: T) -> ObstacleId {
        let i = self.n_obstacles;
        self.n_obstacles += 1;

        self.obstacles.obstacles.insert(i, Box::new(obstacle));
        ObstacleId(i)
    }

    /// Removes an obstacle from the set, given its ID.
    pub fn remove_obstacle(&mut self, id: ObstacleId) -> Option<Box<dyn Obstacle<D>>> {
        self.obstacles.obstacles.remove(&id.0)
    }

    /// Insert an obstacle into the set at the given ID, overriding and returning the old value if
    /// it was previously in the set.
    pub fn insert_obstacle<T: Obstacle<D> + 'static>(&mut self, id: ObstacleId, obstacle: T) -> Option<Box<dyn Obstacle<D>>> {
        self.obstacles.obstacles.insert(id.0, Box::new(obstacle))
    }

    /// Advances the fluid by one frame. Time never moves backwards.
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 || !dt.is_finite() {
            trace!("scene ignoring dt = {dt} at frame {}", self.frame);
            return;
        }

        self.fluid.step(dt, &self.params, &self.obstacles);

        self.time += dt;
        self.frame += 1;
    }

    /// Resets the fluid state and the clock, keeping obstacles.
    pub fn reset(&mut self) {
        self.fluid.clear();
        self.time = 0.0;
        self.frame = 0;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::Scene;
    use crate::{obstacle::{circle::Circle, ObstacleId}, smoke::SOLID_OBSTACLE, MacGrid2D, SmokeParams};

    fn scene() -> Scene<2, MacGrid2D, SmokeParams> {
        Scene::new(MacGrid2D::new(16, 16, 0.25).unwrap(), SmokeParams::default())
    }

    #[test]
    fn clock_only_moves_forward() {
        let mut scene = scene();

        scene.step(0.02);
        scene.step(0.0);
        scene.step(-0.5);
        scene.step(f32::NAN);
        scene.step(0.03);

        assert_eq!(scene.frame(), 2);
        assert!((scene.time() - 0.05).abs() < 1e-6);

        scene.reset();
        assert_eq!(scene.frame(), 0);
        assert_eq!(scene.time(), 0.0);
    }

    #[test]
    fn obstacle_ids_are_never_reused() {
        let mut scene = scene();

        let a = scene.add_obstacle(Circle::new(Vec2::splat(1.0), 0.5));
        let b = scene.add_obstacle(Circle::new(Vec2::splat(3.0), 0.5));
        assert_eq!((a, b), (ObstacleId(0), ObstacleId(1)));

        assert!(scene.remove_obstacle(a).is_some());
        assert!(scene.remove_obstacle(a).is_none());
        assert_eq!(scene.add_obstacle(Circle::new(Vec2::ZERO, 0.1)), ObstacleId(2));
        assert!(scene.insert_obstacle(b, Circle::new(Vec2::splat(2.0), 0.5)).is_some());
        assert_eq!(scene.obstacles().len(), 2);
    }

    #[test]
    fn stepping_applies_obstacles_to_the_grid() {
        let mut scene = scene();
        let id = scene.add_obstacle(Circle::new(Vec2::splat(2.0), 0.6));

        scene.step(0.02);
        let center = scene.fluid.idx(8, 8);
        assert_eq!(scene.fluid.solid[center], SOLID_OBSTACLE);

        scene.remove_obstacle(id);
        scene.step(0.02);
        assert!(!scene.fluid.is_solid(8, 8));
    }
}
