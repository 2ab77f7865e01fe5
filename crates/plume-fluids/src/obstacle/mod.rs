use std::collections::HashMap;

pub mod circle;
pub mod rect;

/// A static, impermeable region of the domain described by its signed distance.
pub trait Obstacle<const D: usize> {
    /// Signed distance from `p` to the obstacle surface, negative inside.
    fn sdf(&self, p: [f32; D]) -> f32;

    fn contains(&self, p: [f32; D]) -> bool {
        self.sdf(p) < 0.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObstacleId(pub usize);

/// Union of obstacles, keyed by ID.
#[derive(Default)]
pub struct ObstacleSet<const D: usize> {
    pub obstacles: HashMap<usize, Box<dyn Obstacle<D>>>,
}

impl<const D: usize> ObstacleSet<D> {
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

impl<const D: usize> Obstacle<D> for ObstacleSet<D> {
    /// The closest obstacle wins. An empty set is infinitely far away.
    fn sdf(&self, p: [f32; D]) -> f32 {
        self.obstacles
            .values()
            .map(|obstacle| obstacle.sdf(p))
            .fold(f32::MAX, f32::min)
    }
}
