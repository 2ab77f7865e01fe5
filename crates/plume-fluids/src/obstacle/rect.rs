use glam::Vec2;

use super::Obstacle;

/// Axis aligned box between two corners, in meters.
#[derive(Debug, Clone, Copy)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Rect {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn center(&self) -> Vec2 {
        0.5 * (self.min + self.max)
    }
}

impl Obstacle<2> for Rect {
    fn sdf(&self, p: [f32; 2]) -> f32 {
        let half = 0.5 * (self.max - self.min);
        let q = (Vec2::from(p) - self.center()).abs() - half;

        q.max(Vec2::ZERO).length() + q.max_element().min(0.0)
    }
}
