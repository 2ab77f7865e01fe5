use glam::Vec2;

use super::Obstacle;

#[derive(Debug, Clone, Copy)]
pub struct Circle {
    pub position: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Circle {
            position: pos,
            radius,
        }
    }
}

impl Obstacle<2> for Circle {
    fn sdf(&self, p: [f32; 2]) -> f32 {
        Vec2::from(p).distance(self.position) - self.radius
    }
}
