use glam::{Vec2, Vec3};

use super::ImplicitSurface;

pub struct TorusSurface {
    pub radius: f32,
    pub tube: f32,
}

impl ImplicitSurface for TorusSurface {
    fn distance(&self, p: Vec3) -> f32 {
        let q = Vec2::new(p.truncate().length() - self.radius, p.z);
        q.length() - self.tube
    }
}
