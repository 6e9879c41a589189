use glam::Vec3;

use crate::ray::Ray;

use super::{IntersectionResult, RayIntersection, Shape};

/// Axis aligned box centered on the local origin.
#[derive(Debug, Clone, Copy)]
pub struct Cuboid {
    /// Should have all coordinates > 0
    pub half_extents: Vec3,
}

impl Cuboid {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            half_extents: 0.5 * Vec3::new(width, height, depth),
        }
    }
}

impl Default for Cuboid {
    /// Unit cube
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

impl Shape for Cuboid {
    fn intersect(&self, ray: &Ray) -> IntersectionResult {
        // Slab method: R(t) = origin + t * dir must lie between -h and h on every axis.
        // Division by a zero component gives +/- infinity, which the min/max below handle.
        let inv_dir = ray.direction.recip();
        let ts_start = (-self.half_extents - ray.origin) * inv_dir;
        let ts_end = (self.half_extents - ray.origin) * inv_dir;

        let t_enter = ts_start.min(ts_end).max_element();
        let t_exit = ts_start.max(ts_end).min_element();

        if t_enter.is_nan() || t_exit.is_nan() || t_enter > t_exit {
            return IntersectionResult::NoIntersection;
        }

        let range = ray.range();
        let t = if range.contains(&t_enter) {
            t_enter
        } else if range.contains(&t_exit) {
            t_exit
        } else {
            return IntersectionResult::NoIntersection;
        };

        let point = ray.at(t);
        IntersectionResult::Intersection(RayIntersection {
            t,
            point,
            normal: self.face_normal(point),
        })
    }
}

impl Cuboid {
    /// Normal of the face closest to `p`
    fn face_normal(&self, p: Vec3) -> Vec3 {
        let d = (p / self.half_extents).abs();
        if d.x >= d.y && d.x >= d.z {
            Vec3::X * p.x.signum()
        } else if d.y >= d.z {
            Vec3::Y * p.y.signum()
        } else {
            Vec3::Z * p.z.signum()
        }
    }
}
