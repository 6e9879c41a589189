use glam::{Vec2, Vec3};

use crate::ray::Ray;

use super::{IntersectionResult, RayIntersection, Shape};

/// A finite, double sided rectangle lying in the local XY plane.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub size: Vec2,
}

impl Plane {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }
}

impl Shape for Plane {
    fn intersect(&self, ray: &Ray) -> IntersectionResult {
        if ray.direction.z == 0.0 {
            return IntersectionResult::NoIntersection;
        }
        let t = -ray.origin.z / ray.direction.z;
        if !ray.range().contains(&t) {
            return IntersectionResult::NoIntersection;
        }

        let point = ray.at(t);
        let half = 0.5 * self.size;
        if point.x.abs() > half.x || point.y.abs() > half.y {
            return IntersectionResult::NoIntersection;
        }

        // Double sided: the normal faces the incoming ray
        let normal = if ray.direction.z < 0.0 {
            Vec3::Z
        } else {
            Vec3::NEG_Z
        };
        IntersectionResult::Intersection(RayIntersection { t, point, normal })
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn both_sides() {
        let plane = Plane::new(30.0, 30.0);

        let front = plane
            .intersect(&Ray::new(Vec3::new(1.0, 1.0, 10.0), Vec3::NEG_Z))
            .into_option()
            .unwrap();
        assert_eq!(front.normal, Vec3::Z);

        let back = plane
            .intersect(&Ray::new(Vec3::new(1.0, 1.0, -10.0), Vec3::Z))
            .into_option()
            .unwrap();
        assert_eq!(back.normal, Vec3::NEG_Z);
        assert!((back.t - 10.0).abs() < 1e-5);
    }

    #[test]
    fn outside_rectangle() {
        let plane = Plane::new(2.0, 2.0);
        let ray = Ray::new(Vec3::new(1.5, 0.0, 10.0), Vec3::NEG_Z);
        assert!(!plane.intersect(&ray).is_intersection());

        let grazing = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::X);
        assert!(!plane.intersect(&grazing).is_intersection());
    }
}
