use crate::ray::Ray;

use super::{IntersectionResult, RayIntersection, Shape};

/// A sphere centered on the local origin.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    pub radius: f32,
}

impl Shape for Sphere {
    fn intersect(&self, ray: &Ray) -> IntersectionResult {
        let a = ray.direction.length_squared();
        let b_half = ray.origin.dot(ray.direction);
        let c = ray.origin.length_squared() - self.radius * self.radius;

        let discriminant_quarter = b_half * b_half - a * c;
        if discriminant_quarter < 0.0 || a == 0.0 {
            return IntersectionResult::NoIntersection;
        }

        // Either the first hit is in range, or the second one may be
        let sqrt_d = discriminant_quarter.sqrt();
        let range = ray.range();
        let near = (-b_half - sqrt_d) / a;
        let far = (-b_half + sqrt_d) / a;
        let t = if range.contains(&near) {
            near
        } else if range.contains(&far) {
            far
        } else {
            return IntersectionResult::NoIntersection;
        };

        let point = ray.at(t);
        IntersectionResult::Intersection(RayIntersection {
            t,
            point,
            normal: (point / self.radius).normalize_or_zero(),
        })
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self { radius: 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn hit_from_outside() {
        let sphere = Sphere { radius: 4.0 };
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        let hit = sphere.intersect(&ray).into_option().unwrap();

        assert!((hit.t - 6.0).abs() < 1e-5);
        assert!(hit.point.distance(Vec3::new(0.0, 0.0, 4.0)) < 1e-5);
        assert!(hit.normal.distance(Vec3::Z) < 1e-5);
    }

    #[test]
    fn hit_from_inside() {
        let sphere = Sphere { radius: 1.0 };
        let hit = sphere
            .intersect(&Ray::new(Vec3::ZERO, Vec3::X))
            .into_option()
            .unwrap();
        assert!((hit.t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn miss() {
        let sphere = Sphere { radius: 1.0 };
        let ray = Ray::new(Vec3::new(0.0, 2.0, 10.0), Vec3::NEG_Z);
        assert!(!sphere.intersect(&ray).is_intersection());

        // behind the origin of the ray
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);
        assert!(!sphere.intersect(&ray).is_intersection());
    }
}
