//! The solvers used to intersect rays with implicit surfaces.

use glam::Vec3;

use crate::ray::Ray;

/// Data about the intersection of a ray and an implicit surface
pub struct ImplicitSolution {
    pub t: f32,
    pub point: Vec3,
    /// Gradient of the distance function at `point`.
    ///
    /// This will be wrong if the function is not smooth there
    pub normal: Vec3,
}

/// An algorithm finding the first `t` in the ray range such that `f(ray.at(t))` is near 0
pub trait ImplicitSolver: Send + Sync {
    /// Return None if no root is found
    fn solve<F: Fn(Vec3) -> f32>(&self, f: F, ray: &Ray) -> Option<ImplicitSolution>;
}

/// Sphere tracing: march along the ray by the distance to the surface.
///
/// Only correct for functions that never over-estimate the distance.
pub struct SphereTracer {
    /// Accepted distance to the surface, also used as the gradient step
    pub eps: f32,
    pub max_iter: usize,
    /// Used instead of the ray's far bound when that bound is infinite
    pub max_distance: f32,
}

impl Default for SphereTracer {
    fn default() -> Self {
        Self {
            eps: 1e-4,
            max_iter: 256,
            max_distance: 1e4,
        }
    }
}

impl ImplicitSolver for SphereTracer {
    fn solve<F: Fn(Vec3) -> f32>(&self, f: F, ray: &Ray) -> Option<ImplicitSolution> {
        let (start, end) = ray.bounds;
        let end = end.min(start + self.max_distance);

        let mut t = start;
        for _ in 0..self.max_iter {
            let d = f(ray.at(t));
            if d.is_nan() {
                return None;
            }
            if d.abs() < self.eps {
                let point = ray.at(t);
                return Some(ImplicitSolution {
                    t,
                    point,
                    normal: gradient(&f, point, self.eps),
                });
            }
            t += d.abs();
            if t > end {
                return None;
            }
        }
        None
    }
}

fn gradient<F: Fn(Vec3) -> f32>(f: &F, p: Vec3, eps: f32) -> Vec3 {
    let dx = f(p + eps * Vec3::X) - f(p - eps * Vec3::X);
    let dy = f(p + eps * Vec3::Y) - f(p - eps * Vec3::Y);
    let dz = f(p + eps * Vec3::Z) - f(p - eps * Vec3::Z);
    Vec3::new(dx, dy, dz).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn sphere_distance() {
        let solver = SphereTracer::default();
        let unit_sphere = |p: Vec3| p.length() - 1.0;
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);

        let solution = solver.solve(unit_sphere, &ray).unwrap();
        assert!((solution.t - 4.0).abs() < 1e-3);
        assert!(solution.normal.distance(Vec3::NEG_X) < 1e-3);
    }

    #[test]
    fn out_of_range() {
        let solver = SphereTracer::default();
        let unit_sphere = |p: Vec3| p.length() - 1.0;
        let ray = Ray::new_with_range(Vec3::new(-5.0, 0.0, 0.0), Vec3::X, 0.0..=2.0);
        assert!(solver.solve(unit_sphere, &ray).is_none());
    }
}
