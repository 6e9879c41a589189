//! Pickable geometry.
//!
//! Every shape is defined in its own local frame, centered on the origin. The
//! owning [crate::scene::SceneObject] carries the transform; rays are brought
//! into the local frame before calling [Shape::intersect].
//!
//! There are two kinds of shapes: explicit ones, whose intersection has a
//! closed form ([Sphere], [Cuboid], [Plane]), and implicit ones, defined by a
//! distance function and solved numerically (see [implicit]).

pub mod cuboid;
pub mod implicit;
pub mod plane;
pub mod sphere;

use glam::Vec3;

use crate::ray::Ray;

pub use cuboid::Cuboid;
pub use implicit::Torus;
pub use plane::Plane;
pub use sphere::Sphere;

/// A shape that can be hit by a ray.
pub trait Shape: Send + Sync {
    /// Closest intersection of `ray` with the shape within `ray.range()`
    fn intersect(&self, ray: &Ray) -> IntersectionResult;
}

/// Where a ray met a shape, in the frame of the ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayIntersection {
    pub t: f32,
    pub point: Vec3,
    pub normal: Vec3,
}

/// A `Result`-like type that takes care of intersection data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntersectionResult {
    Intersection(RayIntersection),
    NoIntersection,
}

impl IntersectionResult {
    pub fn is_intersection(&self) -> bool {
        matches!(self, IntersectionResult::Intersection(_))
    }

    pub fn into_option(self) -> Option<RayIntersection> {
        match self {
            IntersectionResult::Intersection(i) => Some(i),
            IntersectionResult::NoIntersection => None,
        }
    }
}

impl From<Option<RayIntersection>> for IntersectionResult {
    fn from(value: Option<RayIntersection>) -> Self {
        value.map_or(IntersectionResult::NoIntersection, |i| {
            IntersectionResult::Intersection(i)
        })
    }
}
