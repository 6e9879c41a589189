//! Implicit surfaces: shapes described by a signed distance function `f`,
//! whose surface is the set `f(p) = 0`, and intersected numerically.
//!
//! Adding a shape this way is cheap, but the result is only as exact as the
//! solver's tolerance.

pub mod solvers;
mod torus;

use glam::Vec3;

use self::solvers::{ImplicitSolution, ImplicitSolver};
use super::{IntersectionResult, RayIntersection, Shape};
use crate::ray::Ray;

pub use solvers::SphereTracer;
pub use torus::TorusSurface;

/// A signed distance function: negative inside, positive outside.
///
/// The value must never over-estimate the distance to the surface.
pub trait ImplicitSurface: Send + Sync {
    fn distance(&self, p: Vec3) -> f32;
}

/// Contains everything needed to make an implicit surface a shape
pub struct ImplicitShape<Surf: ImplicitSurface, Solv: ImplicitSolver> {
    pub surface: Surf,
    pub solver: Solv,
}

impl<Surf: ImplicitSurface, Solv: ImplicitSolver> Shape for ImplicitShape<Surf, Solv> {
    fn intersect(&self, ray: &Ray) -> IntersectionResult {
        self.solver
            .solve(|p| self.surface.distance(p), ray)
            .map(|ImplicitSolution { t, point, normal }| RayIntersection { t, point, normal })
            .into()
    }
}

pub type Torus = ImplicitShape<TorusSurface, SphereTracer>;

impl Torus {
    /// A ring of radius `radius` around the local Z axis, with a tube of radius `tube`
    pub fn new(radius: f32, tube: f32) -> Self {
        Self {
            surface: TorusSurface { radius, tube },
            solver: SphereTracer::default(),
        }
    }
}
