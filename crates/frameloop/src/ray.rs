use std::ops::RangeInclusive;

use crate::math::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Always normalized
    pub direction: Vec3,
    pub bounds: (f32, f32),
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            bounds: (0.0, f32::INFINITY),
        }
    }

    pub fn new_with_range(origin: Vec3, direction: Vec3, range: RangeInclusive<f32>) -> Self {
        Self {
            bounds: (*range.start(), *range.end()),
            ..Self::new(origin, direction)
        }
    }

    pub fn range(&self) -> RangeInclusive<f32> {
        self.bounds.0..=self.bounds.1
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }

    /// Signed distance along the ray of the projection of `p`
    pub fn distance_to(&self, p: Vec3) -> f32 {
        (p - self.origin).dot(self.direction)
    }
}
