use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::ray::Ray;

/// Placement of an object in the world.
///
/// `rotation` holds Euler angles in radians, applied in X then Y then Z order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(self, rotation: Vec3) -> Self {
        Self { rotation, ..self }
    }

    pub fn with_scale(self, scale: Vec3) -> Self {
        Self { scale, ..self }
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Local to world matrix: scale, then rotation, then translation
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }

    pub fn apply(&self, p: Vec3) -> Vec3 {
        self.matrix().transform_point3(p)
    }

    /// Express `ray` in the local frame of the object.
    ///
    /// Returns None when the transform is degenerate (a zero scale on some axis).
    pub fn ray_to_local(&self, ray: &Ray) -> Option<Ray> {
        if self.scale.cmpeq(Vec3::ZERO).any() {
            return None;
        }
        let inverse = self.matrix().inverse();
        let origin = inverse.transform_point3(ray.origin);
        let direction = inverse.transform_vector3(ray.direction);
        Some(Ray::new(origin, direction))
    }

    /// Bring a local normal back to world space
    pub fn normal_to_world(&self, normal: Vec3) -> Vec3 {
        let normal_matrix = self.matrix().inverse().transpose();
        normal_matrix.transform_vector3(normal).normalize_or_zero()
    }
}
