use glam::{Quat, Vec2, Vec3};

use crate::{
    config::defaults::orbit,
    math::quaternion::LookAt,
    pointer::{Ndc, Viewport},
    ray::Ray,
};

/// Furthest NDC value a picking ray is built from; keeps directions finite
const MAX_NDC: f32 = 1e6;

/// A pinhole camera looking down its local -Z axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub rotation: Quat,
    /// Vertical field of view, in radians
    pub vfov: f32,
    /// Width over height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(vfov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            vfov,
            aspect,
            near,
            far,
        }
    }

    pub fn at(self, position: Vec3) -> Self {
        Self { position, ..self }
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.rotation = LookAt {
            eye: self.position,
            target,
            up: Vec3::Y,
        }
        .into();
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    /// Direction the camera is facing
    pub fn forward(&self) -> Vec3 {
        self.rotation.mul_vec3(Vec3::NEG_Z)
    }

    fn half_extents(&self) -> Vec2 {
        let h = f32::tan(self.vfov / 2.);
        Vec2::new(h * self.aspect, h)
    }

    /// Picking ray from the camera through `ndc`.
    ///
    /// Coordinates outside $\left[-1, 1\right]$ extrapolate past the edges of the view,
    /// non finite ones are treated as 0. The ray is bounded by `near` and `far`.
    pub fn ray_from_ndc(&self, ndc: Ndc) -> Ray {
        let Ndc(v) = ndc.sanitized();
        let v = v.clamp(Vec2::splat(-MAX_NDC), Vec2::splat(MAX_NDC));
        let local = (v * self.half_extents()).extend(-1.0);

        Ray::new_with_range(
            self.position,
            self.rotation.mul_vec3(local),
            self.near..=self.far,
        )
    }

    /// NDC of a world point, or None if it is behind the camera
    pub fn project(&self, p: Vec3) -> Option<Ndc> {
        let local = self.rotation.inverse().mul_vec3(p - self.position);
        if local.z >= 0.0 {
            return None;
        }
        let v = local.truncate() / (-local.z * self.half_extents());
        Some(Ndc(v))
    }
}

/// Orbit camera around a target point, in spherical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    /// Rotation around the Y axis, in radians
    pub yaw: f32,
    /// Elevation, in radians, clamped to avoid flipping over the poles
    pub pitch: f32,
    pub distance: f32,
}

impl OrbitControls {
    /// Controls matching the current placement of `camera`
    pub fn from_camera(camera: &PerspectiveCamera, target: Vec3) -> Self {
        let offset = camera.position - target;
        let distance = offset.length();
        let (yaw, pitch) = if distance > 0.0 {
            (
                f32::atan2(offset.x, offset.z),
                (offset.y / distance).clamp(-1.0, 1.0).asin(),
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            target,
            yaw,
            pitch: pitch.clamp(orbit::MIN_PITCH, orbit::MAX_PITCH),
            distance,
        }
    }

    /// Pointer drag, in pixels
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * orbit::ROTATION_SPEED;
        self.pitch = (self.pitch + dy * orbit::ROTATION_SPEED).clamp(orbit::MIN_PITCH, orbit::MAX_PITCH);
    }

    /// Scroll wheel, positive zooms in
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta * orbit::ZOOM_SPEED)
            .clamp(orbit::MIN_DISTANCE, orbit::MAX_DISTANCE);
    }

    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Move `camera` to the orbit position, facing the target
    pub fn update(&self, camera: &mut PerspectiveCamera) {
        camera.position = self.position();
        camera.look_at(self.target);
    }
}
