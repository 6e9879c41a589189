use glam::{Mat3, Quat, Vec3};

use super::float::FloatExt;

/// Orientation of an eye at `eye` looking at `target`.
///
/// The eye looks down its local -Z axis with `up` as the preferred local +Y.
pub struct LookAt {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl From<LookAt> for Quat {
    fn from(this: LookAt) -> Self {
        let Some(back) = (this.eye - this.target).normalize_or_zero().into_unit() else {
            return Quat::IDENTITY;
        };

        // when looking along `up`, any other axis will do
        let up = if back.cross(this.up).length_squared().into_non_zero(1e-6).is_some() {
            this.up
        } else if back.cross(Vec3::Z).length_squared().into_non_zero(1e-6).is_some() {
            Vec3::Z
        } else {
            Vec3::X
        };

        let right = up.cross(back).normalize();
        let up = back.cross(right);
        Quat::from_mat3(&Mat3::from_cols(right, up, back))
    }
}

trait IntoUnit: Sized {
    fn into_unit(self) -> Option<Self>;
}

impl IntoUnit for Vec3 {
    fn into_unit(self) -> Option<Self> {
        self.length_squared().into_non_zero(0.0).map(|_| self)
    }
}

#[cfg(test)]
mod tests {
    use glam::{Quat, Vec3};

    use super::LookAt;

    #[test]
    fn looks_at_target() {
        let eye = Vec3::new(-10.0, 30.0, 30.0);
        let q: Quat = LookAt {
            eye,
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
        .into();

        let forward = q.mul_vec3(Vec3::NEG_Z);
        assert!(forward.distance((-eye).normalize()) < 1e-5);
        // no roll: local X stays horizontal
        assert!(q.mul_vec3(Vec3::X).y.abs() < 1e-5);
    }

    #[test]
    fn straight_down() {
        let q: Quat = LookAt {
            eye: Vec3::new(0.0, 10.0, 0.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
        .into();

        assert!(q.mul_vec3(Vec3::NEG_Z).distance(Vec3::NEG_Y) < 1e-5);
    }

    #[test]
    fn same_point() {
        let q: Quat = LookAt {
            eye: Vec3::ONE,
            target: Vec3::ONE,
            up: Vec3::Y,
        }
        .into();
        assert_eq!(q, Quat::IDENTITY);
    }
}
