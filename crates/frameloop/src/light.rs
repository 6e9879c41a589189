use std::fmt::Display;

use glam::Vec3;

use crate::color::{self, Color};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LightId(pub u64);

impl Display for LightId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "light#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Ambient,
    Point {
        /// 0 means no cut-off
        distance: f32,
        decay: f32,
    },
    Directional {
        target: Vec3,
    },
    Spot {
        target: Vec3,
        /// Half aperture of the cone, in radians, at most PI/2
        angle: f32,
        /// Fraction of the cone attenuated by the penumbra, in [0, 1]
        penumbra: f32,
        distance: f32,
        decay: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub label: Option<String>,
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
    pub cast_shadow: bool,
}

/// A writable property of a light, the target of a live parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightField {
    Intensity,
    Color,
    Angle,
    Penumbra,
    Decay,
    Distance,
    PositionX,
    PositionY,
    PositionZ,
}

/// Why a value could not be written to a light
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMismatch {
    /// The light kind has no such property
    NotApplicable,
    /// The property exists but holds another kind of value
    WrongKind,
}

impl Light {
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self {
            label: None,
            kind: LightKind::Ambient,
            color,
            intensity,
            position: Vec3::ZERO,
            cast_shadow: false,
        }
    }

    pub fn point(color: Color, intensity: f32, position: Vec3) -> Self {
        Self {
            label: None,
            kind: LightKind::Point {
                distance: 0.0,
                decay: 2.0,
            },
            color,
            intensity,
            position,
            cast_shadow: false,
        }
    }

    pub fn directional(color: Color, intensity: f32, position: Vec3) -> Self {
        Self {
            label: None,
            kind: LightKind::Directional { target: Vec3::ZERO },
            color,
            intensity,
            position,
            cast_shadow: false,
        }
    }

    pub fn spot(color: Color, intensity: f32, position: Vec3) -> Self {
        Self {
            label: None,
            kind: LightKind::Spot {
                target: Vec3::ZERO,
                angle: std::f32::consts::FRAC_PI_3,
                penumbra: 0.0,
                distance: 0.0,
                decay: 2.0,
            },
            color,
            intensity,
            position,
            cast_shadow: false,
        }
    }

    pub fn with_label(self, label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..self
        }
    }

    pub fn with_shadow(self) -> Self {
        Self {
            cast_shadow: true,
            ..self
        }
    }

    pub fn set_scalar(&mut self, field: LightField, value: f32) -> Result<(), FieldMismatch> {
        match (field, &mut self.kind) {
            (LightField::Intensity, _) => self.intensity = value,
            (LightField::PositionX, _) => self.position.x = value,
            (LightField::PositionY, _) => self.position.y = value,
            (LightField::PositionZ, _) => self.position.z = value,
            (LightField::Color, _) => return Err(FieldMismatch::WrongKind),
            (LightField::Angle, LightKind::Spot { angle, .. }) => {
                *angle = value.clamp(0.0, std::f32::consts::FRAC_PI_2)
            }
            (LightField::Penumbra, LightKind::Spot { penumbra, .. }) => {
                *penumbra = value.clamp(0.0, 1.0)
            }
            (
                LightField::Decay,
                LightKind::Spot { decay, .. } | LightKind::Point { decay, .. },
            ) => *decay = value,
            (
                LightField::Distance,
                LightKind::Spot { distance, .. } | LightKind::Point { distance, .. },
            ) => *distance = value,
            _ => return Err(FieldMismatch::NotApplicable),
        }
        Ok(())
    }

    pub fn scalar(&self, field: LightField) -> Option<f32> {
        match (field, &self.kind) {
            (LightField::Intensity, _) => Some(self.intensity),
            (LightField::PositionX, _) => Some(self.position.x),
            (LightField::PositionY, _) => Some(self.position.y),
            (LightField::PositionZ, _) => Some(self.position.z),
            (LightField::Angle, LightKind::Spot { angle, .. }) => Some(*angle),
            (LightField::Penumbra, LightKind::Spot { penumbra, .. }) => Some(*penumbra),
            (LightField::Decay, LightKind::Spot { decay, .. } | LightKind::Point { decay, .. }) => {
                Some(*decay)
            }
            (
                LightField::Distance,
                LightKind::Spot { distance, .. } | LightKind::Point { distance, .. },
            ) => Some(*distance),
            _ => None,
        }
    }

    pub fn set_color(&mut self, field: LightField, value: Color) -> Result<(), FieldMismatch> {
        match field {
            LightField::Color => {
                self.color = value;
                Ok(())
            }
            _ => Err(FieldMismatch::WrongKind),
        }
    }

    /// Light received at `point` with surface `normal`, as a per channel factor.
    ///
    /// Ambient lights ignore the normal.
    pub fn irradiance(&self, point: Vec3, normal: Vec3) -> Vec3 {
        let color = color::ColorExt::vec(&self.color) * self.intensity;
        let to_light = |position: Vec3| (position - point).normalize_or_zero();
        let lambert = |l: Vec3| normal.dot(l).max(0.0);
        let attenuation = |distance: f32, decay: f32| {
            let d = (self.position - point).length();
            let range = if distance > 0.0 {
                (1.0 - (d / distance).powi(4)).clamp(0.0, 1.0).powi(2)
            } else {
                1.0
            };
            range / d.max(1e-3).powf(decay).max(1.0)
        };

        match self.kind {
            LightKind::Ambient => color,
            LightKind::Directional { target } => color * lambert((self.position - target).normalize_or_zero()),
            LightKind::Point { distance, decay } => {
                color * lambert(to_light(self.position)) * attenuation(distance, decay)
            }
            LightKind::Spot {
                target,
                angle,
                penumbra,
                distance,
                decay,
            } => {
                let axis = (target - self.position).normalize_or_zero();
                let cos_theta = (point - self.position).normalize_or_zero().dot(axis);
                let outer = angle.cos();
                let inner = (angle * (1.0 - penumbra)).cos();
                let cone = if inner - outer > 1e-6 {
                    ((cos_theta - outer) / (inner - outer)).clamp(0.0, 1.0)
                } else if cos_theta >= outer {
                    1.0
                } else {
                    0.0
                };
                color * cone * lambert(to_light(self.position)) * attenuation(distance, decay)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn spot_fields() {
        let mut spot = Light::spot(color::WHITE, 1.0, Vec3::new(-100.0, 100.0, 0.0));
        spot.set_scalar(LightField::Angle, 0.2).unwrap();
        spot.set_scalar(LightField::Penumbra, 2.0).unwrap();
        spot.set_scalar(LightField::Intensity, 0.7).unwrap();

        assert_eq!(spot.scalar(LightField::Angle), Some(0.2));
        assert_eq!(spot.scalar(LightField::Penumbra), Some(1.0));
        assert_eq!(spot.scalar(LightField::Intensity), Some(0.7));
    }

    #[test]
    fn mismatched_fields() {
        let mut ambient = Light::ambient(color::from_hex(0x404040), 1.0);
        assert_eq!(
            ambient.set_scalar(LightField::Angle, 0.2),
            Err(FieldMismatch::NotApplicable)
        );
        assert_eq!(
            ambient.set_scalar(LightField::Color, 0.2),
            Err(FieldMismatch::WrongKind)
        );
        assert_eq!(
            ambient.set_color(LightField::Intensity, color::RED),
            Err(FieldMismatch::WrongKind)
        );
        ambient.set_color(LightField::Color, color::RED).unwrap();
        assert_eq!(ambient.color, color::RED);
    }

    #[test]
    fn spot_cone() {
        let mut spot = Light::spot(color::WHITE, 1.0, Vec3::new(0.0, 10.0, 0.0));
        spot.set_scalar(LightField::Angle, 0.3).unwrap();
        let lit = spot.irradiance(Vec3::ZERO, Vec3::Y);
        let dark = spot.irradiance(Vec3::new(10.0, 0.0, 0.0), Vec3::Y);

        assert!(lit.x > 0.0);
        assert_eq!(dark, Vec3::ZERO);
    }
}
