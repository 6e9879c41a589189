pub mod float;
pub mod quaternion;
pub mod transform;

pub use glam::{Mat4, Quat, Vec2, Vec3};
