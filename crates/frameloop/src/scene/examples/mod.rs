//! The tutorial scenes.
//!
//! Each one inserts its objects and lights into a scene and describes how they
//! move, react to the pointer and which tunables drive them.

mod basics;
mod spotlight;

pub use basics::BasicsScene;
pub use spotlight::SpotlightScene;

use glam::Vec3;

use crate::{
    camera::{OrbitControls, PerspectiveCamera},
    config::{ParamBinding, Tunables},
    motion::{MotionRegistry, Oscillator},
    picking::HoverAction,
    scene::ObjectId,
};

/// Everything a scene needs besides its objects and lights
pub struct SceneSetup {
    pub camera: PerspectiveCamera,
    pub orbit: Option<OrbitControls>,
    pub motions: MotionRegistry,
    pub oscillators: Vec<Oscillator>,
    pub hover_rules: Vec<(ObjectId, HoverAction)>,
    pub tunables: Tunables,
    pub bindings: Vec<ParamBinding>,
}

/// 45° camera at `position` orbiting the origin
fn orbiting_camera(position: Vec3) -> (PerspectiveCamera, OrbitControls) {
    let mut camera = PerspectiveCamera::new(f32::to_radians(45.0), 1.0, 0.1, 1000.0).at(position);
    let orbit = OrbitControls::from_camera(&camera, Vec3::ZERO);
    orbit.update(&mut camera);
    (camera, orbit)
}
