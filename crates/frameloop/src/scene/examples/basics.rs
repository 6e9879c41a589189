use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use super::{orbiting_camera, SceneSetup};
use crate::{
    color,
    config::Tunables,
    light::{Light, LightKind},
    material::Material,
    math::transform::Transform,
    motion::{Axes, MotionRegistry, MotionRule},
    scene::{ObjectDescriptor, SceneT},
    shape::{Cuboid, Plane, Sphere},
};

/// A textured box and sphere spinning above a floor, lit by a point light.
pub struct BasicsScene;

impl BasicsScene {
    pub fn insert_into<S: SceneT + ?Sized>(scene: &mut S) -> SceneSetup {
        let the_box = scene.add_object(
            ObjectDescriptor::new(
                Cuboid::default(),
                Material::basic(color::from_hex(0x00ff00)).with_map("plants.jpg"),
            )
            .named("box"),
        );

        let sphere = scene.add_object(
            ObjectDescriptor::new(
                Sphere { radius: 4.0 },
                Material::standard(color::WHITE).with_map("wood.jpg"),
            )
            .named("sphere")
            .at(Transform::from_position(Vec3::new(-10.0, 10.0, 0.0))),
        );

        scene.add_object(
            ObjectDescriptor::new(
                Plane::new(30.0, 30.0),
                Material::basic(color::from_hex(0xaaaaff)),
            )
            .named("plane")
            .at(Transform::IDENTITY.with_rotation(Vec3::new(-FRAC_PI_2, 0.0, 0.0))),
        );

        let mut point = Light::point(color::WHITE, 1.0, Vec3::new(5.0, 5.0, 5.0)).with_label("point");
        // no falloff
        point.kind = LightKind::Point {
            distance: 0.0,
            decay: 0.0,
        };
        scene.add_light(point);
        scene.add_light(Light::ambient(color::from_hex(0x404040), 1.0).with_label("ambient"));

        let spin = MotionRule::Phase {
            period: 1000.0,
            axes: Axes::XY,
        };
        let mut motions = MotionRegistry::new();
        motions.register(the_box, spin);
        motions.register(sphere, spin);

        let (camera, orbit) = orbiting_camera(Vec3::new(-10.0, 30.0, 30.0));

        SceneSetup {
            camera,
            orbit: Some(orbit),
            motions,
            oscillators: Vec::new(),
            hover_rules: Vec::new(),
            tunables: Tunables::new(),
            bindings: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{material::Shading, scene::Scene};

    #[test]
    fn contents() {
        let mut scene = Scene::new();
        let setup = BasicsScene::insert_into(&mut scene);

        assert_eq!(scene.len(), 3);
        assert_eq!(scene.lights().count(), 2);
        assert_eq!(setup.motions.len(), 2);

        let sphere = scene.find_by_name("sphere").unwrap();
        let sphere = scene.object(sphere).unwrap();
        assert_eq!(sphere.transform.position, Vec3::new(-10.0, 10.0, 0.0));
        assert_eq!(sphere.material.shading, Shading::Standard);
        assert!(sphere.material.map.is_some());

        assert!(setup.camera.position.distance(Vec3::new(-10.0, 30.0, 30.0)) < 1e-3);
    }

    #[test]
    fn floor_is_horizontal() {
        let mut scene = Scene::new();
        BasicsScene::insert_into(&mut scene);
        let plane = scene.object(scene.find_by_name("plane").unwrap()).unwrap();

        // local +Z ends up pointing up
        let normal = plane.transform.normal_to_world(Vec3::Z);
        assert!(normal.distance(Vec3::Y) < 1e-5);
        // corners stay within the 30x30 floor
        let corner = plane.transform.apply(Vec3::new(15.0, 15.0, 0.0));
        assert!((corner.y).abs() < 1e-4);
        assert!((corner.x - 15.0).abs() < 1e-4 && (corner.z.abs() - 15.0).abs() < 1e-4);
    }
}
