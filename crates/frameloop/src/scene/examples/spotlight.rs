use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use super::{orbiting_camera, SceneSetup};
use crate::{
    color,
    config::{defaults::params, ParamBinding, ParamSpec, ParamTarget, Tunables},
    light::{Light, LightField, LightKind},
    material::Material,
    math::transform::Transform,
    motion::{Axes, MotionRegistry, MotionRule, Oscillator},
    picking::HoverAction,
    scene::{ObjectDescriptor, SceneT},
    shape::{Cuboid, Plane, Sphere, Torus},
};

/// Height of the sphere bounce
const BOUNCE_AMPLITUDE: f32 = 10.0;

/// A bouncing sphere under a tunable spotlight.
///
/// Hovering the sphere paints it red, hovering `theBox` makes it spin.
pub struct SpotlightScene;

impl SpotlightScene {
    pub fn insert_into<S: SceneT + ?Sized>(scene: &mut S) -> SceneSetup {
        let the_box = scene.add_object(
            ObjectDescriptor::new(Cuboid::default(), Material::basic(color::from_hex(0x00ff00)))
                .named("box"),
        );

        scene.add_object(
            ObjectDescriptor::new(Plane::new(30.0, 30.0), Material::standard(color::WHITE))
                .named("plane")
                .at(Transform::IDENTITY.with_rotation(Vec3::new(-FRAC_PI_2, 0.0, 0.0))),
        );

        let sphere = scene.add_object(
            ObjectDescriptor::new(
                Sphere { radius: 4.0 },
                Material::standard(color::from_hex(0x0000ff)),
            )
            .named("sphere")
            .at(Transform::from_position(Vec3::new(-10.0, 10.0, 0.0))),
        );

        let spinning_box = scene.add_object(
            ObjectDescriptor::new(
                Cuboid::new(4.0, 4.0, 4.0),
                Material::standard(color::WHITE).with_map("stars.jpg"),
            )
            .named("theBox")
            .at(Transform::from_position(Vec3::new(0.0, 15.0, 10.0))),
        );

        let torus = scene.add_object(
            ObjectDescriptor::new(Torus::new(3.0, 1.0), Material::standard(color::from_hex(0xff8800)))
                .named("torus")
                .at(Transform::from_position(Vec3::new(10.0, 5.0, -10.0))),
        );

        scene.add_light(Light::ambient(color::from_hex(0x333333), 1.0).with_label("ambient"));
        let mut spot = Light::spot(color::WHITE, 1.0, Vec3::new(-100.0, 100.0, 0.0))
            .with_label("spot")
            .with_shadow();
        spot.kind = LightKind::Spot {
            target: Vec3::ZERO,
            angle: 0.2,
            penumbra: 0.0,
            distance: 0.0,
            decay: 0.0,
        };
        let spot = scene.add_light(spot);

        let mut motions = MotionRegistry::new();
        motions.register(
            the_box,
            MotionRule::Phase {
                period: 1000.0,
                axes: Axes::XY,
            },
        );
        motions.register(
            torus,
            MotionRule::Incremental {
                delta: Vec3::new(0.01, 0.02, 0.0),
            },
        );

        let mut tunables = Tunables::new();
        let (min_speed, max_speed) = params::BOUNCE_SPEED_RANGE;
        tunables.declare(params::BOUNCE_SPEED, ParamSpec::scalar(0.01, min_speed, max_speed));
        tunables.declare(params::SPHERE_COLOR, ParamSpec::color(color::from_hex(0xffea00)));
        tunables.declare(params::WIREFRAME, ParamSpec::toggle(false));
        tunables.declare(params::ANGLE, ParamSpec::scalar(0.2, 0.0, 1.0));
        tunables.declare(params::PENUMBRA, ParamSpec::scalar(0.0, 0.0, 1.0));
        tunables.declare(params::INTENSITY, ParamSpec::scalar(1.0, 0.0, 1.0));

        let on_spot = |param: &str, field: LightField| {
            ParamBinding::new(param, ParamTarget::Light { light: spot, field })
        };
        let bindings = vec![
            on_spot(params::ANGLE, LightField::Angle),
            on_spot(params::PENUMBRA, LightField::Penumbra),
            on_spot(params::INTENSITY, LightField::Intensity),
            ParamBinding::new(params::SPHERE_COLOR, ParamTarget::ObjectColor(sphere)).on_change(),
            ParamBinding::new(params::WIREFRAME, ParamTarget::ObjectWireframe(sphere)),
        ];

        let (camera, orbit) = orbiting_camera(Vec3::new(-10.0, 30.0, 30.0));

        SceneSetup {
            camera,
            orbit: Some(orbit),
            motions,
            oscillators: vec![Oscillator::new(sphere, BOUNCE_AMPLITUDE, params::BOUNCE_SPEED)],
            hover_rules: vec![
                (sphere, HoverAction::Tint(color::from_hex(0xff0000))),
                (
                    spinning_box,
                    HoverAction::Spin {
                        period: 1000.0,
                        axes: Axes::XY,
                    },
                ),
            ],
            tunables,
            bindings,
        }
    }
}
