//! The per-frame update.
//!
//! [FrameLoop::tick] runs, in order: input drain, procedural motion, bounce,
//! pointer picking and hover rules, parameter bindings, then redraw. None of
//! these steps can fail; references to objects or lights that are gone are
//! skipped.

use crate::{
    camera::{OrbitControls, PerspectiveCamera},
    config::{ApplyOutcome, ConfigSnapshot, ParamBinding, ParamTarget, Tunables},
    input::{InputEvent, InputQueue, InputSender, ParamSource},
    motion::{MotionRegistry, Oscillator},
    picking::{Highlighter, Raycaster},
    pointer::{PointerState, Viewport},
    renderer::Renderer,
    scene::{examples::SceneSetup, ObjectId, Scene, SceneT},
};

/// Everything a frame reads or writes
pub struct FrameContext<S: SceneT = Scene> {
    pub scene: S,
    pub camera: PerspectiveCamera,
    pub orbit: Option<OrbitControls>,
    pub renderer: Box<dyn Renderer>,
    pub tunables: Tunables,
    pub pointer: PointerState,
    pub viewport: Viewport,
    pub motions: MotionRegistry,
    pub oscillators: Vec<Oscillator>,
    pub highlighter: Highlighter,
    pub bindings: Vec<ParamBinding>,
}

impl<S: SceneT> FrameContext<S> {
    /// `scene` must be the one `setup` was built from
    pub fn new(
        scene: S,
        setup: SceneSetup,
        mut renderer: Box<dyn Renderer>,
        viewport: Viewport,
        sticky_highlight: bool,
    ) -> Self {
        let SceneSetup {
            mut camera,
            orbit,
            motions,
            oscillators,
            hover_rules,
            tunables,
            bindings,
        } = setup;

        camera.set_viewport(viewport);
        renderer.resize(viewport.width as u32, viewport.height as u32);

        let mut highlighter = Highlighter::new(sticky_highlight);
        for (object, action) in hover_rules {
            highlighter.add_rule(object, action);
        }

        Self {
            scene,
            camera,
            orbit,
            renderer,
            tunables,
            pointer: PointerState::default(),
            viewport,
            motions,
            oscillators,
            highlighter,
            bindings,
        }
    }
}

/// What a frame did
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Index of the frame, from 0
    pub frame: u64,
    /// Timestamp the frame was computed for, in milliseconds
    pub t: f64,
    /// Objects under the pointer, nearest first
    pub picked: Vec<ObjectId>,
    /// Picked objects a hover rule acted upon
    pub highlighted: Vec<ObjectId>,
    pub applied_bindings: usize,
}

pub struct FrameLoop<S: SceneT = Scene> {
    pub context: FrameContext<S>,
    input: InputQueue,
    /// Snapshot of the previous frame, for change-triggered bindings
    previous_config: Option<ConfigSnapshot>,
    frame: u64,
}

impl<S: SceneT> FrameLoop<S> {
    pub fn new(mut context: FrameContext<S>) -> Self {
        let previous_config = Some(context.tunables.snapshot());
        Self {
            context,
            input: InputQueue::new(),
            previous_config,
            frame: 0,
        }
    }

    /// Handle for producers living outside the loop
    pub fn input(&self) -> InputSender {
        self.input.sender()
    }

    /// Number of frames run so far
    pub fn frames(&self) -> u64 {
        self.frame
    }

    fn handle_event(&mut self, event: InputEvent) {
        let ctx = &mut self.context;
        match event {
            InputEvent::PointerMove { x, y } => {
                ctx.pointer = PointerState::from_screen(x, y, ctx.viewport);
            }
            InputEvent::Resize { width, height } => {
                ctx.viewport = Viewport::new(width, height);
                ctx.camera.set_viewport(ctx.viewport);
                ctx.renderer.resize(width, height);
            }
            InputEvent::SetParam { name, value } => {
                let written = match value {
                    ParamSource::Value(value) => ctx.tunables.set(&name, value),
                    ParamSource::Text(text) => ctx.tunables.set_from_str(&name, &text),
                };
                if let Err(e) = written {
                    log::warn!("ignored parameter write: {e}");
                }
            }
            InputEvent::Orbit { dx, dy } => match ctx.orbit.as_mut() {
                Some(orbit) => {
                    orbit.rotate(dx, dy);
                    orbit.update(&mut ctx.camera);
                }
                None => log::debug!("no orbit controls, drag ignored"),
            },
            InputEvent::Zoom { delta } => match ctx.orbit.as_mut() {
                Some(orbit) => {
                    orbit.zoom(delta);
                    orbit.update(&mut ctx.camera);
                }
                None => log::debug!("no orbit controls, zoom ignored"),
            },
        }
    }

    /// Apply every pending input event, oldest first
    pub fn drain_input(&mut self) -> usize {
        let events = self.input.drain();
        let n = events.len();
        for event in events {
            self.handle_event(event);
        }
        n
    }

    /// Compute and draw one frame for time `t`, in milliseconds.
    pub fn tick(&mut self, t: f64) -> FrameReport {
        self.drain_input();

        let ctx = &mut self.context;
        let config = ctx.tunables.snapshot();

        ctx.motions.apply(t, &mut ctx.scene);
        for oscillator in ctx.oscillators.iter_mut() {
            oscillator.advance(&config, &mut ctx.scene);
        }

        let hits = Raycaster::from_camera(&ctx.camera, ctx.pointer.ndc).intersect_objects(&ctx.scene);
        let highlighted = ctx.highlighter.apply(&hits, t, &mut ctx.scene);
        crate::counter!("pointer hits", hits.len());

        let mut applied_bindings = 0;
        for binding in &ctx.bindings {
            if !binding.is_due(self.previous_config.as_ref(), &config) {
                continue;
            }
            match binding.apply(&config, &mut ctx.scene) {
                ApplyOutcome::Applied => {
                    applied_bindings += 1;
                    // an edited color is the one to come back to after a tint
                    if let (ParamTarget::ObjectColor(id), Some(color)) =
                        (binding.target, config.color(&binding.param))
                    {
                        ctx.highlighter.rebase(id, color);
                    }
                }
                outcome => {
                    crate::counter!("skipped bindings");
                    log::debug!("binding `{}` skipped: {outcome:?}", binding.param);
                }
            }
        }
        self.previous_config = Some(config);

        ctx.renderer.render_frame(&ctx.scene, &ctx.camera);

        let report = FrameReport {
            frame: self.frame,
            t,
            picked: hits.iter().map(|hit| hit.object).collect(),
            highlighted,
            applied_bindings,
        };
        log::trace!("{report:?}");
        crate::counter!("frames");
        self.frame += 1;
        report
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::{
        color,
        config::{ParamSpec, ParamValue},
        light::{Light, LightField, LightId},
        material::Material,
        math::transform::Transform,
        motion::{Axes, MotionRule},
        picking::HoverAction,
        pointer::Ndc,
        renderer::NullRenderer,
        scene::ObjectDescriptor,
        shape::Sphere,
    };

    const WIDTH: u32 = 800;
    const HEIGHT: u32 = 600;

    struct Fixture {
        frame_loop: FrameLoop,
        sphere: ObjectId,
        spot: LightId,
    }

    /// Sphere of radius 4 at the origin, seen from +Z, under a tunable spotlight
    fn fixture(sticky: bool) -> Fixture {
        let mut scene = Scene::new();
        let sphere = scene.add_object(
            ObjectDescriptor::new(Sphere { radius: 4.0 }, Material::standard(color::BLUE))
                .named("sphere"),
        );
        let spot = scene.add_light(Light::spot(color::WHITE, 1.0, Vec3::new(-100.0, 100.0, 0.0)));

        let mut camera = PerspectiveCamera::new(f32::to_radians(45.0), 1.0, 0.1, 1000.0)
            .at(Vec3::new(0.0, 0.0, 30.0));
        camera.look_at(Vec3::ZERO);

        let mut tunables = Tunables::new();
        tunables.declare("intensity", ParamSpec::scalar(1.0, 0.0, 1.0));
        tunables.declare("bounceSpeed", ParamSpec::scalar(0.0, 0.0, 0.2));
        tunables.declare("sphereColor", ParamSpec::color(color::GREEN));

        let mut motions = MotionRegistry::new();
        motions.register(
            sphere,
            MotionRule::Phase {
                period: 1000.0,
                axes: Axes::XY,
            },
        );

        let setup = SceneSetup {
            orbit: Some(OrbitControls::from_camera(&camera, Vec3::ZERO)),
            camera,
            motions,
            oscillators: vec![Oscillator::new(sphere, 10.0, "bounceSpeed")],
            hover_rules: vec![(sphere, HoverAction::Tint(color::RED))],
            tunables,
            bindings: vec![
                ParamBinding::new(
                    "intensity",
                    ParamTarget::Light {
                        light: spot,
                        field: LightField::Intensity,
                    },
                ),
                ParamBinding::new("sphereColor", ParamTarget::ObjectColor(sphere)).on_change(),
            ],
        };
        let context = FrameContext::new(
            scene,
            setup,
            Box::new(NullRenderer::new()),
            Viewport::new(WIDTH, HEIGHT),
            sticky,
        );

        Fixture {
            frame_loop: FrameLoop::new(context),
            sphere,
            spot,
        }
    }

    fn move_pointer(frame_loop: &FrameLoop, x: f32, y: f32) {
        frame_loop.input().send(InputEvent::PointerMove { x, y });
    }

    #[test]
    fn center_pick() {
        let Fixture {
            mut frame_loop,
            sphere,
            ..
        } = fixture(true);

        // the pointer starts at the center of the view
        let report = frame_loop.tick(0.0);
        assert_eq!(report.picked, vec![sphere]);
        assert_eq!(report.highlighted, vec![sphere]);

        move_pointer(&frame_loop, WIDTH as f32 / 2.0, HEIGHT as f32 / 2.0);
        let report = frame_loop.tick(16.0);
        assert_eq!(frame_loop.context.pointer.ndc, Ndc::CENTER);
        assert_eq!(report.picked, vec![sphere]);
    }

    #[test]
    fn intensity_read_back() {
        let Fixture {
            mut frame_loop,
            spot,
            ..
        } = fixture(true);

        frame_loop.input().send(InputEvent::set_param("intensity", ParamValue::Scalar(0.7)));
        frame_loop.tick(0.0);
        assert_eq!(frame_loop.context.scene.light(spot).unwrap().intensity, 0.7);

        frame_loop.input().send(InputEvent::set_param_text("intensity", "3"));
        frame_loop.tick(16.0);
        assert_eq!(frame_loop.context.scene.light(spot).unwrap().intensity, 1.0);
    }

    #[test]
    fn unchanged_config_is_idempotent() {
        let Fixture {
            mut frame_loop,
            sphere,
            spot,
        } = fixture(true);
        move_pointer(&frame_loop, 0.0, 0.0);

        frame_loop.tick(500.0);
        let object = frame_loop.context.scene.object(sphere).unwrap();
        let first = (object.transform, object.material.clone());
        let intensity = frame_loop.context.scene.light(spot).unwrap().intensity;

        frame_loop.tick(500.0);
        let object = frame_loop.context.scene.object(sphere).unwrap();
        assert_eq!((object.transform, object.material.clone()), first);
        assert_eq!(frame_loop.context.scene.light(spot).unwrap().intensity, intensity);
    }

    #[test]
    fn phase_motion_follows_time() {
        let Fixture {
            mut frame_loop,
            sphere,
            ..
        } = fixture(true);
        frame_loop.tick(2000.0);
        let rotation = frame_loop.context.scene.object(sphere).unwrap().transform.rotation;
        assert_eq!(rotation, Vec3::new(2.0, 2.0, 0.0));
    }

    #[test]
    fn sticky_highlight_stays() {
        let Fixture {
            mut frame_loop,
            sphere,
            ..
        } = fixture(true);
        frame_loop.tick(0.0);

        // top left corner, away from the sphere
        move_pointer(&frame_loop, 0.0, 0.0);
        let report = frame_loop.tick(16.0);
        assert!(report.picked.is_empty());
        assert_eq!(
            frame_loop.context.scene.object(sphere).unwrap().material.color,
            color::RED
        );
    }

    #[test]
    fn non_sticky_highlight_reverts() {
        let Fixture {
            mut frame_loop,
            sphere,
            ..
        } = fixture(false);
        frame_loop.tick(0.0);
        assert_eq!(
            frame_loop.context.scene.object(sphere).unwrap().material.color,
            color::RED
        );

        move_pointer(&frame_loop, 0.0, 0.0);
        frame_loop.tick(16.0);
        assert_eq!(
            frame_loop.context.scene.object(sphere).unwrap().material.color,
            color::BLUE
        );
    }

    #[test]
    fn color_binding_fires_on_change_only() {
        let Fixture {
            mut frame_loop,
            sphere,
            ..
        } = fixture(true);
        move_pointer(&frame_loop, 0.0, 0.0);

        let report = frame_loop.tick(0.0);
        assert_eq!(report.applied_bindings, 1);
        let color_of =
            |frame_loop: &FrameLoop| frame_loop.context.scene.object(sphere).unwrap().material.color;
        assert_eq!(color_of(&frame_loop), color::BLUE);

        frame_loop.input().send(InputEvent::set_param_text("sphereColor", "#ffea00"));
        let report = frame_loop.tick(16.0);
        assert_eq!(report.applied_bindings, 2);
        assert_eq!(color_of(&frame_loop), color::from_hex(0xffea00));
    }

    #[test]
    fn color_edit_survives_hover_restore() {
        let Fixture {
            mut frame_loop,
            sphere,
            ..
        } = fixture(false);
        let color_of =
            |frame_loop: &FrameLoop| frame_loop.context.scene.object(sphere).unwrap().material.color;

        // hovered at the center of the view
        frame_loop.tick(0.0);
        frame_loop.input().send(InputEvent::set_param_text("sphereColor", "#ffea00"));
        frame_loop.tick(16.0);
        frame_loop.tick(32.0);
        assert_eq!(color_of(&frame_loop), color::RED);

        move_pointer(&frame_loop, 0.0, 0.0);
        frame_loop.tick(48.0);
        assert_eq!(color_of(&frame_loop), color::from_hex(0xffea00));
    }

    #[test]
    fn bad_writes_are_ignored() {
        let Fixture {
            mut frame_loop,
            spot,
            ..
        } = fixture(true);
        let input = frame_loop.input();
        input.send(InputEvent::set_param("unknown", ParamValue::Scalar(1.0)));
        input.send(InputEvent::set_param("intensity", ParamValue::Toggle(true)));
        input.send(InputEvent::set_param_text("intensity", "bright"));

        frame_loop.tick(0.0);
        assert_eq!(frame_loop.context.scene.light(spot).unwrap().intensity, 1.0);
    }

    #[test]
    fn stale_ids_are_no_ops() {
        let Fixture {
            mut frame_loop,
            sphere,
            spot,
        } = fixture(false);
        frame_loop.tick(0.0);

        frame_loop.context.scene.remove_object(sphere);
        frame_loop.context.scene.remove_light(spot);
        frame_loop.input().send(InputEvent::set_param_text("sphereColor", "#ffffff"));

        let report = frame_loop.tick(16.0);
        assert!(report.picked.is_empty());
        assert_eq!(report.applied_bindings, 0);
        assert!(!frame_loop.context.highlighter.is_tinted(sphere));
    }

    #[test]
    fn zero_bounce_speed_keeps_height() {
        let Fixture {
            mut frame_loop,
            sphere,
            ..
        } = fixture(true);
        for i in 0..10 {
            frame_loop.tick(i as f64 * 16.0);
            let y = frame_loop.context.scene.object(sphere).unwrap().transform.position.y;
            assert_eq!(y, 0.0);
        }
    }

    #[test]
    fn bounce_follows_speed() {
        let Fixture {
            mut frame_loop,
            sphere,
            ..
        } = fixture(true);
        frame_loop.input().send(InputEvent::set_param("bounceSpeed", ParamValue::Scalar(0.05)));

        let heights: Vec<f32> = (0..130)
            .map(|i| {
                frame_loop.tick(i as f64 * 16.0);
                frame_loop.context.scene.object(sphere).unwrap().transform.position.y
            })
            .collect();

        assert!(heights.iter().all(|&y| (0.0..=10.0).contains(&y)));
        // step = 0.05 * (i + 1) crosses PI and 2PI
        assert!(heights[62] < 0.1);
        assert!(heights[125] < 0.2);
        assert!(heights[30] > 9.9);
    }

    #[test]
    fn viewport_and_orbit_events() {
        let Fixture { mut frame_loop, .. } = fixture(true);
        let before = frame_loop.context.camera.position;
        let input = frame_loop.input();
        input.send(InputEvent::Resize {
            width: 400,
            height: 100,
        });
        input.send(InputEvent::Orbit { dx: 100.0, dy: 0.0 });
        input.send(InputEvent::Zoom { delta: 4.0 });
        assert_eq!(frame_loop.drain_input(), 3);

        let camera = frame_loop.context.camera;
        assert_eq!(camera.aspect, 4.0);
        assert!((camera.position.length() - 28.0).abs() < 1e-3);
        assert!(camera.position.distance(before) > 1.0);
        assert!(camera.forward().distance(-camera.position.normalize()) < 1e-4);
    }

    #[test]
    fn one_redraw_per_tick() {
        let Fixture { mut frame_loop, .. } = fixture(true);
        for i in 0..5 {
            let report = frame_loop.tick(i as f64);
            assert_eq!(report.frame, i);
        }
        assert_eq!(frame_loop.frames(), 5);
        assert_eq!(frame_loop.context.renderer.frames(), 5);
    }
}
