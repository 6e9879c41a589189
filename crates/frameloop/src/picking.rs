//! Pointer picking: which objects lie under the pointer, and what hovering them does.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet},
};

use glam::Vec3;
use itertools::Itertools;

use crate::{
    camera::PerspectiveCamera,
    color::Color,
    motion::{Axes, MotionRule},
    pointer::Ndc,
    ray::Ray,
    scene::{ObjectId, SceneObject, SceneT},
    shape::IntersectionResult,
};

/// An object crossed by a picking ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub object: ObjectId,
    /// Distance from the ray origin, in world units
    pub distance: f32,
    pub point: Vec3,
    pub normal: Vec3,
}

pub struct Raycaster {
    pub ray: Ray,
}

impl Raycaster {
    pub fn new(ray: Ray) -> Self {
        Self { ray }
    }

    pub fn from_camera(camera: &PerspectiveCamera, ndc: Ndc) -> Self {
        Self::new(camera.ray_from_ndc(ndc))
    }

    /// Every visible, pickable object hit by the ray, nearest first.
    ///
    /// Each object appears at most once, at its closest hit within the ray bounds.
    /// Equal distances are ordered by id.
    pub fn intersect_objects<S: SceneT + ?Sized>(&self, scene: &S) -> Vec<Intersection> {
        self.hits(scene, |object| object.pickable)
            .sorted_by(nearest_first)
            .collect()
    }

    /// Closest visible object, pickable or not
    pub fn closest<S: SceneT + ?Sized>(&self, scene: &S) -> Option<Intersection> {
        self.hits(scene, |_| true).min_by(nearest_first)
    }

    fn hits<'a, S: SceneT + ?Sized>(
        &'a self,
        scene: &'a S,
        filter: impl Fn(&SceneObject) -> bool + 'a,
    ) -> impl Iterator<Item = Intersection> + 'a {
        let ray = &self.ray;
        scene
            .objects()
            .filter(move |object| object.visible && filter(object))
            .filter_map(move |object| {
                let local_ray = object.transform.ray_to_local(ray)?;
                let IntersectionResult::Intersection(hit) = object.shape.intersect(&local_ray)
                else {
                    return None;
                };
                let point = object.transform.apply(hit.point);
                let distance = ray.distance_to(point);
                ray.range().contains(&distance).then(|| Intersection {
                    object: object.id,
                    distance,
                    point,
                    normal: object.transform.normal_to_world(hit.normal),
                })
            })
    }
}

fn nearest_first(a: &Intersection, b: &Intersection) -> Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then_with(|| a.object.cmp(&b.object))
}

/// What happens to an interactive object while it is under the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoverAction {
    /// Set the material color
    Tint(Color),
    /// Rotate as a function of time, like [MotionRule::Phase]
    Spin { period: f64, axes: Axes },
}

/// Applies [HoverAction]s to the picked objects.
///
/// With `sticky` set, a tint stays after the pointer leaves the object. Without
/// it, the color the object had before its first tint is restored on the first
/// frame the object is no longer hit.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    rules: BTreeMap<ObjectId, HoverAction>,
    pub sticky: bool,
    /// Color of each tinted object before it was first tinted
    saved_colors: BTreeMap<ObjectId, Color>,
}

impl Highlighter {
    pub fn new(sticky: bool) -> Self {
        Self {
            sticky,
            ..Default::default()
        }
    }

    pub fn add_rule(&mut self, object: ObjectId, action: HoverAction) -> Option<HoverAction> {
        self.rules.insert(object, action)
    }

    pub fn remove_rule(&mut self, object: ObjectId) -> Option<HoverAction> {
        self.rules.remove(&object)
    }

    pub fn rule(&self, object: ObjectId) -> Option<&HoverAction> {
        self.rules.get(&object)
    }

    pub fn is_tinted(&self, object: ObjectId) -> bool {
        self.saved_colors.contains_key(&object)
    }

    /// Replace the color restored for a tinted object, after the color itself was edited.
    /// Objects without a saved color are left alone.
    pub fn rebase(&mut self, object: ObjectId, color: Color) {
        if let Some(saved) = self.saved_colors.get_mut(&object) {
            *saved = color;
        }
    }

    /// Apply the rules of every hit object, visiting all of `hits` in order.
    ///
    /// Returns the interactive objects acted upon. Hits on removed objects are ignored.
    pub fn apply<S: SceneT + ?Sized>(
        &mut self,
        hits: &[Intersection],
        t: f64,
        scene: &mut S,
    ) -> Vec<ObjectId> {
        let mut hovered = BTreeSet::new();

        for hit in hits {
            let Some(action) = self.rules.get(&hit.object) else {
                continue;
            };
            let Some(object) = scene.object_mut(hit.object) else {
                log::trace!("picked {} is gone", hit.object);
                continue;
            };
            match *action {
                HoverAction::Tint(color) => {
                    self.saved_colors
                        .entry(hit.object)
                        .or_insert(object.material.color);
                    object.material.color = color;
                }
                HoverAction::Spin { period, axes } => {
                    let rotation = &mut object.transform.rotation;
                    *rotation = MotionRule::Phase { period, axes }.rotation_at(t, *rotation);
                }
            }
            hovered.insert(hit.object);
        }

        let sticky = self.sticky;
        self.saved_colors.retain(|&id, original| {
            let Some(object) = scene.object_mut(id) else {
                return false;
            };
            if sticky || hovered.contains(&id) {
                return true;
            }
            object.material.color = *original;
            log::trace!("{id} restored");
            false
        });

        hovered.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::{
        color,
        material::Material,
        math::transform::Transform,
        scene::{ObjectDescriptor, Scene},
        shape::{Cuboid, Sphere},
    };

    fn camera() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(f32::to_radians(45.0), 1.0, 0.1, 1000.0)
            .at(Vec3::new(0.0, 0.0, 30.0));
        camera.look_at(Vec3::ZERO);
        camera
    }

    /// Two spheres on the view axis, one box off to the side
    fn scene() -> (Scene, ObjectId, ObjectId, ObjectId) {
        let mut scene = Scene::new();
        let far = scene.add_object(
            ObjectDescriptor::new(Sphere { radius: 4.0 }, Material::standard(color::WHITE))
                .at(Transform::from_position(Vec3::new(0.0, 0.0, -10.0))),
        );
        let near = scene.add_object(
            ObjectDescriptor::new(Sphere { radius: 4.0 }, Material::standard(color::BLUE))
                .at(Transform::from_position(Vec3::new(0.0, 0.0, 5.0))),
        );
        let side = scene.add_object(
            ObjectDescriptor::new(Cuboid::default(), Material::standard(color::GREEN))
                .at(Transform::from_position(Vec3::new(8.0, 0.0, 0.0))),
        );
        (scene, far, near, side)
    }

    #[test]
    fn ordered_nearest_first() {
        let (scene, far, near, _) = scene();
        let hits = Raycaster::from_camera(&camera(), Ndc::CENTER).intersect_objects(&scene);

        assert_eq!(hits.iter().map(|h| h.object).collect::<Vec<_>>(), vec![near, far]);
        assert!((hits[0].distance - 21.0).abs() < 1e-3);
        assert!((hits[1].distance - 36.0).abs() < 1e-3);
        assert!(hits[0].normal.distance(Vec3::Z) < 1e-4);
    }

    #[test]
    fn aimed_at_center() {
        let (scene, _, _, side) = scene();
        let camera = camera();
        let ndc = camera.project(Vec3::new(8.0, 0.0, 0.0)).unwrap();
        let hits = Raycaster::from_camera(&camera, ndc).intersect_objects(&scene);
        assert!(hits.iter().any(|h| h.object == side));
    }

    #[test]
    fn hidden_and_unpickable_are_ignored() {
        let (mut scene, far, near, _) = scene();
        scene.object_mut(near).unwrap().visible = false;
        scene.object_mut(far).unwrap().pickable = false;

        let hits = Raycaster::from_camera(&camera(), Ndc::CENTER).intersect_objects(&scene);
        assert!(hits.is_empty());
    }

    #[test]
    fn closest_ignores_pickable() {
        let (mut scene, _, near, _) = scene();
        scene.object_mut(near).unwrap().pickable = false;
        let raycaster = Raycaster::from_camera(&camera(), Ndc::CENTER);
        assert_eq!(raycaster.closest(&scene).map(|hit| hit.object), Some(near));
    }

    #[test]
    fn scaled_object_distance() {
        let mut scene = Scene::new();
        let id = scene.add_object(
            ObjectDescriptor::new(Sphere { radius: 1.0 }, Material::default())
                .at(Transform::IDENTITY.with_scale(Vec3::splat(4.0))),
        );
        let hits = Raycaster::from_camera(&camera(), Ndc::CENTER).intersect_objects(&scene);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].object, id);
        assert!((hits[0].distance - 26.0).abs() < 1e-3);
    }

    #[test]
    fn sticky_tint() {
        let (mut scene, far, near, _) = scene();
        let mut highlighter = Highlighter::new(true);
        highlighter.add_rule(far, HoverAction::Tint(color::RED));
        highlighter.add_rule(near, HoverAction::Tint(color::RED));

        let raycaster = Raycaster::from_camera(&camera(), Ndc::CENTER);
        let hits = raycaster.intersect_objects(&scene);
        // the far sphere is behind the near one, but every hit is visited
        assert_eq!(highlighter.apply(&hits, 0.0, &mut scene), vec![far, near]);

        // pointer moves away: nothing hit, colors stay
        assert!(highlighter.apply(&[], 16.0, &mut scene).is_empty());
        assert_eq!(scene.object(far).unwrap().material.color, color::RED);
        assert_eq!(scene.object(near).unwrap().material.color, color::RED);
    }

    #[test]
    fn non_sticky_tint_is_restored() {
        let (mut scene, _, near, _) = scene();
        let mut highlighter = Highlighter::new(false);
        highlighter.add_rule(near, HoverAction::Tint(color::RED));

        let hits = Raycaster::from_camera(&camera(), Ndc::CENTER).intersect_objects(&scene);
        highlighter.apply(&hits, 0.0, &mut scene);
        highlighter.apply(&hits, 16.0, &mut scene);
        assert_eq!(scene.object(near).unwrap().material.color, color::RED);

        highlighter.apply(&[], 32.0, &mut scene);
        assert_eq!(scene.object(near).unwrap().material.color, color::BLUE);
        assert!(!highlighter.is_tinted(near));
    }

    #[test]
    fn rebased_color_is_restored() {
        let (mut scene, _, near, _) = scene();
        let mut highlighter = Highlighter::new(false);
        highlighter.add_rule(near, HoverAction::Tint(color::RED));

        let hits = Raycaster::from_camera(&camera(), Ndc::CENTER).intersect_objects(&scene);
        highlighter.apply(&hits, 0.0, &mut scene);
        highlighter.rebase(near, color::GREEN);
        // untinted objects have nothing to rebase
        highlighter.rebase(ObjectId(99), color::WHITE);
        assert!(!highlighter.is_tinted(ObjectId(99)));

        highlighter.apply(&[], 16.0, &mut scene);
        assert_eq!(scene.object(near).unwrap().material.color, color::GREEN);
    }

    #[test]
    fn spin_while_hovered() {
        let (mut scene, _, near, _) = scene();
        let mut highlighter = Highlighter::new(true);
        highlighter.add_rule(
            near,
            HoverAction::Spin {
                period: 1000.0,
                axes: Axes::XY,
            },
        );

        let hits = Raycaster::from_camera(&camera(), Ndc::CENTER).intersect_objects(&scene);
        highlighter.apply(&hits, 500.0, &mut scene);
        assert_eq!(
            scene.object(near).unwrap().transform.rotation,
            Vec3::new(0.5, 0.5, 0.0)
        );
    }

    #[test]
    fn stale_hits_are_no_ops() {
        let (mut scene, far, near, _) = scene();
        let mut highlighter = Highlighter::new(false);
        highlighter.add_rule(near, HoverAction::Tint(color::RED));
        highlighter.add_rule(far, HoverAction::Tint(color::RED));

        let hits = Raycaster::from_camera(&camera(), Ndc::CENTER).intersect_objects(&scene);
        highlighter.apply(&hits, 0.0, &mut scene);
        scene.remove_object(near);

        // the stored hits still mention the removed object
        assert_eq!(highlighter.apply(&hits, 16.0, &mut scene), vec![far]);
        assert!(!highlighter.is_tinted(near));
    }
}
