pub mod examples;

use std::{collections::BTreeMap, fmt::Display};

use crate::{
    light::{Light, LightId},
    material::Material,
    math::transform::Transform,
    shape::Shape,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u64);

impl Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

pub struct SceneObject {
    pub id: ObjectId,
    pub name: Option<String>,
    pub shape: Box<dyn Shape>,
    pub transform: Transform,
    pub material: Material,
    pub visible: bool,
    /// Whether picking rays consider this object
    pub pickable: bool,
}

impl std::fmt::Debug for SceneObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneObject")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("shape", &"<shape>")
            .field("transform", &self.transform)
            .field("material", &self.material)
            .field("visible", &self.visible)
            .field("pickable", &self.pickable)
            .finish()
    }
}

/// What is needed to add an object to a scene; the scene assigns the id.
pub struct ObjectDescriptor {
    pub name: Option<String>,
    pub shape: Box<dyn Shape>,
    pub transform: Transform,
    pub material: Material,
    pub pickable: bool,
}

impl ObjectDescriptor {
    pub fn new<S: Shape + 'static>(shape: S, material: Material) -> Self {
        Self {
            name: None,
            shape: Box::new(shape),
            transform: Transform::IDENTITY,
            material,
            pickable: true,
        }
    }

    pub fn named(self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }

    pub fn at(self, transform: Transform) -> Self {
        Self { transform, ..self }
    }

    pub fn not_pickable(self) -> Self {
        Self {
            pickable: false,
            ..self
        }
    }
}

/// The scene graph as seen by the frame loop.
///
/// Ids handed out by `add_object` / `add_light` are never reused, so a stale
/// id simply resolves to `None`.
pub trait SceneT: Send + Sync {
    fn add_object(&mut self, object: ObjectDescriptor) -> ObjectId;
    fn remove_object(&mut self, id: ObjectId) -> Option<SceneObject>;
    fn object(&self, id: ObjectId) -> Option<&SceneObject>;
    fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject>;
    /// All objects, in id order
    fn objects(&self) -> Box<dyn Iterator<Item = &SceneObject> + '_>;

    fn add_light(&mut self, light: Light) -> LightId;
    fn remove_light(&mut self, id: LightId) -> Option<Light>;
    fn light(&self, id: LightId) -> Option<&Light>;
    fn light_mut(&mut self, id: LightId) -> Option<&mut Light>;
    fn lights(&self) -> Box<dyn Iterator<Item = (LightId, &Light)> + '_>;

    fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects()
            .find(|o| o.name.as_deref() == Some(name))
            .map(|o| o.id)
    }
}

#[derive(Default)]
pub struct Scene {
    objects: BTreeMap<ObjectId, SceneObject>,
    lights: BTreeMap<LightId, Light>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl SceneT for Scene {
    fn add_object(&mut self, object: ObjectDescriptor) -> ObjectId {
        let id = ObjectId(self.fresh_id());
        let ObjectDescriptor {
            name,
            shape,
            transform,
            material,
            pickable,
        } = object;
        log::debug!("adding {id} ({})", name.as_deref().unwrap_or("unnamed"));
        self.objects.insert(
            id,
            SceneObject {
                id,
                name,
                shape,
                transform,
                material,
                visible: true,
                pickable,
            },
        );
        id
    }

    fn remove_object(&mut self, id: ObjectId) -> Option<SceneObject> {
        self.objects.remove(&id)
    }

    fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    fn objects(&self) -> Box<dyn Iterator<Item = &SceneObject> + '_> {
        Box::new(self.objects.values())
    }

    fn add_light(&mut self, light: Light) -> LightId {
        let id = LightId(self.fresh_id());
        log::debug!("adding {id} ({})", light.label.as_deref().unwrap_or("unnamed"));
        self.lights.insert(id, light);
        id
    }

    fn remove_light(&mut self, id: LightId) -> Option<Light> {
        self.lights.remove(&id)
    }

    fn light(&self, id: LightId) -> Option<&Light> {
        self.lights.get(&id)
    }

    fn light_mut(&mut self, id: LightId) -> Option<&mut Light> {
        self.lights.get_mut(&id)
    }

    fn lights(&self) -> Box<dyn Iterator<Item = (LightId, &Light)> + '_> {
        Box::new(self.lights.iter().map(|(id, light)| (*id, light)))
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::{color, shape::Sphere};

    #[test]
    fn ids_are_not_reused() {
        let mut scene = Scene::new();
        let a = scene.add_object(ObjectDescriptor::new(
            Sphere::default(),
            Material::standard(color::WHITE),
        ));
        assert!(scene.remove_object(a).is_some());
        let b = scene.add_object(ObjectDescriptor::new(
            Sphere::default(),
            Material::standard(color::WHITE),
        ));

        assert_ne!(a, b);
        assert!(scene.object(a).is_none());
        assert!(scene.object_mut(a).is_none());
        assert!(scene.remove_object(a).is_none());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn lookup_by_name() {
        let mut scene = Scene::new();
        let boxed = scene.add_object(
            ObjectDescriptor::new(Sphere::default(), Material::default())
                .named("theBox")
                .at(Transform::from_position(Vec3::X)),
        );
        scene.add_light(Light::ambient(color::WHITE, 1.0));

        assert_eq!(scene.find_by_name("theBox"), Some(boxed));
        assert_eq!(scene.find_by_name("missing"), None);
        assert_eq!(scene.lights().count(), 1);
        assert_eq!(scene.object(boxed).unwrap().transform.position, Vec3::X);
    }
}
