use super::{ConfigSnapshot, ParamValue};
use crate::{
    light::{FieldMismatch, LightField, LightId},
    scene::{ObjectId, SceneT},
};

/// The property a parameter is copied onto every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamTarget {
    Light { light: LightId, field: LightField },
    ObjectColor(ObjectId),
    ObjectWireframe(ObjectId),
}

/// When a binding copies its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Trigger {
    /// On every frame, whether the value changed or not
    #[default]
    EveryFrame,
    /// On frames where the value differs from the previous snapshot. Without a
    /// previous snapshot it fires. Lets other writers (hover tints) own the property
    /// between edits.
    OnChange,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamBinding {
    pub param: String,
    pub target: ParamTarget,
    pub trigger: Trigger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// The snapshot has no such parameter
    MissingParam,
    /// The object or light is gone
    MissingTarget,
    /// The value cannot be written to that property
    Mismatch,
}

impl ParamBinding {
    pub fn new(param: impl Into<String>, target: ParamTarget) -> Self {
        Self {
            param: param.into(),
            target,
            trigger: Trigger::EveryFrame,
        }
    }

    pub fn on_change(self) -> Self {
        Self {
            trigger: Trigger::OnChange,
            ..self
        }
    }

    /// Whether the binding copies its value this frame, `previous` being the
    /// snapshot of the frame before, if any
    pub fn is_due(&self, previous: Option<&ConfigSnapshot>, config: &ConfigSnapshot) -> bool {
        match self.trigger {
            Trigger::EveryFrame => true,
            Trigger::OnChange => previous
                .map_or(true, |previous| previous.get(&self.param) != config.get(&self.param)),
        }
    }

    /// Copy the current value onto the target, unconditionally.
    pub fn apply<S: SceneT + ?Sized>(&self, config: &ConfigSnapshot, scene: &mut S) -> ApplyOutcome {
        let Some(value) = config.get(&self.param) else {
            return ApplyOutcome::MissingParam;
        };

        match (self.target, *value) {
            (ParamTarget::Light { light, field }, value) => {
                let Some(light) = scene.light_mut(light) else {
                    return ApplyOutcome::MissingTarget;
                };
                let written = match value {
                    ParamValue::Scalar(x) => light.set_scalar(field, x),
                    ParamValue::Color(c) => light.set_color(field, c),
                    ParamValue::Toggle(_) => Err(FieldMismatch::WrongKind),
                };
                match written {
                    Ok(()) => ApplyOutcome::Applied,
                    Err(_) => ApplyOutcome::Mismatch,
                }
            }
            (ParamTarget::ObjectColor(id), ParamValue::Color(c)) => match scene.object_mut(id) {
                Some(object) => {
                    object.material.color = c;
                    ApplyOutcome::Applied
                }
                None => ApplyOutcome::MissingTarget,
            },
            (ParamTarget::ObjectWireframe(id), ParamValue::Toggle(b)) => match scene.object_mut(id) {
                Some(object) => {
                    object.material.wireframe = b;
                    ApplyOutcome::Applied
                }
                None => ApplyOutcome::MissingTarget,
            },
            _ => ApplyOutcome::Mismatch,
        }
    }
}
