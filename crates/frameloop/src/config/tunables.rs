use std::{collections::BTreeMap, sync::Arc};

use super::{ConfigError, ParamSpec, ParamValue};
use crate::color::Color;

type ChangeListener = Box<dyn FnMut(&str, &ParamValue) + Send>;

/// Immutable view of every parameter value at one point in time.
///
/// Cloning is cheap; the loop takes one per frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSnapshot(Arc<BTreeMap<String, ParamValue>>);

impl ConfigSnapshot {
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn scalar(&self, name: &str) -> Option<f32> {
        self.get(name).and_then(ParamValue::as_scalar)
    }

    pub fn color(&self, name: &str) -> Option<Color> {
        self.get(name).and_then(ParamValue::as_color)
    }

    pub fn toggle(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(ParamValue::as_toggle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

struct Param {
    spec: ParamSpec,
    value: ParamValue,
}

/// The mutable side of the configuration, owned by whatever edits it.
///
/// Every write is clamped to the declared range, then reported synchronously to
/// the change listeners.
#[derive(Default)]
pub struct Tunables {
    params: BTreeMap<String, Param>,
    listeners: Vec<ChangeListener>,
    snapshot: Option<ConfigSnapshot>,
}

impl Tunables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a parameter, or redeclare it keeping the current value if it still fits.
    pub fn declare(&mut self, name: impl Into<String>, spec: ParamSpec) -> ParamValue {
        let name = name.into();
        let value = self
            .params
            .get(&name)
            .and_then(|p| spec.clamp(p.value))
            .or_else(|| spec.clamp(spec.default))
            .unwrap_or(spec.default);
        self.params.insert(name, Param { spec, value });
        self.snapshot = None;
        value
    }

    pub fn spec(&self, name: &str) -> Option<&ParamSpec> {
        self.params.get(name).map(|p| &p.spec)
    }

    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.params.get(name).map(|p| p.value)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    /// Write a value; returns the value actually stored after clamping.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<ParamValue, ConfigError> {
        let param = self
            .params
            .get_mut(name)
            .ok_or_else(|| ConfigError::UnknownParam(name.to_owned()))?;
        let clamped = param
            .spec
            .clamp(value)
            .ok_or_else(|| ConfigError::KindMismatch {
                name: name.to_owned(),
                expected: param.spec.kind(),
                found: value.kind(),
            })?;

        if clamped != value {
            log::debug!("{name}: {value} clamped to {clamped}");
        }
        if param.value != clamped {
            param.value = clamped;
            self.snapshot = None;
        }

        for listener in self.listeners.iter_mut() {
            listener(name, &clamped);
        }
        Ok(clamped)
    }

    /// Same as [Tunables::set], reading the value from text
    pub fn set_from_str(&mut self, name: &str, input: &str) -> Result<ParamValue, ConfigError> {
        let spec = self
            .spec(name)
            .ok_or_else(|| ConfigError::UnknownParam(name.to_owned()))?;
        let value = spec.parse(input).ok_or_else(|| ConfigError::Parse {
            name: name.to_owned(),
            input: input.to_owned(),
            expected: spec.kind(),
        })?;
        self.set(name, value)
    }

    /// Register a callback run on every successful `set`
    pub fn on_change<F: FnMut(&str, &ParamValue) + Send + 'static>(&mut self, listener: F) {
        self.listeners.push(Box::new(listener));
    }

    /// Current values. Rebuilt only after a change.
    pub fn snapshot(&mut self) -> ConfigSnapshot {
        self.snapshot
            .get_or_insert_with(|| {
                ConfigSnapshot(Arc::new(
                    self.params
                        .iter()
                        .map(|(name, p)| (name.clone(), p.value))
                        .collect(),
                ))
            })
            .clone()
    }
}
