//! Procedural motion, evaluated once per frame.
//!
//! Rotations are either a pure function of the frame timestamp
//! ([MotionRule::Phase], the default) or an accumulator advanced on every call
//! ([MotionRule::Incremental], which runs faster on faster displays).

use std::collections::BTreeMap;

use bitflags::bitflags;
use glam::{BVec3, Vec3};

use crate::{
    config::ConfigSnapshot,
    scene::{ObjectId, SceneT},
};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Axes: u8 {
        const X = 1 << 0;
        const Y = 1 << 1;
        const Z = 1 << 2;
        const XY = Self::X.bits() | Self::Y.bits();
    }
}

impl Axes {
    fn mask(self) -> BVec3 {
        BVec3::new(
            self.contains(Axes::X),
            self.contains(Axes::Y),
            self.contains(Axes::Z),
        )
    }

    /// `value` on the selected axes, `rest` on the others
    pub fn select(self, value: Vec3, rest: Vec3) -> Vec3 {
        Vec3::select(self.mask(), value, rest)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MotionRule {
    /// `rotation = t / period` on the selected axes, `t` in milliseconds
    Phase { period: f64, axes: Axes },
    /// `rotation += delta` on every frame
    Incremental { delta: Vec3 },
    #[default]
    None,
}

impl MotionRule {
    /// Rotation following `current` at time `t`
    pub fn rotation_at(&self, t: f64, current: Vec3) -> Vec3 {
        match *self {
            MotionRule::Phase { period, axes } if period != 0.0 => {
                axes.select(Vec3::splat((t / period) as f32), current)
            }
            MotionRule::Phase { .. } => current,
            MotionRule::Incremental { delta } => current + delta,
            MotionRule::None => current,
        }
    }
}

/// Which object moves how
#[derive(Debug, Default, Clone)]
pub struct MotionRegistry {
    rules: BTreeMap<ObjectId, MotionRule>,
}

impl MotionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, object: ObjectId, rule: MotionRule) -> Option<MotionRule> {
        self.rules.insert(object, rule)
    }

    pub fn unregister(&mut self, object: ObjectId) -> Option<MotionRule> {
        self.rules.remove(&object)
    }

    pub fn rule(&self, object: ObjectId) -> MotionRule {
        self.rules.get(&object).copied().unwrap_or_default()
    }

    /// Apply every rule for time `t`; returns the number of objects moved.
    ///
    /// Rules pointing at removed objects are skipped.
    pub fn apply<S: SceneT + ?Sized>(&self, t: f64, scene: &mut S) -> usize {
        let mut moved = 0;
        for (&id, rule) in self.rules.iter() {
            if let MotionRule::None = rule {
                continue;
            }
            match scene.object_mut(id) {
                Some(object) => {
                    let transform = &mut object.transform;
                    transform.rotation = rule.rotation_at(t, transform.rotation);
                    moved += 1;
                }
                None => log::trace!("motion rule for removed {id}"),
            }
        }
        moved
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Vertical bounce: `y = base + amplitude * |sin(step)|`.
///
/// `step` grows by the value of the speed parameter on every frame and is never reset.
#[derive(Debug, Clone, PartialEq)]
pub struct Oscillator {
    pub target: ObjectId,
    pub amplitude: f32,
    pub base: f32,
    /// Name of the scalar parameter read as the phase increment
    pub speed_param: String,
    step: f64,
}

impl Oscillator {
    pub fn new(target: ObjectId, amplitude: f32, speed_param: impl Into<String>) -> Self {
        Self {
            target,
            amplitude,
            base: 0.0,
            speed_param: speed_param.into(),
            step: 0.0,
        }
    }

    pub fn with_base(self, base: f32) -> Self {
        Self { base, ..self }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn offset(&self) -> f32 {
        bounce_offset(self.amplitude, self.step)
    }

    /// Advance the phase and place the target. A missing speed parameter counts as 0.
    pub fn advance<S: SceneT + ?Sized>(&mut self, config: &ConfigSnapshot, scene: &mut S) {
        let speed = config.scalar(&self.speed_param).unwrap_or_else(|| {
            log::trace!("no scalar `{}`, bounce stays still", self.speed_param);
            0.0
        });
        self.step += f64::from(speed);

        let y = self.base + self.offset();
        match scene.object_mut(self.target) {
            Some(object) => object.transform.position.y = y,
            None => log::trace!("oscillator target {} removed", self.target),
        }
    }
}

/// Never negative, at most `amplitude`, period PI in `step`.
///
/// `step` is kept in `f64` so small increments still register after long runs.
pub fn bounce_offset(amplitude: f32, step: f64) -> f32 {
    amplitude * step.sin().abs() as f32
}
