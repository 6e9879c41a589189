//! Live-tunable parameters.
//!
//! A configuration front end edits [Tunables]; once per frame the loop takes
//! an immutable [ConfigSnapshot] and copies values onto the properties
//! [ParamBinding]s point at. Nothing flows back from the loop to the tunables.

pub mod binding;
pub mod defaults;
pub mod params;
pub mod tunables;

use std::fmt::Display;

pub use binding::{ApplyOutcome, ParamBinding, ParamTarget, Trigger};
pub use params::{ParamKind, ParamSpec, ParamValue};
pub use tunables::{ConfigSnapshot, Tunables};

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    UnknownParam(String),
    KindMismatch {
        name: String,
        expected: ParamKind,
        found: ParamKind,
    },
    Parse {
        name: String,
        input: String,
        expected: ParamKind,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::UnknownParam(name) => write!(f, "unknown parameter `{name}`"),
            ConfigError::KindMismatch {
                name,
                expected,
                found,
            } => write!(f, "parameter `{name}` holds a {expected}, got a {found}"),
            ConfigError::Parse {
                name,
                input,
                expected,
            } => write!(f, "cannot read `{input}` as a {expected} for parameter `{name}`"),
        }
    }
}

impl std::error::Error for ConfigError {}
