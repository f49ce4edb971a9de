//! Crate-level error types.

use std::fmt;

/// Errors produced by the pond-rig crate.
#[derive(Debug)]
pub enum PondError {
    /// A physics parameter violated its contract (e.g. non-positive mass).
    InvalidPhysicsParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Malformed session script.
    Script(String),
}

impl PondError {
    /// Shorthand for an [`PondError::InvalidPhysicsParameter`].
    #[must_use]
    pub fn invalid(name: &'static str, value: f32) -> Self {
        Self::InvalidPhysicsParameter { name, value }
    }
}

impl fmt::Display for PondError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPhysicsParameter { name, value } => {
                write!(f, "invalid physics parameter {name} = {value}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Script(msg) => write!(f, "session script error: {msg}"),
        }
    }
}

impl std::error::Error for PondError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PondError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
