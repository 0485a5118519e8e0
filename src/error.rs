//! Configuration errors
//!
//! The simulation itself has no error paths; bad numbers are rejected once,
//! when a [`crate::Tuning`] is validated.

use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    /// A value that must be strictly positive was zero, negative or NaN
    NotPositive { field: &'static str, value: f32 },
    /// A value fell outside its allowed range
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    /// A count that must be at least one was zero
    ZeroCount { field: &'static str },
    /// Tuning file could not be parsed
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} out of range: {value} (allowed {min}..={max})"),
            Self::ZeroCount { field } => write!(f, "{field} must be at least 1"),
            Self::Json(err) => write!(f, "invalid tuning json: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
