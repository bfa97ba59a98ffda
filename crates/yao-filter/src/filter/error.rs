//! Error types for filter definitions.
//!
//! Resolution and evaluation never fail; these errors only come from
//! turning declarative definitions into specs.

use thiserror::Error;

/// A specialized Result type for filter definition operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while building filters from definitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// A preset name that does not exist.
    #[error("unknown preset: {name}{}", suggestion_hint(.suggestion))]
    UnknownPreset {
        /// The requested preset.
        name: String,
        /// The closest known preset, if one is similar enough.
        suggestion: Option<String>,
    },

    /// A hue that is neither `-1` nor a valid hue.
    #[error("invalid hue: {value} (expected -1 or 0-65535)")]
    InvalidHue {
        /// The rejected value.
        value: i64,
    },

    /// A type range whose start is after its end.
    #[error("invalid type range: 0x{start:x} is after 0x{end:x}")]
    InvalidTypeRange {
        /// First graphic.
        start: u32,
        /// Last graphic.
        end: u32,
    },

    /// An AND operator that is not exactly one character.
    #[error("invalid and operator: {value:?} (expected a single character)")]
    InvalidAndOperator {
        /// The rejected value.
        value: String,
    },
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{s}'?)"),
        None => String::new(),
    }
}

impl FilterError {
    /// Creates an unknown preset error.
    pub fn unknown_preset(name: impl Into<String>, suggestion: Option<String>) -> Self {
        FilterError::UnknownPreset {
            name: name.into(),
            suggestion,
        }
    }

    /// Creates an invalid hue error.
    pub fn invalid_hue(value: i64) -> Self {
        FilterError::InvalidHue { value }
    }

    /// Creates an invalid and-operator error.
    pub fn invalid_and_operator(value: impl Into<String>) -> Self {
        FilterError::InvalidAndOperator {
            value: value.into(),
        }
    }
}
