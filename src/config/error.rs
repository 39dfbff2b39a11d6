//! Error types for configuration loading.
//!
//! Loading fails fast: the first bad field aborts construction of the whole
//! aggregate, and the error carries the settings group, the offending key,
//! and the raw value so the input can be fixed without reading source.

use thiserror::Error;

/// Error produced while building a [`Config`](super::Config) snapshot.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    /// A raw environment/file value could not be coerced to its declared type.
    #[error("{group}: cannot parse {key}={value:?} as {expected}")]
    MalformedValue {
        group: &'static str,
        key: String,
        value: String,
        expected: String,
    },

    /// A coerced value violates a cross-field or enumeration rule.
    #[error("{group}: {field} = {value} violates constraint: {rule}")]
    ConstraintViolation {
        group: &'static str,
        field: &'static str,
        value: String,
        rule: String,
    },
}

impl ConfigError {
    /// The settings group the error originated from ("risk", "app", ...).
    pub fn group(&self) -> &'static str {
        match self {
            Self::MalformedValue { group, .. } => group,
            Self::ConstraintViolation { group, .. } => group,
        }
    }
}
