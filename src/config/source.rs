//! Environment value resolution and type coercion.
//!
//! [`EnvSource`] materializes the effective key-value mapping once per load:
//! entries from an optional `.env` file first, then process environment
//! variables on top (explicit environment always wins). Keys are normalized to
//! uppercase on ingest so lookups are case-insensitive.
//!
//! [`GroupReader`] is the single place where raw strings become typed field
//! values; every coercion failure is reported through it with the group name,
//! the key, and the raw value attached.

use super::error::ConfigError;
use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Default environment file, resolved relative to the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// A materialized snapshot of environment state.
///
/// Construction reads everything up front; resolving fields afterwards touches
/// no further process state, which keeps a single load deterministic even if
/// the environment changes mid-flight.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    values: HashMap<String, String>,
}

impl EnvSource {
    /// Builds a source from the process environment plus the default `.env`
    /// file, if one exists.
    pub fn process() -> Self {
        Self::with_env_file(DEFAULT_ENV_FILE)
    }

    /// Builds a source from the process environment plus the given env file.
    ///
    /// A missing or unreadable file is not an error: the file only supplies
    /// fallback values. Process environment variables override file entries.
    pub fn with_env_file<P: AsRef<Path>>(path: P) -> Self {
        let mut values = HashMap::new();

        if let Ok(iter) = dotenvy::from_path_iter(path.as_ref()) {
            for (key, value) in iter.flatten() {
                values.insert(key.to_ascii_uppercase(), value);
            }
        }

        // Explicit environment takes precedence over file-provided defaults.
        for (key, value) in env::vars() {
            values.insert(key.to_ascii_uppercase(), value);
        }

        Self { values }
    }

    /// Builds a source from arbitrary key-value pairs.
    ///
    /// Used by tests to load configuration deterministically without touching
    /// the process environment.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.into().to_ascii_uppercase(), v.into()))
            .collect();
        Self { values }
    }

    /// Case-insensitive lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(&key.to_ascii_uppercase())
            .map(String::as_str)
    }
}

/// Typed field resolution for one settings group.
///
/// Wraps an [`EnvSource`] with the group label used in error reporting. Each
/// getter resolves a single field: look up the key, fall back to the declared
/// default when absent, coerce the raw string otherwise.
pub struct GroupReader<'a> {
    source: &'a EnvSource,
    group: &'static str,
}

impl<'a> GroupReader<'a> {
    pub fn new(source: &'a EnvSource, group: &'static str) -> Self {
        Self { source, group }
    }

    /// Resolves a string field.
    pub fn string(&self, key: &str, default: &str) -> String {
        self.source
            .get(key)
            .map_or_else(|| default.to_string(), ToString::to_string)
    }

    /// Resolves an optional string field. Absence means `None`.
    pub fn opt_string(&self, key: &str) -> Option<String> {
        self.source.get(key).map(ToString::to_string)
    }

    /// Resolves a numeric field via `FromStr` (integers and floats).
    pub fn value<T: FromStr>(&self, key: &str, default: T) -> Result<T, ConfigError> {
        match self.source.get(key) {
            None => Ok(default),
            Some(raw) => raw.parse::<T>().map_err(|_| self.malformed(
                key,
                raw,
                std::any::type_name::<T>(),
            )),
        }
    }

    /// Resolves a boolean field.
    ///
    /// Accepted spellings, case-insensitively: `true`/`false`, `1`/`0`,
    /// `yes`/`no`, `on`/`off`. Anything else is a [`ConfigError::MalformedValue`].
    pub fn flag(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        match self.source.get(key) {
            None => Ok(default),
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" => Ok(false),
                _ => Err(self.malformed(key, raw, "bool (true/false, 1/0, yes/no, on/off)")),
            },
        }
    }

    /// Resolves an ordered list field.
    ///
    /// The encoding is comma-separated with items trimmed; a value that is all
    /// whitespace yields an empty list. Empty items (leading, trailing, or
    /// doubled commas) are rejected as malformed rather than silently dropped.
    pub fn list(&self, key: &str, default: &[&str]) -> Result<Vec<String>, ConfigError> {
        match self.source.get(key) {
            None => Ok(default.iter().map(ToString::to_string).collect()),
            Some(raw) => {
                if raw.trim().is_empty() {
                    return Ok(Vec::new());
                }
                let mut items = Vec::new();
                for item in raw.split(',') {
                    let item = item.trim();
                    if item.is_empty() {
                        return Err(self.malformed(key, raw, "comma-separated list"));
                    }
                    items.push(item.to_string());
                }
                Ok(items)
            }
        }
    }

    fn malformed(&self, key: &str, value: &str, expected: &str) -> ConfigError {
        ConfigError::MalformedValue {
            group: self.group,
            key: key.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }
}
