//! Error types for encounter configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating an encounter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("phase table is empty")]
    EmptyPhaseTable,

    #[error("first phase threshold must be 100%, got {threshold}")]
    FirstPhaseNotFull { threshold: f32 },

    #[error("phase {index} threshold {threshold} is not below previous threshold {previous}")]
    ThresholdsNotDescending {
        index: usize,
        previous: f32,
        threshold: f32,
    },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read encounter file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse encounter TOML in {path}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
