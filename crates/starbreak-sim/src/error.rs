//! Errors surfaced by the encounter engine.

use thiserror::Error;

use starbreak_core::error::ConfigError;

#[derive(Debug, Error)]
pub enum EncounterError {
    #[error("encounter configuration rejected: {0}")]
    Config(#[from] ConfigError),

    #[error("no encounter is running")]
    NoEncounter,

    #[error("an encounter is already running")]
    AlreadyRunning,
}
