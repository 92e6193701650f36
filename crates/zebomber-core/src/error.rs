//! Error taxonomy.
//!
//! `SimError` values never escape a tick: systems return them, the engine
//! logs them and carries on with the affected wave/spawn/shot skipped.
//! `ConfigError` is raised while loading configuration, before any tick runs.

use thiserror::Error;

/// Recoverable simulation failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A required reference (munition kind, landmark, effect config) is absent.
    #[error("missing configuration: {0}")]
    MissingConfiguration(String),
    /// The placement sampler could not satisfy the separation constraint.
    #[error("no spawn angle satisfied the separation constraint after {attempts} attempts")]
    SamplingExhausted { attempts: u32 },
    /// A handle referenced an entity that is already destroyed.
    #[error("entity {0} is already destroyed")]
    StaleHandle(u64),
}

/// Configuration loading and override failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown configuration key `{0}`")]
    UnknownKey(String),
    #[error("invalid value `{value}` for key `{key}`")]
    InvalidValue { key: String, value: String },
    #[error("configuration key `{0}` refers to a spawner that does not exist")]
    NoSuchSpawner(String),
}
