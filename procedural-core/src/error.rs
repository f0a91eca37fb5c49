//! Error types for generation, dispatch and configuration.
//!
//! `ContentError` is a setup bug (bad registry, exhausted name pool) and
//! aborts the item being generated. `EffectError` comes out of a single
//! callback during dispatch and is logged, never propagated past the engine.

use crate::registry::RegistryKind;

/// Fatal configuration error while building registries or generating content
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContentError {
    #[error("Unknown {kind} entry: {name}")]
    UnknownEntry { kind: RegistryKind, name: String },
    #[error("Duplicate {kind} entry: {name}")]
    DuplicateEntry { kind: RegistryKind, name: String },
    #[error("No eligible {kind} entry for grade {grade}")]
    NoEligibleEntry { kind: RegistryKind, grade: u32 },
    #[error("Triggered effect {effect} is bound to unregistered trigger type {trigger}")]
    UnboundTrigger { effect: String, trigger: String },
    #[error("Name pool exhausted after {attempts} attempts")]
    NameExhausted { attempts: u32 },
    #[error("Effect already registered: {0}")]
    DuplicateEffect(String),
}

/// Runtime failure inside a passive, triggered or stat-hook callback
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EffectError {
    #[error("Missing event argument: {0}")]
    MissingArgument(&'static str),
    #[error("Host rejected action: {0}")]
    Host(String),
}

/// Error loading or validating a generation config
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("RON serialization error: {0}")]
    RonWrite(#[from] ron::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}
