//! RGI Procedural Core Library
//!
//! Procedurally generated items and equipment for a multiplayer action game,
//! plus the engine that runs their effects against host events:
//! - Deterministic RNG (one seed reproduces the whole batch on every peer)
//! - Registries of conditions, trigger types, passive and triggered effects
//! - Effect generation for items (per tier) and equipment (lunar/boss)
//! - Dispatch engine (passive stat pass, triggered events, proc-chain guard)
//! - Content assembly: names, lore, icon specs, void conversions, fingerprint
//! - Host boundary traits with an in-memory simulation host

pub mod config;
pub mod constants;
pub mod content;
pub mod dispatch;
pub mod effect;
pub mod error;
pub mod host;
pub mod logging;
pub mod registry;
pub mod rng;
pub mod visual;

pub use config::GenerationConfig;
pub use content::{ContentGenerator, GeneratedContent};
pub use dispatch::EffectEngine;
pub use error::{ConfigError, ContentError, EffectError};
pub use registry::Registries;
pub use rng::DeterministicRng;
