//! Action engine, randomized choice, configuration, and periodic driver
//! for the Tessera board simulation.
//!
//! This crate owns the decision logic that mutates the board: one randomized
//! mutation per tick while the periodic driver runs, plus the direct absorb
//! interaction, both serialized through the same shared state.
//!
//! # Modules
//!
//! - [`choice`] -- Uniform and weighted random-selection primitives with a
//!   defensive empty-candidate-set error.
//! - [`config`] -- Configuration loading from `tessera-config.yaml` into
//!   strongly-typed structs with built-in defaults.
//! - [`engine`] -- The [`ActionEngine`]: cell generation below the growth
//!   threshold, weighted action application above it.
//! - [`driver`] -- The [`Driver`]: tokio-based periodic tick task with
//!   idempotent start/stop, fail-stop error handling, and tap forwarding.
//!
//! [`ActionEngine`]: engine::ActionEngine
//! [`Driver`]: driver::Driver

pub mod choice;
pub mod config;
pub mod driver;
pub mod engine;

// Re-export primary types at crate root for convenience.
pub use choice::ChoiceError;
pub use config::{ConfigError, SimulationConfig};
pub use driver::{Driver, EndReason, NoOpCallback, TapOutcome, TickCallback};
pub use engine::{ActionEngine, EngineError, StepOutcome};
