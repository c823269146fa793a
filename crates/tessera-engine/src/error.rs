//! Error types for the simulation binary.
//!
//! [`AppError`] is the top-level error type that wraps all possible
//! failure modes during startup, providing a single error type that
//! `main` can propagate with `?`.

/// Top-level error for the simulation binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: tessera_core::config::ConfigError,
    },
}
