//! # Error types for the injection subsystem.
//!
//! Injection is best-effort by design: a dropped synthetic event degrades the
//! visible correction but must never crash the host or desynchronize state.
//! These errors therefore surface at the event layer for logging and are
//! swallowed before they reach the caller of [`crate::Injector::inject_sync`].

use thiserror::Error;

/// Result alias used throughout the crate.
pub type InjectionResult<T> = Result<T, InjectionError>;

/// The primary error type for injection operations.
#[derive(Debug, Error)]
pub enum InjectionError {
    /// An isolated input-event source could not be created for this call.
    #[error("event source unavailable: {0}")]
    SourceUnavailable(String),

    /// A synthetic key-down/key-up pair could not be constructed.
    #[error("failed to build synthetic event: {0}")]
    EventBuild(String),

    /// A constructed event could not be handed to the OS injection point.
    #[error("failed to post synthetic event: {0}")]
    EventPost(String),

    /// Configuration could not be parsed.
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// An underlying I/O error, e.g. while reading a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
