//! Logging configuration and privacy helpers.
//!
//! The subsystem handles everything the user types; log lines must be able
//! to describe an injection without reproducing its content.

use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::Level;

/// Redact text content for privacy-first logging.
///
/// When redaction is on, the text is replaced by its length and a short
/// stable hash, enough to correlate log lines without exposing keystrokes.
pub fn redact_text(text: &str, redact: bool) -> String {
    if redact {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let hash = hasher.finish();
        format!("len={} hash={:08x}", text.chars().count(), hash & 0xFFFF_FFFF)
    } else {
        text.to_string()
    }
}

/// Configuration for logging behavior, typically embedded in the host
/// application's config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Maximum log level to emit (string form, e.g. "INFO").
    pub level: String,
    /// Whether to include the target module in logs.
    pub include_target: bool,
    /// Whether to include thread IDs in logs.
    pub include_thread_id: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            include_target: false,
            include_thread_id: true,
        }
    }
}

impl LoggingConfig {
    /// Parse the configured level, defaulting to INFO on parse errors.
    pub fn tracing_level(&self) -> Level {
        self.level.parse().unwrap_or(Level::INFO)
    }
}
