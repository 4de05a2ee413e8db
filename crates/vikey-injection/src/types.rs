//! # Core Data Types for Keystroke Injection
//!
//! This module defines the data model shared across the crate: the pacing
//! method and text-sending strategy that make up an injection profile, the
//! correction action consumed by each call, configuration, and metrics.

use crate::error::InjectionResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Pacing tier for delivering synthetic events to the focused application.
///
/// Each tier carries a fixed delay triple; see [`InjectionMethod::delays`].
/// The values are design constants tuned per application class, not runtime
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InjectionMethod {
    /// Ordinary GUI text fields: minimal delays.
    Fast,
    /// Terminal emulators and IDEs: delays sized for their event loops.
    Slow,
    /// Frame-paced text UIs inside terminals: atomic replacement with the
    /// largest gaps (kept under one frame at 30 fps).
    ExtraSlow,
    /// Bypass synthesis entirely; the disabled/escape-hatch state.
    Passthrough,
}

/// The delay triple of an [`InjectionMethod`], in the order the injection
/// loop consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingDelays {
    /// Pause after each Backspace key pair.
    pub post_backspace: Duration,
    /// Pause once after the whole deletion batch.
    pub post_delete_batch: Duration,
    /// Pause between text characters, chunks, and segments.
    pub post_character: Duration,
}

impl PacingDelays {
    const fn from_micros(post_backspace: u64, post_delete_batch: u64, post_character: u64) -> Self {
        Self {
            post_backspace: Duration::from_micros(post_backspace),
            post_delete_batch: Duration::from_micros(post_delete_batch),
            post_character: Duration::from_micros(post_character),
        }
    }
}

impl InjectionMethod {
    /// Fixed pacing for this method as `(post_backspace, post_delete_batch,
    /// post_character)` microseconds.
    pub const fn delays(self) -> PacingDelays {
        match self {
            InjectionMethod::Fast => PacingDelays::from_micros(200, 500, 200),
            InjectionMethod::Slow => PacingDelays::from_micros(10_000, 20_000, 10_000),
            InjectionMethod::ExtraSlow => PacingDelays::from_micros(15_000, 5_000, 15_000),
            InjectionMethod::Passthrough => PacingDelays::from_micros(0, 0, 0),
        }
    }
}

/// Whether literal text is delivered in fixed-size groups of code units per
/// synthetic event, or one character at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextSendingMethod {
    /// Multiple code units per event; faster, the default.
    Chunked,
    /// One character per event; required where buffered readers drop bursts.
    OneByOne,
}

/// The resolved strategy for the application that currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectionProfile {
    pub method: InjectionMethod,
    pub text_method: TextSendingMethod,
}

impl InjectionProfile {
    pub const fn new(method: InjectionMethod, text_method: TextSendingMethod) -> Self {
        Self {
            method,
            text_method,
        }
    }

    /// Safe default when the foreground application cannot be identified.
    pub const fn fallback() -> Self {
        Self::new(InjectionMethod::Fast, TextSendingMethod::Chunked)
    }

    /// Profile used when injection is disabled.
    pub const fn passthrough() -> Self {
        Self::new(InjectionMethod::Passthrough, TextSendingMethod::Chunked)
    }
}

/// One correction to replay: delete `delete_count` trailing characters, then
/// insert `text` at the cursor. Produced by the transformation engine and
/// consumed exactly once per injection call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionAction {
    pub delete_count: usize,
    pub text: String,
}

impl CorrectionAction {
    pub fn new(delete_count: usize, text: impl Into<String>) -> Self {
        Self {
            delete_count,
            text: text.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.delete_count == 0 && self.text.is_empty()
    }
}

/// Configuration for the injection subsystem.
///
/// Pacing stays a design constant; the knobs here cover the ambient
/// behavior of the subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjectionConfig {
    /// Master switch. When false every call resolves to the Passthrough
    /// profile and no events are synthesized.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to redact injected text in logs for privacy.
    #[serde(default = "default_true")]
    pub redact_logs: bool,
}

fn default_true() -> bool {
    true
}

impl Default for InjectionConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            redact_logs: default_true(),
        }
    }
}

impl InjectionConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(input: &str) -> InjectionResult<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: &Path) -> InjectionResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

/// Counters for injection activity, shared with the host application for
/// diagnostics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InjectionMetrics {
    /// Completed `inject_sync` calls.
    pub injections: u64,
    /// Down/up event pairs successfully handed to the OS.
    pub pairs_posted: u64,
    /// Pairs dropped because construction or posting failed.
    pub pairs_failed: u64,
    /// Characters of replacement text delivered.
    pub chars_sent: u64,
    /// Wall-clock time of the most recent injection.
    pub last_injection: Option<chrono::DateTime<chrono::Utc>>,
}

impl InjectionMetrics {
    pub fn record_injection(&mut self, pairs_posted: u32, pairs_failed: u32, chars_sent: u64) {
        self.injections += 1;
        self.pairs_posted += u64::from(pairs_posted);
        self.pairs_failed += u64::from(pairs_failed);
        self.chars_sent += chars_sent;
        self.last_injection = Some(chrono::Utc::now());
    }
}
