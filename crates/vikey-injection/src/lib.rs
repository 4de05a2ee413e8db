//! # ViKey Keystroke Injection
//!
//! Synthesized keystroke injection for the ViKey Vietnamese typing helper.
//! Given a correction action — how many already-typed characters to delete
//! and what replacement text to insert — this crate replays the correction
//! into whatever application currently holds keyboard focus, using low-level
//! synthetic input events.
//!
//! ## Pacing tiers
//!
//! | Method      | Target                              | Text sending |
//! |-------------|-------------------------------------|--------------|
//! | Fast        | Ordinary GUI text fields            | Chunked      |
//! | Slow        | Terminal emulators, JetBrains IDEs  | OneByOne / Chunked |
//! | ExtraSlow   | Frame-paced TUIs inside terminals   | Atomic replacement |
//! | Passthrough | Disabled / escape hatch             | none         |
//!
//! The profile is resolved per call from the foreground application's bundle
//! identifier, with a cached process-tree scan distinguishing a bare terminal
//! from one hosting a slow text UI.
//!
//! ## Guarantees
//!
//! - At most one injection runs at a time process-wide; concurrent calls are
//!   strictly ordered and never interleave their event sequences.
//! - Every synthetic event carries the
//!   [`EVENT_MARKER`](constants::EVENT_MARKER) so the companion event tap can
//!   recognize and skip the subsystem's own output.
//! - Calls are blocking: `inject_sync` returns only after all pacing delays
//!   have elapsed, throttling the correction producer to the receiver's
//!   processing rate.
//! - Nothing here is fatal. Delivery failures degrade the visible correction
//!   and are counted, never raised.

pub mod classifier;
pub mod constants;
pub mod error;
pub mod foreground;
pub mod injector;
pub mod logging;
pub mod process_tree;
pub mod segment;
pub mod synthesizer;
pub mod types;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(test)]
mod tests;

// Re-export key components for easy access
pub use error::{InjectionError, InjectionResult};
pub use foreground::{ForegroundApp, ForegroundProvider};
pub use injector::{FocusContext, Injector};
pub use process_tree::{ProcessEnumerator, SystemProcessTree};
pub use synthesizer::{EventPort, EventSession, EventSynthesizer, KeyEventPair};
pub use types::{
    CorrectionAction, InjectionConfig, InjectionMethod, InjectionMetrics, InjectionProfile,
    TextSendingMethod,
};
