//! # Injection Design Constants
//!
//! This module centralizes the fixed tuning values of the injection
//! subsystem. These are design constants, not configuration: the pacing
//! table in [`crate::types::InjectionMethod::delays`] and the values here
//! together define the delivery contract with target applications.

use std::time::Duration;

/// Sentinel stamped into the user-data field of every synthetic event.
///
/// The companion event tap checks this value and skips events carrying it;
/// without the marker the subsystem would reprocess its own output and feed
/// back indefinitely. Must be stable and non-zero ("VIKE" in ASCII).
pub const EVENT_MARKER: i64 = 0x5649_4B45;

/// Maximum UTF-16 code units a single synthetic event payload can carry.
pub const EVENT_CHUNK_UNITS: usize = 20;

/// DEL control character, the code unit terminals receive for Backspace.
pub const DEL_UNIT: u16 = 0x7F;

// --- Atomic replacement (ExtraSlow path) ---
// Deliberately decoupled from the per-method pacing table: the atomic path
// has its own chunk gap and settle interval.

/// Pause between payload chunks when an atomic replacement needs more than one.
pub const ATOMIC_CHUNK_GAP_MS: u64 = 5;

/// Settle interval after an atomic replacement, sized for frame-paced UIs.
pub const ATOMIC_SETTLE_MS: u64 = 20;

// --- Settle intervals (Fast/Slow paths) ---

/// Settle interval after a Slow-method injection.
pub const SETTLE_SLOW_MS: u64 = 20;

/// Settle interval after any other non-atomic injection.
pub const SETTLE_FAST_MS: u64 = 5;

// --- Process-tree scan ---

/// How long a process-tree scan result stays reusable for the same pid.
pub const SCAN_CACHE_FRESHNESS_SECS: u64 = 2;

/// Generations below the terminal process to search for slow text UIs
/// (terminal -> shell -> multiplexer -> app).
pub const PROCESS_SCAN_MAX_DEPTH: usize = 4;

/// Executable names are truncated to this length before comparison,
/// matching the kernel's comparable command-name length.
pub const MAX_COMPARABLE_NAME_LEN: usize = 16;

// --- Convenience accessors ---

pub fn atomic_chunk_gap() -> Duration {
    Duration::from_millis(ATOMIC_CHUNK_GAP_MS)
}

pub fn atomic_settle() -> Duration {
    Duration::from_millis(ATOMIC_SETTLE_MS)
}

pub fn settle_slow() -> Duration {
    Duration::from_millis(SETTLE_SLOW_MS)
}

pub fn settle_fast() -> Duration {
    Duration::from_millis(SETTLE_FAST_MS)
}

pub fn scan_cache_freshness() -> Duration {
    Duration::from_secs(SCAN_CACHE_FRESHNESS_SECS)
}
