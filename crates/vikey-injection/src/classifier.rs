//! Foreground-application classification.
//!
//! Maps the focused application to an injection profile. Terminal emulators
//! and frame-paced text UIs cannot absorb a high-frequency stream of
//! independent key events, so the classifier trades a small, cached
//! process-tree scan for correct pacing selection.

use crate::constants::{scan_cache_freshness, PROCESS_SCAN_MAX_DEPTH};
use crate::foreground::{ForegroundApp, ForegroundProvider};
use crate::process_tree::{has_slow_ui_descendant, Pid, ProcessEnumerator};
use crate::types::{InjectionMethod, InjectionProfile, TextSendingMethod};
use std::time::Instant;
use tracing::{debug, trace};

/// GPU-accelerated terminal emulators.
pub(crate) const FAST_TERMINALS: &[&str] = &[
    "io.alacritty",
    "com.mitchellh.ghostty",
    "net.kovidgoyal.kitty",
    "com.github.wez.wezterm",
    "com.raphaelamorim.rio",
];

/// Legacy and electron-based terminals, plus editors with integrated ones.
pub(crate) const SLOW_TERMINALS: &[&str] = &[
    "com.apple.Terminal",
    "com.googlecode.iterm2",
    "dev.warp.Warp-Stable",
    "co.zeit.hyper",
    "org.tabby",
    "com.termius-dmg.mac",
    "com.microsoft.VSCode",
    "com.microsoft.VSCodeInsiders",
    "com.visualstudio.code.oss",
];

/// Executable names of frame-paced interactive CLIs with slow event loops.
/// These render at ~30 fps and swallow per-keystroke events at 10 ms gaps.
pub(crate) const SLOW_TEXT_UI_PROCESS_NAMES: &[&str] = &["claude", "aider", "codex"];

/// Bundle-identifier prefix shared by JetBrains IDEs.
const IDE_BUNDLE_PREFIX: &str = "com.jetbrains.";

/// Time- and identity-bounded memo of the last process-tree scan.
///
/// Only touched from within the serialized injection section, so no locking
/// of its own.
#[derive(Debug, Default)]
pub struct ScanCache {
    entry: Option<ScanEntry>,
}

#[derive(Debug)]
struct ScanEntry {
    pid: Pid,
    checked_at: Instant,
    result: bool,
}

impl ScanCache {
    /// Cached result, valid only for the same pid within the freshness window.
    pub fn get(&self, pid: Pid, now: Instant) -> Option<bool> {
        self.entry.as_ref().and_then(|entry| {
            let fresh =
                entry.pid == pid && now.duration_since(entry.checked_at) < scan_cache_freshness();
            fresh.then_some(entry.result)
        })
    }

    /// Unconditionally overwrite the cached entry.
    pub fn put(&mut self, pid: Pid, result: bool, now: Instant) {
        self.entry = Some(ScanEntry {
            pid,
            checked_at: now,
            result,
        });
    }
}

/// Resolves an [`InjectionProfile`] for the application that currently has
/// keyboard focus.
pub struct AppClassifier {
    foreground: Box<dyn ForegroundProvider>,
    processes: Box<dyn ProcessEnumerator>,
    cache: ScanCache,
}

impl AppClassifier {
    pub fn new(
        foreground: Box<dyn ForegroundProvider>,
        processes: Box<dyn ProcessEnumerator>,
    ) -> Self {
        Self {
            foreground,
            processes,
            cache: ScanCache::default(),
        }
    }

    /// Classify the current foreground application.
    ///
    /// `override_app` lets a caller that already knows the focused app (the
    /// event-tap callback does) skip the ambient lookup. Never fails: any
    /// missing identity resolves to the default profile.
    pub fn classify(&mut self, override_app: Option<&ForegroundApp>) -> InjectionProfile {
        let app = match override_app.cloned().or_else(|| self.foreground.frontmost()) {
            Some(app) => app,
            None => {
                trace!("no foreground application; using default profile");
                return InjectionProfile::fallback();
            }
        };
        let Some(bundle_id) = app.bundle_id.as_deref() else {
            trace!(pid = app.pid, "foreground app has no bundle id; using default profile");
            return InjectionProfile::fallback();
        };

        if FAST_TERMINALS.contains(&bundle_id) || SLOW_TERMINALS.contains(&bundle_id) {
            if self.terminal_hosts_slow_ui(app.pid) {
                debug!(bundle_id, "terminal hosts a slow text UI");
                return InjectionProfile::new(InjectionMethod::ExtraSlow, TextSendingMethod::OneByOne);
            }
            return InjectionProfile::new(InjectionMethod::Slow, TextSendingMethod::OneByOne);
        }

        if bundle_id.starts_with(IDE_BUNDLE_PREFIX) {
            return InjectionProfile::new(InjectionMethod::Slow, TextSendingMethod::Chunked);
        }

        InjectionProfile::fallback()
    }

    /// Whether a known slow text UI runs below the terminal, via the cache.
    fn terminal_hosts_slow_ui(&mut self, pid: Pid) -> bool {
        let now = Instant::now();
        if let Some(hit) = self.cache.get(pid, now) {
            trace!(pid, hit, "scan cache hit");
            return hit;
        }
        let result = has_slow_ui_descendant(
            self.processes.as_mut(),
            pid,
            PROCESS_SCAN_MAX_DEPTH,
            SLOW_TEXT_UI_PROCESS_NAMES,
        );
        self.cache.put(pid, result, now);
        result
    }
}
