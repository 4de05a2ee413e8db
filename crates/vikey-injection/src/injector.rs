//! # Injection Facade
//!
//! The single entry point for replaying corrections. `inject_sync` resolves
//! a profile for the current foreground application, then synthesizes the
//! correction under a process-wide serialization gate.

use crate::classifier::AppClassifier;
use crate::foreground::{ForegroundApp, ForegroundProvider};
use crate::logging::redact_text;
use crate::process_tree::ProcessEnumerator;
use crate::synthesizer::{EventPort, EventSynthesizer};
use crate::types::{CorrectionAction, InjectionConfig, InjectionMetrics, InjectionProfile};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

#[cfg(target_os = "macos")]
use crate::macos::{HidEventPort, WorkspaceForeground};
#[cfg(target_os = "macos")]
use crate::process_tree::SystemProcessTree;

/// Opaque per-call context for [`Injector::inject_sync`].
///
/// A caller that already knows the focused application (the event-tap
/// callback receives it with every keystroke) can pass it here and skip the
/// ambient lookup; otherwise the injector resolves focus itself.
#[derive(Debug, Clone, Default)]
pub struct FocusContext {
    pub app: Option<ForegroundApp>,
}

impl FocusContext {
    pub fn for_app(app: ForegroundApp) -> Self {
        Self { app: Some(app) }
    }
}

/// The injection subsystem: classifier, serializer, and synthesizer behind
/// one synchronous call.
///
/// All mutable state (the classifier with its scan cache) lives behind a
/// single mutex. Holding that lock for the whole call *is* the injection
/// serializer: overlapping calls from any thread are strictly ordered, and
/// the lock guard releases on every exit path.
pub struct Injector {
    config: InjectionConfig,
    port: Box<dyn EventPort>,
    gate: Mutex<AppClassifier>,
    metrics: Arc<Mutex<InjectionMetrics>>,
}

impl Injector {
    /// Injector wired to the real platform services.
    #[cfg(target_os = "macos")]
    pub fn new(config: InjectionConfig) -> Self {
        Self::with_ports(
            config,
            Box::new(WorkspaceForeground),
            Box::new(SystemProcessTree::new()),
            Box::new(HidEventPort),
        )
    }

    /// Injector with injected capabilities, for tests and embedding.
    pub fn with_ports(
        config: InjectionConfig,
        foreground: Box<dyn ForegroundProvider>,
        processes: Box<dyn ProcessEnumerator>,
        port: Box<dyn EventPort>,
    ) -> Self {
        Self {
            config,
            port,
            gate: Mutex::new(AppClassifier::new(foreground, processes)),
            metrics: Arc::new(Mutex::new(InjectionMetrics::default())),
        }
    }

    /// Shared handle to the injection counters.
    pub fn metrics(&self) -> Arc<Mutex<InjectionMetrics>> {
        Arc::clone(&self.metrics)
    }

    /// Replay one correction into the focused application: delete
    /// `delete_count` trailing characters, then insert `text`.
    ///
    /// Blocking by design — the call returns only after every pacing delay
    /// has elapsed, so the caller cannot issue a second correction before
    /// the first has fully landed and settled. Concurrent callers are
    /// parked, never rejected, and their corrections apply in call order.
    ///
    /// Never fails: delivery problems degrade the visible correction and are
    /// recorded in the metrics, nothing more.
    pub fn inject_sync(&self, delete_count: usize, text: &str, ctx: &FocusContext) {
        let mut classifier = self.gate.lock();

        let profile = if self.config.enabled {
            classifier.classify(ctx.app.as_ref())
        } else {
            InjectionProfile::passthrough()
        };
        debug!(
            method = ?profile.method,
            text_method = ?profile.text_method,
            delete_count,
            text = %redact_text(text, self.config.redact_logs),
            "injecting correction"
        );

        let action = CorrectionAction::new(delete_count, text);
        let report = EventSynthesizer::new(self.port.as_ref()).inject(&action, profile);

        self.metrics.lock().record_injection(
            report.pairs_posted,
            report.pairs_failed,
            text.chars().count() as u64,
        );
    }
}
