use crate::foreground::ForegroundApp;
use crate::injector::{FocusContext, Injector};
use crate::synthesizer::EventPayload;
use crate::tests::mocks::{FakeProcessTree, FixedForeground, MockEventPort};
use crate::types::InjectionConfig;

#[test]
fn missing_foreground_uses_default_profile_without_scanning() {
    let tree = FakeProcessTree::new();
    let scans = tree.enumerations_handle();
    let port = MockEventPort::new();
    let recorded = port.recorded_handle();
    let injector = Injector::with_ports(
        InjectionConfig::default(),
        Box::new(FixedForeground::none()),
        Box::new(tree),
        Box::new(port),
    );

    injector.inject_sync(1, "đã", &FocusContext::default());

    assert_eq!(*scans.lock(), 0);
    // Fast/Chunked: one backspace pair, one two-unit text chunk.
    let events = recorded.lock();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[1].payload, EventPayload::Unicode(ref units) if units.len() == 2));
}

#[test]
fn focus_context_override_routes_to_atomic_path() {
    let tree = FakeProcessTree::new()
        .with_process(100, 101, "zsh")
        .with_process(101, 102, "claude");
    let port = MockEventPort::new();
    let recorded = port.recorded_handle();
    let injector = Injector::with_ports(
        InjectionConfig::default(),
        Box::new(FixedForeground::none()),
        Box::new(tree),
        Box::new(port),
    );

    let ctx = FocusContext::for_app(ForegroundApp {
        bundle_id: Some("com.mitchellh.ghostty".to_string()),
        pid: 100,
    });
    injector.inject_sync(2, "á", &ctx);

    let events = recorded.lock();
    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0].payload,
        EventPayload::Unicode(vec![0x7F, 0x7F, 0x00E1])
    );
}

#[test]
fn disabled_config_passes_everything_through() {
    let config = InjectionConfig {
        enabled: false,
        ..InjectionConfig::default()
    };
    let port = MockEventPort::new();
    let recorded = port.recorded_handle();
    let injector = Injector::with_ports(
        config,
        Box::new(FixedForeground::app("com.apple.Terminal", 10)),
        Box::new(FakeProcessTree::new()),
        Box::new(port),
    );

    injector.inject_sync(3, "bị tắt", &FocusContext::default());

    assert!(recorded.lock().is_empty());
    let metrics = injector.metrics();
    let metrics = metrics.lock();
    assert_eq!(metrics.injections, 1);
    assert_eq!(metrics.pairs_posted, 0);
}

#[test]
fn metrics_accumulate_across_calls() {
    let port = MockEventPort::new();
    let injector = Injector::with_ports(
        InjectionConfig::default(),
        Box::new(FixedForeground::none()),
        Box::new(FakeProcessTree::new()),
        Box::new(port),
    );

    injector.inject_sync(1, "ăn", &FocusContext::default());
    injector.inject_sync(0, "cơm", &FocusContext::default());

    let metrics = injector.metrics();
    let metrics = metrics.lock();
    assert_eq!(metrics.injections, 2);
    assert_eq!(metrics.chars_sent, 5);
    assert!(metrics.pairs_posted >= 3);
    assert!(metrics.last_injection.is_some());
}

#[test]
fn config_round_trips_through_toml() {
    let config = InjectionConfig::from_toml_str("enabled = false\nredact_logs = false\n")
        .expect("valid TOML");
    assert!(!config.enabled);
    assert!(!config.redact_logs);

    let defaults = InjectionConfig::from_toml_str("").expect("empty TOML uses defaults");
    assert!(defaults.enabled);
    assert!(defaults.redact_logs);
}
