//! End-to-end pipeline tests against the public API: classification,
//! serialization, and synthesis with recording fakes standing in for the
//! platform services.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use vikey_injection::constants::EVENT_MARKER;
use vikey_injection::synthesizer::{EventPayload, KEY_BACKSPACE};
use vikey_injection::{
    EventPort, EventSession, FocusContext, ForegroundApp, ForegroundProvider, InjectionConfig,
    InjectionResult, Injector, KeyEventPair, ProcessEnumerator,
};

#[derive(Default)]
struct RecordingPort {
    log: Arc<Mutex<Vec<KeyEventPair>>>,
}

impl RecordingPort {
    fn log_handle(&self) -> Arc<Mutex<Vec<KeyEventPair>>> {
        Arc::clone(&self.log)
    }
}

impl EventPort for RecordingPort {
    fn open_session(&self) -> InjectionResult<Box<dyn EventSession + '_>> {
        Ok(Box::new(RecordingSession {
            log: Arc::clone(&self.log),
        }))
    }
}

struct RecordingSession {
    log: Arc<Mutex<Vec<KeyEventPair>>>,
}

impl EventSession for RecordingSession {
    fn post(&mut self, pair: KeyEventPair) -> InjectionResult<()> {
        self.log.lock().push(pair);
        Ok(())
    }
}

struct StaticForeground(Option<ForegroundApp>);

impl ForegroundProvider for StaticForeground {
    fn frontmost(&self) -> Option<ForegroundApp> {
        self.0.clone()
    }
}

#[derive(Default)]
struct StaticTree {
    children: HashMap<i32, Vec<i32>>,
    names: HashMap<i32, String>,
}

impl StaticTree {
    fn with(mut self, parent: i32, pid: i32, name: &str) -> Self {
        self.children.entry(parent).or_default().push(pid);
        self.names.insert(pid, name.to_string());
        self
    }
}

impl ProcessEnumerator for StaticTree {
    fn children(&mut self, pid: i32) -> Vec<i32> {
        self.children.get(&pid).cloned().unwrap_or_default()
    }

    fn executable_name(&mut self, pid: i32) -> Option<String> {
        self.names.get(&pid).cloned()
    }
}

fn terminal_app(bundle_id: &str, pid: i32) -> ForegroundApp {
    ForegroundApp {
        bundle_id: Some(bundle_id.to_string()),
        pid,
    }
}

#[test]
fn gui_field_correction_flows_through_default_profile() {
    let port = RecordingPort::default();
    let log = port.log_handle();
    let injector = Injector::with_ports(
        InjectionConfig::default(),
        Box::new(StaticForeground(Some(terminal_app("com.apple.Safari", 42)))),
        Box::new(StaticTree::default()),
        Box::new(port),
    );

    injector.inject_sync(2, "việt", &FocusContext::default());

    let events = log.lock();
    let backspaces = events
        .iter()
        .filter(|pair| pair.payload == EventPayload::Key(KEY_BACKSPACE))
        .count();
    assert_eq!(backspaces, 2);
    assert!(events.iter().all(|pair| pair.marker == EVENT_MARKER));
    // "việt" is four code units, well under one chunk.
    assert!(events
        .iter()
        .any(|pair| matches!(&pair.payload, EventPayload::Unicode(units) if units.len() == 4)));
}

#[test]
fn terminal_with_slow_tui_gets_one_atomic_write() {
    let tree = StaticTree::default()
        .with(7, 8, "fish")
        .with(8, 9, "claude");
    let port = RecordingPort::default();
    let log = port.log_handle();
    let injector = Injector::with_ports(
        InjectionConfig::default(),
        Box::new(StaticForeground(Some(terminal_app("io.alacritty", 7)))),
        Box::new(tree),
        Box::new(port),
    );

    injector.inject_sync(3, "ươ", &FocusContext::default());

    let events = log.lock();
    assert_eq!(events.len(), 1);
    match &events[0].payload {
        EventPayload::Unicode(units) => {
            assert_eq!(&units[..3], &[0x7F, 0x7F, 0x7F]);
            assert_eq!(units.len(), 5);
        }
        other => panic!("expected a combined Unicode payload, got {other:?}"),
    }
}

#[test]
fn concurrent_callers_produce_ordered_complete_sequences() {
    let port = RecordingPort::default();
    let log = port.log_handle();
    let injector = Arc::new(Injector::with_ports(
        InjectionConfig::default(),
        Box::new(StaticForeground(None)),
        Box::new(StaticTree::default()),
        Box::new(port),
    ));

    let handles: Vec<_> = ["một", "hai", "ba"]
        .into_iter()
        .map(|word| {
            let injector = Arc::clone(&injector);
            std::thread::spawn(move || injector.inject_sync(1, word, &FocusContext::default()))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Each call emits backspace-then-text; if sequences interleaved, a
    // backspace would appear between another call's backspace and its text.
    let events = log.lock();
    assert_eq!(events.len(), 6);
    for call in events.chunks(2) {
        assert_eq!(call[0].payload, EventPayload::Key(KEY_BACKSPACE));
        assert!(matches!(call[1].payload, EventPayload::Unicode(_)));
    }
}
