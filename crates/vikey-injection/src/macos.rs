//! macOS ports: CoreGraphics event synthesis and NSWorkspace foreground
//! lookup.
//!
//! Events are posted at the HID tap so the receiving application cannot tell
//! them from hardware input. Each session gets its own private-state
//! `CGEventSource`, isolating synthesized events from real modifier and lock
//! state.

use crate::error::{InjectionError, InjectionResult};
use crate::foreground::{ForegroundApp, ForegroundProvider};
use crate::synthesizer::{EventPayload, EventPort, EventSession, KeyEventPair};
use core_graphics::event::{CGEvent, CGEventTapLocation, CGKeyCode, EventField};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use objc2_app_kit::NSWorkspace;

/// [`EventPort`] that posts through the system HID event tap.
pub struct HidEventPort;

impl EventPort for HidEventPort {
    fn open_session(&self) -> InjectionResult<Box<dyn EventSession + '_>> {
        let source = CGEventSource::new(CGEventSourceStateID::Private).map_err(|()| {
            InjectionError::SourceUnavailable("CGEventSource with private state".to_string())
        })?;
        Ok(Box::new(HidEventSession { source }))
    }
}

struct HidEventSession {
    source: CGEventSource,
}

impl HidEventSession {
    fn build_event(&self, pair: &KeyEventPair, key_down: bool) -> InjectionResult<CGEvent> {
        let keycode: CGKeyCode = match &pair.payload {
            EventPayload::Key(code) => *code,
            // Literal text rides on a zero-keycode event; the payload is the
            // Unicode string, not the key.
            EventPayload::Unicode(_) => 0,
        };
        let event = CGEvent::new_keyboard_event(self.source.clone(), keycode, key_down)
            .map_err(|()| {
                InjectionError::EventBuild(format!(
                    "keyboard event (keycode {keycode}, down {key_down})"
                ))
            })?;
        if let EventPayload::Unicode(units) = &pair.payload {
            event.set_string_from_utf_16_unchecked(units);
        }
        event.set_integer_value_field(EventField::EVENT_SOURCE_USER_DATA, pair.marker);
        Ok(event)
    }
}

impl EventSession for HidEventSession {
    fn post(&mut self, pair: KeyEventPair) -> InjectionResult<()> {
        let down = self.build_event(&pair, true)?;
        let up = self.build_event(&pair, false)?;
        down.post(CGEventTapLocation::HID);
        up.post(CGEventTapLocation::HID);
        Ok(())
    }
}

/// [`ForegroundProvider`] over `NSWorkspace`.
pub struct WorkspaceForeground;

impl ForegroundProvider for WorkspaceForeground {
    fn frontmost(&self) -> Option<ForegroundApp> {
        let workspace = unsafe { NSWorkspace::sharedWorkspace() };
        let app = unsafe { workspace.frontmostApplication() }?;
        let bundle_id = unsafe { app.bundleIdentifier() }.map(|s| s.to_string());
        let pid = unsafe { app.processIdentifier() };
        Some(ForegroundApp { bundle_id, pid })
    }
}
