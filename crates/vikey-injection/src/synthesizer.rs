//! # Event Synthesizer
//!
//! Turns a [`CorrectionAction`] plus a resolved [`InjectionProfile`] into a
//! timed sequence of synthetic keyboard events.
//!
//! Pacing here is the correctness mechanism, not an implementation detail:
//! the blocking sleeps throttle the producer (the keystroke handler) to the
//! target application's effective processing rate. Replacing them with async
//! scheduling would remove the backpressure that keeps corrections from
//! outrunning the receiver.

use crate::constants::{
    atomic_chunk_gap, atomic_settle, settle_fast, settle_slow, DEL_UNIT, EVENT_CHUNK_UNITS,
    EVENT_MARKER,
};
use crate::error::InjectionResult;
use crate::segment::{segment_text, Segment};
use crate::types::{CorrectionAction, InjectionMethod, InjectionProfile, TextSendingMethod};
use std::thread;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Platform virtual key code.
pub type KeyCode = u16;

pub const KEY_BACKSPACE: KeyCode = 0x33;
pub const KEY_RETURN: KeyCode = 0x24;
pub const KEY_TAB: KeyCode = 0x30;

/// What one synthetic down/up pair carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    /// A named key press.
    Key(KeyCode),
    /// Literal text as UTF-16 code units, at most
    /// [`EVENT_CHUNK_UNITS`](crate::constants::EVENT_CHUNK_UNITS) of them.
    Unicode(Vec<u16>),
}

/// One key-down/key-up pair, marker included. Every pair the synthesizer
/// emits carries [`EVENT_MARKER`] so the companion event tap can skip it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEventPair {
    pub payload: EventPayload,
    pub marker: i64,
}

impl KeyEventPair {
    pub fn key(code: KeyCode) -> Self {
        Self {
            payload: EventPayload::Key(code),
            marker: EVENT_MARKER,
        }
    }

    pub fn unicode(units: Vec<u16>) -> Self {
        Self {
            payload: EventPayload::Unicode(units),
            marker: EVENT_MARKER,
        }
    }
}

/// One isolated injection session: events posted through a session share an
/// input state that neither inherits from nor perturbs real input.
pub trait EventSession {
    /// Post one down/up pair through the global injection point.
    fn post(&mut self, pair: KeyEventPair) -> InjectionResult<()>;
}

/// Factory for isolated input-event sessions. A fresh session is opened per
/// injection call; reusing one would let modifier/lock state leak between
/// corrections.
pub trait EventPort: Send + Sync {
    fn open_session(&self) -> InjectionResult<Box<dyn EventSession + '_>>;
}

/// Outcome counters for one synthesis pass. Observability only; a failed
/// pair is already handled (skipped) by the time the report exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SynthesisReport {
    pub pairs_posted: u32,
    pub pairs_failed: u32,
}

/// Builds and dispatches the synthetic events for one correction.
pub struct EventSynthesizer<'p> {
    port: &'p dyn EventPort,
}

impl<'p> EventSynthesizer<'p> {
    pub fn new(port: &'p dyn EventPort) -> Self {
        Self { port }
    }

    /// Replay `action` into the focused application using `profile`.
    ///
    /// Blocks for every pacing delay. Fire-and-forget: individual event
    /// failures are skipped, never retried, and never abort the sequence.
    pub fn inject(&self, action: &CorrectionAction, profile: InjectionProfile) -> SynthesisReport {
        let mut report = SynthesisReport::default();

        if profile.method == InjectionMethod::Passthrough {
            trace!("passthrough profile; skipping synthesis");
            return report;
        }

        let mut session = match self.port.open_session() {
            Ok(session) => session,
            Err(e) => {
                warn!("could not open injection session: {e}");
                return report;
            }
        };

        if profile.method == InjectionMethod::ExtraSlow {
            Self::send_atomic_replacement(session.as_mut(), action, &mut report);
            thread::sleep(atomic_settle());
            return report;
        }

        let delays = profile.method.delays();

        if action.delete_count > 0 {
            for _ in 0..action.delete_count {
                Self::post(session.as_mut(), KeyEventPair::key(KEY_BACKSPACE), &mut report);
                thread::sleep(delays.post_backspace);
            }
            thread::sleep(delays.post_delete_batch);
        }

        if !action.text.is_empty() {
            match profile.text_method {
                TextSendingMethod::OneByOne => Self::send_text_one_by_one(
                    session.as_mut(),
                    &action.text,
                    delays.post_character,
                    &mut report,
                ),
                TextSendingMethod::Chunked => Self::send_text_chunked(
                    session.as_mut(),
                    &action.text,
                    delays.post_character,
                    &mut report,
                ),
            }
        }

        let settle = if profile.method == InjectionMethod::Slow {
            settle_slow()
        } else {
            settle_fast()
        };
        thread::sleep(settle);

        report
    }

    /// Deletions and replacement text as one combined Unicode payload.
    ///
    /// Frame-paced UIs read input from a single buffered channel; DEL code
    /// units followed by the replacement arrive as one logical write, so the
    /// receiver never renders the intermediate deleted state. This path has
    /// its own chunk-gap and settle constants and ignores the profile's
    /// pacing table.
    fn send_atomic_replacement(
        session: &mut dyn EventSession,
        action: &CorrectionAction,
        report: &mut SynthesisReport,
    ) {
        if action.is_empty() {
            return;
        }

        let mut units: Vec<u16> = Vec::with_capacity(action.delete_count + action.text.len());
        units.extend(std::iter::repeat_n(DEL_UNIT, action.delete_count));
        units.extend(action.text.encode_utf16());

        let chunk_count = units.len().div_ceil(EVENT_CHUNK_UNITS);
        for (index, chunk) in units.chunks(EVENT_CHUNK_UNITS).enumerate() {
            Self::post(session, KeyEventPair::unicode(chunk.to_vec()), report);
            if index + 1 < chunk_count {
                thread::sleep(atomic_chunk_gap());
            }
        }
        debug!(
            delete_count = action.delete_count,
            chunks = chunk_count,
            "sent atomic replacement"
        );
    }

    fn send_text_one_by_one(
        session: &mut dyn EventSession,
        text: &str,
        delay: Duration,
        report: &mut SynthesisReport,
    ) {
        let count = text.chars().count();
        for (index, ch) in text.chars().enumerate() {
            match ch {
                '\n' | '\r' => {
                    Self::post(session, KeyEventPair::key(KEY_RETURN), report);
                    continue;
                }
                '\t' => {
                    Self::post(session, KeyEventPair::key(KEY_TAB), report);
                    continue;
                }
                _ => {
                    let mut buf = [0u16; 2];
                    let units = ch.encode_utf16(&mut buf);
                    Self::post(session, KeyEventPair::unicode(units.to_vec()), report);
                }
            }
            if !delay.is_zero() && index + 1 < count {
                thread::sleep(delay);
            }
        }
    }

    fn send_text_chunked(
        session: &mut dyn EventSession,
        text: &str,
        delay: Duration,
        report: &mut SynthesisReport,
    ) {
        let segments = segment_text(text);
        let segment_count = segments.len();

        for (index, segment) in segments.iter().enumerate() {
            match segment {
                Segment::Newline => {
                    Self::post(session, KeyEventPair::key(KEY_RETURN), report);
                }
                Segment::Tab => {
                    Self::post(session, KeyEventPair::key(KEY_TAB), report);
                }
                Segment::Text(run) => {
                    let units: Vec<u16> = run.encode_utf16().collect();
                    let chunk_count = units.len().div_ceil(EVENT_CHUNK_UNITS);
                    for (chunk_index, chunk) in units.chunks(EVENT_CHUNK_UNITS).enumerate() {
                        Self::post(session, KeyEventPair::unicode(chunk.to_vec()), report);
                        if !delay.is_zero() && chunk_index + 1 < chunk_count {
                            thread::sleep(delay);
                        }
                    }
                }
            }
            if !delay.is_zero() && index + 1 < segment_count {
                thread::sleep(delay);
            }
        }
    }

    /// Post one pair, counting instead of propagating failure. Subsequent
    /// pairs still attempt to post; there is no abort-on-first-failure.
    fn post(session: &mut dyn EventSession, pair: KeyEventPair, report: &mut SynthesisReport) {
        match session.post(pair) {
            Ok(()) => report.pairs_posted += 1,
            Err(e) => {
                report.pairs_failed += 1;
                debug!("dropping synthetic event pair: {e}");
            }
        }
    }
}
