//! Decomposition of replacement text into sendable segments.
//!
//! Newline and tab have no meaningful literal Unicode event encoding for the
//! receivers this crate targets; they must go out as Return/Tab key presses.
//! The chunked sender therefore splits text into runs of ordinary characters
//! and standalone control segments before chunking.

/// One piece of a decomposed replacement text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A run of characters with a literal Unicode event encoding.
    Text(String),
    /// A newline or carriage return, sent as a Return key press.
    Newline,
    /// A tab, sent as a Tab key press.
    Tab,
}

/// Split `text` into segments, preserving order and character content.
///
/// Each `\n` or `\r` becomes a standalone [`Segment::Newline`], each `\t` a
/// standalone [`Segment::Tab`]; everything between them accumulates into
/// [`Segment::Text`] runs.
pub fn segment_text(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut run = String::new();

    for ch in text.chars() {
        match ch {
            '\n' | '\r' => {
                if !run.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut run)));
                }
                segments.push(Segment::Newline);
            }
            '\t' => {
                if !run.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut run)));
                }
                segments.push(Segment::Tab);
            }
            _ => run.push(ch),
        }
    }
    if !run.is_empty() {
        segments.push(Segment::Text(run));
    }
    segments
}
