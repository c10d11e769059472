//! Mode state machine that cuts a template into slices.
//!
//! The slicer drives a [`Detector`](crate::markers::Detector) over the whole
//! template in one left-to-right pass. Each recognized marker either moves
//! the machine to its next [`Mode`] and emits the content seen since the
//! previous marker, or fails with a positioned syntax error.
//!
//! | Mode   | Marker      | Emits  | Next   |
//! |--------|-------------|--------|--------|
//! | Text   | codeBegin   | Text   | Code   |
//! | Text   | outputBegin | Text   | Output |
//! | Code   | codeEnd     | Code   | Text   |
//! | Output | outputEnd   | Output | Text   |

use tracing::trace;

use crate::error::{Result, StcgError};
use crate::markers::{MarkerAutomaton, MarkerKind};
use crate::slice::Slice;

/// Parse state while scanning a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Text,
    Code,
    Output,
}

impl Mode {
    /// The mode entered when `marker` is seen in this mode, if legal.
    pub fn transition(self, marker: MarkerKind) -> Option<Mode> {
        match (self, marker) {
            (Mode::Text, MarkerKind::CodeBegin) => Some(Mode::Code),
            (Mode::Text, MarkerKind::OutputBegin) => Some(Mode::Output),
            (Mode::Code, MarkerKind::CodeEnd) => Some(Mode::Text),
            (Mode::Output, MarkerKind::OutputEnd) => Some(Mode::Text),
            _ => None,
        }
    }

    /// Wraps content collected in this mode into a slice.
    fn emit(self, raw: &str) -> Slice {
        match self {
            Mode::Text => Slice::text(raw),
            Mode::Code => Slice::code(raw),
            Mode::Output => Slice::output(raw),
        }
    }
}

/// Splits templates into [`Slice`]s.
#[derive(Debug, Clone)]
pub struct Slicer {
    automaton: MarkerAutomaton,
    debug_len: usize,
}

impl Slicer {
    /// Creates a slicer. `debug_len` is the number of characters of context
    /// shown on each side of an offending marker.
    pub fn new(automaton: MarkerAutomaton, debug_len: usize) -> Self {
        Self {
            automaton,
            debug_len,
        }
    }

    /// Returns the automaton used for detection.
    pub fn automaton(&self) -> &MarkerAutomaton {
        &self.automaton
    }

    /// Slices `input` into an ordered list ending with a text slice.
    ///
    /// # Errors
    ///
    /// - `Unexpected "<marker>" marker: "<context>"` for a marker that is
    ///   not legal in the current mode.
    /// - `Marker not closed: "<context>"` when the input ends inside a code
    ///   or output region.
    pub fn slice(&self, input: &str) -> Result<Vec<Slice>> {
        let mut slices = Vec::new();
        let mut detector = self.automaton.detector();
        let mut mode = Mode::Text;
        // Byte offset just past the last emitted marker.
        let mut emitted = 0;
        let mut last_len = 0;

        for (pos, ch) in input.char_indices() {
            let Some(kind) = detector.feed(ch) else {
                continue;
            };

            let marker = self.automaton.marker(kind);
            let end = pos + ch.len_utf8();
            last_len = marker.len();

            let Some(next) = mode.transition(kind) else {
                return Err(StcgError::Syntax(format!(
                    "Unexpected \"{}\" marker: \"{}\"",
                    marker,
                    self.context(input, end, last_len)
                )));
            };

            trace!(marker, offset = end - last_len, from = ?mode, to = ?next, "marker");
            slices.push(mode.emit(&input[emitted..end - last_len]));
            mode = next;
            emitted = end;
        }

        if mode != Mode::Text {
            return Err(StcgError::Syntax(format!(
                "Marker not closed: \"{}\"",
                self.context(input, emitted, last_len)
            )));
        }

        slices.push(Slice::text(&input[emitted..]));
        Ok(slices)
    }

    /// Renders `<leading> >>> <marker> <<< <trailing>` around the marker
    /// ending at byte offset `end`.
    fn context(&self, input: &str, end: usize, len: usize) -> String {
        let start = end - len;
        let leading = last_chars(&input[..start], self.debug_len);
        let trailing = first_chars(&input[end..], self.debug_len);

        let mut out = String::new();
        if !leading.is_empty() {
            out.push_str(leading);
            out.push_str(" >>> ");
        }
        out.push_str(&input[start..end]);
        if !trailing.is_empty() {
            out.push_str(" <<< ");
            out.push_str(trailing);
        }
        out
    }
}

fn first_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn last_chars(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match s.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}
