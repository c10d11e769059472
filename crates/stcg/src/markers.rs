//! Marker strings and the automaton that detects them.
//!
//! The four markers are inserted into one shared transition graph, so markers
//! with a common prefix share nodes. The graph is an arena of nodes
//! addressed by index, with the root at index 0. It is built once and never
//! changes afterwards.
//!
//! Detection uses a single pointer into the graph that falls back to the root
//! whenever the current character has no transition. There is no failure
//! function: characters consumed by an abandoned partial match are never
//! reconsidered as the start of another match. With the marker `aab`, the
//! input `aaab` contains no detected marker.

use crate::error::{Result, StcgError};

/// Default code region opener.
pub const DEFAULT_CODE_BEGIN: &str = "[!";
/// Default code region closer.
pub const DEFAULT_CODE_END: &str = "!]";
/// Default output region opener.
pub const DEFAULT_OUTPUT_BEGIN: &str = "[>";
/// Default output region closer.
pub const DEFAULT_OUTPUT_END: &str = "<]";

const ROOT: usize = 0;

/// Identifies one of the four markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    CodeBegin,
    CodeEnd,
    OutputBegin,
    OutputEnd,
}

impl MarkerKind {
    /// All kinds, in insertion order.
    pub const ALL: [MarkerKind; 4] = [
        MarkerKind::CodeBegin,
        MarkerKind::CodeEnd,
        MarkerKind::OutputBegin,
        MarkerKind::OutputEnd,
    ];

    /// The option name of this marker.
    pub fn name(self) -> &'static str {
        match self {
            MarkerKind::CodeBegin => "codeBegin",
            MarkerKind::CodeEnd => "codeEnd",
            MarkerKind::OutputBegin => "outputBegin",
            MarkerKind::OutputEnd => "outputEnd",
        }
    }
}

/// The four delimiter strings of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSet {
    code_begin: String,
    code_end: String,
    output_begin: String,
    output_end: String,
}

impl MarkerSet {
    /// Creates a marker set. Validation happens when the automaton is built.
    pub fn new(
        code_begin: impl Into<String>,
        code_end: impl Into<String>,
        output_begin: impl Into<String>,
        output_end: impl Into<String>,
    ) -> Self {
        Self {
            code_begin: code_begin.into(),
            code_end: code_end.into(),
            output_begin: output_begin.into(),
            output_end: output_end.into(),
        }
    }

    /// Returns the string for one marker.
    pub fn get(&self, kind: MarkerKind) -> &str {
        match kind {
            MarkerKind::CodeBegin => &self.code_begin,
            MarkerKind::CodeEnd => &self.code_end,
            MarkerKind::OutputBegin => &self.output_begin,
            MarkerKind::OutputEnd => &self.output_end,
        }
    }

    /// Iterates over `(kind, marker)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (MarkerKind, &str)> + '_ {
        MarkerKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::new(
            DEFAULT_CODE_BEGIN,
            DEFAULT_CODE_END,
            DEFAULT_OUTPUT_BEGIN,
            DEFAULT_OUTPUT_END,
        )
    }
}

/// One node of the transition graph.
#[derive(Debug, Clone, Default)]
struct Node {
    transitions: Vec<(char, usize)>,
    marker: Option<MarkerKind>,
}

impl Node {
    fn next(&self, ch: char) -> Option<usize> {
        self.transitions
            .iter()
            .find(|(c, _)| *c == ch)
            .map(|(_, target)| *target)
    }
}

/// Shared transition graph over a validated [`MarkerSet`].
#[derive(Debug, Clone)]
pub struct MarkerAutomaton {
    nodes: Vec<Node>,
    markers: MarkerSet,
}

impl MarkerAutomaton {
    /// Builds the graph, rejecting empty, clashing and blocking markers.
    ///
    /// # Errors
    ///
    /// - `Marker "<name>" must not be empty` for an empty marker string.
    /// - `Marker clash on "<marker>"` when a marker ends on a node already
    ///   claimed by an earlier one.
    /// - `Marker "<marker>" blocks other markers` when a marker is a strict
    ///   prefix of another. Nodes are checked in creation order.
    pub fn new(markers: MarkerSet) -> Result<Self> {
        let mut nodes = vec![Node::default()];

        for (kind, word) in markers.iter() {
            if word.is_empty() {
                return Err(StcgError::Configuration(format!(
                    "Marker \"{}\" must not be empty",
                    kind.name()
                )));
            }

            let mut state = ROOT;
            for ch in word.chars() {
                state = match nodes[state].next(ch) {
                    Some(next) => next,
                    None => {
                        let next = nodes.len();
                        nodes.push(Node::default());
                        nodes[state].transitions.push((ch, next));
                        next
                    }
                };
            }

            if nodes[state].marker.is_some() {
                return Err(StcgError::Configuration(format!(
                    "Marker clash on \"{}\"",
                    word
                )));
            }
            nodes[state].marker = Some(kind);
        }

        for node in &nodes {
            if let Some(kind) = node.marker {
                if !node.transitions.is_empty() {
                    return Err(StcgError::Configuration(format!(
                        "Marker \"{}\" blocks other markers",
                        markers.get(kind)
                    )));
                }
            }
        }

        Ok(Self { nodes, markers })
    }

    /// Returns the marker set the graph was built from.
    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Returns the string of one marker.
    pub fn marker(&self, kind: MarkerKind) -> &str {
        self.markers.get(kind)
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Starts a fresh detection pass.
    pub fn detector(&self) -> Detector<'_> {
        Detector {
            automaton: self,
            state: ROOT,
        }
    }
}

/// Single-pointer marker detector over a [`MarkerAutomaton`].
#[derive(Debug, Clone)]
pub struct Detector<'a> {
    automaton: &'a MarkerAutomaton,
    state: usize,
}

impl Detector<'_> {
    /// Advances by one character and reports a marker ending at it.
    pub fn feed(&mut self, ch: char) -> Option<MarkerKind> {
        let nodes = &self.automaton.nodes;

        if self.state != ROOT && nodes[self.state].next(ch).is_none() {
            self.state = ROOT;
        }

        match nodes[self.state].next(ch) {
            Some(next) => {
                self.state = next;
                nodes[next].marker
            }
            None => None,
        }
    }
}
