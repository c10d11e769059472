//! Classified template fragments.
//!
//! A [`Slice`] is one contiguous piece of the template between two markers.
//! Each variant knows how to render itself as one line of the generated
//! MiniJinja program and whether it contributes anything at all.

use crate::eval::OUTPUT_SINK;

/// Escaped newline token inside a program string literal.
const NEWLINE_TOKEN: &str = "\\n";

/// One classified fragment of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slice {
    /// Literal text, stored escaped for a double-quoted string literal.
    Text(String),
    /// A statement, flattened to a single line.
    Code(String),
    /// An expression whose value goes to the output sink.
    Output(String),
}

impl Slice {
    /// Creates a text slice from raw template content.
    pub fn text(raw: &str) -> Self {
        let mut escaped = String::with_capacity(raw.len());
        let mut chars = raw.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\\' => escaped.push_str("\\\\"),
                '"' => escaped.push_str("\\\""),
                '\n' => escaped.push_str(NEWLINE_TOKEN),
                '\r' if chars.peek() == Some(&'\n') => {}
                _ => escaped.push(ch),
            }
        }
        Slice::Text(escaped)
    }

    /// Creates a code slice, collapsing line breaks to single spaces.
    pub fn code(raw: &str) -> Self {
        Slice::Code(raw.replace("\r\n", " ").replace('\n', " "))
    }

    /// Creates an output slice. The expression is kept verbatim.
    pub fn output(raw: &str) -> Self {
        Slice::Output(raw.to_string())
    }

    /// Whether this slice produces anything worth emitting.
    pub fn is_valid(&self) -> bool {
        match self {
            Slice::Text(text) => !text.is_empty(),
            Slice::Code(code) => !code.trim().is_empty(),
            Slice::Output(expr) => !expr.is_empty(),
        }
    }

    /// Removes leading spaces up to and including the first newline.
    ///
    /// Only text slices are affected, and only when the spaces are directly
    /// followed by a newline.
    pub fn trim_leading(&mut self) {
        if let Slice::Text(text) = self {
            if let Some(rest) = text.trim_start_matches(' ').strip_prefix(NEWLINE_TOKEN) {
                *text = rest.to_string();
            }
        }
    }

    /// Renders this slice as one program line, newline included.
    pub fn render(&self) -> String {
        match self {
            Slice::Text(text) => format!("{{{{- {}(\"{}\") -}}}}\n", OUTPUT_SINK, text),
            Slice::Code(code) => format!("{{%- {} -%}}\n", code),
            Slice::Output(expr) => format!("{{{{- {}({}) -}}}}\n", OUTPUT_SINK, expr),
        }
    }
}
