//! Assembly of slices into a runnable program.

use std::fmt;

use crate::slice::Slice;

/// The program text compiled from a template.
///
/// Each valid slice contributes exactly one line. A program never changes
/// after assembly and is reused by every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    source: String,
    fragments: usize,
}

impl Program {
    /// Returns the program source.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Number of fragments (lines) in the program.
    pub fn fragments(&self) -> usize {
        self.fragments
    }

    /// Whether the program emits nothing at all.
    pub fn is_empty(&self) -> bool {
        self.fragments == 0
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Builds a [`Program`] from slices in template order.
///
/// A text slice directly after a code slice loses its leading indentation
/// and first newline when `trim_after_code` is set. Slices that are not
/// valid after that step are dropped.
pub fn assemble(slices: Vec<Slice>, trim_after_code: bool) -> Program {
    let mut source = String::new();
    let mut fragments = 0;
    let mut after_code = false;

    for mut slice in slices {
        if after_code && trim_after_code {
            slice.trim_leading();
        }
        after_code = matches!(slice, Slice::Code(_));

        if slice.is_valid() {
            source.push_str(&slice.render());
            fragments += 1;
        }
    }

    Program { source, fragments }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_invalid_slices() {
        let program = assemble(
            vec![Slice::text(""), Slice::code("  "), Slice::output("x"), Slice::text("")],
            true,
        );
        assert_eq!(program.as_str(), "{{- __out__(x) -}}\n");
        assert_eq!(program.fragments(), 1);
    }

    #[test]
    fn test_trims_text_after_code() {
        let program = assemble(
            vec![Slice::code("set x = 1"), Slice::text("  \nrest")],
            true,
        );
        assert_eq!(
            program.as_str(),
            "{%- set x = 1 -%}\n{{- __out__(\"rest\") -}}\n"
        );
    }

    #[test]
    fn test_trim_disabled_keeps_newline() {
        let program = assemble(
            vec![Slice::code("set x = 1"), Slice::text("  \nrest")],
            false,
        );
        assert_eq!(
            program.as_str(),
            "{%- set x = 1 -%}\n{{- __out__(\"  \\nrest\") -}}\n"
        );
    }

    #[test]
    fn test_does_not_trim_after_output() {
        let program = assemble(vec![Slice::output("x"), Slice::text("\nrest")], true);
        assert_eq!(
            program.as_str(),
            "{{- __out__(x) -}}\n{{- __out__(\"\\nrest\") -}}\n"
        );
    }

    #[test]
    fn test_trim_that_empties_text_drops_it() {
        let program = assemble(vec![Slice::code("endfor"), Slice::text("\n")], true);
        assert_eq!(program.as_str(), "{%- endfor -%}\n");
    }

    #[test]
    fn test_empty_program() {
        let program = assemble(vec![Slice::text("")], true);
        assert!(program.is_empty());
        assert_eq!(program.to_string(), "");
    }
}
