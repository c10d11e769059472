//! Compile-time options.
//!
//! [`Options`] collects the four markers, the trim rule and the width of the
//! diagnostic context. Every field has a default, so partial YAML documents
//! load cleanly:
//!
//! ```rust
//! use stcg::Options;
//!
//! let options = Options::from_yaml("code_begin: '<%'\ncode_end: '%>'\ntrim_after_code: false").unwrap();
//! assert_eq!(options.code_begin, "<%");
//! assert_eq!(options.output_begin, "[>");
//! assert!(!options.trim_after_code);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, StcgError};
use crate::markers::{
    MarkerSet, DEFAULT_CODE_BEGIN, DEFAULT_CODE_END, DEFAULT_OUTPUT_BEGIN, DEFAULT_OUTPUT_END,
};

/// Default number of context characters shown around an error.
pub const DEFAULT_DEBUG_LEN: usize = 6;

/// Options controlling how a template is compiled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub code_begin: String,
    pub code_end: String,
    pub output_begin: String,
    pub output_end: String,
    /// Drop leading spaces and the first newline of text following a code
    /// region.
    pub trim_after_code: bool,
    /// Characters of context shown on each side of a marker in syntax
    /// errors. Must be at least 1.
    pub debug_len: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            code_begin: DEFAULT_CODE_BEGIN.to_string(),
            code_end: DEFAULT_CODE_END.to_string(),
            output_begin: DEFAULT_OUTPUT_BEGIN.to_string(),
            output_end: DEFAULT_OUTPUT_END.to_string(),
            trim_after_code: true,
            debug_len: DEFAULT_DEBUG_LEN,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from YAML. Missing keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| StcgError::Configuration(format!("invalid options: {}", e)))
    }

    /// Sets all four markers.
    pub fn with_markers(
        mut self,
        code_begin: impl Into<String>,
        code_end: impl Into<String>,
        output_begin: impl Into<String>,
        output_end: impl Into<String>,
    ) -> Self {
        self.code_begin = code_begin.into();
        self.code_end = code_end.into();
        self.output_begin = output_begin.into();
        self.output_end = output_end.into();
        self
    }

    /// Enables or disables trimming after code regions.
    pub fn trim_after_code(mut self, enabled: bool) -> Self {
        self.trim_after_code = enabled;
        self
    }

    /// Sets the diagnostic context width.
    pub fn debug_len(mut self, len: usize) -> Self {
        self.debug_len = len;
        self
    }

    /// Checks option values that do not depend on the marker graph.
    pub fn validate(&self) -> Result<()> {
        if self.debug_len < 1 {
            return Err(StcgError::Configuration(
                "debugLen option must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The marker set described by these options.
    pub fn markers(&self) -> MarkerSet {
        MarkerSet::new(
            self.code_begin.as_str(),
            self.code_end.as_str(),
            self.output_begin.as_str(),
            self.output_end.as_str(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.markers(), MarkerSet::default());
        assert!(options.trim_after_code);
        assert_eq!(options.debug_len, 6);
    }

    #[test]
    fn test_zero_debug_len_rejected() {
        let err = Options::new().debug_len(0).validate().unwrap_err();
        assert_eq!(err.to_string(), "debugLen option must be >= 1");
    }

    #[test]
    fn test_false_really_disables_trim() {
        let options = Options::from_yaml("trim_after_code: false").unwrap();
        assert!(!options.trim_after_code);
        assert_eq!(options.code_begin, "[!");
    }

    #[test]
    fn test_from_yaml_rejects_bad_types() {
        let err = Options::from_yaml("debug_len: lots").unwrap_err();
        assert!(err.to_string().starts_with("invalid options"));
    }

    #[test]
    fn test_builder() {
        let options = Options::new()
            .with_markers("<code>", "</code>", "<output>", "</output>")
            .trim_after_code(false)
            .debug_len(3);
        assert_eq!(options.output_end, "</output>");
        assert!(!options.trim_after_code);
        assert_eq!(options.debug_len, 3);
    }
}
