//! # stcg - Scripted Template Content Generator
//!
//! `stcg` turns templates that mix literal text with embedded statements and
//! expressions into runnable programs. It is meant for generating source
//! files, configuration and other text from structured data.
//!
//! ## Template Syntax
//!
//! Four markers split a template into regions:
//!
//! | Region | Default markers | Meaning |
//! |--------|-----------------|---------|
//! | code   | `[!` ... `!]`   | a statement (`for x in xs`, `endfor`, `set n = 1`, ...) |
//! | output | `[>` ... `<]`   | an expression whose value is written out |
//! | text   | everything else | copied to the output |
//!
//! Statements and expressions use MiniJinja syntax. The markers can be
//! changed through [`Options`]; no marker may equal or be a prefix of
//! another.
//!
//! ```rust
//! use stcg::{Generator, Options};
//! use serde_json::json;
//!
//! let template = "\
//! [!for field in fields!]
//!     int [>field<];
//! [!endfor!]
//! ";
//!
//! let generator = Generator::compile(template, &Options::default()).unwrap();
//! let output = generator.run(&json!({ "fields": ["a", "b"] })).unwrap();
//! assert_eq!(output, "    int a;\n    int b;\n");
//! ```
//!
//! Text that directly follows a code region loses its leading spaces and
//! first newline, so lines holding only a statement vanish from the output.
//! Set `trim_after_code` in [`Options`] to `false` to keep them.
//!
//! ## Pipeline
//!
//! 1. [`MarkerAutomaton`] detects markers in a single left-to-right scan.
//! 2. [`Slicer`] enforces legal nesting and cuts the template into
//!    [`Slice`]s, reporting positioned syntax errors.
//! 3. [`assemble`] filters and renders the slices into a [`Program`].
//! 4. [`Generator::run`] hands the program and its bindings to an
//!    [`Evaluator`] and collects the output.
//!
//! ## Errors
//!
//! All failures are [`StcgError`]s: configuration and syntax errors while
//! compiling, runtime errors while running.

mod error;
pub mod eval;
mod generator;
pub mod markers;
mod options;
mod program;
pub mod slice;
pub mod slicer;

pub use error::{ErrorKind, Result, StcgError};
pub use eval::{Bindings, EvalError, Evaluator, MiniJinjaEvaluator, OutputSink, OUTPUT_SINK};
pub use generator::Generator;
pub use markers::{MarkerAutomaton, MarkerKind, MarkerSet};
pub use minijinja::Value;
pub use options::{Options, DEFAULT_DEBUG_LEN};
pub use program::{assemble, Program};
pub use slice::Slice;
pub use slicer::{Mode, Slicer};
