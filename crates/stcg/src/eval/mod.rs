//! Evaluator seam.
//!
//! A compiled [`Program`](crate::Program) is plain text. Running it is the
//! job of an [`Evaluator`], which receives the program together with the
//! [`Bindings`] for one run. Output is never returned by the evaluator
//! directly: the program calls the reserved [`OUTPUT_SINK`] binding, which
//! appends to the run's [`OutputSink`].
//!
//! The default implementation is [`MiniJinjaEvaluator`].

mod engine;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use minijinja::{ErrorKind, Value};
use thiserror::Error;

pub use engine::{register_builtins, MiniJinjaEvaluator};

/// Name of the binding that receives output.
pub const OUTPUT_SINK: &str = "__out__";

/// Named values visible to a program during one run.
pub type Bindings = BTreeMap<String, Value>;

/// Something that can execute program text against a set of bindings.
///
/// Implementations must run synchronously and keep every invocation
/// isolated: two calls with different bindings never observe each other.
pub trait Evaluator: Send + Sync {
    /// Executes `program`. Output is produced only through calls to the
    /// [`OUTPUT_SINK`] binding.
    fn evaluate(&self, program: &str, bindings: &Bindings) -> Result<(), EvalError>;
}

/// Failure reported by an [`Evaluator`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EvalError {
    message: String,
}

impl EvalError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<minijinja::Error> for EvalError {
    fn from(err: minijinja::Error) -> Self {
        EvalError::new(err.to_string())
    }
}

/// Run-local output accumulator.
///
/// Clones share the same buffer, so the callable returned by
/// [`binding`](Self::binding) writes into the sink it was made from.
#[derive(Debug, Clone, Default)]
pub struct OutputSink {
    buffer: Arc<Mutex<String>>,
}

impl OutputSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends text to the buffer.
    pub fn push(&self, text: &str) {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_str(text);
    }

    /// Returns a callable value that appends its argument to this sink.
    ///
    /// The callable takes exactly one argument and returns an empty string.
    /// Undefined arguments are rejected.
    pub fn binding(&self) -> Value {
        let sink = self.clone();
        Value::from_function(move |value: Value| -> Result<String, minijinja::Error> {
            if value.is_undefined() {
                return Err(minijinja::Error::new(
                    ErrorKind::UndefinedError,
                    "cannot output an undefined value",
                ));
            }
            sink.push(&value.to_string());
            Ok(String::new())
        })
    }

    /// Takes the collected output.
    pub fn into_output(self) -> String {
        std::mem::take(&mut *self.buffer.lock().unwrap_or_else(PoisonError::into_inner))
    }
}
