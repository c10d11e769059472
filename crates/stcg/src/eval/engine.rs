//! MiniJinja-backed evaluator.

use minijinja::{Environment, Error, ErrorKind, UndefinedBehavior};

use super::{Bindings, EvalError, Evaluator};

/// Evaluator that runs programs with MiniJinja.
///
/// Statements are MiniJinja tags (`for`, `if`, `set`, ...), expressions are
/// MiniJinja expressions. Undefined names are errors rather than empty
/// values.
///
/// # Dialect limits
///
/// Only values handed to the output sink reach the result. Whatever
/// MiniJinja renders on its own is discarded:
///
/// - a `raw`/`endraw` pair turns the enclosed text slices into literal
///   template text, so `[!raw!]hi[!endraw!]` produces nothing.
/// - `include` and `extends` are unavailable, since the evaluator has no
///   loader.
///
/// # Example
///
/// ```rust
/// use stcg::{Evaluator, MiniJinjaEvaluator, OutputSink, Bindings, OUTPUT_SINK};
///
/// let evaluator = MiniJinjaEvaluator::new();
/// let sink = OutputSink::new();
/// let mut bindings = Bindings::new();
/// bindings.insert(OUTPUT_SINK.to_string(), sink.binding());
///
/// evaluator
///     .evaluate("{%- for x in range(3) -%}{{- __out__(x) -}}{%- endfor -%}", &bindings)
///     .unwrap();
/// assert_eq!(sink.into_output(), "012");
/// ```
pub struct MiniJinjaEvaluator {
    env: Environment<'static>,
}

impl MiniJinjaEvaluator {
    /// Creates an evaluator with strict undefined handling and the builtin
    /// functions registered.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        register_builtins(&mut env);
        Self { env }
    }

    /// Returns a reference to the underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Returns a mutable reference to the underlying MiniJinja environment.
    ///
    /// Use it to register custom filters, tests or functions shared by every
    /// run.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl Default for MiniJinjaEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator for MiniJinjaEvaluator {
    fn evaluate(&self, program: &str, bindings: &Bindings) -> Result<(), EvalError> {
        // Everything reaches the output through the sink; the rendered text
        // is only inter-fragment whitespace.
        self.env.render_str(program, bindings)?;
        Ok(())
    }
}

/// Registers the functions every program can call.
///
/// - `raise(message)`: aborts the run with `message`.
pub fn register_builtins(env: &mut Environment<'static>) {
    env.add_function("raise", |message: String| -> Result<String, Error> {
        Err(Error::new(ErrorKind::InvalidOperation, message))
    });
}
