//! The compile-once, run-many façade.

use std::collections::BTreeMap;

use minijinja::value::{Value, ValueKind};
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, StcgError};
use crate::eval::{Bindings, Evaluator, MiniJinjaEvaluator, OutputSink, OUTPUT_SINK};
use crate::markers::MarkerAutomaton;
use crate::options::Options;
use crate::program::{assemble, Program};
use crate::slicer::Slicer;

/// A compiled template, ready to run.
///
/// Compilation validates the options, slices the template and assembles the
/// program once. Every call to [`run`](Self::run) executes that same program
/// with a fresh output buffer.
///
/// # Example
///
/// ```rust
/// use stcg::{Generator, Options};
/// use serde_json::json;
///
/// let generator = Generator::compile("[!for x in xs!][>x<],[!endfor!]", &Options::default()).unwrap();
/// assert_eq!(generator.run(&json!({ "xs": [1, 2] })).unwrap(), "1,2,");
/// ```
pub struct Generator<E = MiniJinjaEvaluator> {
    program: Program,
    globals: BTreeMap<String, Value>,
    evaluator: E,
}

impl Generator<MiniJinjaEvaluator> {
    /// Compiles `template` for the bundled MiniJinja evaluator.
    ///
    /// # Errors
    ///
    /// Returns [`StcgError::Configuration`] for invalid options or markers and
    /// [`StcgError::Syntax`] for a malformed template.
    pub fn compile(template: &str, options: &Options) -> Result<Self> {
        Self::with_evaluator(template, options, MiniJinjaEvaluator::new())
    }
}

impl<E: Evaluator> Generator<E> {
    /// Compiles `template` for a custom evaluator.
    pub fn with_evaluator(template: &str, options: &Options, evaluator: E) -> Result<Self> {
        options.validate()?;
        let automaton = MarkerAutomaton::new(options.markers())?;
        let slices = Slicer::new(automaton, options.debug_len).slice(template)?;
        let slice_count = slices.len();
        let program = assemble(slices, options.trim_after_code);

        debug!(
            template_len = template.len(),
            slices = slice_count,
            fragments = program.fragments(),
            "compiled template"
        );

        Ok(Self {
            program,
            globals: BTreeMap::new(),
            evaluator,
        })
    }

    /// Returns the compiled program.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Returns the evaluator.
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Returns the evaluator mutably, e.g. to register extra filters.
    pub fn evaluator_mut(&mut self) -> &mut E {
        &mut self.evaluator
    }

    /// Registers a value visible to every run. A later registration under
    /// the same name replaces the earlier one.
    pub fn register_global(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.globals.insert(name.into(), value.into());
    }

    /// Runs the program and returns its output.
    ///
    /// `data` must serialize to a map (or to unit/null for no data). Its
    /// entries override globals of the same name. The output sink is bound
    /// last and cannot be overridden.
    ///
    /// # Errors
    ///
    /// Every failure, including errors raised by the template itself, is
    /// returned as [`StcgError::Runtime`]. No partial output is returned.
    pub fn run<S: Serialize + ?Sized>(&self, data: &S) -> Result<String> {
        let mut bindings = self.globals.clone();
        bindings.extend(data_bindings(data)?);

        let sink = OutputSink::new();
        bindings.insert(OUTPUT_SINK.to_string(), sink.binding());

        debug!(bindings = ?bindings.keys().collect::<Vec<_>>(), "running program");
        self.evaluator
            .evaluate(self.program.as_str(), &bindings)
            .map_err(|e| StcgError::Runtime(e.message().to_string()))?;

        let output = sink.into_output();
        debug!(output_len = output.len(), "program finished");
        Ok(output)
    }
}

/// Converts per-run data into bindings.
///
/// Values embedded in `data` (callables included) are kept as they are.
fn data_bindings<S: Serialize + ?Sized>(data: &S) -> Result<Bindings> {
    let value = Value::from_serialize(data);

    match value.kind() {
        ValueKind::None | ValueKind::Undefined => Ok(Bindings::new()),
        ValueKind::Map => {
            let keys = value.try_iter().map_err(runtime)?;
            keys.map(|key| {
                let item = value.get_item(&key).map_err(runtime)?;
                Ok((key.to_string(), item))
            })
            .collect()
        }
        other => Err(StcgError::Runtime(format!(
            "run data must be a mapping, got {}",
            other
        ))),
    }
}

fn runtime(err: minijinja::Error) -> StcgError {
    StcgError::Runtime(err.to_string())
}
