//! The parse → compile → evaluate pipeline.

use std::rc::Rc;

use cord_compile::Scope;
use cord_diagnostic::Diagnostic;
use cord_eval::Evaluator;
use cord_ir::SourceFile;
use tracing::debug;

/// The end state of a finished run.
#[derive(Debug)]
pub struct Outcome {
    /// The evaluator with its value stack as the program left it.
    pub evaluator: Evaluator,
    /// The base scope extended with the program's definitions.
    pub scope: Scope,
    /// False if a builtin aborted evaluation.
    pub finished: bool,
}

/// Run a source file against a base scope. Parse and compile errors are
/// fatal; evaluation aborted by a builtin is reported in the [`Outcome`].
pub fn run(file: &Rc<SourceFile>, scope: Scope) -> Result<Outcome, Diagnostic> {
    let tokens = cord_parse::parse(file)?;
    debug!(tokens = tokens.len(), "parsed");

    let (ctrl, scope) = cord_compile::compile(file, &tokens, scope)?;
    debug!(values = ctrl.len(), "compiled");

    let mut evaluator = Evaluator::new();
    let finished = evaluator.run(ctrl);
    Ok(Outcome { evaluator, scope, finished })
}
