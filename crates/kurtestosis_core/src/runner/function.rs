use camino::Utf8Path;
use kurtestosis_collector::TestFunction;

use crate::builtins::Predeclared;
use crate::engine::{Engine, InterpretRequest};
use crate::reporter::{ErrorSink, FunctionReporter, ReportedError, Reporter};
use crate::runner::RunError;

/// Runs one test function in a fresh interpretation context.
///
/// Failed assertions and interpretation errors end up on the returned
/// reporter. Only a context that cannot be provisioned is an error, and then
/// no reporter is produced. The context is released before returning.
pub fn run_test_function<E: Engine>(
    engine: &E,
    temp_dir: &Utf8Path,
    function: &TestFunction,
) -> Result<FunctionReporter, RunError> {
    let (mut context, mut release) = engine
        .acquire_context(temp_dir, function.file().project())
        .map_err(|source| RunError::Provisioning {
            function: function.to_string(),
            source,
        })?;

    let mut reporter = FunctionReporter::for_function(function);
    reporter.before();

    let sink = ErrorSink::default();
    let predeclared = Predeclared::new(sink.clone(), function.to_string());
    let request = InterpretRequest::for_test_function(function);

    let outcome = engine.interpret(&mut context, &predeclared, &request);

    drop(predeclared);
    drop(context);
    release.release();

    sink.drain_into(&mut reporter);

    match outcome {
        Ok(interpreted) => {
            for fact in &interpreted.facts {
                tracing::trace!("{function}: {fact}");
            }
        }
        Err(error) => reporter.record_error(ReportedError::from_error(&error)),
    }

    reporter.after();

    Ok(reporter)
}
