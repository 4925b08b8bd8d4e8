use kurtestosis_collector::{Discovery, TestFile, TestFunction};

use crate::reporter::{FileReporter, Reporter};
use crate::runner::RunError;

/// Runs every test function of `file` matching `pattern` through `run_function`.
///
/// No matching function is a success, reported without firing the lifecycle
/// hooks. A failing `run_function` aborts the remaining functions; a failing
/// test does not.
pub fn run_test_file<R, F>(
    file: &TestFile,
    pattern: &str,
    discovery: &dyn Discovery,
    mut run_function: F,
) -> Result<FileReporter, RunError>
where
    R: Reporter + 'static,
    F: FnMut(&TestFunction) -> Result<R, RunError>,
{
    let functions = discovery.list_matching_functions(file, pattern)?;

    let mut reporter = FileReporter::for_file(file);

    if functions.is_empty() {
        tracing::warn!("No tests found matching '{pattern}' in '{file}'");
        return Ok(reporter);
    }

    reporter.before();

    for function in &functions {
        match run_function(function) {
            Ok(function_reporter) => reporter.nest(Box::new(function_reporter)),
            Err(error) => {
                reporter.after();
                return Err(error);
            }
        }
    }

    reporter.after();

    Ok(reporter)
}
