use std::sync::Arc;

use kurtestosis_collector::{Discovery, TestFile};
use kurtestosis_project::Project;

use crate::reporter::{Reporter, SuiteReporter};
use crate::runner::RunError;

/// Runs every test file of `project` matching `pattern` through `run_file`.
///
/// No matching file is a success, reported without firing the lifecycle
/// hooks. A failing `run_file` aborts the remaining files.
pub fn run_test_suite<R, F>(
    project: &Arc<Project>,
    pattern: &str,
    discovery: &dyn Discovery,
    mut run_file: F,
) -> Result<SuiteReporter, RunError>
where
    R: Reporter + 'static,
    F: FnMut(&TestFile) -> Result<R, RunError>,
{
    let files = discovery.list_matching_files(project, pattern)?;

    let mut reporter = SuiteReporter::for_project(project);

    if files.is_empty() {
        tracing::warn!("No test files found matching '{pattern}' in '{}'", project.root());
        return Ok(reporter);
    }

    reporter.before();

    for file in &files {
        match run_file(file) {
            Ok(file_reporter) => reporter.nest(Box::new(file_reporter)),
            Err(error) => {
                reporter.abort();
                reporter.after();
                return Err(RunError::TestFile {
                    file: file.to_string(),
                    source: Box::new(error),
                });
            }
        }
    }

    reporter.after();

    Ok(reporter)
}
