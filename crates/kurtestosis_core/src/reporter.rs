//! The pass/fail aggregation tree: suite, file and function reporters.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

pub use base::ReporterBase;
pub use display::{DisplayReport, ReportStats};
pub use file::FileReporter;
pub use function::FunctionReporter;
pub use suite::SuiteReporter;
pub use summary::ReportSummary;

mod base;
mod display;
mod file;
mod function;
mod suite;
mod summary;

/// A node of the report tree.
///
/// Success is derived on every call: a reporter succeeds when it holds no
/// errors and every child succeeds. Implementations keep their state in a
/// [`ReporterBase`] and override the lifecycle hooks.
pub trait Reporter: fmt::Debug {
    fn base(&self) -> &ReporterBase;

    fn base_mut(&mut self) -> &mut ReporterBase;

    fn kind(&self) -> ReporterKind;

    fn name(&self) -> &str {
        self.base().name()
    }

    fn record_error(&mut self, error: ReportedError) {
        self.base_mut().record_error(error);
    }

    fn errors(&self) -> &[ReportedError] {
        self.base().errors()
    }

    fn children(&self) -> &[Box<dyn Reporter>] {
        self.base().children()
    }

    fn nest(&mut self, child: Box<dyn Reporter>) {
        self.base_mut().nest(child);
    }

    /// Called once when the unit of work starts.
    fn before(&self) {}

    /// Called once when the unit of work completes.
    fn after(&self) {}

    fn success(&self) -> bool {
        self.base().success()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReporterKind {
    Composite,
    Suite,
    File,
    Function,
}

/// A diagnostic captured by a reporter: a message plus context values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportedError {
    message: String,
    context: Vec<String>,
}

impl ReportedError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Captures `error` and its chain of sources.
    pub fn from_error(error: &dyn std::error::Error) -> Self {
        let mut reported = Self::new(error.to_string());
        let mut source = error.source();
        while let Some(cause) = source {
            reported.context.push(cause.to_string());
            source = cause.source();
        }
        reported
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> &[String] {
        &self.context
    }
}

impl fmt::Display for ReportedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        for context in &self.context {
            write!(f, ": {context}")?;
        }
        Ok(())
    }
}

/// The error list of the function under test, as seen by the built-ins.
///
/// Handed to the interpretation context explicitly, once per test function.
#[derive(Debug, Clone, Default)]
pub struct ErrorSink {
    errors: Rc<RefCell<Vec<ReportedError>>>,
}

impl ErrorSink {
    pub fn record(&self, error: ReportedError) {
        tracing::debug!("Recorded error: {error}");
        self.errors.borrow_mut().push(error);
    }

    pub fn len(&self) -> usize {
        self.errors.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.borrow().is_empty()
    }

    /// Moves every recorded error into `reporter`.
    pub fn drain_into(&self, reporter: &mut dyn Reporter) {
        for error in self.errors.borrow_mut().drain(..) {
            reporter.record_error(error);
        }
    }
}
