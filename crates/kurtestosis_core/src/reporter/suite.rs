use std::cell::Cell;
use std::time::{Duration, Instant};

use kurtestosis_logging::time::format_duration;
use kurtestosis_project::Project;

use crate::reporter::{Reporter, ReporterBase, ReporterKind};

/// The root of the report tree, one per project run.
#[derive(Debug)]
pub struct SuiteReporter {
    base: ReporterBase,
    started: Instant,
    aborted: Cell<bool>,
}

impl SuiteReporter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: ReporterBase::new(name),
            started: Instant::now(),
            aborted: Cell::new(false),
        }
    }

    pub fn for_project(project: &Project) -> Self {
        Self::new(project.package_name())
    }

    /// Time since the reporter was created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Marks the run as cut short by a harness fault; the tree then only
    /// holds the files that ran before it.
    pub fn abort(&self) {
        self.aborted.set(true);
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.get()
    }

    fn verdict(&self) -> &'static str {
        if self.is_aborted() {
            "ABORT"
        } else if self.success() {
            "PASS"
        } else {
            "FAIL"
        }
    }
}

impl Reporter for SuiteReporter {
    fn base(&self) -> &ReporterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ReporterBase {
        &mut self.base
    }

    fn kind(&self) -> ReporterKind {
        ReporterKind::Suite
    }

    fn before(&self) {
        tracing::info!("PACKAGE {}", self.name());
    }

    fn after(&self) {
        tracing::info!(
            "{} {} ({} file(s) in {})",
            self.verdict(),
            self.name(),
            self.children().len(),
            format_duration(self.elapsed())
        );
    }
}
