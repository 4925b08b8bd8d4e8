use std::fmt::Write as _;

use kurtestosis_collector::TestFunction;

use crate::reporter::{Reporter, ReporterBase, ReporterKind};

/// Reports on one test function. A leaf: it succeeds iff it holds no errors.
#[derive(Debug)]
pub struct FunctionReporter {
    base: ReporterBase,
}

impl FunctionReporter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: ReporterBase::new(name),
        }
    }

    pub fn for_function(function: &TestFunction) -> Self {
        Self::new(function.name())
    }
}

impl Reporter for FunctionReporter {
    fn base(&self) -> &ReporterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ReporterBase {
        &mut self.base
    }

    fn kind(&self) -> ReporterKind {
        ReporterKind::Function
    }

    fn before(&self) {
        tracing::info!("  RUN {}", self.name());
    }

    fn after(&self) {
        if self.success() {
            tracing::info!("  PASS {}", self.name());
            return;
        }

        let mut errors = String::new();
        for error in self.errors() {
            let _ = write!(errors, "\n    {error}");
        }

        tracing::info!("  FAIL {}:{errors}", self.name());
    }

    fn success(&self) -> bool {
        self.errors().is_empty()
    }
}
