use kurtestosis_collector::TestFile;

use crate::reporter::{Reporter, ReporterBase, ReporterKind};

/// Reports on one test file; its children are the file's test functions.
#[derive(Debug)]
pub struct FileReporter {
    base: ReporterBase,
}

impl FileReporter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: ReporterBase::new(name),
        }
    }

    pub fn for_file(file: &TestFile) -> Self {
        Self::new(file.to_string())
    }
}

impl Reporter for FileReporter {
    fn base(&self) -> &ReporterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ReporterBase {
        &mut self.base
    }

    fn kind(&self) -> ReporterKind {
        ReporterKind::File
    }

    fn before(&self) {
        tracing::info!("SUITE {}", self.name());
    }
}
