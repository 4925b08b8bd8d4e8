use crate::reporter::{ReportedError, Reporter, ReporterKind};

/// The composite reporter, and the state every other reporter builds on.
#[derive(Debug, Default)]
pub struct ReporterBase {
    name: String,
    errors: Vec<ReportedError>,
    children: Vec<Box<dyn Reporter>>,
}

impl ReporterBase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            errors: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn errors(&self) -> &[ReportedError] {
        &self.errors
    }

    pub fn children(&self) -> &[Box<dyn Reporter>] {
        &self.children
    }

    pub fn record_error(&mut self, error: ReportedError) {
        self.errors.push(error);
    }

    pub fn nest(&mut self, child: Box<dyn Reporter>) {
        self.children.push(child);
    }

    pub fn success(&self) -> bool {
        self.errors.is_empty() && self.children.iter().all(|child| child.success())
    }
}

impl Reporter for ReporterBase {
    fn base(&self) -> &ReporterBase {
        self
    }

    fn base_mut(&mut self) -> &mut ReporterBase {
        self
    }

    fn kind(&self) -> ReporterKind {
        ReporterKind::Composite
    }
}
