use serde::Serialize;

use crate::reporter::{ReportedError, Reporter, ReporterKind};

/// A serializable snapshot of a report tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub name: String,
    pub kind: ReporterKind,
    pub success: bool,
    pub errors: Vec<ReportedError>,
    pub children: Vec<ReportSummary>,
}

impl ReportSummary {
    pub fn from_reporter(reporter: &dyn Reporter) -> Self {
        Self {
            name: reporter.name().to_string(),
            kind: reporter.kind(),
            success: reporter.success(),
            errors: reporter.errors().to_vec(),
            children: reporter
                .children()
                .iter()
                .map(|child| Self::from_reporter(child.as_ref()))
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
