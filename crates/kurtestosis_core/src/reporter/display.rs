use std::fmt;
use std::time::Duration;

use colored::Colorize;
use kurtestosis_logging::time::format_duration;

use crate::reporter::{Reporter, ReporterKind};

/// Passed and failed test function counts of a report tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStats {
    passed: usize,
    failed: usize,
}

impl ReportStats {
    pub fn from_reporter(reporter: &dyn Reporter) -> Self {
        let mut stats = Self::default();
        stats.add(reporter);
        stats
    }

    fn add(&mut self, reporter: &dyn Reporter) {
        if reporter.kind() == ReporterKind::Function {
            if reporter.success() {
                self.passed += 1;
            } else {
                self.failed += 1;
            }
        }

        for child in reporter.children() {
            self.add(child.as_ref());
        }
    }

    pub const fn passed(&self) -> usize {
        self.passed
    }

    pub const fn failed(&self) -> usize {
        self.failed
    }

    pub const fn total(&self) -> usize {
        self.passed + self.failed
    }
}

/// Human-readable rendering of a report tree followed by a one-line summary.
pub struct DisplayReport<'a> {
    reporter: &'a dyn Reporter,
    elapsed: Duration,
}

impl<'a> DisplayReport<'a> {
    pub const fn new(reporter: &'a dyn Reporter, elapsed: Duration) -> Self {
        Self { reporter, elapsed }
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, reporter: &dyn Reporter) -> fmt::Result {
        match reporter.kind() {
            ReporterKind::Function => {
                let verdict = if reporter.success() {
                    "ok".green()
                } else {
                    "FAILED".red()
                };
                writeln!(f, "test {} ... {verdict}", reporter.name())?;
                write_errors(f, reporter, "    ")?;
            }
            ReporterKind::File | ReporterKind::Composite => {
                writeln!(f, "{}", reporter.name().bold())?;
                write_errors(f, reporter, "  ")?;
                for child in reporter.children() {
                    self.write_node(f, child.as_ref())?;
                }
                writeln!(f)?;
            }
            ReporterKind::Suite => {
                write_errors(f, reporter, "")?;
                for child in reporter.children() {
                    self.write_node(f, child.as_ref())?;
                }
            }
        }

        Ok(())
    }
}

fn write_errors(f: &mut fmt::Formatter<'_>, reporter: &dyn Reporter, indent: &str) -> fmt::Result {
    for error in reporter.errors() {
        writeln!(f, "{indent}{}", error.message())?;
        for context in error.context() {
            writeln!(f, "{indent}  {context}")?;
        }
    }
    Ok(())
}

impl fmt::Display for DisplayReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.reporter)?;

        let stats = ReportStats::from_reporter(self.reporter);

        write!(f, "test result: ")?;
        if self.reporter.success() {
            write!(f, "{}", "ok".green())?;
        } else {
            write!(f, "{}", "FAILED".red())?;
        }

        writeln!(
            f,
            ". {} passed; {} failed; finished in {}",
            stats.passed(),
            stats.failed(),
            format_duration(self.elapsed)
        )
    }
}
