//! Sequential, discovery-driven orchestration: suite, then files, then functions.
//!
//! The suite and file levels take the runner of the level below as a
//! parameter, so they can be driven by canned reporters in tests.

use std::sync::Arc;

use camino::Utf8PathBuf;
use kurtestosis_collector::{Discovery, DiscoveryError, TestFunction};
use kurtestosis_project::{Project, ProjectSettings};
use thiserror::Error;

pub use file::run_test_file;
pub use function::run_test_function;
pub use suite::run_test_suite;

use crate::engine::{Engine, ProvisioningError};
use crate::reporter::SuiteReporter;

mod file;
mod function;
mod suite;

/// Patterns and scratch space for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSuiteConfig {
    pub test_file_pattern: String,
    pub test_pattern: String,
    pub temp_dir: Utf8PathBuf,
}

impl TestSuiteConfig {
    pub fn from_settings(settings: &ProjectSettings) -> Self {
        Self {
            test_file_pattern: settings.test().test_file_pattern.clone(),
            test_pattern: settings.test().test_pattern.clone(),
            temp_dir: settings.temp_dir().to_path_buf(),
        }
    }
}

/// Wires the three levels together for a given engine and discovery.
pub struct TestSuiteRunner<'a, E> {
    engine: &'a E,
    discovery: &'a dyn Discovery,
    config: TestSuiteConfig,
}

impl<'a, E: Engine> TestSuiteRunner<'a, E> {
    pub const fn new(engine: &'a E, discovery: &'a dyn Discovery, config: TestSuiteConfig) -> Self {
        Self {
            engine,
            discovery,
            config,
        }
    }

    pub const fn config(&self) -> &TestSuiteConfig {
        &self.config
    }

    pub fn run(&self, project: &Arc<Project>) -> Result<SuiteReporter, RunError> {
        run_test_suite(
            project,
            &self.config.test_file_pattern,
            self.discovery,
            |file| {
                run_test_file(file, &self.config.test_pattern, self.discovery, |function| {
                    run_test_function(self.engine, &self.config.temp_dir, function)
                })
            },
        )
    }

    /// Every test function the run would execute, in execution order.
    pub fn collect(&self, project: &Arc<Project>) -> Result<Vec<TestFunction>, RunError> {
        let mut functions = Vec::new();

        for file in self
            .discovery
            .list_matching_files(project, &self.config.test_file_pattern)?
        {
            functions.extend(
                self.discovery
                    .list_matching_functions(&file, &self.config.test_pattern)?,
            );
        }

        Ok(functions)
    }
}

/// A fault that aborts the run, as opposed to a failing test.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error("failed to provision an interpretation context for `{function}`")]
    Provisioning {
        function: String,
        #[source]
        source: ProvisioningError,
    },

    #[error("failed to run test file `{file}`")]
    TestFile {
        file: String,
        #[source]
        source: Box<RunError>,
    },
}
