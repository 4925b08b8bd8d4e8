use std::fmt;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use kurtestosis_project::Project;

/// A test file, identified by its owning project and its root-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFile {
    project: Arc<Project>,
    path: Utf8PathBuf,
}

impl TestFile {
    pub fn new(project: Arc<Project>, path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            project,
            path: path.into(),
        }
    }

    pub const fn project(&self) -> &Arc<Project> {
        &self.project
    }

    /// The path relative to the project root, with forward slashes.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn absolute_path(&self) -> Utf8PathBuf {
        self.project.root().join(&self.path)
    }
}

impl fmt::Display for TestFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

/// A test function inside a [`TestFile`].
///
/// Parameters are passed through to the interpreter untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFunction {
    file: TestFile,
    name: String,
    parameters: Vec<String>,
}

impl TestFunction {
    pub fn new(file: TestFile, name: impl Into<String>, parameters: Vec<String>) -> Self {
        Self {
            file,
            name: name.into(),
            parameters,
        }
    }

    pub const fn file(&self) -> &TestFile {
        &self.file
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }
}

impl fmt::Display for TestFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.file, self.name)
    }
}
