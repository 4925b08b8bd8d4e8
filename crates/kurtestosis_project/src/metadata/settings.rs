use camino::{Utf8Path, Utf8PathBuf};

use crate::metadata::options::OutputFormat;

/// Options resolved against their defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSettings {
    pub(crate) test: TestSettings,
    pub(crate) temp_dir: Utf8PathBuf,
    pub(crate) respect_ignore_files: bool,
    pub(crate) output_format: OutputFormat,
}

impl ProjectSettings {
    pub const fn test(&self) -> &TestSettings {
        &self.test
    }

    pub fn temp_dir(&self) -> &Utf8Path {
        &self.temp_dir
    }

    pub const fn respect_ignore_files(&self) -> bool {
        self.respect_ignore_files
    }

    pub const fn output_format(&self) -> OutputFormat {
        self.output_format
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSettings {
    pub test_file_pattern: String,
    pub test_pattern: String,
}
