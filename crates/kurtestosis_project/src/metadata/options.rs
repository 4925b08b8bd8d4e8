use camino::{Utf8Path, Utf8PathBuf};
use kurtestosis_system::System;
use kurtestosis_system::path::absolute;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metadata::settings::{ProjectSettings, TestSettings};
use crate::{DEFAULT_TEST_FILE_PATTERN, DEFAULT_TEST_PATTERN};

/// Raw options, as read from `kurtestosis.toml` or collected from the command line.
///
/// Every field is optional so that sources can be layered with [`Options::combine`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Options {
    /// Glob matched against root-relative paths to find test files.
    pub test_file_pattern: Option<String>,

    /// Glob matched against function names to find tests inside a test file.
    pub test_pattern: Option<String>,

    /// Directory for the interpreter's temporary files.
    pub temp_dir: Option<Utf8PathBuf>,

    /// Whether `.gitignore` and `.ignore` files are honoured during discovery.
    pub respect_ignore_files: Option<bool>,

    pub output_format: Option<OutputFormat>,
}

impl Options {
    pub fn from_toml_str(content: &str) -> Result<Self, KurtestosisTomlError> {
        let options = toml::from_str(content)?;
        Ok(options)
    }

    /// Layers `self` over `other`; values set in `self` win.
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        Self {
            test_file_pattern: self.test_file_pattern.or(other.test_file_pattern),
            test_pattern: self.test_pattern.or(other.test_pattern),
            temp_dir: self.temp_dir.or(other.temp_dir),
            respect_ignore_files: self.respect_ignore_files.or(other.respect_ignore_files),
            output_format: self.output_format.or(other.output_format),
        }
    }

    pub fn to_settings(&self, root: &Utf8Path, system: &dyn System) -> ProjectSettings {
        let temp_dir = self.temp_dir.as_ref().map_or_else(
            || system.temp_directory().join("kurtestosis"),
            |temp_dir| absolute(temp_dir, root),
        );

        ProjectSettings {
            test: TestSettings {
                test_file_pattern: self
                    .test_file_pattern
                    .clone()
                    .unwrap_or_else(|| DEFAULT_TEST_FILE_PATTERN.to_string()),
                test_pattern: self
                    .test_pattern
                    .clone()
                    .unwrap_or_else(|| DEFAULT_TEST_PATTERN.to_string()),
            },
            temp_dir,
            respect_ignore_files: self.respect_ignore_files.unwrap_or(true),
            output_format: self.output_format.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// The report tree followed by a one-line summary.
    #[default]
    Full,

    /// The report tree as JSON.
    Json,
}

#[derive(Debug, Error)]
pub enum KurtestosisTomlError {
    #[error(transparent)]
    TomlSyntax(#[from] toml::de::Error),
}

/// Options passed on the command line, applied on top of the configuration file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProjectOptionsOverrides {
    pub config_file_override: Option<Utf8PathBuf>,
    pub options: Options,
}

impl ProjectOptionsOverrides {
    pub const fn new(config_file_override: Option<Utf8PathBuf>, options: Options) -> Self {
        Self {
            config_file_override,
            options,
        }
    }

    #[must_use]
    pub fn apply_to(&self, options: Options) -> Options {
        self.options.clone().combine(options)
    }
}
