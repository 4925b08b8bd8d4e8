pub use manifest::{KurtosisManifest, ManifestError, PackageReplaceOptions};
pub use metadata::{
    ConfigurationFile, ConfigurationFileError, KurtestosisTomlError, Options, OutputFormat,
    ProjectOptionsOverrides, ProjectSettings, TestSettings,
};
pub use project::{Project, ProjectError};

mod manifest;
mod metadata;
mod project;

pub const KURTESTOSIS_CONFIG_FILE_NAME: &str = "kurtestosis.toml";

pub const KURTOSIS_YML_FILE_NAME: &str = "kurtosis.yml";

pub const DEFAULT_TEST_FILE_PATTERN: &str = "**/*_test.star";

pub const DEFAULT_TEST_PATTERN: &str = "test_*";
