mod configuration_file;
mod options;
mod settings;

pub use configuration_file::{ConfigurationFile, ConfigurationFileError};
pub use options::{KurtestosisTomlError, Options, OutputFormat, ProjectOptionsOverrides};
pub use settings::{ProjectSettings, TestSettings};
