use camino::{Utf8Path, Utf8PathBuf};
use kurtestosis_system::System;
use thiserror::Error;

use super::options::{KurtestosisTomlError, Options};
use crate::KURTESTOSIS_CONFIG_FILE_NAME;

/// A `kurtestosis.toml` configuration file with the options it contains.
#[derive(Debug)]
pub struct ConfigurationFile {
    path: Utf8PathBuf,
    options: Options,
}

impl ConfigurationFile {
    pub fn from_path(
        path: Utf8PathBuf,
        system: &dyn System,
    ) -> Result<Self, ConfigurationFileError> {
        let toml_str = system.read_to_string(&path).map_err(|source| {
            ConfigurationFileError::FileReadError {
                source,
                path: path.clone(),
            }
        })?;

        match Options::from_toml_str(&toml_str) {
            Ok(options) => Ok(Self { path, options }),
            Err(error) => Err(ConfigurationFileError::InvalidKurtestosisToml {
                source: Box::new(error),
                path,
            }),
        }
    }

    /// Loads `kurtestosis.toml` from the project root if it exists.
    pub fn discover(
        root: &Utf8Path,
        system: &dyn System,
    ) -> Result<Option<Self>, ConfigurationFileError> {
        let path = root.join(KURTESTOSIS_CONFIG_FILE_NAME);

        if !system.is_file(&path) {
            tracing::debug!("No configuration file at `{path}`");
            return Ok(None);
        }

        tracing::debug!("Found configuration file at `{path}`");

        Self::from_path(path, system).map(Some)
    }

    /// Returns the path to the configuration file.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn into_options(self) -> Options {
        self.options
    }
}

#[derive(Debug, Error)]
pub enum ConfigurationFileError {
    #[error("{path} is not a valid `kurtestosis.toml`: {source}")]
    InvalidKurtestosisToml {
        source: Box<KurtestosisTomlError>,
        path: Utf8PathBuf,
    },
    #[error("Failed to read `{path}`: {source}")]
    FileReadError {
        #[source]
        source: std::io::Error,
        path: Utf8PathBuf,
    },
}
