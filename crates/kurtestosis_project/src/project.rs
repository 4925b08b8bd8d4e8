use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use kurtestosis_system::System;
use thiserror::Error;

use crate::manifest::{KurtosisManifest, ManifestError, PackageReplaceOptions};
use crate::metadata::{
    ConfigurationFile, ConfigurationFileError, Options, ProjectOptionsOverrides, ProjectSettings,
};
use crate::KURTOSIS_YML_FILE_NAME;

/// A Kurtosis package under test: its root directory, its manifest and the
/// resolved harness settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    root: Utf8PathBuf,
    manifest: KurtosisManifest,
    settings: ProjectSettings,
}

impl Project {
    pub const fn new(root: Utf8PathBuf, manifest: KurtosisManifest, settings: ProjectSettings) -> Self {
        Self {
            root,
            manifest,
            settings,
        }
    }

    /// Loads the package rooted at `root`.
    ///
    /// `kurtosis.yml` must exist at the root. Options are read from the
    /// overriding configuration file if one is given, otherwise from
    /// `kurtestosis.toml` at the root if present, and the command line
    /// overrides are layered on top.
    pub fn load(
        root: &Utf8Path,
        system: &dyn System,
        overrides: &ProjectOptionsOverrides,
    ) -> Result<Self, ProjectError> {
        tracing::debug!("Loading project from '{root}'");

        if !system.is_directory(root) {
            return Err(ProjectError::NotADirectory(root.to_path_buf()));
        }

        let manifest_path = root.join(KURTOSIS_YML_FILE_NAME);

        let manifest_str =
            system
                .read_to_string(&manifest_path)
                .map_err(|source| ProjectError::ManifestRead {
                    source,
                    path: manifest_path.clone(),
                })?;

        let manifest = KurtosisManifest::from_yaml_str(&manifest_str).map_err(|source| {
            ProjectError::InvalidManifest {
                source,
                path: manifest_path.clone(),
            }
        })?;

        let configuration_file = match &overrides.config_file_override {
            Some(path) => {
                tracing::debug!("Using overridden configuration file at '{path}'");
                Some(ConfigurationFile::from_path(path.clone(), system)?)
            }
            None => ConfigurationFile::discover(root, system)?,
        };

        let options = configuration_file
            .map(ConfigurationFile::into_options)
            .unwrap_or_default();

        let options: Options = overrides.apply_to(options);

        let settings = options.to_settings(root, system);

        tracing::debug!(
            package = manifest.package_name(),
            test_file_pattern = settings.test().test_file_pattern.as_str(),
            test_pattern = settings.test().test_pattern.as_str(),
            "Loaded project"
        );

        Ok(Self::new(root.to_path_buf(), manifest, settings))
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub const fn manifest(&self) -> &KurtosisManifest {
        &self.manifest
    }

    pub const fn settings(&self) -> &ProjectSettings {
        &self.settings
    }

    pub fn package_name(&self) -> &str {
        self.manifest.package_name()
    }

    pub const fn package_replace_options(&self) -> &PackageReplaceOptions {
        self.manifest.package_replace_options()
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.package_name())
    }
}

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("project path '{0}' is not a directory")]
    NotADirectory(Utf8PathBuf),

    #[error("Failed to read `{path}`: {source}")]
    ManifestRead {
        #[source]
        source: std::io::Error,
        path: Utf8PathBuf,
    },

    #[error("{path} is not a valid `kurtosis.yml`: {source}")]
    InvalidManifest {
        #[source]
        source: ManifestError,
        path: Utf8PathBuf,
    },

    #[error(transparent)]
    ConfigurationFile(#[from] ConfigurationFileError),
}
