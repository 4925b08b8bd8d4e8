use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

/// Maps a package locator to the locator (or local path) that replaces it.
pub type PackageReplaceOptions = BTreeMap<String, String>;

/// The parts of a `kurtosis.yml` the harness passes through to the interpreter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct KurtosisManifest {
    #[serde(rename = "name")]
    package_name: String,

    #[serde(default)]
    description: Option<String>,

    #[serde(default, rename = "replace")]
    package_replace_options: PackageReplaceOptions,
}

impl KurtosisManifest {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_replace_option(
        mut self,
        package: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        self.package_replace_options
            .insert(package.into(), replacement.into());
        self
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ManifestError> {
        let manifest: Self = serde_yaml::from_str(yaml)?;

        if manifest.package_name.trim().is_empty() {
            return Err(ManifestError::MissingPackageName);
        }

        Ok(manifest)
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub const fn package_replace_options(&self) -> &PackageReplaceOptions {
        &self.package_replace_options
    }
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error("the `name` field must not be empty")]
    MissingPackageName,
}
