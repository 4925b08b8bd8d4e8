use std::sync::Arc;

use camino::Utf8PathBuf;
use globset::{GlobBuilder, GlobMatcher};
use ignore::WalkBuilder;
use kurtestosis_project::Project;
use kurtestosis_system::System;
use kurtestosis_system::path::relative_to;
use thiserror::Error;

use crate::models::{TestFile, TestFunction};
use crate::parse::function_definitions;

/// Finds test files in a project and test functions in a test file.
///
/// Both operations return their results in a stable order so that runs are
/// reproducible.
pub trait Discovery {
    fn list_matching_files(
        &self,
        project: &Arc<Project>,
        pattern: &str,
    ) -> Result<Vec<TestFile>, DiscoveryError>;

    fn list_matching_functions(
        &self,
        file: &TestFile,
        pattern: &str,
    ) -> Result<Vec<TestFunction>, DiscoveryError>;
}

/// Discovery backed by the file system.
///
/// File patterns are globs over root-relative paths where `*` does not cross
/// a `/`. Function patterns are globs over the name of top-level `def`s.
#[derive(Debug, Clone, Copy)]
pub struct GlobDiscovery<'a> {
    system: &'a dyn System,
}

impl<'a> GlobDiscovery<'a> {
    pub const fn new(system: &'a dyn System) -> Self {
        Self { system }
    }
}

impl Discovery for GlobDiscovery<'_> {
    fn list_matching_files(
        &self,
        project: &Arc<Project>,
        pattern: &str,
    ) -> Result<Vec<TestFile>, DiscoveryError> {
        let matcher = compile(pattern, true)?;
        let root = project.root();
        let respect_ignore_files = project.settings().respect_ignore_files();

        let walker = WalkBuilder::new(root)
            .standard_filters(respect_ignore_files)
            .require_git(false)
            .git_global(false)
            .parents(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut paths = Vec::new();

        for entry in walker {
            let entry = entry.map_err(|source| DiscoveryError::Walk {
                root: root.to_path_buf(),
                source,
            })?;

            if !entry.file_type().is_some_and(|file_type| file_type.is_file()) {
                continue;
            }

            let Ok(path) = Utf8PathBuf::from_path_buf(entry.into_path()) else {
                tracing::debug!("Skipping non UTF-8 path under '{root}'");
                continue;
            };

            let Some(relative) = relative_to(&path, root) else {
                continue;
            };

            if matcher.is_match(relative.as_str()) {
                tracing::trace!("Matched test file '{relative}'");
                paths.push(relative);
            }
        }

        paths.sort();

        tracing::debug!(
            "Found {} test file(s) matching '{pattern}' in '{root}'",
            paths.len()
        );

        Ok(paths
            .into_iter()
            .map(|path| TestFile::new(Arc::clone(project), path))
            .collect())
    }

    fn list_matching_functions(
        &self,
        file: &TestFile,
        pattern: &str,
    ) -> Result<Vec<TestFunction>, DiscoveryError> {
        let matcher = compile(pattern, false)?;
        let path = file.absolute_path();

        let source = self
            .system
            .read_to_string(&path)
            .map_err(|source| DiscoveryError::Read {
                path: path.clone(),
                source,
            })?;

        let functions: Vec<TestFunction> = function_definitions(&source)
            .into_iter()
            .filter(|definition| matcher.is_match(definition.name.as_str()))
            .map(|definition| TestFunction::new(file.clone(), definition.name, definition.parameters))
            .collect();

        tracing::debug!(
            "Found {} test function(s) matching '{pattern}' in '{file}'",
            functions.len()
        );

        Ok(functions)
    }
}

fn compile(pattern: &str, literal_separator: bool) -> Result<GlobMatcher, DiscoveryError> {
    GlobBuilder::new(pattern)
        .literal_separator(literal_separator)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| DiscoveryError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("invalid pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to read test file `{path}`")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk `{root}`")]
    Walk {
        root: Utf8PathBuf,
        #[source]
        source: ignore::Error,
    },
}
