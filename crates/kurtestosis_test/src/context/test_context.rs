use std::fs;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use insta::{Settings, internals::SettingsBindDropGuard};
use tempfile::TempDir;

use crate::DEFAULT_MANIFEST;
use crate::utils::{dedent, tempdir_filter};

/// A temporary Kurtosis package on disk.
///
/// Snapshots taken while the context is alive have the package root replaced
/// by `<temp_dir>/` and durations replaced by `[TIME]`.
pub struct TestContext {
    _temp_dir: TempDir,
    project_dir_path: Utf8PathBuf,
    _settings_scope: SettingsBindDropGuard,
}

impl TestContext {
    /// Creates an empty directory, without a `kurtosis.yml`.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let project_path = Utf8PathBuf::from_path_buf(
            dunce::simplified(
                &temp_dir
                    .path()
                    .canonicalize()
                    .context("Failed to canonicalize project path")
                    .unwrap(),
            )
            .to_path_buf(),
        )
        .expect("Path is not valid UTF-8");

        let mut settings = Settings::clone_current();

        settings.add_filter(&tempdir_filter(&project_path), "<temp_dir>/");
        settings.add_filter(r#"\\(\w\w|\s|\.|")"#, "/$1");
        settings.add_filter(r"\x1b\[[0-9;]*m", "");
        settings.add_filter(r"(\s|\()(\d+m )?(\d+\.)?\d+(ms|s)", "$1[TIME]");

        let settings_scope = settings.bind_to_scope();

        Self {
            project_dir_path: project_path,
            _temp_dir: temp_dir,
            _settings_scope: settings_scope,
        }
    }

    /// Creates a package with the default `kurtosis.yml`.
    pub fn with_package() -> Self {
        let mut context = Self::new();
        context.write_file("kurtosis.yml", DEFAULT_MANIFEST);
        context
    }

    /// Creates a package with the default `kurtosis.yml` and the given files.
    pub fn with_files<'a>(files: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut context = Self::with_package();
        context.write_files(files);
        context
    }

    /// Creates a package with the default `kurtosis.yml` and one extra file.
    pub fn with_file(path: impl AsRef<Utf8Path>, content: &str) -> Self {
        let mut context = Self::with_package();
        context.write_file(path, content);
        context
    }

    pub fn write_files<'a>(&mut self, files: impl IntoIterator<Item = (&'a str, &'a str)>) {
        for (path, content) in files {
            self.write_file(path, content);
        }
    }

    pub fn write_file(&mut self, path: impl AsRef<Utf8Path>, content: &str) {
        let path = path.as_ref();

        let path = self.project_dir_path.join(path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory `{parent}`"))
                .unwrap();
        }

        std::fs::write(&path, dedent(content))
            .with_context(|| format!("Failed to write file `{path}`"))
            .unwrap();
    }

    #[allow(clippy::must_use_candidate)]
    pub fn create_dir(&self, path: impl AsRef<Utf8Path>) -> Utf8PathBuf {
        let path = self.project_dir_path.join(path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    pub fn temp_path(&self, path: impl AsRef<Utf8Path>) -> Utf8PathBuf {
        self.project_dir_path.join(path)
    }

    pub fn root(&self) -> &Utf8Path {
        &self.project_dir_path
    }

    pub fn cwd(&self) -> Utf8PathBuf {
        self.project_dir_path.clone()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
