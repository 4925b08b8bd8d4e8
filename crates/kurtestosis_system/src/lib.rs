use std::fmt::Debug;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};

pub mod path;

pub struct EnvVars;

impl EnvVars {
    /// Overrides the location of the `kurtestosis.toml` configuration file.
    pub const KURTESTOSIS_CONFIG_FILE: &'static str = "KURTESTOSIS_CONFIG_FILE";

    /// Overrides the tracing filter, using the `tracing-subscriber` `EnvFilter` syntax.
    pub const KURTESTOSIS_LOG: &'static str = "KURTESTOSIS_LOG";
}

type Result<T> = std::io::Result<T>;

pub trait System: Debug + Sync + Send {
    /// Reads the metadata of the file or directory at `path`.
    ///
    /// This function will traverse symbolic links to query information about the destination file.
    fn path_metadata(&self, path: &Utf8Path) -> Result<Metadata>;

    fn read_to_string(&self, path: &Utf8Path) -> Result<String>;

    fn current_directory(&self) -> &Utf8Path;

    /// Directory under which per-run scratch directories are created.
    fn temp_directory(&self) -> Utf8PathBuf;

    /// Returns `true` if `path` exists and is a directory.
    fn is_directory(&self, path: &Utf8Path) -> bool {
        self.path_metadata(path)
            .is_ok_and(|metadata| metadata.file_type().is_directory())
    }

    /// Returns `true` if `path` exists and is a file.
    fn is_file(&self, path: &Utf8Path) -> bool {
        self.path_metadata(path)
            .is_ok_and(|metadata| metadata.file_type().is_file())
    }
}

/// A system implementation that uses the OS file system.
#[derive(Debug, Clone)]
pub struct OsSystem {
    inner: Arc<OsSystemInner>,
}

#[derive(Default, Debug)]
struct OsSystemInner {
    cwd: Utf8PathBuf,
}

impl OsSystem {
    pub fn new(cwd: impl AsRef<Utf8Path>) -> Self {
        let cwd = cwd.as_ref();
        assert!(cwd.is_absolute());

        tracing::debug!(
            "Architecture: {}, OS: {}",
            std::env::consts::ARCH,
            std::env::consts::OS,
        );

        Self {
            inner: Arc::new(OsSystemInner {
                cwd: cwd.to_path_buf(),
            }),
        }
    }
}

impl System for OsSystem {
    fn path_metadata(&self, path: &Utf8Path) -> Result<Metadata> {
        let metadata = path.as_std_path().metadata()?;

        let file_type = if metadata.file_type().is_file() {
            FileType::File
        } else if metadata.file_type().is_dir() {
            FileType::Directory
        } else {
            FileType::Symlink
        };

        Ok(Metadata::new(file_type, metadata.len()))
    }

    fn read_to_string(&self, path: &Utf8Path) -> Result<String> {
        std::fs::read_to_string(path)
    }

    fn current_directory(&self) -> &Utf8Path {
        &self.inner.cwd
    }

    fn temp_directory(&self) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(std::env::temp_dir())
            .unwrap_or_else(|_| self.inner.cwd.join(".kurtestosis"))
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Metadata {
    file_type: FileType,
    len: u64,
}

impl Metadata {
    pub const fn new(file_type: FileType, len: u64) -> Self {
        Self { file_type, len }
    }

    pub const fn file_type(&self) -> FileType {
        self.file_type
    }

    pub const fn len(&self) -> u64 {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum FileType {
    File,
    Directory,
    Symlink,
}

impl FileType {
    pub const fn is_file(self) -> bool {
        matches!(self, Self::File)
    }

    pub const fn is_directory(self) -> bool {
        matches!(self, Self::Directory)
    }

    pub const fn is_symlink(self) -> bool {
        matches!(self, Self::Symlink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_system_reports_file_types() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).unwrap();
        std::fs::write(root.join("kurtosis.yml"), "name: pkg\n").unwrap();

        let system = OsSystem::new(&root);

        assert!(system.is_directory(&root));
        assert!(system.is_file(&root.join("kurtosis.yml")));
        assert!(!system.is_file(&root.join("missing.yml")));
        assert_eq!(
            system.read_to_string(&root.join("kurtosis.yml")).unwrap(),
            "name: pkg\n"
        );
    }
}
