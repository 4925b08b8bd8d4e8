use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// Resolves `path` against `cwd` and normalizes `.` and `..` components
/// without touching the file system.
pub fn absolute(path: impl AsRef<Utf8Path>, cwd: impl AsRef<Utf8Path>) -> Utf8PathBuf {
    let path = path.as_ref();
    let cwd = cwd.as_ref();

    let mut components = path.components().peekable();
    let mut ret = if let Some(c @ (Utf8Component::Prefix(..) | Utf8Component::RootDir)) =
        components.peek().copied()
    {
        components.next();
        Utf8PathBuf::from(c.as_str())
    } else {
        cwd.to_path_buf()
    };

    for component in components {
        match component {
            Utf8Component::Prefix(..) => unreachable!(),
            Utf8Component::RootDir => {
                ret.push(component);
            }
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                ret.pop();
            }
            Utf8Component::Normal(c) => {
                ret.push(c);
            }
        }
    }

    ret
}

/// Returns `path` relative to `root` with forward slashes, which is the form
/// test files are matched and reported in.
pub fn relative_to(path: &Utf8Path, root: &Utf8Path) -> Option<Utf8PathBuf> {
    let relative = path.strip_prefix(root).ok()?;

    let normalized = relative
        .components()
        .map(|component| component.as_str())
        .collect::<Vec<_>>()
        .join("/");

    Some(Utf8PathBuf::from(normalized))
}
