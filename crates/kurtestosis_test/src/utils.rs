use camino::Utf8Path;

/// Builds an insta filter regex that matches `path` followed by an optional separator.
pub fn tempdir_filter(path: &Utf8Path) -> String {
    format!(r"{}\\?/?", regex::escape(path.as_str()))
}

/// Removes the common leading whitespace of all non-blank lines.
///
/// A leading newline is dropped so fixtures can start on the line after `r"`.
pub fn dedent(text: &str) -> String {
    let text = text.strip_prefix('\n').unwrap_or(text);

    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut dedented = text
        .lines()
        .map(|line| line.get(indent..).unwrap_or_else(|| line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n");

    if text.ends_with('\n') {
        dedented.push('\n');
    }

    dedented
}
