use std::sync::LazyLock;

use regex::Regex;

static FUNCTION_DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)^def[ \t]+([A-Za-z_][A-Za-z0-9_]*)[ \t]*\((.*?)\)[ \t]*:")
        .expect("function definition regex is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FunctionDefinition {
    pub(crate) name: String,
    pub(crate) parameters: Vec<String>,
}

/// Lists the top-level `def` statements of a script in source order.
///
/// String literals and comments are blanked out first, so a `def` quoted in a
/// docstring is not mistaken for a definition.
pub(crate) fn function_definitions(source: &str) -> Vec<FunctionDefinition> {
    let masked = mask_literals(source);

    FUNCTION_DEFINITION
        .captures_iter(&masked)
        .map(|captures| FunctionDefinition {
            name: captures[1].to_string(),
            parameters: captures
                .get(2)
                .map(|parameters| parameter_names(&source[parameters.range()]))
                .unwrap_or_default(),
        })
        .collect()
}

/// Replaces the contents of string literals and comments with spaces.
///
/// Byte offsets and line breaks are preserved, so match positions in the
/// result index into `source`.
fn mask_literals(source: &str) -> String {
    fn blank(masked: &mut String, c: char) {
        if c == '\n' {
            masked.push('\n');
        } else {
            masked.extend(std::iter::repeat_n(' ', c.len_utf8()));
        }
    }

    let mut masked = String::with_capacity(source.len());
    let mut chars = source.char_indices();
    let mut literal: Option<&str> = None;
    let mut comment = false;

    while let Some((index, c)) = chars.next() {
        let rest = &source[index..];

        if comment {
            comment = c != '\n';
            blank(&mut masked, c);
            continue;
        }

        match literal {
            Some(_) if c == '\\' => {
                blank(&mut masked, c);
                if let Some((_, escaped)) = chars.next() {
                    blank(&mut masked, escaped);
                }
            }
            Some(close) if rest.starts_with(close) => {
                blank(&mut masked, c);
                for (_, c) in chars.by_ref().take(close.len() - 1) {
                    blank(&mut masked, c);
                }
                literal = None;
            }
            // An unterminated single-line string ends at the line break.
            Some(close) if c == '\n' && close.len() == 1 => {
                masked.push('\n');
                literal = None;
            }
            Some(_) => blank(&mut masked, c),
            None if c == '#' => {
                comment = true;
                blank(&mut masked, c);
            }
            None if rest.starts_with("\"\"\"") || rest.starts_with("'''") => {
                literal = Some(&rest[..3]);
                blank(&mut masked, c);
                for (_, c) in chars.by_ref().take(2) {
                    blank(&mut masked, c);
                }
            }
            None if c == '"' || c == '\'' => {
                literal = Some(&rest[..1]);
                blank(&mut masked, c);
            }
            None => masked.push(c),
        }
    }

    masked
}

/// Extracts parameter names, dropping defaults, annotations and `*`/`**` markers.
fn parameter_names(parameters: &str) -> Vec<String> {
    split_top_level(parameters)
        .into_iter()
        .filter_map(|parameter| {
            let name = parameter
                .split('=')
                .next()
                .unwrap_or_default()
                .trim()
                .trim_start_matches('*')
                .trim();

            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
}

/// Splits on commas that are not nested inside brackets or string literals.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (index, c) in text.char_indices() {
        match (quote, c) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(' | '[' | '{') => depth += 1,
            (None, ')' | ']' | '}') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(&text[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }

    parts.push(&text[start..]);
    parts
}
