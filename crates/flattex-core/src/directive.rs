//! Directive detection within a single physical line.
//!
//! A directive is `\input{name}` or `\include{name}` that is not commented
//! out. The text before the keyword may contain `%` only as the second
//! character of a backslash escape; a bare `%` starts a LaTeX comment and
//! kills the match for the rest of the line.

use memchr::{memchr, memchr2};

/// The two recognized inclusion keywords.
const KEYWORDS: [&str; 2] = ["\\input", "\\include"];

/// A single inclusion directive split out of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    /// Literal text preceding the directive.
    pub before: &'a str,
    /// Raw brace-group content, not yet trimmed or extension-normalized.
    pub filename: &'a str,
    /// Literal remainder of the line, including its line ending.
    pub after: &'a str,
}

/// Find the first non-commented inclusion directive in `line`.
///
/// `line` is one physical line and may include its trailing newline, which
/// ends up in [`Directive::after`]. Returns `None` when the line has no
/// directive, when the brace group never closes, or when an unescaped `%`
/// comments the directive out. At most one directive is detected per line;
/// anything following it stays in `after` untouched.
pub fn find_directive(line: &str) -> Option<Directive<'_>> {
    let bytes = line.as_bytes();
    let mut pos = 0;
    while pos < bytes.len() {
        // Jump to the next byte that can matter; everything in between is
        // plain text. Multi-byte characters are safe to skip over because
        // UTF-8 continuation bytes can never equal '\' or '%'.
        pos += memchr2(b'\\', b'%', &bytes[pos..])?;
        if bytes[pos] == b'%' {
            // Unescaped comment start: the rest of the line is dead.
            return None;
        }
        if let Some(directive) = match_at(line, pos) {
            return Some(directive);
        }
        // Not a keyword, so this backslash escapes the following character.
        pos += 1;
        match line[pos..].chars().next() {
            Some(c) => pos += c.len_utf8(),
            // A lone backslash at the end of the line escapes nothing.
            None => return None,
        }
    }
    None
}

/// Try to match a keyword plus brace group starting at byte `pos`.
fn match_at(line: &str, pos: usize) -> Option<Directive<'_>> {
    let rest = &line[pos..];
    for keyword in KEYWORDS {
        let Some(arg) = rest.strip_prefix(keyword) else {
            continue;
        };
        let Some(body) = arg.strip_prefix('{') else {
            continue;
        };
        // Shortest match: the argument ends at the first closing brace.
        let close = memchr(b'}', body.as_bytes())?;
        return Some(Directive {
            before: &line[..pos],
            filename: &body[..close],
            after: &body[close + 1..],
        });
    }
    None
}

/// Normalize a raw directive argument into the filename to open.
///
/// Trims surrounding whitespace, then appends `extension` unless the name
/// already ends with it. The check is a literal suffix match, not path-aware.
pub fn normalize_filename(raw: &str, extension: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.ends_with(extension) {
        trimmed.to_string()
    } else {
        let mut name = String::with_capacity(trimmed.len() + extension.len());
        name.push_str(trimmed);
        name.push_str(extension);
        name
    }
}
