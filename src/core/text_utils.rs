//! Text manipulation utilities for names, paths, and string literals.

/// Check if a character is considered part of a word (identifier).
///
/// Uses Unicode Standard Annex #31 rules for identifier characters.
#[inline]
pub fn is_word_character(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

/// Normalize a display name to the key used by the file-naming convention.
///
/// Lowercases and drops every separator (`_`, `-`, spaces, dots, slashes and
/// any other non-word character), so `GetMessageByID`, `get_message_by_id`
/// and `Get Message By Id` all share the key `getmessagebyid`.
///
/// # Example
/// ```
/// use xscript::core::text_utils::sanitize_name;
///
/// assert_eq!(sanitize_name("ValidateToken"), "validatetoken");
/// assert_eq!(sanitize_name("validate_token"), "validatetoken");
/// ```
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| is_word_character(*c) && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Sanitize every `/`-separated segment, dropping segments that sanitize to
/// nothing.
pub fn sanitize_segments(path: &str) -> Vec<String> {
    path.split('/')
        .map(sanitize_name)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// The file name of a project-relative path, without its directory.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// The file name without its last extension (`apis/brands/brands_GET.xs` → `brands_GET`).
pub fn file_stem(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(dot) => &name[..dot],
    }
}

/// The path without the extension of its final segment.
pub fn strip_extension(path: &str) -> &str {
    let stem = file_stem(path);
    let name = file_name(path);
    &path[..path.len() - (name.len() - stem.len())]
}

/// Remove the surrounding quotes of a string literal and resolve escapes.
///
/// Unterminated literals (no closing quote) keep everything after the
/// opening quote.
pub fn unquote(literal: &str) -> String {
    let mut chars = literal.chars();
    let quote = match chars.next() {
        Some(q @ ('"' | '\'')) => q,
        _ => return literal.to_string(),
    };
    let mut body = chars.as_str();
    if !body.is_empty() && body.ends_with(quote) && !ends_with_escape(&body[..body.len() - 1]) {
        body = &body[..body.len() - 1];
    }

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Whether `text` ends with an odd run of backslashes (so the next char is escaped).
fn ends_with_escape(text: &str) -> bool {
    text.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Truncate to `width` characters, replacing the tail with `...` when cut.
pub fn truncate_with_ellipsis(text: &str, width: usize) -> String {
    const ELLIPSIS: &str = "...";
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}
