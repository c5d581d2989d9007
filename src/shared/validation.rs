use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    /// Characters allowed in a stored filename
    /// - Kept: ASCII letters, digits, `_`, `.`, `-`
    /// - Everything else is removed
    static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_.-]").unwrap();

    /// Runs of whitespace, collapsed to a single underscore in filenames
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Device names Windows refuses to create as regular files
const WINDOWS_RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Escape `&`, `<`, `>`, `"` and `'` as HTML entities.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Trim surrounding whitespace, then HTML-escape.
///
/// Applied to every free-text form field before validation or storage.
pub fn clean_text(input: &str) -> String {
    escape_html(input.trim())
}

/// Turn a client-supplied filename into a flat, filesystem-safe name.
///
/// - `"../../etc/passwd"` -> `"etc_passwd"`
/// - `"My cool movie.mov"` -> `"My_cool_movie.mov"`
/// - `"résumé.pdf"` -> `"resume.pdf"`
///
/// Accented letters are decomposed (NFKD) so their ASCII base survives;
/// anything still non-ASCII afterwards is dropped. May return an empty string when nothing usable remains.
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = WHITESPACE_RUN.replace_all(ascii.trim(), "_");
    let cleaned = UNSAFE_FILENAME_CHARS.replace_all(&joined, "");
    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');

    let stem = trimmed.split('.').next().unwrap_or_default();
    if WINDOWS_RESERVED_NAMES.contains(&stem.to_ascii_uppercase().as_str()) {
        return format!("_{}", trimmed);
    }

    trimmed.to_string()
}
