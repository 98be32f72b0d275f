//! Alias normalization for split file names.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Anything that may not appear in a normalized name.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_]").expect("valid regex"));

/// Normalize an alias into a filesystem- and YAML-safe identifier.
///
/// Applies compatibility decomposition (NFKD), drops every non-ASCII code
/// point, replaces each character outside `[a-zA-Z0-9_]` with `_` and
/// lowercases the result. The output always matches `^[a-z0-9_]*$`.
///
/// # Examples
/// ```
/// use automation_splitter::normalize::normalize_name;
///
/// assert_eq!(normalize_name("Café Lights"), "cafe_lights");
/// assert_eq!(normalize_name("Morning Routine"), "morning_routine");
/// ```
pub fn normalize_name(alias: &str) -> String {
    let ascii: String = alias.nfkd().filter(char::is_ascii).collect();
    UNSAFE_CHARS.replace_all(&ascii, "_").to_lowercase()
}
