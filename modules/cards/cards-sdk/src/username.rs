/// Normalize a username into a public path segment.
///
/// Lowercases the input and keeps only `a-z`, `0-9` and `_`.
/// The result is stable under repeated application.
#[must_use]
pub fn normalize_username(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}

/// Whether `value` is already in normalized form.
#[must_use]
pub fn is_normalized(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
