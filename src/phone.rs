//! Mobile number canonicalization.

/// Length of a local number written with its trunk prefix, e.g. `03001234567`.
const LOCAL_NUMBER_LEN: usize = 11;

/// Returns true when the input holds nothing but whitespace.
pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

/// Removes every whitespace character from the input.
pub fn strip_whitespace(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Canonicalizes a mobile number for upstream queries and deduplication.
///
/// Whitespace is stripped; an 11-character number starting with the `0` trunk
/// prefix loses that prefix (`03001234567` → `3001234567`). Anything else is
/// returned as-is after stripping.
pub fn canonicalize(raw: &str) -> String {
    let stripped = strip_whitespace(raw);

    if stripped.chars().count() == LOCAL_NUMBER_LEN && stripped.starts_with('0') {
        return stripped[1..].to_string();
    }

    stripped
}
