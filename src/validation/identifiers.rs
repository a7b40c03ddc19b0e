//! Identifier checks and path bookkeeping shared by the notation parsers
//!
//! Every notation enforces the same rule: names (mapping keys, element and
//! attribute names, CSV headers, headings) must be single tokens without
//! internal whitespace. Violations are reported with a dotted/indexed path so
//! the caller can locate the offending name inside a nested sample.

/// Whether a name contains whitespace and is therefore not a single token
///
/// Any Unicode whitespace counts, not just ASCII space:
///
/// ```
/// use schema_transcoding_sdk::validation::contains_whitespace;
///
/// assert!(contains_whitespace("full name"));
/// assert!(contains_whitespace("tab\tseparated"));
/// assert!(!contains_whitespace("full_name"));
/// ```
pub fn contains_whitespace(name: &str) -> bool {
    name.chars().any(char::is_whitespace)
}

/// Append a key segment to a dotted path
///
/// The root has an empty path, so the first segment carries no leading dot
/// (`invoice`, then `invoice.total`).
pub fn join_key(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// Append an array index to a dotted path (`items[2]`)
pub fn join_index(path: &str, index: usize) -> String {
    format!("{path}[{index}]")
}
