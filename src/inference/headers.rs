//! Column-type heuristics from CSV header names
//!
//! At schema-conversion time only the header row is visible, so column types
//! come from naming conventions alone. Best-effort typing: the structured
//! output is expected, but not required, to satisfy it exactly.

use crate::models::SchemaNode;

/// Header prefixes that suggest a boolean column
const BOOLEAN_PREFIXES: [&str; 7] = ["is_", "has_", "can_", "should_", "will_", "does_", "did_"];

/// Tokens that suggest a numeric column when underscore-delimited
const NUMERIC_TOKENS: [&str; 9] = [
    "count", "num", "total", "amount", "quantity", "price", "age", "score", "rating",
];

/// Infer a column schema from its header name, case-insensitively
///
/// `is_`-style prefixes win over numeric tokens; everything unrecognized is a
/// plain string column.
pub fn infer_column_node(header: &str) -> SchemaNode {
    let name = header.to_lowercase();

    if BOOLEAN_PREFIXES.iter().any(|p| name.starts_with(p)) {
        return SchemaNode::Boolean;
    }

    if NUMERIC_TOKENS.iter().any(|tok| has_token_affix(&name, tok)) {
        return SchemaNode::Number;
    }

    SchemaNode::String { format: None }
}

// `total_price` matches twice (prefix `total_`, suffix `_price`); a bare
// `total` matches neither, since the underscore is part of the convention.
fn has_token_affix(name: &str, token: &str) -> bool {
    name.strip_prefix(token)
        .is_some_and(|rest| rest.starts_with('_'))
        || name
            .strip_suffix(token)
            .is_some_and(|rest| rest.ends_with('_'))
}
