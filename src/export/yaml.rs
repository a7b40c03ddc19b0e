//! YAML exporter
//!
//! Re-emits a canonical manifest as block-style YAML at the indent width
//! captured during import. When the sample used the `FieldName`/`Type`
//! field-definition convention, the stored definition structure drives the
//! walk, so output keeps the sample's field order and falls back to its
//! example values for properties the manifest dropped. Otherwise the manifest
//! is dumped directly, key order preserved.
//!
//! Emission is hand-written because the indent width is part of the stored
//! layout. Structures with no clean block form at this width (composites
//! nested inside sequence items, empty containers) fall back to inline JSON,
//! which is valid YAML flow style.

use serde_json::{Map, Value};

use crate::export::{ReconstructionFailed, manifest_object};
use crate::import::json_kind;
use crate::models::Notation;

/// YAML Exporter
///
/// Renders a canonical manifest back into the sample's layout.
#[derive(Debug)]
pub struct YAMLExporter<'a> {
    indent: usize,
    definition: Option<&'a Value>,
}

impl<'a> YAMLExporter<'a> {
    /// Create a new YAMLExporter for the stored indent width and optional
    /// field-definition structure
    pub fn new(indent: usize, definition: Option<&'a Value>) -> Self {
        Self {
            // indent 0 would flatten nesting into unparseable output
            indent: indent.max(1),
            definition,
        }
    }

    /// Render the manifest as block-style YAML
    ///
    /// # Arguments
    ///
    /// * `manifest` - Canonical JSON conforming to the derived schema.
    ///
    /// # Returns
    ///
    /// The YAML text, or `ReconstructionFailed` when the manifest or the
    /// stored definition is not an object.
    pub fn reconstruct(&self, manifest: &Value) -> Result<String, ReconstructionFailed> {
        let current = manifest_object(manifest, Notation::Yaml)?;

        match self.definition {
            Some(definition) => {
                let Some(definition) = definition.as_object() else {
                    return Err(ReconstructionFailed::UnexpectedShape {
                        notation: Notation::Yaml,
                        path: "stored definition".to_string(),
                        expected: "an object",
                        found: json_kind(definition),
                    });
                };
                Ok(self.emit_definition_document(definition, current))
            }
            None => {
                let mut out = String::new();
                self.emit_mapping(&mut out, current, 0);
                Ok(out)
            }
        }
    }

    /// Walk the stored definition in its original order, preferring manifest
    /// values over the sample's examples
    fn emit_definition_document(
        &self,
        definition: &Map<String, Value>,
        current: &Map<String, Value>,
    ) -> String {
        let mut out = String::new();
        for (key, sample_value) in definition {
            match definition_entries(sample_value) {
                Some(entries) => {
                    let fields = current.get(key).and_then(Value::as_object);
                    if fields.is_none() {
                        tracing::debug!(key = %key, "manifest value absent, using example fallbacks");
                    }
                    out.push_str(&format!("{}:\n", scalar_key(key)));
                    for entry in entries {
                        self.emit_definition_entry(&mut out, entry, fields, 1);
                    }
                }
                None => {
                    // Plain example key: the sample's value is the fallback
                    let value = current.get(key).unwrap_or(sample_value);
                    self.emit_entry(&mut out, key, value, 0);
                }
            }
        }
        for key in current.keys() {
            if !definition.contains_key(key) {
                tracing::warn!(key = %key, "ignoring manifest key absent from the stored sample");
            }
        }
        out
    }

    /// Emit one field of a definition list
    ///
    /// Value resolution order: current manifest field, then the entry's
    /// `Example`, then an empty value fitting the declared type.
    fn emit_definition_entry(
        &self,
        out: &mut String,
        entry: &Value,
        fields: Option<&Map<String, Value>>,
        depth: usize,
    ) {
        let Some(entry) = entry.as_object() else {
            return;
        };
        let Some(name) = entry.get("FieldName").and_then(Value::as_str) else {
            return;
        };

        let declared = entry
            .get("Type")
            .and_then(Value::as_str)
            .unwrap_or("string")
            .to_lowercase();
        let empty = empty_for_type(&declared);
        let value = fields
            .and_then(|f| f.get(name))
            .or_else(|| entry.get("Example"))
            .unwrap_or(&empty);
        self.emit_entry(out, name, value, depth);
    }

    /// Emit one `key: value` entry at the given depth
    fn emit_entry(&self, out: &mut String, key: &str, value: &Value, depth: usize) {
        let pad = " ".repeat(depth * self.indent);
        match value {
            Value::Object(map) if !map.is_empty() => {
                out.push_str(&format!("{pad}{}:\n", scalar_key(key)));
                self.emit_mapping(out, map, depth + 1);
            }
            Value::Array(items) if !items.is_empty() => {
                out.push_str(&format!("{pad}{}:\n", scalar_key(key)));
                self.emit_sequence(out, items, depth + 1);
            }
            other => {
                out.push_str(&format!("{pad}{}: {}\n", scalar_key(key), inline_value(other)));
            }
        }
    }

    fn emit_mapping(&self, out: &mut String, map: &Map<String, Value>, depth: usize) {
        for (key, value) in map {
            self.emit_entry(out, key, value, depth);
        }
    }

    /// Emit a block sequence
    ///
    /// Object entries put their first key on the dash line and align the
    /// remaining keys beneath it; scalar entries become `- value` lines.
    fn emit_sequence(&self, out: &mut String, items: &[Value], depth: usize) {
        let pad = " ".repeat(depth * self.indent);
        for item in items {
            match item {
                Value::Object(map) if !map.is_empty() => {
                    for (i, (key, value)) in map.iter().enumerate() {
                        let lead = if i == 0 { "- " } else { "  " };
                        out.push_str(&format!(
                            "{pad}{lead}{}: {}\n",
                            scalar_key(key),
                            flow_value(value)
                        ));
                    }
                }
                other => {
                    out.push_str(&format!("{pad}- {}\n", flow_value(other)));
                }
            }
        }
    }
}

/// Whether a value is a field-definition list, mirroring the importer's
/// convention test: an array whose first entry is a mapping with `FieldName`
fn definition_entries(value: &Value) -> Option<&[Value]> {
    let entries = value.as_array()?;
    entries
        .first()?
        .as_object()?
        .contains_key("FieldName")
        .then(|| entries.as_slice())
}

/// Empty value fitting a declared type name (already lowercased)
fn empty_for_type(type_name: &str) -> Value {
    match type_name {
        "int" | "integer" | "number" | "float" => Value::from(0),
        "bool" | "boolean" => Value::Bool(false),
        "list" | "array" => Value::Array(Vec::new()),
        _ => Value::String(String::new()),
    }
}

/// Render a scalar or empty composite on a single line
fn inline_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => scalar_string(s),
        // Empty composites have no block form
        Value::Array(_) => "[]".to_string(),
        Value::Object(_) => "{}".to_string(),
    }
}

/// Render any value on a single line, composites as inline JSON flow
fn flow_value(value: &Value) -> String {
    match value {
        Value::Array(items) if !items.is_empty() => value.to_string(),
        Value::Object(map) if !map.is_empty() => value.to_string(),
        other => inline_value(other),
    }
}

fn scalar_key(key: &str) -> String {
    scalar_string(key)
}

/// Render a string scalar, double-quoting when plain style would change its
/// type or swallow part of the text
fn scalar_string(s: &str) -> String {
    if needs_quotes(s) { quoted(s) } else { s.to_string() }
}

fn needs_quotes(s: &str) -> bool {
    if s.is_empty() || s.trim() != s {
        return true;
    }
    // Plain style would re-type these on a later parse
    let lowered = s.to_ascii_lowercase();
    if matches!(
        lowered.as_str(),
        "null" | "~" | "true" | "false" | "yes" | "no" | "on" | "off"
    ) {
        return true;
    }
    if s.parse::<f64>().is_ok()
        || lowered.starts_with("0x")
        || lowered.starts_with("0o")
        || lowered.starts_with("0b")
    {
        return true;
    }
    // Characters that open another YAML construct or end the scalar early
    if s.starts_with([
        '-', '?', ':', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@', '`',
    ]) {
        return true;
    }
    s.contains(": ") || s.ends_with(':') || s.contains(" #") || s.contains(['\n', '\r', '\t'])
}

fn quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_dump_preserves_order_and_indent() {
        let manifest = json!({
            "invoice_number": "INV-001",
            "customer": {"name": "Acme", "city": "Berlin"},
            "paid": false
        });
        let text = YAMLExporter::new(4, None).reconstruct(&manifest).unwrap();
        assert_eq!(
            text,
            "invoice_number: INV-001\ncustomer:\n    name: Acme\n    city: Berlin\npaid: false\n"
        );
    }

    #[test]
    fn test_definition_walk_prefers_manifest_values() {
        let definition = json!({
            "Invoice": [
                {"FieldName": "number", "Type": "string"},
                {"FieldName": "total", "Type": "number"},
                {"FieldName": "lines", "Type": "list", "Items": [{"qty": "integer"}]}
            ]
        });
        let manifest = json!({
            "Invoice": {
                "number": "INV-9",
                "total": 42.5,
                "lines": [
                    {"description": "widget", "qty": 2},
                    {"description": "bolt", "qty": 14}
                ]
            }
        });
        let text = YAMLExporter::new(2, Some(&definition))
            .reconstruct(&manifest)
            .unwrap();
        assert_eq!(
            text,
            "Invoice:\n  number: INV-9\n  total: 42.5\n  lines:\n    - description: widget\n      qty: 2\n    - description: bolt\n      qty: 14\n"
        );
    }

    #[test]
    fn test_definition_falls_back_to_example_then_empty() {
        let definition = json!({
            "Report": [
                {"FieldName": "title", "Type": "string", "Example": "Quarterly"},
                {"FieldName": "pages", "Type": "integer"},
                {"FieldName": "tags", "Type": "list"}
            ]
        });
        let manifest = json!({"Report": {}});
        let text = YAMLExporter::new(2, Some(&definition))
            .reconstruct(&manifest)
            .unwrap();
        assert_eq!(text, "Report:\n  title: Quarterly\n  pages: 0\n  tags: []\n");
    }

    #[test]
    fn test_definition_mixed_with_plain_example_keys() {
        let definition = json!({
            "company": "Acme Ltd",
            "Invoice": [{"FieldName": "number", "Type": "string"}]
        });
        let manifest = json!({"Invoice": {"number": "INV-1"}});
        let text = YAMLExporter::new(2, Some(&definition))
            .reconstruct(&manifest)
            .unwrap();
        assert_eq!(text, "company: Acme Ltd\nInvoice:\n  number: INV-1\n");
    }

    #[test]
    fn test_scalar_array_emits_dash_lines() {
        let manifest = json!({"tags": ["alpha", "beta"]});
        let text = YAMLExporter::new(2, None).reconstruct(&manifest).unwrap();
        assert_eq!(text, "tags:\n  - alpha\n  - beta\n");
    }

    #[test]
    fn test_ambiguous_strings_are_quoted() {
        let manifest = json!({
            "a": "true",
            "b": "123",
            "c": "",
            "d": "key: value",
            "e": "plain text"
        });
        let text = YAMLExporter::new(2, None).reconstruct(&manifest).unwrap();
        assert_eq!(
            text,
            "a: \"true\"\nb: \"123\"\nc: \"\"\nd: \"key: value\"\ne: plain text\n"
        );
    }

    #[test]
    fn test_quoted_strings_escape_control_characters() {
        let manifest = json!({"note": "line1\nline2\t\"quoted\""});
        let text = YAMLExporter::new(2, None).reconstruct(&manifest).unwrap();
        assert_eq!(text, "note: \"line1\\nline2\\t\\\"quoted\\\"\"\n");
    }

    #[test]
    fn test_empty_composites_stay_inline() {
        let manifest = json!({"items": [], "extra": {}});
        let text = YAMLExporter::new(2, None).reconstruct(&manifest).unwrap();
        assert_eq!(text, "items: []\nextra: {}\n");
    }

    #[test]
    fn test_nested_composite_in_sequence_item_falls_back_to_flow() {
        let manifest = json!({"rows": [{"name": "a", "parts": [1, 2]}]});
        let text = YAMLExporter::new(2, None).reconstruct(&manifest).unwrap();
        assert_eq!(text, "rows:\n  - name: a\n    parts: [1,2]\n");
    }

    #[test]
    fn test_non_object_manifest_is_rejected() {
        let err = YAMLExporter::new(2, None).reconstruct(&json!(3)).unwrap_err();
        assert!(matches!(err, ReconstructionFailed::UnexpectedShape { .. }));
    }

    #[test]
    fn test_zero_indent_is_clamped() {
        let manifest = json!({"outer": {"inner": 1}});
        let text = YAMLExporter::new(0, None).reconstruct(&manifest).unwrap();
        assert_eq!(text, "outer:\n inner: 1\n");
    }

    #[test]
    fn test_needs_quotes_rules() {
        assert!(needs_quotes(""));
        assert!(needs_quotes(" padded "));
        assert!(needs_quotes("null"));
        assert!(needs_quotes("Yes"));
        assert!(needs_quotes("12.5"));
        assert!(needs_quotes("0x1F"));
        assert!(needs_quotes("- item"));
        assert!(needs_quotes("trailing:"));
        assert!(needs_quotes("a # comment"));
        assert!(!needs_quotes("plain"));
        assert!(!needs_quotes("2024-06-01"));
        assert!(!needs_quotes("with spaces inside"));
        assert!(!needs_quotes("1:30"));
    }
}
