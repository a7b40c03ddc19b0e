//! CSV exporter
//!
//! Renders the `rows` array of a canonical manifest as delimiter-separated
//! lines under the stored header row. Fields are quoted only when they would
//! otherwise break the row: an embedded delimiter, quote, or line break.

use serde_json::Value;

use crate::export::{ReconstructionFailed, manifest_object};
use crate::import::json_kind;
use crate::models::{CsvDelimiter, Notation};

/// CSV Exporter
///
/// Renders canonical row data back into the sample's header order and
/// delimiter.
#[derive(Debug)]
pub struct CSVExporter<'a> {
    headers: &'a [String],
    delimiter: CsvDelimiter,
}

impl<'a> CSVExporter<'a> {
    /// Create a new CSVExporter for the stored headers and delimiter
    pub fn new(headers: &'a [String], delimiter: CsvDelimiter) -> Self {
        Self { headers, delimiter }
    }

    /// Render the manifest rows as CSV
    ///
    /// Emits the stored header row, then one line per entry of the `rows`
    /// array with one field per header in stored order. Missing keys and
    /// nulls render as empty fields; composite cell values are
    /// JSON-stringified before escaping. An empty `rows` array yields the
    /// header line alone.
    ///
    /// # Arguments
    ///
    /// * `manifest` - Canonical JSON carrying the `rows` array.
    ///
    /// # Returns
    ///
    /// The CSV text, or `ReconstructionFailed` when `rows` is missing or not
    /// an array.
    pub fn reconstruct(&self, manifest: &Value) -> Result<String, ReconstructionFailed> {
        let map = manifest_object(manifest, Notation::Csv)?;
        let Some(rows_value) = map.get("rows") else {
            return Err(ReconstructionFailed::MissingKey {
                notation: Notation::Csv,
                key: "rows".to_string(),
            });
        };
        let Some(rows) = rows_value.as_array() else {
            return Err(ReconstructionFailed::UnexpectedShape {
                notation: Notation::Csv,
                path: "rows".to_string(),
                expected: "an array",
                found: json_kind(rows_value),
            });
        };

        let separator = self.delimiter.as_char();
        let joiner = separator.to_string();
        let mut lines = Vec::with_capacity(rows.len() + 1);
        lines.push(
            self.headers
                .iter()
                .map(|header| escape_field(header, separator))
                .collect::<Vec<_>>()
                .join(&joiner),
        );

        for (i, row) in rows.iter().enumerate() {
            let Some(row) = row.as_object() else {
                return Err(ReconstructionFailed::UnexpectedShape {
                    notation: Notation::Csv,
                    path: format!("rows[{i}]"),
                    expected: "an object",
                    found: json_kind(row),
                });
            };
            let mut fields = Vec::with_capacity(self.headers.len());
            for header in self.headers {
                fields.push(escape_field(&cell_text(row.get(header))?, separator));
            }
            lines.push(fields.join(&joiner));
        }

        Ok(lines.join("\n"))
    }
}

/// Text content of one cell
///
/// Missing keys and nulls are empty fields; objects and arrays have no plain
/// cell form and are JSON-stringified (the caller escapes the result).
fn cell_text(value: Option<&Value>) -> Result<String, ReconstructionFailed> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(composite) => {
            serde_json::to_string(composite).map_err(|e| ReconstructionFailed::Serialize {
                notation: Notation::Csv,
                message: e.to_string(),
            })
        }
    }
}

/// Quote a field when it contains the delimiter, a quote, or a line break,
/// doubling embedded quotes
fn escape_field(field: &str, delimiter: char) -> String {
    if field.contains(delimiter)
        || field.contains('"')
        || field.contains('\n')
        || field.contains('\r')
    {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_empty_rows_yield_header_line_alone() {
        let headers = headers(&["name", "age", "city"]);
        let text = CSVExporter::new(&headers, CsvDelimiter::Comma)
            .reconstruct(&json!({"rows": []}))
            .unwrap();
        assert_eq!(text, "name,age,city");
    }

    #[test]
    fn test_rows_render_in_stored_header_order() {
        let headers = headers(&["name", "age"]);
        let manifest = json!({"rows": [
            {"age": 31, "name": "Ada"},
            {"name": "Grace", "age": 36}
        ]});
        let text = CSVExporter::new(&headers, CsvDelimiter::Comma)
            .reconstruct(&manifest)
            .unwrap();
        assert_eq!(text, "name,age\nAda,31\nGrace,36");
    }

    #[test]
    fn test_missing_keys_and_nulls_are_empty_fields() {
        let headers = headers(&["name", "age", "city"]);
        let manifest = json!({"rows": [{"name": "Ada", "city": null}]});
        let text = CSVExporter::new(&headers, CsvDelimiter::Comma)
            .reconstruct(&manifest)
            .unwrap();
        assert_eq!(text, "name,age,city\nAda,,");
    }

    #[test]
    fn test_field_with_delimiter_is_quoted() {
        let headers = headers(&["label"]);
        let manifest = json!({"rows": [{"label": "a,b"}]});
        let text = CSVExporter::new(&headers, CsvDelimiter::Comma)
            .reconstruct(&manifest)
            .unwrap();
        assert_eq!(text, "label\n\"a,b\"");
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let headers = headers(&["label"]);
        let manifest = json!({"rows": [{"label": "say \"hi\""}]});
        let text = CSVExporter::new(&headers, CsvDelimiter::Comma)
            .reconstruct(&manifest)
            .unwrap();
        assert_eq!(text, "label\n\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_newline_in_field_is_quoted() {
        let headers = headers(&["note"]);
        let manifest = json!({"rows": [{"note": "two\nlines"}]});
        let text = CSVExporter::new(&headers, CsvDelimiter::Comma)
            .reconstruct(&manifest)
            .unwrap();
        assert_eq!(text, "note\n\"two\nlines\"");
    }

    #[test]
    fn test_composite_cell_is_json_stringified() {
        let headers = headers(&["tags"]);
        let manifest = json!({"rows": [{"tags": ["a", "b"]}]});
        let text = CSVExporter::new(&headers, CsvDelimiter::Comma)
            .reconstruct(&manifest)
            .unwrap();
        // The compact JSON contains the delimiter, so the cell is quoted
        assert_eq!(text, "tags\n\"[\"\"a\"\",\"\"b\"\"]\"");
    }

    #[test]
    fn test_semicolon_delimiter_joins_and_escapes() {
        let headers = headers(&["a", "b"]);
        let manifest = json!({"rows": [{"a": "x;y", "b": 1}]});
        let text = CSVExporter::new(&headers, CsvDelimiter::Semicolon)
            .reconstruct(&manifest)
            .unwrap();
        assert_eq!(text, "a;b\n\"x;y\";1");
    }

    #[test]
    fn test_missing_rows_key_is_rejected() {
        let headers = headers(&["a"]);
        let err = CSVExporter::new(&headers, CsvDelimiter::Comma)
            .reconstruct(&json!({"data": []}))
            .unwrap_err();
        assert!(matches!(err, ReconstructionFailed::MissingKey { .. }));
    }

    #[test]
    fn test_non_array_rows_is_rejected() {
        let headers = headers(&["a"]);
        let err = CSVExporter::new(&headers, CsvDelimiter::Comma)
            .reconstruct(&json!({"rows": "nope"}))
            .unwrap_err();
        assert_eq!(
            err,
            ReconstructionFailed::UnexpectedShape {
                notation: Notation::Csv,
                path: "rows".to_string(),
                expected: "an array",
                found: "string",
            }
        );
    }

    #[test]
    fn test_non_object_row_is_rejected_with_index() {
        let headers = headers(&["a"]);
        let err = CSVExporter::new(&headers, CsvDelimiter::Comma)
            .reconstruct(&json!({"rows": [{"a": 1}, 7]}))
            .unwrap_err();
        assert_eq!(
            err,
            ReconstructionFailed::UnexpectedShape {
                notation: Notation::Csv,
                path: "rows[1]".to_string(),
                expected: "an object",
                found: "number",
            }
        );
    }
}
