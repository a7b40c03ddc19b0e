//! CSV importer
//!
//! Validates the header row of a CSV schema sample and converts it into the
//! fixed row-oriented envelope `Object { rows: Array<Object<columns>> }`.
//! Column types come from header-name conventions; sample data rows are only
//! checked for consistent arity.

use crate::import::{ConversionResult, IdentifierKind, SchemaInvalid};
use crate::inference::infer_column_node;
use crate::models::{CsvDelimiter, Field, Notation, ReconstructionMetadata, SchemaNode};
use crate::validation::contains_whitespace;

/// CSV Importer
///
/// Converts CSV header samples into the canonical schema plus CSV
/// reconstruction metadata (header order, delimiter).
#[derive(Debug, Default)]
pub struct CSVImporter {
    delimiter: CsvDelimiter,
}

impl CSVImporter {
    /// Create a new CSVImporter for the given delimiter
    pub fn new(delimiter: CsvDelimiter) -> Self {
        Self { delimiter }
    }

    /// Parse and validate a CSV sample, returning its headers
    ///
    /// The first non-empty line is the header row, split quote-aware on the
    /// configured delimiter, trimmed, surrounding quotes stripped. Rejects
    /// empty input, blank or duplicate headers, headers containing
    /// whitespace, and sample rows whose field count differs from the
    /// header count.
    ///
    /// # Arguments
    ///
    /// * `content` - The CSV sample as a string.
    ///
    /// # Returns
    ///
    /// The parsed headers in column order.
    pub fn validate(&self, content: &str) -> Result<Vec<String>, SchemaInvalid> {
        let delimiter = self.delimiter.as_char();
        let mut lines = content.lines().enumerate();

        let Some((_, header_line)) = lines.find(|(_, line)| !line.trim().is_empty()) else {
            return Err(SchemaInvalid::EmptyCsv);
        };

        let headers: Vec<String> = split_line(header_line, delimiter)
            .iter()
            .map(|field| unquote(field.trim()))
            .collect();

        for (i, header) in headers.iter().enumerate() {
            if header.is_empty() {
                return Err(SchemaInvalid::EmptyHeader { column: i + 1 });
            }
            if contains_whitespace(header) {
                return Err(SchemaInvalid::WhitespaceInName {
                    notation: Notation::Csv,
                    kind: IdentifierKind::Column,
                    path: header.clone(),
                });
            }
            if headers[..i].contains(header) {
                return Err(SchemaInvalid::DuplicateName {
                    notation: Notation::Csv,
                    kind: IdentifierKind::Column,
                    path: header.clone(),
                });
            }
        }

        // Sample rows are advisory, but malformed ones must not pass silently
        for (index, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let found = split_line(line, delimiter).len();
            if found != headers.len() {
                return Err(SchemaInvalid::RowArity {
                    line: index + 1,
                    expected: headers.len(),
                    found,
                });
            }
        }

        Ok(headers)
    }

    /// Convert a CSV sample into the canonical schema
    ///
    /// Every CSV schema yields rows of typed columns, so the result is the
    /// envelope `Object { rows: Array<Object<columns>> }` with one required
    /// field per header.
    ///
    /// # Arguments
    ///
    /// * `content` - The CSV sample as a string.
    ///
    /// # Returns
    ///
    /// The canonical schema and metadata recording header order and
    /// delimiter.
    pub fn convert(&self, content: &str) -> Result<ConversionResult, SchemaInvalid> {
        let headers = self.validate(content)?;

        let columns: Vec<Field> = headers
            .iter()
            .map(|header| {
                let node = infer_column_node(header);
                tracing::debug!(header = %header, kind = node.kind_name(), "inferred column type");
                Field::new(header.clone(), node)
            })
            .collect();

        let schema = SchemaNode::Object {
            fields: vec![Field::new(
                "rows",
                SchemaNode::Array {
                    items: Box::new(SchemaNode::Object { fields: columns }),
                },
            )],
        };

        let metadata = ReconstructionMetadata::Csv {
            headers,
            delimiter: self.delimiter,
        };

        Ok(ConversionResult { schema, metadata })
    }
}

/// Split one line on the delimiter, ignoring delimiters inside quotes
///
/// Returns raw field text; `""` doubling keeps the quote state balanced, so
/// quoted fields containing the delimiter survive intact.
pub(crate) fn split_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        if c == '"' {
            in_quotes = !in_quotes;
            current.push(c);
        } else if c == delimiter && !in_quotes {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    fields.push(current);
    fields
}

/// Strip one pair of surrounding quotes and collapse doubled quotes inside
fn unquote(field: &str) -> String {
    if field.len() >= 2 && field.starts_with('"') && field.ends_with('"') {
        field[1..field.len() - 1].replace("\"\"", "\"")
    } else {
        field.to_string()
    }
}
