//! Import functionality
//!
//! Provides the notation parsers and forward converters that turn a
//! user-supplied schema sample into the canonical type schema plus its
//! reconstruction metadata:
//! - JSON (formal JSON-Schema-shaped object or example data)
//! - YAML (example data or `FieldName`/`Type` field-definition lists)
//! - XML (element tree, repeated siblings become arrays)
//! - CSV (header row, column types from naming conventions)
//! - Plain text (markdown ATX headings)

pub mod csv;
pub mod json;
pub mod text;
pub mod xml;
pub mod yaml;

use serde_json::Value;

use crate::models::{CsvDelimiter, Notation, ReconstructionMetadata, SchemaNode};
use crate::validation::{contains_whitespace, join_index, join_key};

// Re-export for convenience
pub use csv::CSVImporter;
pub use json::JSONImporter;
pub use text::TextImporter;
pub use xml::XMLImporter;
pub use yaml::YAMLImporter;

/// Maximum accepted schema sample size in bytes (1MB)
pub const MAX_SAMPLE_SIZE: usize = 1024 * 1024;

/// Maximum element nesting depth accepted by the XML tree builder
pub const MAX_NESTING_DEPTH: usize = 64;

/// Kind of identifier that failed validation, for error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    /// Mapping key (YAML/JSON)
    Key,
    /// XML element name
    Element,
    /// XML attribute name
    Attribute,
    /// CSV header
    Column,
    /// Markdown heading used as a property name
    Heading,
}

impl std::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentifierKind::Key => write!(f, "key"),
            IdentifierKind::Element => write!(f, "element"),
            IdentifierKind::Attribute => write!(f, "attribute"),
            IdentifierKind::Column => write!(f, "column"),
            IdentifierKind::Heading => write!(f, "heading"),
        }
    }
}

/// Error raised when a schema sample is rejected
///
/// Every variant carries enough context to locate the offending
/// key/element/column/heading; messages are surfaced verbatim to the caller
/// as a user-input rejection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaInvalid {
    /// The sample could not be parsed as its declared notation
    #[error("Failed to parse {notation} sample: {message}")]
    Parse { notation: Notation, message: String },

    /// The sample exceeds the accepted size limit
    #[error("Schema sample is too large ({size} bytes, max {max})")]
    SampleTooLarge { size: usize, max: usize },

    /// The document root is not an object
    #[error("{notation} sample root must be an object, found {found}")]
    RootNotObject {
        notation: Notation,
        found: &'static str,
    },

    /// A name that becomes a schema property contains whitespace
    #[error("{notation} {kind} '{path}' contains whitespace; names must be single tokens")]
    WhitespaceInName {
        notation: Notation,
        kind: IdentifierKind,
        path: String,
    },

    /// A mapping key is not a string
    #[error("{notation} mapping key under '{path}' is not a string")]
    NonStringKey { notation: Notation, path: String },

    /// Two sibling names collide
    #[error("Duplicate {kind} '{path}' in {notation} sample")]
    DuplicateName {
        notation: Notation,
        kind: IdentifierKind,
        path: String,
    },

    /// CSV sample contains no content
    #[error("CSV sample is empty")]
    EmptyCsv,

    /// CSV header at the given column is blank
    #[error("CSV header at column {column} is empty")]
    EmptyHeader { column: usize },

    /// A CSV sample row does not match the header arity
    #[error("CSV row at line {line} has {found} fields, expected {expected}")]
    RowArity {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Plain-text sample contains no markdown headings
    #[error("plain-text sample contains no markdown headings")]
    NoHeadings,

    /// The first heading of a plain-text sample is not level 1
    #[error("first heading must be a single '#' (level 1), found level {found}")]
    FirstHeadingNotRoot { found: u8 },
}

/// Result of a forward conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    /// Canonical type schema derived from the sample
    pub schema: SchemaNode,
    /// Layout record needed to reconstruct the original notation
    pub metadata: ReconstructionMetadata,
}

/// Convert a schema sample into the canonical schema and its metadata
///
/// Entry point for all five notations. The delimiter applies to CSV samples
/// only and defaults to comma.
///
/// # Arguments
///
/// * `sample` - Raw schema sample text
/// * `notation` - Declared notation of the sample
/// * `delimiter` - CSV column delimiter, ignored for other notations
///
/// # Returns
///
/// The canonical schema plus reconstruction metadata, or `SchemaInvalid`
/// naming the offending location.
pub fn convert_to_canonical_schema(
    sample: &str,
    notation: Notation,
    delimiter: Option<CsvDelimiter>,
) -> Result<ConversionResult, SchemaInvalid> {
    if sample.len() > MAX_SAMPLE_SIZE {
        return Err(SchemaInvalid::SampleTooLarge {
            size: sample.len(),
            max: MAX_SAMPLE_SIZE,
        });
    }

    match notation {
        Notation::Json => JSONImporter::new().convert(sample),
        Notation::Yaml => YAMLImporter::new().convert(sample),
        Notation::Xml => XMLImporter::new().convert(sample),
        Notation::Csv => CSVImporter::new(delimiter.unwrap_or_default()).convert(sample),
        Notation::Text => TextImporter::new().convert(sample),
    }
}

/// Short kind name of a JSON value, for error messages
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reject any object key containing whitespace, at any depth
///
/// Walks objects and arrays, reporting violations with a dotted/indexed path
/// (`root.items[2].full name`). Shared by the JSON and YAML importers.
pub(crate) fn validate_object_keys(value: &Value, notation: Notation) -> Result<(), SchemaInvalid> {
    fn walk(value: &Value, path: &str, notation: Notation) -> Result<(), SchemaInvalid> {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let child_path = join_key(path, key);
                    if contains_whitespace(key) {
                        return Err(SchemaInvalid::WhitespaceInName {
                            notation,
                            kind: IdentifierKind::Key,
                            path: child_path,
                        });
                    }
                    walk(child, &child_path, notation)?;
                }
                Ok(())
            }
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    walk(item, &join_index(path, i), notation)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    walk(value, "", notation)
}
