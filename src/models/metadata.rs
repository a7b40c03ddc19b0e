//! Reconstruction metadata captured during forward conversion
//!
//! Every forward conversion returns one [`ReconstructionMetadata`] record next
//! to the canonical schema. The record carries the notation-specific layout
//! facts (key order lives in the schema itself) needed to re-emit text in the
//! original notation, and it is only valid for canonical JSON produced from
//! the same sample.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::notation::{CsvDelimiter, Notation};

/// Default YAML indent width when the sample has no indented line
pub const DEFAULT_YAML_INDENT: usize = 2;

/// One markdown heading of a plain-text sample, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingMeta {
    /// ATX heading level, 1..=6
    pub level: u8,
    /// Literal heading text, not slugified
    pub text: String,
    /// Canonical property the heading maps to
    pub property: String,
}

impl HeadingMeta {
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        let text = text.into();
        let property = text.clone();
        Self {
            level,
            text,
            property,
        }
    }
}

/// Notation-tagged layout record needed to invert a forward conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "notation", rename_all = "lowercase")]
pub enum ReconstructionMetadata {
    /// JSON samples carry no layout facts; output is a pretty-printed dump
    Json {},
    /// YAML layout facts
    Yaml {
        /// Indent width in spaces, detected from the first indented line
        indent: usize,
        /// Raw parsed document when the sample used the
        /// `FieldName`/`Type`/`Items` field-definition convention
        #[serde(skip_serializing_if = "Option::is_none")]
        definition: Option<Value>,
    },
    /// XML layout facts
    Xml {
        /// Root element name; the canonical payload must carry a top-level
        /// key with this name
        root: String,
        /// Version declared on the document, `1.0` when no declaration
        version: String,
        /// Encoding declared on the document, if any. Reconstruction always
        /// emits UTF-8; the declared value is retained for reference only.
        #[serde(skip_serializing_if = "Option::is_none")]
        encoding: Option<String>,
        /// `xmlns*` declarations found on the root, name → value, in
        /// document order
        namespaces: Vec<(String, String)>,
    },
    /// CSV layout facts
    Csv {
        /// Header names in original column order
        headers: Vec<String>,
        /// Column delimiter of the sample
        delimiter: CsvDelimiter,
    },
    /// Plain-text layout facts
    Text {
        /// Headings in document order
        headings: Vec<HeadingMeta>,
    },
}

impl ReconstructionMetadata {
    /// The notation this record reconstructs into
    pub fn notation(&self) -> Notation {
        match self {
            ReconstructionMetadata::Json {} => Notation::Json,
            ReconstructionMetadata::Yaml { .. } => Notation::Yaml,
            ReconstructionMetadata::Xml { .. } => Notation::Xml,
            ReconstructionMetadata::Csv { .. } => Notation::Csv,
            ReconstructionMetadata::Text { .. } => Notation::Text,
        }
    }
}
