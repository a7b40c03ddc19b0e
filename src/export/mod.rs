//! Export functionality
//!
//! Provides the backward reconstructors that turn a canonical JSON manifest,
//! together with the reconstruction metadata captured during forward
//! conversion, back into text in the sample's original notation:
//! - JSON (pretty-printed, key order preserved)
//! - YAML (field-definition walk or key-order-preserving dump)
//! - XML (declaration, stored root and namespaces, fixed 4-space indent)
//! - CSV (stored header order and delimiter, quote-escaped fields)
//! - Plain text (markdown heading skeleton)

pub mod csv;
pub mod json;
pub mod text;
pub mod xml;
pub mod yaml;

use serde_json::Value;

use crate::import::json_kind;
use crate::models::{Notation, ReconstructionMetadata};

// Re-export for convenience
pub use csv::CSVExporter;
pub use json::JSONExporter;
pub use text::TextExporter;
pub use xml::XMLExporter;
pub use yaml::YAMLExporter;

/// Error raised when a canonical manifest cannot be rendered
///
/// Indicates a mismatch between the stored metadata and the shape of the
/// manifest, not a user-input problem. The surrounding system decides whether
/// to retry the structured-output call or fail the job; nothing is retried
/// here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReconstructionFailed {
    /// The manifest lacks a key the stored metadata requires
    #[error("{notation} reconstruction requires key '{key}', which is missing from the manifest")]
    MissingKey { notation: Notation, key: String },

    /// A manifest value does not have the shape the stored metadata implies
    #[error("{notation} reconstruction expected {expected} at '{path}', found {found}")]
    UnexpectedShape {
        notation: Notation,
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A manifest key cannot be emitted as a name in the target notation
    #[error("cannot emit '{name}' as an {notation} element name")]
    InvalidName { notation: Notation, name: String },

    /// The manifest could not be serialized
    #[error("failed to serialize {notation} manifest: {message}")]
    Serialize { notation: Notation, message: String },
}

/// Reconstruct notation text from a canonical manifest and its metadata
///
/// Entry point for all five notations. The metadata must come from the same
/// forward conversion that shaped the manifest; mixing records across samples
/// is undefined and rejected where detectable (a missing expected top-level
/// key, a `rows` value that is not an array).
///
/// # Arguments
///
/// * `manifest` - Canonical JSON conforming to the schema derived at import
/// * `metadata` - Layout record captured by the matching forward conversion
///
/// # Returns
///
/// The manifest rendered in the original notation, or `ReconstructionFailed`
/// naming the missing or malformed field.
pub fn reconstruct_text(
    manifest: &Value,
    metadata: &ReconstructionMetadata,
) -> Result<String, ReconstructionFailed> {
    match metadata {
        ReconstructionMetadata::Json {} => JSONExporter::new().reconstruct(manifest),
        ReconstructionMetadata::Yaml { indent, definition } => {
            YAMLExporter::new(*indent, definition.as_ref()).reconstruct(manifest)
        }
        ReconstructionMetadata::Xml {
            root,
            version,
            namespaces,
            ..
        } => XMLExporter::new(root, version, namespaces).reconstruct(manifest),
        ReconstructionMetadata::Csv { headers, delimiter } => {
            CSVExporter::new(headers, *delimiter).reconstruct(manifest)
        }
        ReconstructionMetadata::Text { headings } => {
            TextExporter::new(headings).reconstruct(manifest)
        }
    }
}

/// Require the manifest root to be an object, shared by the reconstructors
pub(crate) fn manifest_object(
    manifest: &Value,
    notation: Notation,
) -> Result<&serde_json::Map<String, Value>, ReconstructionFailed> {
    manifest
        .as_object()
        .ok_or_else(|| ReconstructionFailed::UnexpectedShape {
            notation,
            path: "manifest root".to_string(),
            expected: "an object",
            found: json_kind(manifest),
        })
}
