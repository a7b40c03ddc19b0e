//! Schema Transcoding SDK - Shared library for schema-sample transcoding
//!
//! Provides unified interfaces for:
//! - Parsing schema samples (YAML, XML, CSV, plain-text headings, JSON)
//! - Converting samples to a canonical type tree plus reconstruction metadata
//! - Type inference from example values and CSV headers
//! - Reconstructing notation-faithful text from canonical manifests
//! - Manifest validation against the derived schema

pub mod export;
pub mod import;
pub mod inference;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use import::{
    CSVImporter, ConversionResult, IdentifierKind, JSONImporter, MAX_NESTING_DEPTH,
    MAX_SAMPLE_SIZE, SchemaInvalid, TextImporter, XMLImporter, YAMLImporter,
    convert_to_canonical_schema,
};
pub use export::{
    CSVExporter, JSONExporter, ReconstructionFailed, TextExporter, XMLExporter, YAMLExporter,
    reconstruct_text,
};
pub use inference::{detect_format, infer_column_node, infer_node};
pub use validation::validate_manifest;

// Re-export models
pub use models::{
    CsvDelimiter, Field, HeadingMeta, Notation, ReconstructionMetadata, SchemaNode, StringFormat,
};
