//! Models module for the SDK
//!
//! Defines the canonical data structures shared by import and export:
//! the notation tags, the type schema tree, and the per-notation
//! reconstruction metadata.

pub mod metadata;
pub mod node;
pub mod notation;

pub use metadata::{DEFAULT_YAML_INDENT, HeadingMeta, ReconstructionMetadata};
pub use node::{Field, SchemaNode, StringFormat};
pub use notation::{CsvDelimiter, Notation};
