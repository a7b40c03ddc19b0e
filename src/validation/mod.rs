//! Validation functionality
//!
//! Provides validation logic for:
//! - Identifier checks (single-token names, dotted-path reporting)
//! - Canonical-manifest validation against a derived schema (feature-gated)

pub mod identifiers;
pub mod manifest;

pub use identifiers::{contains_whitespace, join_index, join_key};
pub use manifest::validate_manifest;
