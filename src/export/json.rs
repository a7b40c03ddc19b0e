//! JSON exporter
//!
//! Renders a canonical manifest as pretty-printed JSON. Key order is
//! preserved by the order-preserving map representation, so JSON needs no
//! layout metadata.

use serde_json::Value;

use crate::export::ReconstructionFailed;
use crate::models::Notation;

/// JSON Exporter
///
/// Pretty-prints the canonical manifest as the delivered text.
#[derive(Debug, Default)]
pub struct JSONExporter;

impl JSONExporter {
    /// Create a new JSONExporter
    pub fn new() -> Self {
        Self
    }

    /// Render the manifest as pretty-printed JSON
    ///
    /// # Arguments
    ///
    /// * `manifest` - Canonical JSON conforming to the derived schema.
    ///
    /// # Returns
    ///
    /// The pretty-printed document.
    pub fn reconstruct(&self, manifest: &Value) -> Result<String, ReconstructionFailed> {
        serde_json::to_string_pretty(manifest).map_err(|e| ReconstructionFailed::Serialize {
            notation: Notation::Json,
            message: e.to_string(),
        })
    }
}
