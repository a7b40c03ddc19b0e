//! Plain-text exporter
//!
//! Re-emits the markdown heading skeleton captured at import time, with the
//! manifest value for each heading on the line below it. Absent or null
//! values render as the literal `Not visible` placeholder so the skeleton
//! stays complete even when the structured output dropped a property.

use serde_json::Value;

use crate::export::{ReconstructionFailed, manifest_object};
use crate::models::{HeadingMeta, Notation};

/// Placeholder emitted when a heading's value is absent or null
pub const NOT_VISIBLE: &str = "Not visible";

/// Plain Text Exporter
///
/// Renders a canonical manifest under the sample's heading structure.
#[derive(Debug)]
pub struct TextExporter<'a> {
    headings: &'a [HeadingMeta],
}

impl<'a> TextExporter<'a> {
    /// Create a new TextExporter for the stored heading list
    pub fn new(headings: &'a [HeadingMeta]) -> Self {
        Self { headings }
    }

    /// Render the manifest as heading-structured plain text
    ///
    /// Each stored heading is emitted at its original level with its literal
    /// text, followed by the manifest value for its property and a blank
    /// separator line. Trailing whitespace is trimmed from the final output.
    ///
    /// # Arguments
    ///
    /// * `manifest` - Canonical JSON keyed by the heading properties.
    ///
    /// # Returns
    ///
    /// The plain-text document.
    pub fn reconstruct(&self, manifest: &Value) -> Result<String, ReconstructionFailed> {
        let map = manifest_object(manifest, Notation::Text)?;

        let mut out = String::new();
        for heading in self.headings {
            out.push_str(&"#".repeat(heading.level as usize));
            out.push(' ');
            out.push_str(&heading.text);
            out.push('\n');
            out.push_str(&value_line(map.get(&heading.property))?);
            out.push_str("\n\n");
        }
        Ok(out.trim_end().to_string())
    }
}

/// The line emitted beneath a heading
///
/// Heading properties are string-typed in the derived schema; composite
/// values can still arrive when the metadata was paired loosely, and fall
/// back to compact JSON rather than being dropped.
fn value_line(value: Option<&Value>) -> Result<String, ReconstructionFailed> {
    match value {
        None | Some(Value::Null) => Ok(NOT_VISIBLE.to_string()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(composite) => {
            serde_json::to_string(composite).map_err(|e| ReconstructionFailed::Serialize {
                notation: Notation::Text,
                message: e.to_string(),
            })
        }
    }
}
