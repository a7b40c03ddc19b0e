//! XML exporter
//!
//! Re-emits a canonical manifest as an XML document rooted at the stored root
//! element, with the stored namespace declarations re-applied and a fixed
//! 4-space indent. Arrays repeat their element once per entry; scalars become
//! text content escaped with the quick-xml helpers. The declaration always
//! announces UTF-8, whatever encoding the sample declared.

use quick_xml::escape::escape;
use serde_json::Value;

use crate::export::{ReconstructionFailed, manifest_object};
use crate::import::json_kind;
use crate::models::Notation;
use crate::validation::contains_whitespace;

/// Indent unit applied per nesting level
const INDENT_UNIT: &str = "    ";

/// XML Exporter
///
/// Renders a canonical manifest back into the sample's element hierarchy.
#[derive(Debug)]
pub struct XMLExporter<'a> {
    root: &'a str,
    version: &'a str,
    namespaces: &'a [(String, String)],
}

impl<'a> XMLExporter<'a> {
    /// Create a new XMLExporter for the stored root tag, declared version,
    /// and namespace declarations
    pub fn new(root: &'a str, version: &'a str, namespaces: &'a [(String, String)]) -> Self {
        Self {
            root,
            version,
            namespaces,
        }
    }

    /// Render the manifest as an XML document
    ///
    /// The manifest must carry a top-level key matching the stored root
    /// element name, holding anything but an array; a missing key or a
    /// root-level array means the metadata was paired with JSON shaped by
    /// a different sample.
    ///
    /// # Arguments
    ///
    /// * `manifest` - Canonical JSON keyed by the stored root tag.
    ///
    /// # Returns
    ///
    /// The XML text including the declaration, or `ReconstructionFailed`
    /// naming the missing or malformed part.
    pub fn reconstruct(&self, manifest: &Value) -> Result<String, ReconstructionFailed> {
        let map = manifest_object(manifest, Notation::Xml)?;
        let Some(payload) = map.get(self.root) else {
            return Err(ReconstructionFailed::MissingKey {
                notation: Notation::Xml,
                key: self.root.to_string(),
            });
        };
        // An array here would repeat the root element per entry; a document
        // has exactly one root. Forward conversion never derives this shape.
        if payload.is_array() {
            return Err(ReconstructionFailed::UnexpectedShape {
                notation: Notation::Xml,
                path: self.root.to_string(),
                expected: "a single root element",
                found: json_kind(payload),
            });
        }

        let mut out = format!("<?xml version=\"{}\" encoding=\"UTF-8\"?>\n", self.version);
        emit_element(&mut out, self.root, payload, 0, self.namespaces)?;
        Ok(out)
    }
}

/// Emit one element, recursing into objects and repeating for array entries
fn emit_element(
    out: &mut String,
    name: &str,
    value: &Value,
    depth: usize,
    attributes: &[(String, String)],
) -> Result<(), ReconstructionFailed> {
    if contains_whitespace(name) {
        return Err(ReconstructionFailed::InvalidName {
            notation: Notation::Xml,
            name: name.to_string(),
        });
    }

    let pad = INDENT_UNIT.repeat(depth);
    match value {
        // The array itself has no tag; its element repeats per entry
        Value::Array(items) => {
            for item in items {
                emit_element(out, name, item, depth, attributes)?;
            }
            Ok(())
        }
        Value::Object(children) => {
            out.push_str(&pad);
            out.push_str(&open_tag(name, attributes));
            if children.is_empty() {
                out.push_str("/>\n");
                return Ok(());
            }
            out.push_str(">\n");
            for (child_name, child) in children {
                emit_element(out, child_name, child, depth + 1, &[])?;
            }
            out.push_str(&pad);
            out.push_str(&format!("</{name}>\n"));
            Ok(())
        }
        Value::Null => {
            out.push_str(&pad);
            out.push_str(&open_tag(name, attributes));
            out.push_str("/>\n");
            Ok(())
        }
        scalar => {
            let text = match scalar {
                Value::String(s) => escape(s.as_str()).into_owned(),
                other => other.to_string(),
            };
            out.push_str(&pad);
            out.push_str(&open_tag(name, attributes));
            out.push_str(&format!(">{text}</{name}>\n"));
            Ok(())
        }
    }
}

fn open_tag(name: &str, attributes: &[(String, String)]) -> String {
    let mut tag = format!("<{name}");
    for (attr, value) in attributes {
        tag.push_str(&format!(" {attr}=\"{}\"", escape(value.as_str())));
    }
    tag
}
