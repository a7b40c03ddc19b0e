//! JSON importer
//!
//! Accepts JSON schema samples in two shapes: a formal JSON-Schema-like
//! object (`"type": "object"` with `"properties"`), which is converted
//! structurally, honoring `required`, `format`, and nullable type unions; or
//! plain example data, whose types are inferred from the values.

use serde_json::Value;

use crate::import::{
    ConversionResult, IdentifierKind, SchemaInvalid, json_kind, validate_object_keys,
};
use crate::inference::infer_node;
use crate::models::{Field, Notation, ReconstructionMetadata, SchemaNode, StringFormat};
use crate::validation::{contains_whitespace, join_key};

/// JSON Importer
///
/// Converts JSON schema samples into the canonical schema. JSON output is a
/// pretty-printed dump, so the metadata carries no layout facts.
#[derive(Debug, Default)]
pub struct JSONImporter;

impl JSONImporter {
    /// Create a new JSONImporter
    pub fn new() -> Self {
        Self
    }

    /// Parse a JSON sample and check that its root is an object
    ///
    /// # Arguments
    ///
    /// * `content` - The JSON sample as a string.
    ///
    /// # Returns
    ///
    /// The parsed document.
    pub fn validate(&self, content: &str) -> Result<Value, SchemaInvalid> {
        let document: Value = serde_json::from_str(content).map_err(|e| SchemaInvalid::Parse {
            notation: Notation::Json,
            message: e.to_string(),
        })?;

        if !document.is_object() {
            return Err(SchemaInvalid::RootNotObject {
                notation: Notation::Json,
                found: json_kind(&document),
            });
        }
        Ok(document)
    }

    /// Convert a JSON sample into the canonical schema
    ///
    /// # Arguments
    ///
    /// * `content` - The JSON sample as a string.
    ///
    /// # Returns
    ///
    /// The canonical schema and (empty) JSON metadata.
    pub fn convert(&self, content: &str) -> Result<ConversionResult, SchemaInvalid> {
        let document = self.validate(content)?;

        let schema = if is_formal_schema(&document) {
            let Value::Object(map) = &document else {
                return Err(SchemaInvalid::RootNotObject {
                    notation: Notation::Json,
                    found: json_kind(&document),
                });
            };
            convert_formal(map, "")?
        } else {
            validate_object_keys(&document, Notation::Json)?;
            infer_node(&document)
        };

        Ok(ConversionResult {
            schema,
            metadata: ReconstructionMetadata::Json {},
        })
    }
}

/// Whether a sample is a formal JSON-Schema-shaped object
fn is_formal_schema(document: &Value) -> bool {
    document.get("type").and_then(Value::as_str) == Some("object")
        && document.get("properties").is_some_and(Value::is_object)
}

/// Declared type of a schema object, plus whether a union includes null
fn declared_type<'a>(schema: &'a serde_json::Map<String, Value>) -> (&'a str, bool) {
    match schema.get("type") {
        Some(Value::String(name)) => (name.as_str(), false),
        Some(Value::Array(types)) => {
            let nullable = types.iter().any(|t| t.as_str() == Some("null"));
            let name = types
                .iter()
                .filter_map(Value::as_str)
                .find(|t| *t != "null")
                .unwrap_or("string");
            (name, nullable)
        }
        _ => ("", false),
    }
}

/// Convert one formal schema object into a schema node
///
/// Paths passed through are literal positions in the sample document
/// (`properties.customer.properties.full name`), so rejection messages point
/// at the exact offending text.
fn convert_formal(
    schema: &serde_json::Map<String, Value>,
    path: &str,
) -> Result<SchemaNode, SchemaInvalid> {
    let (declared, nullable) = declared_type(schema);
    // Omitted `type` with `properties` is an object per JSON Schema
    let type_name = if declared.is_empty() {
        if schema.get("properties").is_some_and(Value::is_object) {
            "object"
        } else {
            "string"
        }
    } else {
        declared
    };

    let node = match type_name {
        "object" => {
            let required: Vec<&str> = schema
                .get("required")
                .and_then(Value::as_array)
                .map(|names| names.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();

            let mut fields = Vec::new();
            if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
                let properties_path = join_key(path, "properties");
                for (name, property) in properties {
                    let property_path = join_key(&properties_path, name);
                    if contains_whitespace(name) {
                        return Err(SchemaInvalid::WhitespaceInName {
                            notation: Notation::Json,
                            kind: IdentifierKind::Key,
                            path: property_path,
                        });
                    }
                    let node = match property.as_object() {
                        Some(property) => convert_formal(property, &property_path)?,
                        None => SchemaNode::String { format: None },
                    };
                    fields.push(
                        Field::new(name.clone(), node)
                            .with_required(required.contains(&name.as_str())),
                    );
                }
            }
            SchemaNode::Object { fields }
        }
        "array" => {
            let items = match schema.get("items").and_then(Value::as_object) {
                Some(items) => convert_formal(items, &join_key(path, "items"))?,
                None => SchemaNode::String { format: None },
            };
            SchemaNode::Array {
                items: Box::new(items),
            }
        }
        "integer" => SchemaNode::Integer,
        "number" => SchemaNode::Number,
        "boolean" => SchemaNode::Boolean,
        // "string" and anything unrecognized
        _ => SchemaNode::String {
            format: schema
                .get("format")
                .and_then(Value::as_str)
                .and_then(StringFormat::from_json_schema_format),
        },
    };

    if nullable {
        Ok(SchemaNode::Nullable {
            inner: Box::new(node),
        })
    } else {
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_formal_schema() {
        let content = r#"{
            "type": "object",
            "properties": {
                "number": {"type": "string"},
                "issued": {"type": "string", "format": "date"},
                "total": {"type": ["number", "null"]},
                "lines": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {"qty": {"type": "integer"}},
                        "required": ["qty"]
                    }
                }
            },
            "required": ["number", "total"]
        }"#;
        let result = JSONImporter::new().convert(content).unwrap();

        let SchemaNode::Object { fields } = &result.schema else {
            panic!("expected object schema");
        };
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["number", "issued", "total", "lines"]);

        assert!(fields[0].required);
        assert!(!fields[1].required);
        assert_eq!(
            fields[1].node,
            SchemaNode::String {
                format: Some(StringFormat::Date)
            }
        );
        assert_eq!(
            fields[2].node,
            SchemaNode::Nullable {
                inner: Box::new(SchemaNode::Number)
            }
        );

        let SchemaNode::Array { items } = &fields[3].node else {
            panic!("expected array node for lines");
        };
        assert_eq!(items.field("qty").unwrap().node, SchemaNode::Integer);

        assert_eq!(result.metadata, ReconstructionMetadata::Json {});
    }

    #[test]
    fn test_convert_example_data() {
        let content = r#"{"name": "Acme", "founded": 1999, "active": true}"#;
        let result = JSONImporter::new().convert(content).unwrap();

        let SchemaNode::Object { fields } = &result.schema else {
            panic!("expected object schema");
        };
        assert_eq!(fields[1].node, SchemaNode::Integer);
        assert_eq!(fields[2].node, SchemaNode::Boolean);
        assert!(fields.iter().all(|f| f.required));
    }

    #[test]
    fn test_non_object_root_rejected() {
        let err = JSONImporter::new().convert("[1, 2]").unwrap_err();
        assert_eq!(
            err,
            SchemaInvalid::RootNotObject {
                notation: Notation::Json,
                found: "array",
            }
        );
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = JSONImporter::new().convert("{\"a\": ").unwrap_err();
        assert!(matches!(err, SchemaInvalid::Parse { .. }));
    }

    #[test]
    fn test_whitespace_property_name_rejected_with_document_path() {
        let content = r#"{
            "type": "object",
            "properties": {
                "customer": {
                    "type": "object",
                    "properties": {"full name": {"type": "string"}}
                }
            }
        }"#;
        let err = JSONImporter::new().convert(content).unwrap_err();
        assert_eq!(
            err,
            SchemaInvalid::WhitespaceInName {
                notation: Notation::Json,
                kind: IdentifierKind::Key,
                path: "properties.customer.properties.full name".to_string(),
            }
        );
    }

    #[test]
    fn test_whitespace_key_in_example_data_rejected() {
        let err = JSONImporter::new()
            .convert(r#"{"full name": "x"}"#)
            .unwrap_err();
        assert!(matches!(err, SchemaInvalid::WhitespaceInName { .. }));
    }

    #[test]
    fn test_omitted_type_with_properties_is_object() {
        let content = r#"{
            "type": "object",
            "properties": {
                "nested": {"properties": {"leaf": {"type": "integer"}}}
            }
        }"#;
        let result = JSONImporter::new().convert(content).unwrap();
        let nested = result.schema.field("nested").unwrap();
        assert_eq!(nested.node.field("leaf").unwrap().node, SchemaNode::Integer);
    }

    #[test]
    fn test_unknown_format_ignored() {
        let content = r#"{
            "type": "object",
            "properties": {"code": {"type": "string", "format": "hostname"}}
        }"#;
        let result = JSONImporter::new().convert(content).unwrap();
        assert_eq!(
            result.schema.field("code").unwrap().node,
            SchemaNode::String { format: None }
        );
    }
}
