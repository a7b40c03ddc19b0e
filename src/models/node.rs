//! Canonical type schema shared by every notation
//!
//! Each forward conversion produces one [`SchemaNode`] tree; the tree is
//! immutable afterwards and is consumed by the structured-output call and by
//! the backward reconstruction of its manifest. Field order inside object
//! nodes is significant and drives reconstruction.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Detected sub-format of a string node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StringFormat {
    /// ISO 8601 date-time (YYYY-MM-DDTHH:MM:SS, optional zone)
    DateTime,
    /// ISO 8601 date (YYYY-MM-DD)
    Date,
    /// Email address
    Email,
    /// Absolute http(s) URI
    Uri,
    /// UUID, v4-shaped
    Uuid,
}

impl StringFormat {
    /// Get the JSON Schema format string for this format
    pub fn as_json_schema_format(&self) -> &'static str {
        match self {
            StringFormat::DateTime => "date-time",
            StringFormat::Date => "date",
            StringFormat::Email => "email",
            StringFormat::Uri => "uri",
            StringFormat::Uuid => "uuid",
        }
    }

    /// Parse a JSON Schema format string; unknown formats map to `None`
    pub fn from_json_schema_format(format: &str) -> Option<Self> {
        match format {
            "date-time" => Some(StringFormat::DateTime),
            "date" => Some(StringFormat::Date),
            "email" => Some(StringFormat::Email),
            "uri" => Some(StringFormat::Uri),
            "uuid" => Some(StringFormat::Uuid),
            _ => None,
        }
    }
}

impl std::fmt::Display for StringFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_json_schema_format())
    }
}

/// A node of the canonical type schema
///
/// Closed union: every converter and reconstructor matches exhaustively over
/// it, so adding a variant is a compile-time event for all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SchemaNode {
    /// String, optionally refined by a detected sub-format
    String { format: Option<StringFormat> },
    /// Whole number
    Integer,
    /// Floating point number
    Number,
    /// Boolean
    Boolean,
    /// Homogeneous array
    Array { items: Box<SchemaNode> },
    /// Object with ordered fields
    Object { fields: Vec<Field> },
    /// Value that may also be null; produced only by formal JSON-Schema
    /// samples with a `"type": [T, "null"]` union
    Nullable { inner: Box<SchemaNode> },
}

/// A named field of an object node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name, unique within its object node
    pub name: String,
    /// Field schema
    pub node: SchemaNode,
    /// Whether the field must be present in the canonical output
    pub required: bool,
}

impl Field {
    /// Create a new required field
    pub fn new(name: impl Into<String>, node: SchemaNode) -> Self {
        Self {
            name: name.into(),
            node,
            required: true,
        }
    }

    /// Mark this field as optional
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

impl SchemaNode {
    /// Short kind name for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            SchemaNode::String { .. } => "string",
            SchemaNode::Integer => "integer",
            SchemaNode::Number => "number",
            SchemaNode::Boolean => "boolean",
            SchemaNode::Array { .. } => "array",
            SchemaNode::Object { .. } => "object",
            SchemaNode::Nullable { .. } => "nullable",
        }
    }

    /// Look up a field of an object node by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        match self {
            SchemaNode::Object { fields } => fields.iter().find(|f| f.name == name),
            _ => None,
        }
    }

    /// Derive the canonical JSON-Schema-shaped object handed to the
    /// structured-output call
    ///
    /// Emits `type`, ordered `properties`, `required` and
    /// `additionalProperties: false` recursively, plus `format` on refined
    /// strings. The external model is expected to honor this schema exactly.
    pub fn to_json_schema(&self) -> Value {
        match self {
            SchemaNode::String { format } => {
                let mut schema = json!({"type": "string"});
                if let Some(fmt) = format {
                    schema["format"] = json!(fmt.as_json_schema_format());
                }
                schema
            }
            SchemaNode::Integer => json!({"type": "integer"}),
            SchemaNode::Number => json!({"type": "number"}),
            SchemaNode::Boolean => json!({"type": "boolean"}),
            SchemaNode::Array { items } => {
                json!({"type": "array", "items": items.to_json_schema()})
            }
            SchemaNode::Object { fields } => {
                let mut properties = Map::new();
                let mut required = Vec::new();
                for field in fields {
                    properties.insert(field.name.clone(), field.node.to_json_schema());
                    if field.required {
                        required.push(Value::String(field.name.clone()));
                    }
                }
                json!({
                    "type": "object",
                    "properties": Value::Object(properties),
                    "required": Value::Array(required),
                    "additionalProperties": false,
                })
            }
            SchemaNode::Nullable { inner } => {
                let mut schema = inner.to_json_schema();
                match schema.get("type").and_then(Value::as_str) {
                    Some(type_name) => {
                        let union = json!([type_name, "null"]);
                        schema["type"] = union;
                        schema
                    }
                    None => json!({"anyOf": [schema, {"type": "null"}]}),
                }
            }
        }
    }
}
