//! YAML importer
//!
//! Parses a YAML schema sample into the canonical schema. Samples come in two
//! flavors, which may be mixed per top-level key: plain example data, whose
//! types are inferred from the values, and field-definition lists using the
//! `FieldName`/`Type`/`Items` convention, whose types are declared.

use serde_json::Value;
use serde_yaml::Value as YamlValue;

use crate::import::{
    ConversionResult, IdentifierKind, SchemaInvalid, validate_object_keys,
};
use crate::inference::infer_node;
use crate::models::{
    DEFAULT_YAML_INDENT, Field, Notation, ReconstructionMetadata, SchemaNode,
};
use crate::validation::{contains_whitespace, join_index, join_key};

/// YAML Importer
///
/// Converts YAML schema samples (example data or field-definition lists)
/// into the canonical schema plus YAML reconstruction metadata.
#[derive(Debug, Default)]
pub struct YAMLImporter;

impl YAMLImporter {
    /// Create a new YAMLImporter
    pub fn new() -> Self {
        Self
    }

    /// Parse and validate a YAML sample
    ///
    /// Checks that the root is a mapping, that every mapping key is a string,
    /// and that no key at any depth contains whitespace. Returns the sample
    /// as an order-preserving JSON value.
    ///
    /// # Arguments
    ///
    /// * `content` - The YAML sample as a string.
    ///
    /// # Returns
    ///
    /// The validated document, or `SchemaInvalid` naming the offending key.
    pub fn validate(&self, content: &str) -> Result<Value, SchemaInvalid> {
        let parsed: YamlValue =
            serde_yaml::from_str(content).map_err(|e| SchemaInvalid::Parse {
                notation: Notation::Yaml,
                message: e.to_string(),
            })?;

        if !parsed.is_mapping() {
            return Err(SchemaInvalid::RootNotObject {
                notation: Notation::Yaml,
                found: yaml_kind(&parsed),
            });
        }

        let document = yaml_to_json(&parsed, "")?;
        validate_object_keys(&document, Notation::Yaml)?;
        Ok(document)
    }

    /// Convert a YAML sample into the canonical schema
    ///
    /// Top-level keys whose value is an array starting with a
    /// `FieldName`-carrying object are treated as field-definition lists;
    /// every other value is inferred. All top-level keys are required.
    ///
    /// # Arguments
    ///
    /// * `content` - The YAML sample as a string.
    ///
    /// # Returns
    ///
    /// The canonical schema and metadata recording the detected indent width
    /// and, when the definition convention was used, the original structure.
    pub fn convert(&self, content: &str) -> Result<ConversionResult, SchemaInvalid> {
        let document = self.validate(content)?;
        let Value::Object(map) = &document else {
            return Err(SchemaInvalid::RootNotObject {
                notation: Notation::Yaml,
                found: "non-mapping",
            });
        };

        let indent = detect_indent_width(content);
        let mut fields = Vec::with_capacity(map.len());
        let mut used_definition = false;

        for (key, value) in map {
            let node = if is_definition_list(value) {
                used_definition = true;
                let entries = value.as_array().map(Vec::as_slice).unwrap_or(&[]);
                convert_definition_list(key, entries)?
            } else {
                infer_node(value)
            };
            fields.push(Field::new(key.clone(), node));
        }

        let metadata = ReconstructionMetadata::Yaml {
            indent,
            definition: used_definition.then(|| document.clone()),
        };

        Ok(ConversionResult {
            schema: SchemaNode::Object { fields },
            metadata,
        })
    }
}

/// Detect the indent width from the first indented line, defaulting to 2
fn detect_indent_width(content: &str) -> usize {
    for line in content.lines() {
        let rest = line.trim_start_matches(' ');
        if rest.is_empty() || rest.len() == line.len() {
            continue;
        }
        let width = line.len() - rest.len();
        tracing::debug!(width, "detected YAML indent width");
        return width;
    }
    DEFAULT_YAML_INDENT
}

/// Whether a value is a field-definition list (`FieldName` in first entry)
fn is_definition_list(value: &Value) -> bool {
    value
        .as_array()
        .and_then(|entries| entries.first())
        .and_then(Value::as_object)
        .is_some_and(|entry| entry.contains_key("FieldName"))
}

/// Map a declared type name (already lowercased) to a schema node
///
/// Unknown names fall back to string, the declared default.
fn node_for_type_name(name: &str) -> SchemaNode {
    match name {
        "int" | "integer" => SchemaNode::Integer,
        "number" | "float" => SchemaNode::Number,
        "bool" | "boolean" => SchemaNode::Boolean,
        "list" | "array" => SchemaNode::Array {
            items: Box::new(SchemaNode::String { format: None }),
        },
        _ => SchemaNode::String { format: None },
    }
}

fn declared_type(entry: &serde_json::Map<String, Value>) -> String {
    entry
        .get("Type")
        .and_then(Value::as_str)
        .unwrap_or("string")
        .to_lowercase()
}

/// Convert one field-definition list into an object node
fn convert_definition_list(
    key_path: &str,
    entries: &[Value],
) -> Result<SchemaNode, SchemaInvalid> {
    let mut fields: Vec<Field> = Vec::new();

    for (i, entry) in entries.iter().enumerate() {
        let Some(obj) = entry.as_object() else {
            tracing::warn!(entry = i, key = key_path, "skipping non-mapping field definition");
            continue;
        };
        let Some(name) = obj.get("FieldName").and_then(Value::as_str) else {
            tracing::warn!(entry = i, key = key_path, "skipping definition without FieldName");
            continue;
        };

        check_field_name(&join_index(key_path, i), name, &fields)?;

        let type_name = declared_type(obj);
        let node = if matches!(type_name.as_str(), "list" | "array") {
            match obj.get("Items").and_then(Value::as_array) {
                Some(items) if !items.is_empty() => SchemaNode::Array {
                    items: Box::new(convert_item_hints(&join_key(key_path, name), items)?),
                },
                _ => SchemaNode::Array {
                    items: Box::new(SchemaNode::String { format: None }),
                },
            }
        } else {
            node_for_type_name(&type_name)
        };

        fields.push(Field::new(name, node));
    }

    Ok(SchemaNode::Object { fields })
}

/// Convert `Items` per-column hints into the row object node
///
/// Hints accept either the nested `FieldName`/`Type` convention or the
/// single-pair `{column: typename}` shorthand. When every hint is unusable,
/// the caller's `Array<String>` fallback applies.
fn convert_item_hints(key_path: &str, items: &[Value]) -> Result<SchemaNode, SchemaInvalid> {
    let mut fields: Vec<Field> = Vec::new();

    for (i, hint) in items.iter().enumerate() {
        let Some(obj) = hint.as_object() else {
            tracing::warn!(hint = i, key = key_path, "skipping non-mapping item hint");
            continue;
        };

        if let Some(name) = obj.get("FieldName").and_then(Value::as_str) {
            check_field_name(&join_index(key_path, i), name, &fields)?;
            fields.push(Field::new(name, node_for_type_name(&declared_type(obj))));
        } else {
            for (column, type_value) in obj {
                check_field_name(&join_index(key_path, i), column, &fields)?;
                let type_name = type_value.as_str().unwrap_or("string").to_lowercase();
                fields.push(Field::new(column.clone(), node_for_type_name(&type_name)));
            }
        }
    }

    if fields.is_empty() {
        return Ok(SchemaNode::String { format: None });
    }
    Ok(SchemaNode::Object { fields })
}

// Declared field names become schema properties, so they face the same
// single-token and uniqueness rules as literal keys.
fn check_field_name(entry_path: &str, name: &str, seen: &[Field]) -> Result<(), SchemaInvalid> {
    if contains_whitespace(name) {
        return Err(SchemaInvalid::WhitespaceInName {
            notation: Notation::Yaml,
            kind: IdentifierKind::Key,
            path: join_key(entry_path, name),
        });
    }
    if seen.iter().any(|f| f.name == name) {
        return Err(SchemaInvalid::DuplicateName {
            notation: Notation::Yaml,
            kind: IdentifierKind::Key,
            path: join_key(entry_path, name),
        });
    }
    Ok(())
}

fn yaml_kind(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "boolean",
        YamlValue::Number(_) => "number",
        YamlValue::String(_) => "string",
        YamlValue::Sequence(_) => "sequence",
        YamlValue::Mapping(_) => "mapping",
        YamlValue::Tagged(_) => "tagged value",
    }
}

/// Convert a YAML value to an order-preserving JSON value
///
/// Rejects non-string mapping keys with the path of the enclosing mapping.
/// Non-finite numbers (`.nan`, `.inf`) have no JSON form and collapse to
/// null, which the inference layer treats as a plain string.
fn yaml_to_json(value: &YamlValue, path: &str) -> Result<Value, SchemaInvalid> {
    match value {
        YamlValue::Null => Ok(Value::Null),
        YamlValue::Bool(b) => Ok(Value::Bool(*b)),
        YamlValue::Number(n) => Ok(convert_number(n)),
        YamlValue::String(s) => Ok(Value::String(s.clone())),
        YamlValue::Sequence(seq) => {
            let mut items = Vec::with_capacity(seq.len());
            for (i, item) in seq.iter().enumerate() {
                items.push(yaml_to_json(item, &join_index(path, i))?);
            }
            Ok(Value::Array(items))
        }
        YamlValue::Mapping(map) => {
            let mut out = serde_json::Map::new();
            for (key, child) in map {
                let YamlValue::String(key) = key else {
                    return Err(SchemaInvalid::NonStringKey {
                        notation: Notation::Yaml,
                        path: if path.is_empty() {
                            "document root".to_string()
                        } else {
                            path.to_string()
                        },
                    });
                };
                let child_path = join_key(path, key);
                out.insert(key.clone(), yaml_to_json(child, &child_path)?);
            }
            Ok(Value::Object(out))
        }
        YamlValue::Tagged(tagged) => yaml_to_json(&tagged.value, path),
    }
}

fn convert_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::from(i)
    } else if let Some(u) = n.as_u64() {
        Value::from(u)
    } else {
        match n.as_f64().and_then(serde_json::Number::from_f64) {
            Some(number) => Value::Number(number),
            None => Value::Null,
        }
    }
}
