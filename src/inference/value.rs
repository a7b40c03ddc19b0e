//! Schema inference from concrete example values

use serde_json::Value;

use crate::inference::formats::detect_format;
use crate::models::{Field, SchemaNode};

/// Infer a schema node from a concrete example value
///
/// Conservative by construction: `null` becomes a plain `String` placeholder,
/// arrays are typed from their first element (`Array<String>` when empty),
/// and every object key becomes a required field in the object's own order.
///
/// # Arguments
/// * `value` - Example value from a parsed schema sample
///
/// # Returns
/// The inferred schema node
pub fn infer_node(value: &Value) -> SchemaNode {
    match value {
        Value::Null => SchemaNode::String { format: None },
        Value::Bool(_) => SchemaNode::Boolean,
        Value::Number(n) => {
            if is_integral(n) {
                SchemaNode::Integer
            } else {
                SchemaNode::Number
            }
        }
        Value::String(s) => SchemaNode::String {
            format: detect_format(s),
        },
        Value::Array(items) => match items.first() {
            Some(first) => SchemaNode::Array {
                items: Box::new(infer_node(first)),
            },
            None => SchemaNode::Array {
                items: Box::new(SchemaNode::String { format: None }),
            },
        },
        Value::Object(map) => SchemaNode::Object {
            fields: map
                .iter()
                .map(|(key, value)| Field::new(key.clone(), infer_node(value)))
                .collect(),
        },
    }
}

// Integral in the JS Number.isInteger sense: 2.0 counts as an integer.
fn is_integral(n: &serde_json::Number) -> bool {
    if n.is_i64() || n.is_u64() {
        return true;
    }
    n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StringFormat;
    use serde_json::json;

    #[test]
    fn test_infer_scalars() {
        assert_eq!(
            infer_node(&json!(null)),
            SchemaNode::String { format: None }
        );
        assert_eq!(infer_node(&json!(true)), SchemaNode::Boolean);
        assert_eq!(infer_node(&json!(42)), SchemaNode::Integer);
        assert_eq!(infer_node(&json!(2.0)), SchemaNode::Integer);
        assert_eq!(infer_node(&json!(2.5)), SchemaNode::Number);
        assert_eq!(
            infer_node(&json!("hello")),
            SchemaNode::String { format: None }
        );
    }

    #[test]
    fn test_infer_string_formats() {
        assert_eq!(
            infer_node(&json!("2024-06-01")),
            SchemaNode::String {
                format: Some(StringFormat::Date)
            }
        );
        assert_eq!(
            infer_node(&json!("billing@example.com")),
            SchemaNode::String {
                format: Some(StringFormat::Email)
            }
        );
    }

    #[test]
    fn test_infer_array_from_first_element() {
        assert_eq!(
            infer_node(&json!([1, 2, 3])),
            SchemaNode::Array {
                items: Box::new(SchemaNode::Integer)
            }
        );
        assert_eq!(
            infer_node(&json!([])),
            SchemaNode::Array {
                items: Box::new(SchemaNode::String { format: None })
            }
        );
    }

    #[test]
    fn test_infer_object_keeps_key_order() {
        let node = infer_node(&json!({"zeta": 1, "alpha": "x", "mid": false}));
        match node {
            SchemaNode::Object { fields } => {
                let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
                assert_eq!(names, ["zeta", "alpha", "mid"]);
                assert!(fields.iter().all(|f| f.required));
                assert_eq!(fields[0].node, SchemaNode::Integer);
                assert_eq!(fields[2].node, SchemaNode::Boolean);
            }
            other => panic!("expected object, got {}", other.kind_name()),
        }
    }

    #[test]
    fn test_infer_nested_structures() {
        let node = infer_node(&json!({"items": [{"qty": 3, "label": "ash"}]}));
        let items_field = node.field("items").unwrap();
        match &items_field.node {
            SchemaNode::Array { items } => match items.as_ref() {
                SchemaNode::Object { fields } => {
                    assert_eq!(fields[0].name, "qty");
                    assert_eq!(fields[0].node, SchemaNode::Integer);
                }
                other => panic!("expected object items, got {}", other.kind_name()),
            },
            other => panic!("expected array, got {}", other.kind_name()),
        }
    }
}
