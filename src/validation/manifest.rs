//! Canonical-manifest validation helpers
//!
//! Checks a canonical JSON manifest (the structured output produced for a
//! sample) against the schema derived from that sample, before it is handed
//! to a backward reconstruction. This module is gated by the
//! `schema-validation` feature; without it the check is a no-op.

use crate::models::SchemaNode;

/// Format validation error with path information
#[cfg(feature = "schema-validation")]
fn format_validation_error(error: &jsonschema::ValidationError) -> String {
    // Extract instance path (JSON path where error occurred)
    let path_str = error.instance_path().to_string();
    let path_str = if path_str == "/" || path_str.is_empty() {
        "root".to_string()
    } else {
        path_str
    };

    format!("manifest validation failed at path '{}': {}", path_str, error)
}

/// Validate a canonical manifest against the schema derived from its sample
///
/// Returns a string error naming the failing path, for use by callers that
/// want to reject a manifest before attempting reconstruction.
#[cfg(feature = "schema-validation")]
pub fn validate_manifest(schema: &SchemaNode, manifest: &serde_json::Value) -> Result<(), String> {
    use jsonschema::Validator;

    let schema_json = schema.to_json_schema();
    let validator = Validator::new(&schema_json)
        .map_err(|e| format!("Failed to compile derived schema: {}", e))?;

    if let Err(error) = validator.validate(manifest) {
        return Err(format_validation_error(&error));
    }

    Ok(())
}

#[cfg(not(feature = "schema-validation"))]
pub fn validate_manifest(
    _schema: &SchemaNode,
    _manifest: &serde_json::Value,
) -> Result<(), String> {
    // Validation disabled - feature not enabled
    Ok(())
}
