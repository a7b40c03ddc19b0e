//! Plain-text importer
//!
//! Scans a markdown-style sample for ATX headings and converts each heading
//! into one required string field, keyed by the literal heading text. Body
//! lines between headings are ignored; heading levels are retained in the
//! metadata so the markdown skeleton can be reconstructed.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::import::{ConversionResult, IdentifierKind, SchemaInvalid};
use crate::models::{Field, HeadingMeta, Notation, ReconstructionMetadata, SchemaNode};
use crate::validation::contains_whitespace;

static HEADING_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6}) +(.+?)\s*$").unwrap());

/// Plain Text Importer
///
/// Converts heading-structured plain-text samples into the canonical schema
/// plus the ordered heading list needed for reconstruction.
#[derive(Debug, Default)]
pub struct TextImporter;

impl TextImporter {
    /// Create a new TextImporter
    pub fn new() -> Self {
        Self
    }

    /// Parse and validate a plain-text sample, returning its headings
    ///
    /// Rejects samples with no headings and samples whose first heading is
    /// not exactly level 1. Only the first heading's level is constrained:
    /// interior level jumps (level 1 directly to level 3) are accepted and
    /// logged as a warning, never rejected. Heading text becomes a property
    /// name, so it faces the same single-token and uniqueness rules as keys.
    ///
    /// # Arguments
    ///
    /// * `content` - The plain-text sample as a string.
    ///
    /// # Returns
    ///
    /// The headings in document order.
    pub fn validate(&self, content: &str) -> Result<Vec<HeadingMeta>, SchemaInvalid> {
        let mut headings = Vec::new();
        for line in content.lines() {
            let Some(caps) = HEADING_REGEX.captures(line) else {
                continue;
            };
            let level = caps[1].len() as u8;
            headings.push(HeadingMeta::new(level, &caps[2]));
        }

        let Some(first) = headings.first() else {
            return Err(SchemaInvalid::NoHeadings);
        };
        if first.level != 1 {
            return Err(SchemaInvalid::FirstHeadingNotRoot { found: first.level });
        }

        for (i, heading) in headings.iter().enumerate() {
            if contains_whitespace(&heading.text) {
                return Err(SchemaInvalid::WhitespaceInName {
                    notation: Notation::Text,
                    kind: IdentifierKind::Heading,
                    path: heading.text.clone(),
                });
            }
            if headings[..i].iter().any(|seen| seen.text == heading.text) {
                return Err(SchemaInvalid::DuplicateName {
                    notation: Notation::Text,
                    kind: IdentifierKind::Heading,
                    path: heading.text.clone(),
                });
            }
        }

        for pair in headings.windows(2) {
            if pair[1].level > pair[0].level + 1 {
                tracing::warn!(
                    from = pair[0].level,
                    to = pair[1].level,
                    heading = %pair[1].text,
                    "accepting heading level jump"
                );
            }
        }

        Ok(headings)
    }

    /// Convert a plain-text sample into the canonical schema
    ///
    /// One required string field per heading, keyed by the heading's literal
    /// text (not slugified), in document order.
    ///
    /// # Arguments
    ///
    /// * `content` - The plain-text sample as a string.
    ///
    /// # Returns
    ///
    /// The canonical schema and metadata recording the heading list.
    pub fn convert(&self, content: &str) -> Result<ConversionResult, SchemaInvalid> {
        let headings = self.validate(content)?;

        let fields = headings
            .iter()
            .map(|heading| {
                Field::new(heading.property.clone(), SchemaNode::String { format: None })
            })
            .collect();

        Ok(ConversionResult {
            schema: SchemaNode::Object { fields },
            metadata: ReconstructionMetadata::Text { headings },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_headings_to_flat_fields() {
        let content = "# Invoice\nsome body text\n## Number\n\n## Total\n";
        let result = TextImporter::new().convert(content).unwrap();

        let SchemaNode::Object { fields } = &result.schema else {
            panic!("expected object schema");
        };
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Invoice", "Number", "Total"]);
        assert!(fields
            .iter()
            .all(|f| f.required && f.node == SchemaNode::String { format: None }));

        match &result.metadata {
            ReconstructionMetadata::Text { headings } => {
                assert_eq!(headings.len(), 3);
                assert_eq!(headings[0].level, 1);
                assert_eq!(headings[1].level, 2);
                assert_eq!(headings[1].text, "Number");
            }
            other => panic!("expected text metadata, got {:?}", other),
        }
    }

    #[test]
    fn test_first_heading_must_be_level_one() {
        let err = TextImporter::new().convert("## Title\n").unwrap_err();
        assert_eq!(err, SchemaInvalid::FirstHeadingNotRoot { found: 2 });
    }

    #[test]
    fn test_interior_level_jump_accepted() {
        let content = "# Root\n### Deep\n";
        let result = TextImporter::new().convert(content).unwrap();
        assert!(result.schema.field("Deep").is_some());
    }

    #[test]
    fn test_no_headings_rejected() {
        let err = TextImporter::new()
            .convert("just prose\nno headings here\n")
            .unwrap_err();
        assert_eq!(err, SchemaInvalid::NoHeadings);
    }

    #[test]
    fn test_heading_with_space_rejected() {
        let err = TextImporter::new()
            .convert("# Invoice\n## Total Amount\n")
            .unwrap_err();
        assert_eq!(
            err,
            SchemaInvalid::WhitespaceInName {
                notation: Notation::Text,
                kind: IdentifierKind::Heading,
                path: "Total Amount".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_heading_rejected() {
        let err = TextImporter::new()
            .convert("# Total\n## Total\n")
            .unwrap_err();
        assert!(matches!(err, SchemaInvalid::DuplicateName { .. }));
    }

    #[test]
    fn test_heading_trailing_whitespace_trimmed() {
        let result = TextImporter::new().convert("# Invoice   \n").unwrap();
        assert!(result.schema.field("Invoice").is_some());
    }

    #[test]
    fn test_seven_hashes_is_not_a_heading() {
        let err = TextImporter::new().convert("####### Deep\n").unwrap_err();
        assert_eq!(err, SchemaInvalid::NoHeadings);
    }
}
