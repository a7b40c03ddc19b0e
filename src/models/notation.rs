//! Notation and delimiter enums shared across importers and exporters

use serde::{Deserialize, Serialize};

/// Textual notation of a schema sample or reconstructed manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    /// JSON, either a JSON-Schema-shaped object or example data
    Json,
    /// YAML mapping, either field definitions or example data
    Yaml,
    /// XML document
    Xml,
    /// Delimiter-separated values with a header row
    Csv,
    /// Plain text structured by markdown ATX headings
    Text,
}

impl Notation {
    /// Get the HTTP content type used when delivering a manifest in this notation
    ///
    /// Used by the HTTP layer to set response headers; the engine itself never
    /// inspects content types.
    pub fn content_type(&self) -> &'static str {
        match self {
            Notation::Json => "application/json",
            Notation::Yaml => "application/x-yaml",
            Notation::Xml => "application/xml",
            Notation::Csv => "text/csv",
            Notation::Text => "text/plain",
        }
    }
}

impl std::fmt::Display for Notation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notation::Json => write!(f, "JSON"),
            Notation::Yaml => write!(f, "YAML"),
            Notation::Xml => write!(f, "XML"),
            Notation::Csv => write!(f, "CSV"),
            Notation::Text => write!(f, "plain-text"),
        }
    }
}

/// Column delimiter accepted for CSV schema samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvDelimiter {
    #[default]
    Comma,
    Semicolon,
}

impl CsvDelimiter {
    /// The delimiter as a character, for splitting and joining rows
    pub fn as_char(&self) -> char {
        match self {
            CsvDelimiter::Comma => ',',
            CsvDelimiter::Semicolon => ';',
        }
    }
}

impl std::fmt::Display for CsvDelimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CsvDelimiter::Comma => write!(f, "comma"),
            CsvDelimiter::Semicolon => write!(f, "semicolon"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_mapping() {
        assert_eq!(Notation::Json.content_type(), "application/json");
        assert_eq!(Notation::Yaml.content_type(), "application/x-yaml");
        assert_eq!(Notation::Xml.content_type(), "application/xml");
        assert_eq!(Notation::Csv.content_type(), "text/csv");
        assert_eq!(Notation::Text.content_type(), "text/plain");
    }

    #[test]
    fn test_notation_serde_round_trip() {
        let json = serde_json::to_string(&Notation::Text).unwrap();
        assert_eq!(json, "\"text\"");
        let back: Notation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Notation::Text);
    }

    #[test]
    fn test_delimiter_default_is_comma() {
        assert_eq!(CsvDelimiter::default().as_char(), ',');
        assert_eq!(CsvDelimiter::Semicolon.as_char(), ';');
    }
}
