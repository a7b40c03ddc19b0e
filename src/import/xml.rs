//! XML importer
//!
//! Event-parses an XML schema sample into an element tree, validates element
//! and attribute names, and converts the tree into the canonical schema.
//! Repeated same-named siblings become arrays; leaf elements are strings.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::import::{
    ConversionResult, IdentifierKind, MAX_NESTING_DEPTH, SchemaInvalid,
};
use crate::models::{Field, Notation, ReconstructionMetadata, SchemaNode};
use crate::validation::{contains_whitespace, join_key};

/// Parser-internal element tree node
#[derive(Debug)]
struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
}

/// Parser-internal document: root element plus declaration facts
#[derive(Debug)]
struct ParsedDocument {
    root: XmlElement,
    version: String,
    encoding: Option<String>,
}

/// XML Importer
///
/// Converts XML schema samples into the canonical schema plus XML
/// reconstruction metadata (root tag, declaration, namespaces).
#[derive(Debug, Default)]
pub struct XMLImporter;

impl XMLImporter {
    /// Create a new XMLImporter
    pub fn new() -> Self {
        Self
    }

    /// Validate an XML sample
    ///
    /// Checks well-formedness (mismatched or unclosed tags are rejected) and
    /// that no element or attribute name contains whitespace.
    ///
    /// # Arguments
    ///
    /// * `content` - The XML sample as a string.
    ///
    /// # Returns
    ///
    /// A `Result` indicating whether validation succeeded.
    pub fn validate(&self, content: &str) -> Result<(), SchemaInvalid> {
        let document = parse_document(content)?;
        validate_names(&document.root, "")
    }

    /// Convert an XML sample into the canonical schema
    ///
    /// The document root becomes a single required top-level field named
    /// after the root tag. More than one same-named sibling yields an array
    /// typed from the first representative; leaves are strings whether or
    /// not they carry text.
    ///
    /// # Arguments
    ///
    /// * `content` - The XML sample as a string.
    ///
    /// # Returns
    ///
    /// The canonical schema and metadata recording the root tag, declared
    /// version/encoding, and `xmlns*` attributes of the root.
    pub fn convert(&self, content: &str) -> Result<ConversionResult, SchemaInvalid> {
        let document = parse_document(content)?;
        validate_names(&document.root, "")?;

        let namespaces: Vec<(String, String)> = document
            .root
            .attributes
            .iter()
            .filter(|(name, _)| name.starts_with("xmlns"))
            .cloned()
            .collect();

        let schema = SchemaNode::Object {
            fields: vec![Field::new(
                document.root.name.clone(),
                convert_element(&document.root),
            )],
        };

        let metadata = ReconstructionMetadata::Xml {
            root: document.root.name,
            version: document.version,
            encoding: document.encoding,
            namespaces,
        };

        Ok(ConversionResult { schema, metadata })
    }
}

fn parse_error(message: String) -> SchemaInvalid {
    SchemaInvalid::Parse {
        notation: Notation::Xml,
        message,
    }
}

/// Build the element tree from the event stream
fn parse_document(content: &str) -> Result<ParsedDocument, SchemaInvalid> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut version = String::from("1.0");
    let mut encoding: Option<String> = None;
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Decl(decl)) => {
                if let Ok(v) = decl.version() {
                    version = String::from_utf8_lossy(&v).to_string();
                }
                if let Some(Ok(enc)) = decl.encoding() {
                    encoding = Some(String::from_utf8_lossy(&enc).to_string());
                }
            }
            Ok(Event::Start(ref e)) => {
                if stack.len() >= MAX_NESTING_DEPTH {
                    return Err(parse_error(format!(
                        "element nesting exceeds {MAX_NESTING_DEPTH} levels"
                    )));
                }
                stack.push(element_from_start(e)?);
            }
            Ok(Event::Empty(ref e)) => {
                let element = element_from_start(e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                // The reader verifies end-tag names itself; an empty stack
                // here means a closing tag with no opening counterpart.
                let element = stack
                    .pop()
                    .ok_or_else(|| parse_error("unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Eof) => {
                if let Some(open) = stack.last() {
                    return Err(parse_error(format!("unclosed element <{}>", open.name)));
                }
                break;
            }
            Ok(_) => {}
            Err(e) => {
                return Err(parse_error(format!(
                    "error at position {}: {}",
                    reader.error_position(),
                    e
                )));
            }
        }
    }

    let root = root.ok_or_else(|| parse_error("no root element found".to_string()))?;
    Ok(ParsedDocument {
        root,
        version,
        encoding,
    })
}

fn element_from_start(e: &BytesStart) -> Result<XmlElement, SchemaInvalid> {
    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr
            .map_err(|err| parse_error(format!("malformed attribute in <{name}>: {err}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = String::from_utf8_lossy(&attr.value).to_string();
        attributes.push((key, value));
    }
    Ok(XmlElement {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn attach(
    stack: &mut Vec<XmlElement>,
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), SchemaInvalid> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None => {
            if root.is_some() {
                return Err(parse_error("multiple root elements".to_string()));
            }
            *root = Some(element);
            Ok(())
        }
    }
}

/// Reject element and attribute names containing whitespace, with paths
fn validate_names(element: &XmlElement, path: &str) -> Result<(), SchemaInvalid> {
    let elem_path = join_key(path, &element.name);
    if contains_whitespace(&element.name) {
        return Err(SchemaInvalid::WhitespaceInName {
            notation: Notation::Xml,
            kind: IdentifierKind::Element,
            path: elem_path,
        });
    }
    for (attr_name, _) in &element.attributes {
        if contains_whitespace(attr_name) {
            return Err(SchemaInvalid::WhitespaceInName {
                notation: Notation::Xml,
                kind: IdentifierKind::Attribute,
                path: join_key(&elem_path, attr_name),
            });
        }
    }
    for child in &element.children {
        validate_names(child, &elem_path)?;
    }
    Ok(())
}

/// Convert one element into a schema node
///
/// Children are grouped by name in first-occurrence order; a group of more
/// than one sibling becomes an array typed from its first member.
fn convert_element(element: &XmlElement) -> SchemaNode {
    if element.children.is_empty() {
        return SchemaNode::String { format: None };
    }

    let mut groups: Vec<(&str, Vec<&XmlElement>)> = Vec::new();
    for child in &element.children {
        match groups.iter_mut().find(|(name, _)| *name == child.name) {
            Some((_, members)) => members.push(child),
            None => groups.push((child.name.as_str(), vec![child])),
        }
    }

    let fields = groups
        .into_iter()
        .map(|(name, members)| {
            let node = if members.len() > 1 {
                SchemaNode::Array {
                    items: Box::new(convert_element(members[0])),
                }
            } else {
                convert_element(members[0])
            };
            Field::new(name, node)
        })
        .collect();

    SchemaNode::Object { fields }
}
