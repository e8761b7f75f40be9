//! Owned XML document tree.
//!
//! A small, lossless model of a rich-text document: enough structure to find
//! link elements by namespace and rewrite their attributes, while writing
//! everything else back byte-for-byte.
//!
//! # Representation
//!
//! | Node | Stored as |
//! |------|-----------|
//! | `Element` | qualified name, resolved namespace, attributes, children |
//! | `Text` | escaped source text (entity references kept verbatim) |
//! | `CData` / `Comment` / `Pi` / `Decl` / `DocType` | raw content |
//!
//! Attribute values are stored unescaped and escaped again on write.

mod parse;
mod write;

use std::str::FromStr;

use thiserror::Error;

/// The `xml:` prefix is bound by definition.
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

// ============================================================================
// Errors
// ============================================================================

/// Errors raised while reading or writing a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("XML parse error at position {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("XML write error: {0}")]
    Write(#[from] quick_xml::Error),

    #[error("I/O error while writing XML: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid escape sequence: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("invalid UTF-8 in document: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("unbalanced document: {0}")]
    Unbalanced(String),
}

// ============================================================================
// Tree Types
// ============================================================================

/// A parsed document: top-level nodes in source order, exactly one of which
/// is the root element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub children: Vec<Node>,
}

/// Any node that can appear in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
    Pi(String),
    Decl(String),
    DocType(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified name as written (`prefix:local` or `local`).
    pub name: String,
    /// Namespace URI the name resolves to, if any.
    pub namespace: Option<String>,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified name as written.
    pub name: String,
    /// Namespace URI for prefixed attributes; unprefixed attributes have none.
    pub namespace: Option<String>,
    /// Unescaped value.
    pub value: String,
}

/// Child-index path from the document to an element.
///
/// The first index addresses `Document::children`, every following index
/// addresses `Element::children` of the previous step.
pub type NodePath = Vec<usize>;

// ============================================================================
// Element
// ============================================================================

/// Split `prefix:local` into its parts.
pub(crate) fn split_qname(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    }
}

impl Element {
    pub fn new(name: impl Into<String>, namespace: Option<&str>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.map(str::to_string),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Local part of the qualified name.
    #[inline]
    pub fn local_name(&self) -> &str {
        split_qname(&self.name).1
    }

    /// Check namespace and local name together.
    #[inline]
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local_name() == local
    }

    /// Attribute value by qualified name as written.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Attribute value by namespace and local name, whatever prefix is in use.
    pub fn get_attr_ns(&self, namespace: &str, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.as_deref() == Some(namespace) && split_qname(&a.name).1 == local)
            .map(|a| a.value.as_str())
    }

    /// Set an unprefixed attribute, replacing an existing one in place.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                namespace: None,
                value,
            }),
        }
    }

    /// Set a namespaced attribute.
    ///
    /// An existing attribute with the same namespace and local name keeps its
    /// prefix and position; otherwise `qname` is appended as given and the
    /// caller is responsible for the prefix being declared.
    pub fn set_attr_ns(&mut self, namespace: &str, qname: &str, value: impl Into<String>) {
        let value = value.into();
        let local = split_qname(qname).1;
        let existing = self.attributes.iter_mut().find(|a| {
            a.namespace.as_deref() == Some(namespace) && split_qname(&a.name).1 == local
        });
        match existing {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute {
                name: qname.to_string(),
                namespace: Some(namespace.to_string()),
                value,
            }),
        }
    }

    /// Child elements, skipping text and other nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }
}

// ============================================================================
// Document
// ============================================================================

impl Document {
    /// Parse a document from an XML string.
    pub fn parse(xml: &str) -> Result<Self, DocumentError> {
        parse::parse(xml)
    }

    /// Serialize the document back to XML.
    pub fn to_xml(&self) -> Result<String, DocumentError> {
        write::write(self)
    }

    /// The root element, if the document has one.
    pub fn root(&self) -> Option<&Element> {
        self.children.iter().find_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// All elements in document order (pre-order), paired with their path.
    pub fn elements(&self) -> Elements<'_> {
        let mut stack = Vec::new();
        push_children(&mut stack, &[], &self.children);
        Elements { stack }
    }

    pub fn element_at(&self, path: &[usize]) -> Option<&Element> {
        let (first, rest) = path.split_first()?;
        let mut current = match self.children.get(*first)? {
            Node::Element(e) => e,
            _ => return None,
        };
        for index in rest {
            current = match current.children.get(*index)? {
                Node::Element(e) => e,
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn element_at_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        let (first, rest) = path.split_first()?;
        let mut current = match self.children.get_mut(*first)? {
            Node::Element(e) => e,
            _ => return None,
        };
        for index in rest {
            current = match current.children.get_mut(*index)? {
                Node::Element(e) => e,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl FromStr for Document {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Pre-order element iterator returned by [`Document::elements`].
pub struct Elements<'a> {
    stack: Vec<(NodePath, &'a Element)>,
}

fn push_children<'a>(stack: &mut Vec<(NodePath, &'a Element)>, base: &[usize], nodes: &'a [Node]) {
    // Reverse so the first child is popped first
    for (index, node) in nodes.iter().enumerate().rev() {
        if let Node::Element(e) = node {
            let mut path = base.to_vec();
            path.push(index);
            stack.push((path, e));
        }
    }
}

impl<'a> Iterator for Elements<'a> {
    type Item = (NodePath, &'a Element);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, elem) = self.stack.pop()?;
        push_children(&mut self.stack, &path, &elem.children);
        Some((path, elem))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<section xmlns="http://docbook.org/ns/docbook" xmlns:xlink="http://www.w3.org/1999/xlink"><para>a<link xlink:href="x"/>b</para><para><emphasis>c</emphasis></para></section>"#;

    #[test]
    fn test_elements_document_order() {
        let doc = Document::parse(SAMPLE).unwrap();
        let names: Vec<_> = doc.elements().map(|(_, e)| e.local_name().to_string()).collect();
        assert_eq!(names, ["section", "para", "link", "para", "emphasis"]);
    }

    #[test]
    fn test_element_at_follows_path() {
        let doc = Document::parse(SAMPLE).unwrap();
        let (path, _) = doc
            .elements()
            .find(|(_, e)| e.local_name() == "link")
            .unwrap();
        assert_eq!(path, vec![0, 0, 1]);
        assert_eq!(doc.element_at(&path).unwrap().name, "link");
        assert!(doc.element_at(&[0, 0, 0]).is_none(), "text node is not an element");
        assert!(doc.element_at(&[]).is_none());
    }

    #[test]
    fn test_get_attr_ns_ignores_prefix() {
        let xml = r#"<a xmlns:x="urn:one" xmlns:y="urn:one" y:href="v"/>"#;
        let doc = Document::parse(xml).unwrap();
        let root = doc.root().unwrap();
        assert_eq!(root.get_attr_ns("urn:one", "href"), Some("v"));
        assert_eq!(root.get_attr("y:href"), Some("v"));
        assert_eq!(root.get_attr_ns("urn:two", "href"), None);
    }

    #[test]
    fn test_set_attr_ns_replaces_in_place() {
        let doc = Document::parse(SAMPLE).unwrap();
        let mut doc2 = doc.clone();
        let path = vec![0, 0, 1];
        let link = doc2.element_at_mut(&path).unwrap();
        link.set_attr_ns("http://www.w3.org/1999/xlink", "xlink:href", "https://a/");
        assert_eq!(link.attributes.len(), 1);
        assert_eq!(link.get_attr("xlink:href"), Some("https://a/"));
        // Original untouched
        assert_eq!(doc.element_at(&path).unwrap().get_attr("xlink:href"), Some("x"));
    }

    #[test]
    fn test_set_attr_appends_new() {
        let mut elem = Element::new("embedlink", None);
        elem.set_attr("href_resolved", "#");
        elem.set_attr("href_resolved", "/a");
        assert_eq!(elem.attributes.len(), 1);
        assert_eq!(elem.get_attr("href_resolved"), Some("/a"));
    }

    #[test]
    fn test_split_qname() {
        assert_eq!(split_qname("xlink:href"), (Some("xlink"), "href"));
        assert_eq!(split_qname("href"), (None, "href"));
    }
}
