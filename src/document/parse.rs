//! XML → [`Document`] using `quick-xml` namespace-aware events.

use quick_xml::{
    NsReader,
    events::{BytesStart, Event},
    name::{QName, ResolveResult},
};

use super::{Attribute, Document, DocumentError, Element, Node};

pub(super) fn parse(xml: &str) -> Result<Document, DocumentError> {
    let mut reader = NsReader::from_str(xml);
    let mut doc = Document::default();
    let mut open: Vec<Element> = Vec::new();

    loop {
        let event = reader.read_event().map_err(|source| DocumentError::Xml {
            position: reader.error_position(),
            source,
        })?;

        let node = match event {
            Event::Start(start) => {
                open.push(start_element(&start, &reader)?);
                continue;
            }
            Event::Empty(start) => Node::Element(start_element(&start, &reader)?),
            Event::End(end) => {
                let elem = open
                    .pop()
                    .ok_or_else(|| DocumentError::Unbalanced("unexpected closing tag".into()))?;
                let end_name = end.name();
                let name = std::str::from_utf8(end_name.as_ref())?;
                if name != elem.name {
                    return Err(DocumentError::Unbalanced(format!(
                        "expected </{}>, found </{name}>",
                        elem.name
                    )));
                }
                Node::Element(elem)
            }
            Event::Text(text) => Node::Text(std::str::from_utf8(&text)?.to_string()),
            Event::GeneralRef(reference) => {
                Node::Text(format!("&{};", std::str::from_utf8(&reference)?))
            }
            Event::CData(data) => Node::CData(std::str::from_utf8(&data)?.to_string()),
            Event::Comment(text) => Node::Comment(std::str::from_utf8(&text)?.to_string()),
            Event::PI(pi) => Node::Pi(std::str::from_utf8(&pi)?.to_string()),
            Event::Decl(decl) => Node::Decl(std::str::from_utf8(&decl)?.to_string()),
            Event::DocType(text) => Node::DocType(std::str::from_utf8(&text)?.to_string()),
            Event::Eof => break,
        };

        let siblings = match open.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut doc.children,
        };
        append(siblings, node);
    }

    if let Some(elem) = open.last() {
        return Err(DocumentError::Unbalanced(format!("unclosed <{}>", elem.name)));
    }
    if doc.root().is_none() {
        return Err(DocumentError::Unbalanced("no root element".into()));
    }

    Ok(doc)
}

/// Push a node, merging adjacent text so entity references stay inline.
fn append(siblings: &mut Vec<Node>, node: Node) {
    if let (Some(Node::Text(last)), Node::Text(text)) = (siblings.last_mut(), &node) {
        last.push_str(text);
        return;
    }
    siblings.push(node);
}

/// Namespace URI of a bound name; unbound and undeclared prefixes have none.
fn namespace_uri(resolved: ResolveResult<'_>) -> Result<Option<String>, DocumentError> {
    match resolved {
        ResolveResult::Bound(ns) => Ok(Some(std::str::from_utf8(ns.as_ref())?.to_string())),
        _ => Ok(None),
    }
}

/// Build an element while the reader still has its namespace scope open.
fn start_element(start: &BytesStart<'_>, reader: &NsReader<&[u8]>) -> Result<Element, DocumentError> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_string();
    let (resolved, _) = reader.resolve_element(start.name());
    let namespace = namespace_uri(resolved)?;

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| DocumentError::Xml {
            position: reader.buffer_position(),
            source: e.into(),
        })?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let raw = std::str::from_utf8(&attr.value)?;
        let value = quick_xml::escape::unescape(raw)?.into_owned();

        // Declarations and unprefixed attributes carry no namespace
        let namespace = if key == "xmlns" || key.starts_with("xmlns:") || !key.contains(':') {
            None
        } else {
            let (resolved, _) = reader.resolve_attribute(QName(key.as_bytes()));
            namespace_uri(resolved)?
        };

        attributes.push(Attribute {
            name: key,
            namespace,
            value,
        });
    }

    Ok(Element {
        name,
        namespace,
        attributes,
        children: Vec::new(),
    })
}
