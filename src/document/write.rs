//! [`Document`] → XML.

use std::io::{Cursor, Write};

use quick_xml::{
    Writer,
    events::{BytesEnd, BytesStart, BytesText, Event},
};

use super::{Document, DocumentError, Element, Node};

pub(super) fn write(doc: &Document) -> Result<String, DocumentError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    for node in &doc.children {
        write_node(&mut writer, node)?;
    }
    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_node(writer: &mut Writer<Cursor<Vec<u8>>>, node: &Node) -> Result<(), DocumentError> {
    match node {
        Node::Element(elem) => write_element(writer, elem)?,
        Node::Text(text) => writer.write_event(Event::Text(BytesText::from_escaped(text.as_str())))?,
        // Raw nodes are written back verbatim
        Node::CData(data) => write!(writer.get_mut(), "<![CDATA[{data}]]>")?,
        Node::Comment(text) => write!(writer.get_mut(), "<!--{text}-->")?,
        Node::Pi(content) | Node::Decl(content) => write!(writer.get_mut(), "<?{content}?>")?,
        Node::DocType(content) => write!(writer.get_mut(), "<!DOCTYPE {content}>")?,
    }
    Ok(())
}

fn write_element(writer: &mut Writer<Cursor<Vec<u8>>>, elem: &Element) -> Result<(), DocumentError> {
    let mut start = BytesStart::new(elem.name.as_str());
    for attr in &elem.attributes {
        start.push_attribute((attr.name.as_str(), attr.value.as_str()));
    }

    if elem.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &elem.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(elem.name.as_str())))?;
    Ok(())
}
