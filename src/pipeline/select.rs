//! Link node selection.
//!
//! | Element | Selected when | Resolved target goes to |
//! |---------|---------------|-------------------------|
//! | `link` | `xlink:href` starts with `content://` or `location://` | `xlink:href` (in place) |
//! | `embedlink` | always | `href_resolved` |
//!
//! Both elements must be in the DocBook namespace.

use crate::core::{DOCBOOK_NS, Scheme, XLINK_NS};
use crate::document::{Document, Element, NodePath};

pub const LINK_ELEMENT: &str = "link";
pub const EMBED_LINK_ELEMENT: &str = "embedlink";

/// Which attribute receives the resolved target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Rewritten in place.
    Generic,
    /// Keeps its original target; the resolved one is added alongside.
    Embed,
}

/// A selected link element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkNode<'a> {
    pub path: NodePath,
    pub kind: LinkKind,
    /// Raw `xlink:href`, empty when absent.
    pub href: &'a str,
}

/// Classify an element, `None` if it is not a link to resolve.
pub fn link_kind(elem: &Element) -> Option<LinkKind> {
    if elem.namespace.as_deref() != Some(DOCBOOK_NS) {
        return None;
    }
    match elem.local_name() {
        EMBED_LINK_ELEMENT => Some(LinkKind::Embed),
        LINK_ELEMENT => elem
            .get_attr_ns(XLINK_NS, "href")
            .filter(|href| Scheme::is_internal(href))
            .map(|_| LinkKind::Generic),
        _ => None,
    }
}

/// All link elements of `doc`, in document order.
pub fn select_links(doc: &Document) -> impl Iterator<Item = LinkNode<'_>> {
    doc.elements().filter_map(|(path, elem)| {
        link_kind(elem).map(|kind| LinkNode {
            path,
            kind,
            href: elem.get_attr_ns(XLINK_NS, "href").unwrap_or_default(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> Document {
        Document::parse(&format!(
            r#"<section xmlns="{DOCBOOK_NS}" xmlns:xlink="{XLINK_NS}">{body}</section>"#
        ))
        .unwrap()
    }

    #[test]
    fn test_select_internal_links_in_order() {
        let d = doc(concat!(
            r#"<para><link xlink:href="location://2">a</link></para>"#,
            r#"<link xlink:href="https://example.com">b</link>"#,
            r#"<link xlink:href="content://3#x">c</link>"#,
        ));
        let hrefs: Vec<_> = select_links(&d).map(|n| n.href).collect();
        assert_eq!(hrefs, ["location://2", "content://3#x"]);
    }

    #[test]
    fn test_select_embed_links_unconditionally() {
        let d = doc(concat!(
            r#"<embedlink xlink:href="https://example.com"/>"#,
            r#"<embedlink/>"#,
        ));
        let nodes: Vec<_> = select_links(&d).collect();
        assert_eq!(nodes.len(), 2);
        assert!(nodes.iter().all(|n| n.kind == LinkKind::Embed));
        assert_eq!(nodes[0].href, "https://example.com");
        assert_eq!(nodes[1].href, "");
    }

    #[test]
    fn test_select_requires_namespaces() {
        // Wrong element namespace
        let d = Document::parse(
            r#"<x xmlns:xlink="http://www.w3.org/1999/xlink"><link xlink:href="location://2"/><embedlink/></x>"#,
        )
        .unwrap();
        assert_eq!(select_links(&d).count(), 0);

        // Unprefixed href is not the XLink attribute
        let d = doc(r#"<link href="location://2"/>"#);
        assert_eq!(select_links(&d).count(), 0);
    }

    #[test]
    fn test_select_paths_address_elements() {
        let d = doc(r#"<para>t<link xlink:href="location://2"/></para>"#);
        let node = select_links(&d).next().unwrap();
        assert_eq!(node.kind, LinkKind::Generic);
        assert_eq!(d.element_at(&node.path).unwrap().local_name(), "link");
    }

    #[test]
    fn test_no_links() {
        let d = doc("<para>plain</para>");
        assert!(select_links(&d).next().is_none());
    }
}
