//! Core types - pure abstractions shared across the codebase.

mod link;

pub use link::{LinkRef, Scheme};

/// Identifier of a node in the location tree.
pub type LocationId = u64;

/// Identifier of a content item.
pub type ContentId = u64;

/// Namespace of rich-text elements (`link`, `embedlink`, `para`, ...).
pub const DOCBOOK_NS: &str = "http://docbook.org/ns/docbook";

/// Namespace of the `xlink:href` link target attribute.
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Attribute that receives the resolved target of an embed link.
pub const HREF_RESOLVED: &str = "href_resolved";

/// Config key of the root-location → language → site table.
pub const SITE_MAPPING_KEY: &str = "rte-site-mapping";

/// Placeholder href for links that cannot be resolved.
pub const DEAD_LINK: &str = "#";
