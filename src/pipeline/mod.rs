//! Rich-text link conversion pipeline.
//!
//! Rewrites internal link targets of a [`Document`] into absolute URLs.
//! The input document is never touched; a converted copy is returned.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌─────────────┐   ┌─────────────┐
//! │ select   │ → │ resolve  │ → │ site mapping│ → │ UrlGenerator│
//! │ (links)  │   │ (lookup) │   │ (target)    │   │ (+fragment) │
//! └──────────┘   └──────────┘   └─────────────┘   └─────────────┘
//! ```
//!
//! - `select`: finds `link` / `embedlink` elements in document order
//! - `resolve`: turns one raw target into the href to render
//!
//! Every link is handled independently; the only shared state is the
//! [`SiteMapping`] read when the converter is built.

mod resolve;
mod select;

pub use select::{EMBED_LINK_ELEMENT, LINK_ELEMENT, LinkKind, LinkNode, link_kind, select_links};

use thiserror::Error;

use crate::config::{ConfigError, ConfigSource};
use crate::core::{HREF_RESOLVED, SITE_MAPPING_KEY, XLINK_NS};
use crate::debug;
use crate::document::{Document, DocumentError};
use crate::logger::{Logger, NullLogger};
use crate::service::{ContentLookup, GenerationError, LocationLookup, SiteContext, UrlGenerator};
use crate::site::SiteMapping;

// =============================================================================
// Errors
// =============================================================================

/// Errors that abort a conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

// =============================================================================
// Converter
// =============================================================================

/// Resolves internal links of rich-text documents.
pub struct LinkConverter<'a> {
    contents: &'a dyn ContentLookup,
    locations: &'a dyn LocationLookup,
    urls: &'a dyn UrlGenerator,
    site: &'a dyn SiteContext,
    logger: &'a dyn Logger,
    mapping: SiteMapping,
}

impl<'a> LinkConverter<'a> {
    /// Build a converter, reading the site mapping from `config` once.
    pub fn new(
        contents: &'a dyn ContentLookup,
        locations: &'a dyn LocationLookup,
        urls: &'a dyn UrlGenerator,
        site: &'a dyn SiteContext,
        config: &dyn ConfigSource,
    ) -> Result<Self, ConfigError> {
        let mapping = config.site_mapping(SITE_MAPPING_KEY)?;
        Ok(Self::with_mapping(contents, locations, urls, site, mapping))
    }

    /// Build a converter from an already loaded mapping.
    pub fn with_mapping(
        contents: &'a dyn ContentLookup,
        locations: &'a dyn LocationLookup,
        urls: &'a dyn UrlGenerator,
        site: &'a dyn SiteContext,
        mapping: SiteMapping,
    ) -> Self {
        Self {
            contents,
            locations,
            urls,
            site,
            logger: &NullLogger,
            mapping,
        }
    }

    /// Report lookup failures to `logger` instead of discarding them.
    pub fn with_logger(mut self, logger: &'a dyn Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn mapping(&self) -> &SiteMapping {
        &self.mapping
    }

    /// Convert a copy of `doc`.
    ///
    /// Generic links get their `xlink:href` replaced, embed links get an
    /// `href_resolved` attribute. Unresolvable links become `#`.
    pub fn convert(&self, doc: &Document) -> Result<Document, ConvertError> {
        let mut output = doc.clone();
        let mut count = 0usize;

        for node in select_links(doc) {
            let resolved = self.resolve_href(node.href)?;
            // Same shape as `doc`, so the path is valid
            let Some(elem) = output.element_at_mut(&node.path) else {
                continue;
            };
            match node.kind {
                LinkKind::Generic => elem.set_attr_ns(XLINK_NS, "xlink:href", resolved),
                LinkKind::Embed => elem.set_attr(HREF_RESOLVED, resolved),
            }
            count += 1;
        }

        debug!("convert"; "resolved {count} links");
        Ok(output)
    }

    /// Parse, convert and serialize an XML string.
    pub fn convert_str(&self, xml: &str) -> Result<String, ConvertError> {
        let doc = Document::parse(xml)?;
        Ok(self.convert(&doc)?.to_xml()?)
    }
}

// =============================================================================
// Tests
// =============================================================================
