//! # rtelink
//!
//! Resolves internal links of rich-text XML documents into absolute,
//! site-aware URLs.
//!
//! Stored documents reference repository entities instead of URLs:
//!
//! ```xml
//! <link xlink:href="location://42#intro">...</link>
//! <link xlink:href="content://7">...</link>
//! <embedlink xlink:href="content://7"/>
//! ```
//!
//! [`LinkConverter`] looks each one up, picks the site to route through using
//! the configured root-location → language → site mapping, and writes the
//! generated URL back. Unresolvable links render as `#`.
//!
//! ## Example
//!
//! ```no_run
//! use rtelink::{LinkConfig, LinkConverter, MemoryRepository, SiteRouter, StaticSiteContext};
//! use std::path::Path;
//!
//! let config = LinkConfig::from_path(Path::new("rtelink.toml"))?;
//! let repo = MemoryRepository::from_path(Path::new("repository.toml"))?;
//! let router = SiteRouter::from_config(&config)?;
//! let site = StaticSiteContext::new("site_en");
//!
//! let converter = LinkConverter::new(&repo, &repo, &router, &site, &config)?;
//! let html = converter.convert_str(r#"<section xmlns="http://docbook.org/ns/docbook"/>"#)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod core;
pub mod document;
pub mod logger;
pub mod pipeline;
pub mod repository;
pub mod service;
pub mod site;

pub use config::{ConfigError, ConfigSource, LinkConfig};
pub use document::{Document, DocumentError};
pub use logger::{ConsoleLogger, Logger, MemoryLogger, NullLogger};
pub use pipeline::{ConvertError, LinkConverter};
pub use repository::MemoryRepository;
pub use service::{
    ContentInfo, ContentLookup, GenerationError, Location, LocationLookup, LookupError,
    SiteContext, UrlGenerator,
};
pub use site::{SiteMapping, SiteRouter, StaticSiteContext};
