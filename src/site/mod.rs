//! Site selection and URL generation.
//!
//! - `mapping`: root location → language → site table, target site lookup
//! - `router`: base-URL based [`UrlGenerator`](crate::service::UrlGenerator)

mod mapping;
mod router;

pub use mapping::{SiteMapping, SiteMappingError};
pub use router::SiteRouter;

use crate::service::SiteContext;

/// Site context fixed at construction, for batch conversions and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSiteContext(Option<String>);

impl StaticSiteContext {
    pub fn new(site: impl Into<String>) -> Self {
        Self(Some(site.into()))
    }

    /// No site is handling the request.
    pub fn none() -> Self {
        Self(None)
    }
}

impl SiteContext for StaticSiteContext {
    fn current(&self) -> Option<String> {
        self.0.clone()
    }
}
