//! Link target resolution.
//!
//! # Resolution
//!
//! | Target | Lookup | Result |
//! |--------|--------|--------|
//! | `content://7#f` | content 7 → its main location | location URL + `#f` |
//! | `location://42#f` | location 42 | location URL + `#f` |
//! | anything else | none | target unchanged |
//!
//! A failed lookup yields `#`: not-found is reported as a warning,
//! a permission problem as a notice. URL generation errors are returned.

use crate::core::{DEAD_LINK, LinkRef, Scheme};
use crate::debug;
use crate::service::{GenerationError, Location, LookupError};

use super::LinkConverter;

impl LinkConverter<'_> {
    /// Resolve a raw link target to the href to render.
    pub fn resolve_href(&self, href: &str) -> Result<String, GenerationError> {
        let link = LinkRef::parse(href);

        let location = match link.scheme {
            Scheme::None => return Ok(href.to_string()),
            Scheme::Content => self.content_location(&link),
            Scheme::Location => self.location(&link),
        };

        match location {
            Ok(location) => self.location_url(&location, link.fragment),
            Err(err) => {
                self.report(&link, &err);
                Ok(DEAD_LINK.to_string())
            }
        }
    }

    fn content_location(&self, link: &LinkRef<'_>) -> Result<Location, LookupError> {
        let id = link
            .id
            .ok_or_else(|| LookupError::content_not_found(link.raw_id))?;
        let content = self.contents.content_info(id)?;
        self.locations.location(content.main_location_id)
    }

    fn location(&self, link: &LinkRef<'_>) -> Result<Location, LookupError> {
        let id = link
            .id
            .ok_or_else(|| LookupError::location_not_found(link.raw_id))?;
        self.locations.location(id)
    }

    fn report(&self, link: &LinkRef<'_>, err: &LookupError) {
        let message = format!(
            "While generating links for rich text, could not resolve `{}`: {err}",
            link.href
        );
        match err {
            LookupError::NotFound { .. } => self.logger.warning(&message),
            LookupError::Unauthorized { .. } => self.logger.notice(&message),
        }
    }

    /// Absolute URL of `location` in its target site, with `fragment` appended.
    fn location_url(&self, location: &Location, fragment: &str) -> Result<String, GenerationError> {
        let current = self.site.current();
        let site = self.mapping.target_site(location, current.as_deref());

        let mut url = self.urls.location_url(location, site.as_deref())?;
        url.push_str(fragment);

        debug!("link"; "location {} -> {url}", location.id);
        Ok(url)
    }
}
