//! Absolute URL generation for locations, per site.

use rustc_hash::FxHashMap;
use url::Url;

use crate::config::{ConfigError, LinkConfig};
use crate::service::{GenerationError, Location, UrlGenerator};

/// [`UrlGenerator`] backed by a table of site base URLs.
///
/// A location is addressed by its URL alias when it has one, otherwise by
/// `view/location/<id>`, relative to the base URL of the target site.
#[derive(Debug, Clone, Default)]
pub struct SiteRouter {
    sites: FxHashMap<String, Url>,
}

impl SiteRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` with its base URL.
    pub fn with_site(mut self, name: &str, base_url: &str) -> Result<Self, url::ParseError> {
        self.sites.insert(name.to_string(), parse_base(base_url)?);
        Ok(self)
    }

    /// Build a router from the `[sites]` table.
    pub fn from_config(config: &LinkConfig) -> Result<Self, ConfigError> {
        let mut sites = FxHashMap::default();
        for (name, entry) in &config.sites {
            let base = parse_base(&entry.base_url).map_err(|err| {
                ConfigError::Validation(format!("sites.{name}.base_url: {err}"))
            })?;
            sites.insert(name.clone(), base);
        }
        Ok(Self { sites })
    }

    pub fn has_site(&self, name: &str) -> bool {
        self.sites.contains_key(name)
    }
}

/// Parse a base URL, forcing a trailing slash so joins keep its path.
fn parse_base(base_url: &str) -> Result<Url, url::ParseError> {
    let trimmed = base_url.trim();
    if trimmed.ends_with('/') {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("{trimmed}/"))
    }
}

/// Relative path of a location below its site's base URL.
fn location_path(location: &Location) -> String {
    match location.url_alias.as_deref().map(|a| a.trim_matches('/')) {
        Some("") => String::new(),
        Some(alias) => format!("{alias}/"),
        None => format!("view/location/{}", location.id),
    }
}

impl UrlGenerator for SiteRouter {
    fn location_url(
        &self,
        location: &Location,
        site: Option<&str>,
    ) -> Result<String, GenerationError> {
        let error = |reason: String| GenerationError {
            location_id: location.id,
            reason,
        };

        let site = site.ok_or_else(|| error("no site to route through".into()))?;
        let base = self
            .sites
            .get(site)
            .ok_or_else(|| error(format!("unknown site `{site}`")))?;

        base.join(&location_path(location))
            .map(String::from)
            .map_err(|err| error(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(id: u64, alias: Option<&str>) -> Location {
        Location {
            id,
            path: vec![1, id],
            content_id: 100 + id,
            url_alias: alias.map(str::to_string),
        }
    }

    fn router() -> SiteRouter {
        SiteRouter::new()
            .with_site("site-a", "https://a.example.com")
            .unwrap()
            .with_site("site-fr", "https://example.com/fr/")
            .unwrap()
    }

    #[test]
    fn test_url_from_alias() {
        let url = router()
            .location_url(&location(42, Some("/products/chairs")), Some("site-a"))
            .unwrap();
        assert_eq!(url, "https://a.example.com/products/chairs/");
    }

    #[test]
    fn test_url_keeps_base_path() {
        let url = router()
            .location_url(&location(42, Some("about")), Some("site-fr"))
            .unwrap();
        assert_eq!(url, "https://example.com/fr/about/");
    }

    #[test]
    fn test_url_without_alias() {
        let url = router().location_url(&location(42, None), Some("site-a")).unwrap();
        assert_eq!(url, "https://a.example.com/view/location/42");
    }

    #[test]
    fn test_url_root_alias() {
        let url = router().location_url(&location(2, Some("/")), Some("site-fr")).unwrap();
        assert_eq!(url, "https://example.com/fr/");
    }

    #[test]
    fn test_unknown_site_is_error() {
        let err = router()
            .location_url(&location(42, None), Some("site-x"))
            .unwrap_err();
        assert_eq!(err.location_id, 42);
        assert!(err.reason.contains("site-x"));
    }

    #[test]
    fn test_missing_site_is_error() {
        assert!(router().location_url(&location(42, None), None).is_err());
    }

    #[test]
    fn test_from_config() {
        let config = LinkConfig::from_str(
            "[sites.a]\nbase_url = \"https://a.example.com\"\n[sites.b]\nbase_url = \"https://b.example.com/x\"",
        )
        .unwrap();
        let router = SiteRouter::from_config(&config).unwrap();
        assert!(router.has_site("a"));
        assert!(router.has_site("b"));
        assert!(!router.has_site("c"));
    }

    #[test]
    fn test_from_config_invalid_base() {
        let config = LinkConfig::from_str("[sites.a]\nbase_url = \"not a url\"").unwrap();
        assert!(matches!(
            SiteRouter::from_config(&config),
            Err(ConfigError::Validation(_))
        ));
    }
}
