//! Root location → language → site mapping.
//!
//! Decides which site a resolved link is routed through:
//!
//! 1. the first configured root (ascending id) on the location's path
//!    selects a language → site table;
//! 2. the language code is taken from the *last* entry of the whole mapping
//!    whose sites include the current site, and is that entry's *first*
//!    language code;
//! 3. the code indexes the table from step 1.
//!
//! ```text
//! mapping   10 => { en: site-a, fr: site-b }
//! current   site-b        -> entry 10 contains it, first code `en`
//! target    path ∋ 10     -> mapping[10][en] = site-a
//! ```
//!
//! Any missing piece falls back to the current site.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::core::LocationId;
use crate::debug;
use crate::service::Location;

/// Inconsistency found while applying the mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SiteMappingError {
    #[error("root location {root} has no site for language `{language}`")]
    MissingLanguage { root: LocationId, language: String },
}

/// Immutable mapping loaded once per converter.
///
/// Roots iterate in ascending id order, languages in ascending code order;
/// declaration order in the config is not kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteMapping {
    entries: BTreeMap<LocationId, BTreeMap<String, String>>,
}

impl SiteMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `language` under `root` to `site`.
    pub fn insert(&mut self, root: LocationId, language: &str, site: &str) {
        self.entries
            .entry(root)
            .or_default()
            .insert(language.to_string(), site.to_string());
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn roots(&self) -> impl Iterator<Item = LocationId> + '_ {
        self.entries.keys().copied()
    }

    pub fn languages(&self, root: LocationId) -> Option<&BTreeMap<String, String>> {
        self.entries.get(&root)
    }

    pub fn site(&self, root: LocationId, language: &str) -> Option<&str> {
        self.entries.get(&root)?.get(language).map(String::as_str)
    }

    /// Site a link to `location` should be generated for.
    ///
    /// Returns `current` whenever the mapping does not apply or is
    /// inconsistent.
    pub fn target_site(&self, location: &Location, current: Option<&str>) -> Option<String> {
        match self.lookup(location, current) {
            Ok(Some(site)) => Some(site.to_string()),
            Ok(None) => current.map(str::to_string),
            Err(err) => {
                debug!("site"; "{err}, keeping current site");
                current.map(str::to_string)
            }
        }
    }

    fn lookup(
        &self,
        location: &Location,
        current: Option<&str>,
    ) -> Result<Option<&str>, SiteMappingError> {
        if self.is_empty() {
            return Ok(None);
        }

        let path: FxHashSet<LocationId> = location.path.iter().copied().collect();
        let Some(root) = self.roots().find(|root| path.contains(root)) else {
            return Ok(None);
        };
        let Some(languages) = self.languages(root) else {
            return Ok(None);
        };

        let Some(current) = current else {
            return Ok(None);
        };
        let Some(language) = self.language_of(current) else {
            return Ok(None);
        };

        languages
            .get(language)
            .map(|site| Some(site.as_str()))
            .ok_or_else(|| SiteMappingError::MissingLanguage {
                root,
                language: language.to_string(),
            })
    }

    /// Language code for `site`: first code of the last entry listing it.
    fn language_of(&self, site: &str) -> Option<&str> {
        self.entries
            .values()
            .rev()
            .find(|languages| languages.values().any(|s| s == site))
            .and_then(|languages| languages.keys().next())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(path: &[LocationId]) -> Location {
        Location {
            id: *path.last().unwrap(),
            path: path.to_vec(),
            content_id: 1,
            url_alias: None,
        }
    }

    fn mapping(entries: &[(LocationId, &str, &str)]) -> SiteMapping {
        let mut mapping = SiteMapping::new();
        for (root, language, site) in entries {
            mapping.insert(*root, language, site);
        }
        mapping
    }

    #[test]
    fn test_empty_mapping_keeps_current() {
        let m = SiteMapping::new();
        assert_eq!(
            m.target_site(&location(&[1, 10, 42]), Some("site-b")).as_deref(),
            Some("site-b")
        );
    }

    #[test]
    fn test_no_matching_root_keeps_current() {
        let m = mapping(&[(10, "en", "site-a"), (10, "fr", "site-b")]);
        assert_eq!(
            m.target_site(&location(&[1, 2, 42]), Some("site-b")).as_deref(),
            Some("site-b")
        );
    }

    #[test]
    fn test_sibling_language_site_selected() {
        let m = mapping(&[(10, "en", "site-a"), (10, "fr", "site-b")]);
        assert_eq!(
            m.target_site(&location(&[1, 10, 42]), Some("site-b")).as_deref(),
            Some("site-a")
        );
        assert_eq!(
            m.target_site(&location(&[1, 10, 42]), Some("site-a")).as_deref(),
            Some("site-a")
        );
    }

    #[test]
    fn test_language_taken_from_last_matching_entry() {
        let m = mapping(&[
            (10, "de", "site-a-de"),
            (10, "en", "site-a"),
            (10, "fr", "shared"),
            (20, "en", "site-c"),
            (20, "fr", "shared"),
        ]);
        // Entry 20 is the last listing `shared`; its first code is `en`
        assert_eq!(
            m.target_site(&location(&[10, 42]), Some("shared")).as_deref(),
            Some("site-a")
        );
    }

    #[test]
    fn test_cross_tree_language_lookup() {
        let m = mapping(&[
            (10, "en", "site-a"),
            (10, "fr", "site-b"),
            (20, "en", "site-c"),
            (20, "fr", "site-d"),
        ]);
        assert_eq!(
            m.target_site(&location(&[1, 10, 42]), Some("site-d")).as_deref(),
            Some("site-a")
        );
        assert_eq!(
            m.target_site(&location(&[1, 20, 43]), Some("site-b")).as_deref(),
            Some("site-c")
        );
    }

    #[test]
    fn test_unknown_current_site_keeps_current() {
        let m = mapping(&[(10, "en", "site-a")]);
        assert_eq!(
            m.target_site(&location(&[10, 42]), Some("elsewhere")).as_deref(),
            Some("elsewhere")
        );
    }

    #[test]
    fn test_missing_language_falls_back() {
        // `de` comes from root 20, but root 10 has no `de` site
        let m = mapping(&[(10, "fr", "site-a"), (20, "de", "site-x")]);
        assert_eq!(
            m.lookup(&location(&[10, 42]), Some("site-x")),
            Err(SiteMappingError::MissingLanguage {
                root: 10,
                language: "de".to_string()
            })
        );
        assert_eq!(
            m.target_site(&location(&[10, 42]), Some("site-x")).as_deref(),
            Some("site-x")
        );
    }

    #[test]
    fn test_no_current_site() {
        let m = mapping(&[(10, "en", "site-a")]);
        assert_eq!(m.target_site(&location(&[10, 42]), None), None);
    }

    #[test]
    fn test_first_root_in_order_wins() {
        let m = mapping(&[(5, "en", "outer-en"), (10, "en", "inner-en")]);
        assert_eq!(
            m.target_site(&location(&[1, 5, 10, 42]), Some("inner-en")).as_deref(),
            Some("outer-en")
        );
    }
}
