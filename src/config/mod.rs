//! Converter configuration (`rtelink.toml`).
//!
//! # Sections
//!
//! | Section                    | Purpose                                      |
//! |----------------------------|----------------------------------------------|
//! | `[rte-site-mapping.<id>]`  | Root location id → language code → site name |
//! | `[sites.<name>]`           | Base URL of each site for the bundled router |
//!
//! # Example
//!
//! ```toml
//! [rte-site-mapping.10]
//! eng-GB = "site_en"
//! fre-FR = "site_fr"
//!
//! [sites.site_en]
//! base_url = "https://example.com/en"
//!
//! [sites.site_fr]
//! base_url = "https://example.com/fr"
//! ```
//!
//! Roots are applied in ascending id order and language codes in sorted
//! order, whatever order they are declared in. A root key that is not a
//! location id, or an empty site name, is skipped with a warning.

mod error;

pub use error::ConfigError;

use crate::core::{LocationId, SITE_MAPPING_KEY};
use crate::log;
use crate::site::SiteMapping;
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Config Source
// ============================================================================

/// Provider of the site mapping, read once when a converter is built.
pub trait ConfigSource {
    fn site_mapping(&self, key: &str) -> Result<SiteMapping, ConfigError>;
}

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing rtelink.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Path the config was loaded from (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Raw site mapping, keyed by root location id as written
    #[serde(rename = "rte-site-mapping")]
    pub site_mapping: BTreeMap<String, BTreeMap<String, String>>,

    /// Known sites
    pub sites: BTreeMap<String, SiteEntry>,
}

/// `[sites.<name>]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SiteEntry {
    /// Absolute URL every location URL of this site is joined onto.
    pub base_url: String,
}

impl LinkConfig {
    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let (config, _) = Self::parse_with_ignored(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path, warning about unknown fields.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            log!("warning"; "unknown fields in {}: {}", path.display(), ignored.join(", "));
        }

        config.validate()?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Check the site table.
    ///
    /// The site mapping is not checked here: broken entries are skipped when
    /// the mapping is built, so links fall back to the current site.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, site) in &self.sites {
            if site.base_url.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "sites.{name}.base_url is empty"
                )));
            }
        }
        Ok(())
    }
}

impl ConfigSource for LinkConfig {
    fn site_mapping(&self, key: &str) -> Result<SiteMapping, ConfigError> {
        if key != SITE_MAPPING_KEY {
            return Err(ConfigError::Validation(format!("unknown config key `{key}`")));
        }

        let mut mapping = SiteMapping::new();
        for (root, languages) in &self.site_mapping {
            let Ok(root_id) = root.trim().parse::<LocationId>() else {
                log!("warning"; "{SITE_MAPPING_KEY}.{root}: not a location id, entry skipped");
                continue;
            };
            for (language, site) in languages {
                if site.trim().is_empty() {
                    log!("warning"; "{SITE_MAPPING_KEY}.{root}.{language}: empty site name, entry skipped");
                    continue;
                }
                mapping.insert(root_id, language, site);
            }
        }
        Ok(mapping)
    }
}
