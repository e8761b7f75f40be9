//! In-memory content repository.
//!
//! Serves content and location lookups from a fixture, for the CLI and for
//! hosts without a storage backend. Entries marked `restricted` exist but
//! answer [`LookupError::Unauthorized`].
//!
//! # Fixture format
//!
//! ```toml
//! [[location]]
//! id = 42
//! path = [1, 10, 42]
//! content_id = 7
//! url_alias = "/products"
//!
//! [[content]]
//! id = 7
//! main_location_id = 42
//! name = "Products"
//! ```

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::config::ConfigError;
use crate::core::{ContentId, LocationId};
use crate::service::{ContentInfo, ContentLookup, Location, LocationLookup, LookupError};

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    restricted: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    contents: FxHashMap<ContentId, Entry<ContentInfo>>,
    locations: FxHashMap<LocationId, Entry<Location>>,
}

// ============================================================================
// Fixture
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Fixture {
    location: Vec<LocationRecord>,
    content: Vec<ContentRecord>,
}

#[derive(Debug, Deserialize)]
struct LocationRecord {
    id: LocationId,
    #[serde(default)]
    path: Vec<LocationId>,
    content_id: ContentId,
    url_alias: Option<String>,
    #[serde(default)]
    restricted: bool,
}

#[derive(Debug, Deserialize)]
struct ContentRecord {
    id: ContentId,
    main_location_id: LocationId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    restricted: bool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a repository fixture from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let fixture: Fixture = toml::from_str(content)?;

        let mut repo = Self::new();
        for record in fixture.location {
            let location = Location {
                id: record.id,
                path: record.path,
                content_id: record.content_id,
                url_alias: record.url_alias,
            };
            repo.insert_location_entry(location, record.restricted);
        }
        for record in fixture.content {
            let content = ContentInfo {
                id: record.id,
                main_location_id: record.main_location_id,
                name: record.name,
            };
            repo.insert_content_entry(content, record.restricted);
        }
        Ok(repo)
    }

    /// Load a repository fixture from disk.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Add a location. Its path is completed with its own id if missing.
    pub fn insert_location(&mut self, location: Location) {
        self.insert_location_entry(location, false);
    }

    pub fn insert_content(&mut self, content: ContentInfo) {
        self.insert_content_entry(content, false);
    }

    /// Make an existing location unreadable.
    pub fn restrict_location(&mut self, id: LocationId) {
        if let Some(entry) = self.locations.get_mut(&id) {
            entry.restricted = true;
        }
    }

    /// Make an existing content item unreadable.
    pub fn restrict_content(&mut self, id: ContentId) {
        if let Some(entry) = self.contents.get_mut(&id) {
            entry.restricted = true;
        }
    }

    pub fn len(&self) -> usize {
        self.contents.len() + self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty() && self.locations.is_empty()
    }

    fn insert_location_entry(&mut self, mut location: Location, restricted: bool) {
        if location.path.last() != Some(&location.id) {
            location.path.push(location.id);
        }
        self.locations.insert(
            location.id,
            Entry {
                value: location,
                restricted,
            },
        );
    }

    fn insert_content_entry(&mut self, content: ContentInfo, restricted: bool) {
        self.contents.insert(
            content.id,
            Entry {
                value: content,
                restricted,
            },
        );
    }
}

fn read<T: Clone>(entry: Option<&Entry<T>>, kind: &'static str, id: u64) -> Result<T, LookupError> {
    match entry {
        None => Err(LookupError::NotFound {
            kind,
            id: id.to_string(),
        }),
        Some(entry) if entry.restricted => Err(LookupError::Unauthorized {
            kind,
            id: id.to_string(),
        }),
        Some(entry) => Ok(entry.value.clone()),
    }
}

impl ContentLookup for MemoryRepository {
    fn content_info(&self, id: ContentId) -> Result<ContentInfo, LookupError> {
        read(self.contents.get(&id), "content", id)
    }
}

impl LocationLookup for MemoryRepository {
    fn location(&self, id: LocationId) -> Result<Location, LookupError> {
        read(self.locations.get(&id), "location", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
[[location]]
id = 42
path = [1, 10, 42]
content_id = 7
url_alias = "/products"

[[location]]
id = 43
path = [1, 10]
content_id = 8
restricted = true

[[content]]
id = 7
main_location_id = 42
name = "Products"
"#;

    #[test]
    fn test_from_str() {
        let repo = MemoryRepository::from_str(FIXTURE).unwrap();
        assert_eq!(repo.len(), 3);

        let location = repo.location(42).unwrap();
        assert_eq!(location.path, vec![1, 10, 42]);
        assert_eq!(location.url_alias.as_deref(), Some("/products"));

        let content = repo.content_info(7).unwrap();
        assert_eq!(content.main_location_id, 42);
        assert_eq!(content.name, "Products");
    }

    #[test]
    fn test_path_completed_with_own_id() {
        let mut repo = MemoryRepository::from_str(FIXTURE).unwrap();
        repo.insert_location(Location {
            id: 50,
            path: vec![],
            content_id: 9,
            url_alias: None,
        });
        assert_eq!(repo.location(50).unwrap().path, vec![50]);
    }

    #[test]
    fn test_restricted_is_unauthorized() {
        let repo = MemoryRepository::from_str(FIXTURE).unwrap();
        assert!(matches!(
            repo.location(43),
            Err(LookupError::Unauthorized { kind: "location", .. })
        ));
    }

    #[test]
    fn test_missing_is_not_found() {
        let repo = MemoryRepository::new();
        assert_eq!(repo.content_info(1), Err(LookupError::content_not_found(1)));
        assert_eq!(repo.location(1), Err(LookupError::location_not_found(1)));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_restrict_after_insert() {
        let mut repo = MemoryRepository::from_str(FIXTURE).unwrap();
        repo.restrict_content(7);
        assert!(matches!(
            repo.content_info(7),
            Err(LookupError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_invalid_fixture() {
        assert!(MemoryRepository::from_str("[[location]]\nid = \"x\"").is_err());
    }
}
