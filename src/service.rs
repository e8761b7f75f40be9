//! Collaborator contracts the link converter consumes.
//!
//! Storage, routing and the site registry live in the host; the converter
//! only sees these traits.

use thiserror::Error;

use crate::core::{ContentId, LocationId};

// ============================================================================
// Errors
// ============================================================================

/// Failure of a content or location lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("not authorized to read {kind} {id}")]
    Unauthorized { kind: &'static str, id: String },
}

impl LookupError {
    pub fn content_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            kind: "content",
            id: id.to_string(),
        }
    }

    pub fn location_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            kind: "location",
            id: id.to_string(),
        }
    }
}

/// Failure of URL generation. Not recovered by the converter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot generate URL for location {location_id}: {reason}")]
pub struct GenerationError {
    pub location_id: LocationId,
    pub reason: String,
}

// ============================================================================
// Entities
// ============================================================================

/// What the converter needs to know about a content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentInfo {
    pub id: ContentId,
    pub main_location_id: LocationId,
    pub name: String,
}

/// A node of the location tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub id: LocationId,
    /// Ancestor ids from the tree root down to and including `id`.
    pub path: Vec<LocationId>,
    pub content_id: ContentId,
    /// Human-readable URL path, when the host has one.
    pub url_alias: Option<String>,
}

// ============================================================================
// Traits
// ============================================================================

pub trait ContentLookup {
    fn content_info(&self, id: ContentId) -> Result<ContentInfo, LookupError>;
}

pub trait LocationLookup {
    fn location(&self, id: LocationId) -> Result<Location, LookupError>;
}

pub trait UrlGenerator {
    /// Absolute URL of `location`, routed through `site` when given.
    fn location_url(&self, location: &Location, site: Option<&str>)
    -> Result<String, GenerationError>;
}

/// Site handling the current request.
pub trait SiteContext {
    fn current(&self) -> Option<String>;
}
