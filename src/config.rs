//! TOML feed manifests.
//!
//! A manifest describes a whole feed: a `[feed]` table with the metadata and
//! one `[[items]]` table per entry, in output order.
//!
//! ```toml
//! [feed]
//! title = "My mega website"
//! link = "https://example.org/"
//! language = "en"
//!
//! [[items]]
//! title = "Hello, World!"
//! link = "https://example.org/notes/hello/"
//! updateddate = "2017-01-01T00:00:00+00:00"
//! categories = ["greeting", "site"]
//! ```
//!
//! Dates may be quoted strings or native TOML dates and date-times
//! (`pubdate = 2017-03-18T00:00:00Z`).
//!
//! Unknown top-level keys are logged and ignored. Unknown keys inside `feed`
//! or an item are rejected, since a misspelled field would otherwise vanish
//! from the rendered document.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::error::FeedError;
use crate::feed::model::{FeedConfig, FeedItem};
use crate::feed::{FeedKind, SyndicationFeed};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read feed manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in feed manifest: {0}")]
    Parse(#[from] toml::de::Error),

    /// Manifest file exceeds maximum allowed size.
    #[error("Feed manifest too large: {0}")]
    TooLarge(String),

    #[error("Feed manifest is empty")]
    Empty,

    /// The manifest parsed but describes an invalid feed.
    #[error("Invalid feed in manifest: {0}")]
    Feed(#[from] FeedError),
}

// ============================================================================
// Manifest
// ============================================================================

/// A feed and its items as read from a TOML document.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedManifest {
    pub feed: FeedConfig,

    #[serde(default)]
    pub items: Vec<FeedItem>,
}

impl FeedManifest {
    /// Maximum manifest file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 2] = ["feed", "items"];

    /// Load a manifest from a TOML file.
    ///
    /// - Missing file → `Err(ConfigError::Io)`
    /// - Empty file → `Err(ConfigError::Empty)`
    /// - Invalid TOML or unknown feed/item fields → `Err(ConfigError::Parse)`
    /// - Unknown top-level keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > Self::MAX_FILE_SIZE {
            return Err(ConfigError::TooLarge(format!(
                "Manifest is {} bytes (max {} bytes)",
                meta.len(),
                Self::MAX_FILE_SIZE
            )));
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Feed manifest is empty");
            return Err(ConfigError::Empty);
        }

        let manifest = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            title = %manifest.feed.title,
            items = manifest.items.len(),
            "Loaded feed manifest"
        );
        Ok(manifest)
    }

    /// Parse a manifest from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        // Parse as a raw table first to detect unknown top-level keys
        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in feed manifest, ignoring");
                }
            }
        }

        Ok(toml::from_str(content)?)
    }
}

impl SyndicationFeed {
    /// Builds a feed of the given kind from a manifest, validating the feed
    /// and every item in order.
    pub fn from_manifest(kind: FeedKind, manifest: FeedManifest) -> Result<Self, ConfigError> {
        let mut feed = SyndicationFeed::new(kind, manifest.feed)?;
        for item in manifest.items {
            feed.add_item(item)?;
        }
        Ok(feed)
    }
}

// ============================================================================
// Tests
// ============================================================================
