use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::FeedError;
use crate::util::Timestamp;

/// Feed-level metadata.
///
/// `title` and `link` are required; every other field is optional and left
/// out of the rendered document when unset. Build one with [`FeedConfig::new`]
/// and struct update syntax:
///
/// ```
/// use feedgen::FeedConfig;
///
/// let config = FeedConfig {
///     language: Some("en".to_string()),
///     feed_url: Some("https://example.org/feed/".to_string()),
///     ..FeedConfig::new("My site", "https://example.org/")
/// };
/// assert_eq!(config.title, "My site");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    /// URL of the feed document itself, rendered as a `rel="self"` link.
    #[serde(default)]
    pub feed_url: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
    #[serde(default)]
    pub author_link: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Ordered set; duplicates are dropped when the feed is built.
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub ttl: Option<String>,
    #[serde(default)]
    pub feed_copyright: Option<String>,
    /// Atom feed id; defaults to `link`.
    #[serde(default)]
    pub feed_guid: Option<String>,
}

impl FeedConfig {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            ..Default::default()
        }
    }
}

/// A media file attached to an item (podcast audio, for instance).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Enclosure {
    pub url: String,
    /// Size in bytes, kept as text since it is rendered verbatim.
    pub length: String,
    pub mime_type: String,
}

impl Enclosure {
    pub fn new(
        url: impl Into<String>,
        length: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            length: length.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// One entry of a feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Stable identifier; RSS falls back to `link`, Atom to a tag URI.
    #[serde(default)]
    pub unique_id: Option<String>,
    /// Only meaningful together with `unique_id`.
    #[serde(default)]
    pub unique_id_is_permalink: Option<bool>,
    #[serde(default)]
    pub enclosure: Option<Enclosure>,
    /// Ordered set; duplicates are dropped when the item is added.
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
    #[serde(default)]
    pub author_link: Option<String>,
    #[serde(default)]
    pub pubdate: Option<Timestamp>,
    #[serde(default)]
    pub updateddate: Option<Timestamp>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub ttl: Option<String>,
    #[serde(default)]
    pub item_copyright: Option<String>,
    /// Caller-defined values carried alongside the item. The built-in
    /// writers do not render them.
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl FeedItem {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            ..Default::default()
        }
    }

    /// The RSS `<guid>` value: `unique_id`, else `link`.
    pub fn guid(&self) -> &str {
        self.unique_id.as_deref().unwrap_or(&self.link)
    }

    /// The timestamp that dates this item: `updateddate`, else `pubdate`.
    pub fn effective_date(&self) -> Option<&Timestamp> {
        self.updateddate.as_ref().or(self.pubdate.as_ref())
    }
}

/// Feed metadata plus its items, in insertion order.
///
/// Items can only be appended. The feed performs no internal locking; share
/// it across threads only behind the caller's own synchronization.
#[derive(Debug, Clone)]
pub struct Feed {
    config: FeedConfig,
    items: Vec<FeedItem>,
}

impl Feed {
    /// Validates feed-level metadata.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Configuration`] if `title` or `link` is empty.
    pub fn new(mut config: FeedConfig) -> Result<Self, FeedError> {
        require("feed", "title", &config.title)?;
        require("feed", "link", &config.link)?;
        dedup_in_order(&mut config.categories);

        tracing::debug!(title = %config.title, link = %config.link, "Created feed");
        Ok(Self {
            config,
            items: Vec::new(),
        })
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Validates and appends an item. Items already in the feed are not
    /// re-checked.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Configuration`] if `title` or `link` is empty, or
    /// if `unique_id_is_permalink` is set without a `unique_id`.
    pub fn add_item(&mut self, mut item: FeedItem) -> Result<(), FeedError> {
        require("item", "title", &item.title)?;
        require("item", "link", &item.link)?;
        if item.unique_id_is_permalink.is_some() && item.unique_id.is_none() {
            return Err(FeedError::configuration(format!(
                "Item {:?} sets unique_id_is_permalink without a unique_id",
                item.title
            )));
        }
        dedup_in_order(&mut item.categories);

        tracing::debug!(
            title = %item.title,
            count = self.items.len() + 1,
            "Added feed item"
        );
        self.items.push(item);
        Ok(())
    }

    /// The most recent item date, if any item carries one.
    ///
    /// Each item contributes `updateddate`, else `pubdate`. Values are compared
    /// after UTC normalization, so dates, naive and aware values mix freely;
    /// the winning value is returned unchanged.
    pub fn latest_item_date(&self) -> Option<&Timestamp> {
        self.items
            .iter()
            .filter_map(FeedItem::effective_date)
            .max_by_key(|ts| ts.to_utc())
    }

    /// Like [`Feed::latest_item_date`], falling back to the current UTC time
    /// for feeds without dated items.
    pub fn latest_post_date(&self) -> Timestamp {
        self.latest_item_date()
            .cloned()
            .unwrap_or_else(Timestamp::now)
    }
}

fn require(owner: &str, field: &str, value: &str) -> Result<(), FeedError> {
    if value.trim().is_empty() {
        return Err(FeedError::configuration(format!(
            "{owner} {field} is required and must not be empty"
        )));
    }
    Ok(())
}

fn dedup_in_order(values: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    values.retain(|v| seen.insert(v.clone()));
}
