//! Feed model and the RSS 2.0 / Atom 1.0 writers.
//!
//! - [`model`] - feed metadata, items, validation, latest post date
//! - `xml` - compact XML emitter shared by both formats
//! - `rss` / `atom` - element layout for each format
//!
//! A [`SyndicationFeed`] pairs a [`Feed`] with the [`FeedKind`] chosen at
//! construction; the kind decides layout and content type.
//!
//! # Example
//!
//! ```
//! use feedgen::{FeedConfig, FeedItem, SyndicationFeed};
//!
//! let mut feed = SyndicationFeed::rss(FeedConfig::new("title", "/link/")).unwrap();
//! feed.add_item(FeedItem::new("Hello", "/hello/")).unwrap();
//! let xml = feed.write_string("utf-8").unwrap();
//! assert!(xml.starts_with(r#"<?xml version="1.0" encoding="utf-8"?><rss"#));
//! ```

mod atom;
pub mod model;
mod rss;
mod xml;

use std::io::Write;

use encoding_rs::Encoding;

use crate::error::FeedError;
use crate::util::Timestamp;
use model::{Feed, FeedConfig, FeedItem};
use xml::XmlEmitter;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Rss,
    Atom,
}

impl FeedKind {
    /// MIME type for HTTP responses serving this format.
    pub fn content_type(self) -> &'static str {
        match self {
            FeedKind::Rss => rss::CONTENT_TYPE,
            FeedKind::Atom => atom::CONTENT_TYPE,
        }
    }

    fn label(self) -> &'static str {
        match self {
            FeedKind::Rss => "rss",
            FeedKind::Atom => "atom",
        }
    }
}

/// A feed bound to an output format.
#[derive(Debug, Clone)]
pub struct SyndicationFeed {
    kind: FeedKind,
    feed: Feed,
}

impl SyndicationFeed {
    /// # Errors
    ///
    /// Returns [`FeedError::Configuration`] if `title` or `link` is empty.
    pub fn new(kind: FeedKind, config: FeedConfig) -> Result<Self, FeedError> {
        Ok(Self {
            kind,
            feed: Feed::new(config)?,
        })
    }

    pub fn rss(config: FeedConfig) -> Result<Self, FeedError> {
        Self::new(FeedKind::Rss, config)
    }

    pub fn atom(config: FeedConfig) -> Result<Self, FeedError> {
        Self::new(FeedKind::Atom, config)
    }

    pub fn kind(&self) -> FeedKind {
        self.kind
    }

    pub fn content_type(&self) -> &'static str {
        self.kind.content_type()
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    /// See [`Feed::add_item`].
    pub fn add_item(&mut self, item: FeedItem) -> Result<(), FeedError> {
        self.feed.add_item(item)
    }

    pub fn num_items(&self) -> usize {
        self.feed.num_items()
    }

    /// See [`Feed::latest_post_date`].
    pub fn latest_post_date(&self) -> Timestamp {
        self.feed.latest_post_date()
    }

    /// Renders the whole document. `encoding` only decides the XML
    /// declaration; the returned text is always a Rust string.
    ///
    /// The declaration repeats `encoding` as given when it names the encoding
    /// that is actually produced, and otherwise carries the canonical name.
    /// WHATWG maps `iso-8859-1` and `latin1` to `windows-1252`, so those
    /// labels are declared as `windows-1252`.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Configuration`] for an encoding label that cannot be
    ///   produced
    /// - [`FeedError::Format`] when a title, link or other value holds a
    ///   character XML 1.0 does not allow
    /// - [`FeedError::Format`] for an Atom feed with a dated item whose
    ///   `link` is not an absolute URL and which has no `unique_id`, since
    ///   its entry id would be a tag URI derived from that link. Set
    ///   `unique_id` on such items to render them.
    pub fn write_string(&self, encoding: &str) -> Result<String, FeedError> {
        let target = resolve_encoding(encoding)?;

        let mut xml = XmlEmitter::new();
        xml.declaration(declared_name(encoding, target))?;
        match self.kind {
            FeedKind::Rss => rss::write_rss(&self.feed, &mut xml)?,
            FeedKind::Atom => atom::write_atom(&self.feed, &mut xml)?,
        }
        let document = xml.finish()?;

        tracing::debug!(
            format = self.kind.label(),
            items = self.feed.num_items(),
            bytes = document.len(),
            "Rendered feed"
        );
        Ok(document)
    }

    /// Renders the document, transcodes it to `encoding` and writes it to
    /// `sink` in a single call. Nothing reaches the sink if rendering fails.
    ///
    /// Characters the target encoding cannot represent are written as numeric
    /// character references.
    ///
    /// # Errors
    ///
    /// Everything [`SyndicationFeed::write_string`] reports, plus
    /// [`FeedError::Io`] when the sink fails.
    pub fn write<W: Write>(&self, mut sink: W, encoding: &str) -> Result<(), FeedError> {
        let target = resolve_encoding(encoding)?;
        let document = self.write_string(encoding)?;
        let (bytes, _, unmappable) = target.encode(&document);
        if unmappable {
            tracing::warn!(
                encoding = target.name(),
                "Feed contains characters outside the output encoding"
            );
        }
        sink.write_all(&bytes)?;
        sink.flush()?;
        Ok(())
    }
}

/// Looks up a WHATWG encoding label. Encodings that `encoding_rs` can only
/// decode (UTF-16) are rejected since the declaration would lie.
fn resolve_encoding(label: &str) -> Result<&'static Encoding, FeedError> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| FeedError::configuration(format!("Unknown output encoding: {label:?}")))?;
    if encoding.output_encoding() != encoding {
        return Err(FeedError::configuration(format!(
            "Cannot encode feed output as {}",
            encoding.name()
        )));
    }
    Ok(encoding)
}

/// The label as given when it already names `encoding`, else the canonical
/// name, so the declaration always matches the bytes.
fn declared_name<'a>(label: &'a str, encoding: &'static Encoding) -> &'a str {
    let label = label.trim();
    if label.eq_ignore_ascii_case(encoding.name()) {
        label
    } else {
        encoding.name()
    }
}
