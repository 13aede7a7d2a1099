//! RSS 2.0 and Atom 1.0 feed generation.
//!
//! Build a [`SyndicationFeed`] for the format you want, append
//! [`FeedItem`]s, then render with [`SyndicationFeed::write_string`] or stream
//! into any [`std::io::Write`] with [`SyndicationFeed::write`].
//!
//! ```
//! use chrono::NaiveDate;
//! use feedgen::{FeedConfig, FeedItem, SyndicationFeed, Timestamp};
//!
//! let mut feed = SyndicationFeed::atom(FeedConfig {
//!     language: Some("en".to_string()),
//!     ..FeedConfig::new("My site", "https://example.org/")
//! })?;
//! feed.add_item(FeedItem {
//!     description: Some("First post".to_string()),
//!     pubdate: Some(Timestamp::from(NaiveDate::from_ymd_opt(2017, 3, 18).unwrap())),
//!     ..FeedItem::new("Hello", "https://example.org/hello/")
//! })?;
//!
//! let xml = feed.write_string("utf-8")?;
//! assert!(xml.contains("<published>2017-03-18T00:00:00Z</published>"));
//! assert_eq!(feed.content_type(), "application/atom+xml; charset=utf-8");
//! # Ok::<(), feedgen::FeedError>(())
//! ```

pub mod config;
pub mod error;
pub mod feed;
pub mod util;

pub use config::{ConfigError, FeedManifest};
pub use error::FeedError;
pub use feed::model::{Enclosure, Feed, FeedConfig, FeedItem};
pub use feed::{FeedKind, SyndicationFeed};
pub use util::{rfc2822_date, rfc3339_date, tag_uri, FixedOffset, Timestamp, UTC};
