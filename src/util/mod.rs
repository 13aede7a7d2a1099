//! Deterministic building blocks used by the feed writers.
//!
//! - **Timezones**: named fixed UTC offsets ([`FixedOffset`], [`UTC`])
//! - **Timestamps**: date / naive / aware time values ([`Timestamp`])
//! - **Date formatting**: RFC 2822 and RFC 3339 strings
//! - **Tag URIs**: stable `tag:` identifiers derived from a link and a date
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use feedgen::util::{rfc3339_date, FixedOffset, Timestamp};
//!
//! let tz = FixedOffset::from_minutes(120).unwrap();
//! let local = NaiveDate::from_ymd_opt(2008, 11, 14)
//!     .unwrap()
//!     .and_hms_opt(13, 37, 0)
//!     .unwrap();
//! assert_eq!(rfc3339_date(&tz.localize(local)), "2008-11-14T13:37:00+02:00");
//! assert_eq!(rfc3339_date(&Timestamp::from(local)), "2008-11-14T13:37:00Z");
//! ```

mod dates;
mod tag_uri;
mod timestamp;
mod timezone;

pub use dates::{rfc2822_date, rfc3339_date};
pub use tag_uri::tag_uri;
pub use timestamp::Timestamp;
pub use timezone::{FixedOffset, UTC};
