use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Deserialize;

use crate::error::FeedError;

/// A point in time as handed to the feed by the caller.
///
/// Feeds accept three shapes of time value and keep them as given, because
/// the formatters render them differently (an unknown zone is not the same
/// as UTC in RFC 2822). For ordering, every shape is normalized to UTC:
///
/// - `Date`: midnight UTC of that day
/// - `Naive`: already UTC, no implicit localization
/// - `Aware`: its own offset
///
/// Deserializes from the string forms accepted by [`FromStr`] and from native
/// TOML dates and date-times (`pubdate = 2017-01-01`). TOML local times
/// without a date are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawTimestamp")]
pub enum Timestamp {
    Date(NaiveDate),
    Naive(NaiveDateTime),
    Aware(DateTime<chrono::FixedOffset>),
}

impl Timestamp {
    /// The current instant, in UTC.
    pub fn now() -> Self {
        Timestamp::Aware(Utc::now().into())
    }

    /// Normalizes to a UTC instant for comparison.
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            Timestamp::Date(date) => date.and_time(NaiveTime::MIN).and_utc(),
            Timestamp::Naive(naive) => naive.and_utc(),
            Timestamp::Aware(dt) => dt.with_timezone(&Utc),
        }
    }

    /// Wall-clock time in the value's own zone; midnight for dates.
    pub fn local(&self) -> NaiveDateTime {
        match self {
            Timestamp::Date(date) => date.and_time(NaiveTime::MIN),
            Timestamp::Naive(naive) => *naive,
            Timestamp::Aware(dt) => dt.naive_local(),
        }
    }

    /// Calendar date in the value's own zone.
    pub fn date(&self) -> NaiveDate {
        self.local().date()
    }

    /// Seconds east of UTC, or `None` when the zone is unspecified.
    pub fn offset_seconds(&self) -> Option<i32> {
        match self {
            Timestamp::Aware(dt) => Some(dt.offset().local_minus_utc()),
            Timestamp::Date(_) | Timestamp::Naive(_) => None,
        }
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(date: NaiveDate) -> Self {
        Timestamp::Date(date)
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(naive: NaiveDateTime) -> Self {
        Timestamp::Naive(naive)
    }
}

impl From<DateTime<chrono::FixedOffset>> for Timestamp {
    fn from(dt: DateTime<chrono::FixedOffset>) -> Self {
        Timestamp::Aware(dt)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp::Aware(dt.into())
    }
}

/// Parses `2017-01-01`, `2017-01-01T09:30:00` or an RFC 3339 date-time.
impl FromStr for Timestamp {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Timestamp::Aware(dt));
        }
        if let Ok(naive) = s.parse::<NaiveDateTime>() {
            return Ok(Timestamp::Naive(naive));
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Timestamp::Date(date));
        }
        Err(FeedError::format(format!("Unrecognized timestamp: {s:?}")))
    }
}

impl TryFrom<String> for Timestamp {
    type Error = FeedError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Toml(toml::value::Datetime),
}

impl TryFrom<RawTimestamp> for Timestamp {
    type Error = FeedError;

    fn try_from(raw: RawTimestamp) -> Result<Self, Self::Error> {
        match raw {
            RawTimestamp::Text(s) => s.parse(),
            // Datetime displays as RFC 3339 with a `T` separator
            RawTimestamp::Toml(dt) => dt.to_string().parse(),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Timestamp::Naive(naive) => write!(f, "{}", naive.format("%Y-%m-%dT%H:%M:%S")),
            Timestamp::Aware(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}
