use std::borrow::Cow;
use std::hash::{Hash, Hasher};

use chrono::{Duration, NaiveDateTime, Offset, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp::Timestamp;
use crate::error::FeedError;

/// Largest magnitude accepted for an offset, in minutes (one day, exclusive).
const MAX_OFFSET_MINUTES: i32 = 1439;

/// The zero offset, named "UTC".
pub const UTC: FixedOffset = FixedOffset {
    offset_minutes: 0,
    name: Cow::Borrowed("UTC"),
};

/// A named UTC offset that never changes with the calendar.
///
/// Unlike a regional timezone there are no daylight-saving transitions: every
/// probe (including none at all) reports the same offset. Two offsets compare
/// equal when their minute values match, regardless of name.
///
/// # Examples
///
/// ```
/// use feedgen::util::FixedOffset;
///
/// let cet = FixedOffset::from_minutes(60).unwrap();
/// assert_eq!(cet.name(None), "+0100");
/// assert_eq!(cet.utc_offset(None).num_minutes(), 60);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawFixedOffset")]
pub struct FixedOffset {
    offset_minutes: i16,
    name: Cow<'static, str>,
}

/// Unvalidated serde form; range-checked through `TryFrom`.
#[derive(Deserialize)]
struct RawFixedOffset {
    offset_minutes: i32,
    name: Option<String>,
}

impl TryFrom<RawFixedOffset> for FixedOffset {
    type Error = FeedError;

    fn try_from(raw: RawFixedOffset) -> Result<Self, Self::Error> {
        let offset = FixedOffset::from_minutes(raw.offset_minutes)?;
        Ok(match raw.name {
            Some(name) => offset.with_name(name),
            None => offset,
        })
    }
}

impl FixedOffset {
    /// Creates an offset of `minutes` east of UTC, named `+HHMM`/`-HHMM`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Format`] when `minutes` is outside `[-1439, 1439]`.
    pub fn from_minutes(minutes: i32) -> Result<Self, FeedError> {
        if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&minutes) {
            return Err(FeedError::format(format!(
                "UTC offset of {minutes} minutes is outside +/-{MAX_OFFSET_MINUTES}"
            )));
        }
        let offset_minutes = i16::try_from(minutes)
            .map_err(|e| FeedError::format(format!("UTC offset out of range: {e}")))?;
        Ok(Self {
            offset_minutes,
            name: Cow::Owned(default_name(offset_minutes)),
        })
    }

    /// Creates an offset from a duration that is a whole number of minutes.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Format`] for durations with a sub-minute part or
    /// outside the accepted range.
    pub fn from_duration(delta: Duration) -> Result<Self, FeedError> {
        if Duration::minutes(delta.num_minutes()) != delta {
            return Err(FeedError::format(format!(
                "UTC offset must be a whole number of minutes, got {delta}"
            )));
        }
        let minutes = i32::try_from(delta.num_minutes())
            .map_err(|e| FeedError::format(format!("UTC offset out of range: {e}")))?;
        Self::from_minutes(minutes)
    }

    /// Replaces the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Cow::Owned(name.into());
        self
    }

    pub fn offset_minutes(&self) -> i32 {
        i32::from(self.offset_minutes)
    }

    /// The offset from UTC. The probe is ignored.
    pub fn utc_offset(&self, _probe: Option<NaiveDateTime>) -> Duration {
        Duration::minutes(i64::from(self.offset_minutes))
    }

    /// The display name. The probe is ignored.
    pub fn name(&self, _probe: Option<NaiveDateTime>) -> &str {
        &self.name
    }

    /// Daylight-saving adjustment, always zero.
    pub fn dst(&self, _probe: Option<NaiveDateTime>) -> Duration {
        Duration::zero()
    }

    pub fn to_chrono(&self) -> chrono::FixedOffset {
        // offset_minutes is range-checked on construction
        chrono::FixedOffset::east_opt(i32::from(self.offset_minutes) * 60)
            .unwrap_or_else(|| Utc.fix())
    }

    /// Attaches this offset to a wall-clock time.
    pub fn localize(&self, local: NaiveDateTime) -> Timestamp {
        let offset = self.to_chrono();
        match local.and_local_timezone(offset).single() {
            Some(dt) => Timestamp::Aware(dt),
            // a fixed offset always maps a local time to exactly one instant
            None => Timestamp::Naive(local),
        }
    }
}

impl PartialEq for FixedOffset {
    fn eq(&self, other: &Self) -> bool {
        self.offset_minutes == other.offset_minutes
    }
}

impl Eq for FixedOffset {}

impl Hash for FixedOffset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.offset_minutes.hash(state);
    }
}

fn default_name(offset_minutes: i16) -> String {
    let sign = if offset_minutes < 0 { '-' } else { '+' };
    let minutes = offset_minutes.unsigned_abs();
    format!("{}{:02}{:02}", sign, minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn probe() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2008, 11, 14)
            .unwrap()
            .and_hms_opt(13, 37, 0)
            .unwrap()
    }

    #[test]
    fn test_from_duration_reports_same_delta() {
        let delta = Duration::hours(1);
        let tz = FixedOffset::from_duration(delta).unwrap();
        assert_eq!(tz.utc_offset(None), delta);
        assert_eq!(tz.offset_minutes(), 60);
    }

    #[test]
    fn test_offset_ignores_probe() {
        let tz = FixedOffset::from_minutes(-330).unwrap();
        assert_eq!(tz.utc_offset(None), tz.utc_offset(Some(probe())));
        assert_eq!(tz.dst(Some(probe())), Duration::zero());
        assert_eq!(tz.dst(None), Duration::zero());
    }

    #[test]
    fn test_default_names() {
        assert_eq!(FixedOffset::from_minutes(60).unwrap().name(None), "+0100");
        assert_eq!(FixedOffset::from_minutes(-330).unwrap().name(None), "-0530");
        assert_eq!(FixedOffset::from_minutes(0).unwrap().name(None), "+0000");
    }

    #[test]
    fn test_custom_name() {
        let tz = FixedOffset::from_minutes(0).unwrap().with_name("tzname");
        assert_eq!(tz.name(Some(probe())), "tzname");
    }

    #[test]
    fn test_utc_constant() {
        assert_eq!(UTC.name(None), "UTC");
        assert_eq!(UTC.offset_minutes(), 0);
        assert_eq!(UTC, FixedOffset::from_minutes(0).unwrap());
    }

    #[test]
    fn test_equality_and_hash_ignore_name() {
        let a = FixedOffset::from_minutes(120).unwrap();
        let b = FixedOffset::from_minutes(120).unwrap().with_name("EET");
        assert_eq!(a, b);

        let set: HashSet<FixedOffset> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(matches!(
            FixedOffset::from_minutes(1440),
            Err(FeedError::Format(_))
        ));
        assert!(FixedOffset::from_minutes(-1440).is_err());
        assert!(FixedOffset::from_minutes(1439).is_ok());
        assert!(FixedOffset::from_minutes(-1439).is_ok());
    }

    #[test]
    fn test_sub_minute_duration_rejected() {
        assert!(FixedOffset::from_duration(Duration::seconds(90)).is_err());
    }

    #[test]
    fn test_serialization_keeps_name() {
        let tz = FixedOffset::from_minutes(0).unwrap().with_name("tzname");
        let json = serde_json::to_string(&tz).unwrap();
        let restored: FixedOffset = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.name(None), "tzname");
        assert_eq!(restored, tz);
    }

    #[test]
    fn test_deserialization_validates_range() {
        let result: Result<FixedOffset, _> =
            serde_json::from_str(r#"{"offset_minutes": 5000, "name": "bogus"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_localize_attaches_offset() {
        let tz = FixedOffset::from_minutes(120).unwrap();
        match tz.localize(probe()) {
            Timestamp::Aware(dt) => {
                assert_eq!(dt.offset().local_minus_utc(), 7200);
                assert_eq!(dt.naive_local(), probe());
            }
            other => panic!("expected aware timestamp, got {other:?}"),
        }
    }
}
