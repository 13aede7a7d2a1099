//! RFC 2822 and RFC 3339 rendering.
//!
//! Month and weekday names come from fixed English tables so the output
//! never depends on the process locale.

use chrono::{Datelike, Timelike};

use super::timestamp::Timestamp;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Formats a timestamp per RFC 2822 section 3.3.
///
/// Values without a zone (dates and naive date-times) carry `-0000`, the RFC's
/// marker for "local time, offset unknown". Dates render at `00:00:00`.
///
/// ```
/// use chrono::NaiveDate;
/// use feedgen::util::{rfc2822_date, Timestamp};
///
/// let date = Timestamp::from(NaiveDate::from_ymd_opt(2008, 11, 14).unwrap());
/// assert_eq!(rfc2822_date(&date), "Fri, 14 Nov 2008 00:00:00 -0000");
/// ```
pub fn rfc2822_date(ts: &Timestamp) -> String {
    let local = ts.local();
    let offset = match ts.offset_seconds() {
        Some(seconds) => format_offset(seconds, ""),
        None => "-0000".to_string(),
    };
    format!(
        "{}, {:02} {} {:04} {:02}:{:02}:{:02} {}",
        WEEKDAYS[local.weekday().num_days_from_monday() as usize],
        local.day(),
        MONTHS[local.month0() as usize],
        local.year(),
        local.hour(),
        local.minute(),
        local.second(),
        offset
    )
}

/// Formats a timestamp per RFC 3339.
///
/// Values without a zone are taken as UTC and end in `Z`. Aware values keep
/// their own offset as `+HH:MM`, `+00:00` included.
pub fn rfc3339_date(ts: &Timestamp) -> String {
    let local = ts.local();
    let offset = match ts.offset_seconds() {
        Some(seconds) => format_offset(seconds, ":"),
        None => "Z".to_string(),
    };
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{}",
        local.year(),
        local.month(),
        local.day(),
        local.hour(),
        local.minute(),
        local.second(),
        offset
    )
}

fn format_offset(seconds: i32, separator: &str) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.unsigned_abs() / 60;
    format!("{}{:02}{}{:02}", sign, minutes / 60, separator, minutes % 60)
}
