use url::Url;

use super::timestamp::Timestamp;
use crate::error::FeedError;

/// Derives a `tag:` URI (RFC 4151) from an item link and a date.
///
/// The authority is the link's host without any port, the date is the
/// calendar day of `date` in its own zone, and the specific part is the path
/// followed by `/fragment` when the link has a fragment.
///
/// The path is taken after WHATWG URL parsing, so it is normalized: a bare
/// host gets the path `/`, `.` and `..` segments are resolved, and spaces or
/// non-ASCII characters are percent-encoded. The same link therefore always
/// yields the same URI however it was spelled.
///
/// # Errors
///
/// Returns [`FeedError::Format`] if `url` is not an absolute URL with a host.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use feedgen::util::{tag_uri, Timestamp};
///
/// let date = Timestamp::from(NaiveDate::from_ymd_opt(2004, 10, 25).unwrap());
/// assert_eq!(
///     tag_uri("http://example.org/foo/bar#headline", &date).unwrap(),
///     "tag:example.org,2004-10-25:/foo/bar/headline"
/// );
/// ```
pub fn tag_uri(url: &str, date: &Timestamp) -> Result<String, FeedError> {
    let parsed = Url::parse(url)
        .map_err(|e| FeedError::format(format!("Cannot derive tag URI from {url:?}: {e}")))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| FeedError::format(format!("Cannot derive tag URI from {url:?}: no host")))?;
    let day = date.date().format("%Y-%m-%d");

    Ok(match parsed.fragment() {
        Some(fragment) => format!("tag:{},{}:{}/{}", host, day, parsed.path(), fragment),
        None => format!("tag:{},{}:{}", host, day, parsed.path()),
    })
}
