use thiserror::Error;

/// Errors produced while building or rendering a feed.
///
/// Every error fails the single call that triggered it. Rendering happens in
/// memory first, so a failed `write` never leaves a partial document behind
/// in the caller's sink.
#[derive(Debug, Error)]
pub enum FeedError {
    /// A structural invariant of the feed or one of its items was violated,
    /// or the requested output encoding cannot be produced.
    #[error("Feed configuration error: {0}")]
    Configuration(String),

    /// A timestamp, offset or URL handed to a formatter is malformed, or a
    /// value holds a character XML 1.0 cannot carry.
    #[error("Format error: {0}")]
    Format(String),

    /// The XML emitter failed.
    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The output sink failed.
    #[error("Failed to write feed: {0}")]
    Io(#[from] std::io::Error),
}

impl FeedError {
    pub(crate) fn configuration(msg: impl Into<String>) -> Self {
        FeedError::Configuration(msg.into())
    }

    pub(crate) fn format(msg: impl Into<String>) -> Self {
        FeedError::Format(msg.into())
    }
}
