use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::FeedError;

/// Compact XML emitter shared by the RSS and Atom writers.
///
/// - Attributes are written in lexicographic order of their names.
/// - Text content escapes `<`, `>` and `&` only; quotes stay literal.
/// - Elements without text are written as a start/end pair, never
///   self-closed, so `<link href="..."></link>` rather than `<link/>`.
/// - Text and attribute values holding characters XML 1.0 forbids (C0
///   controls other than tab, newline and carriage return, U+FFFE, U+FFFF)
///   are rejected with [`FeedError::Format`].
///
/// The document is built in memory and only handed out whole by
/// [`XmlEmitter::finish`].
pub(crate) struct XmlEmitter {
    writer: Writer<Vec<u8>>,
}

impl XmlEmitter {
    pub(crate) fn new() -> Self {
        Self {
            writer: Writer::new(Vec::new()),
        }
    }

    pub(crate) fn declaration(&mut self, encoding: &str) -> Result<(), FeedError> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some(encoding), None)))?;
        Ok(())
    }

    pub(crate) fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), FeedError> {
        self.writer.write_event(Event::Start(start_tag(name, attrs)?))?;
        Ok(())
    }

    pub(crate) fn end(&mut self, name: &str) -> Result<(), FeedError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// `<name attrs>text</name>`
    pub(crate) fn element(
        &mut self,
        name: &str,
        text: &str,
        attrs: &[(&str, &str)],
    ) -> Result<(), FeedError> {
        check_chars(text, || name.to_string())?;
        self.start(name, attrs)?;
        if !text.is_empty() {
            self.writer
                .write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
        }
        self.end(name)
    }

    /// Writes `element(name, value)` only when `value` is set.
    pub(crate) fn optional(&mut self, name: &str, value: Option<&str>) -> Result<(), FeedError> {
        match value {
            Some(text) => self.element(name, text, &[]),
            None => Ok(()),
        }
    }

    pub(crate) fn finish(self) -> Result<String, FeedError> {
        String::from_utf8(self.writer.into_inner())
            .map_err(|e| FeedError::format(format!("Rendered feed is not valid UTF-8: {e}")))
    }
}

fn start_tag<'a>(
    name: &'a str,
    attrs: &[(&'a str, &'a str)],
) -> Result<BytesStart<'a>, FeedError> {
    let mut sorted = attrs.to_vec();
    sorted.sort_by_key(|(key, _)| *key);

    let mut tag = BytesStart::new(name);
    for (key, value) in sorted {
        check_chars(value, || format!("{name}@{key}"))?;
        tag.push_attribute((key, value));
    }
    Ok(tag)
}

/// `Char` production of XML 1.0; surrogates cannot occur in a `str`.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

fn check_chars(value: &str, field: impl FnOnce() -> String) -> Result<(), FeedError> {
    match value.chars().find(|c| !is_xml_char(*c)) {
        Some(bad) => Err(FeedError::format(format!(
            "<{}> contains U+{:04X}, which XML 1.0 does not allow",
            field(),
            u32::from(bad)
        ))),
        None => Ok(()),
    }
}
