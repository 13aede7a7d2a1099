//! Atom 1.0 layout.

use super::model::{Feed, FeedItem};
use super::xml::XmlEmitter;
use crate::error::FeedError;
use crate::util::{rfc3339_date, tag_uri, Timestamp};

pub(crate) const CONTENT_TYPE: &str = "application/atom+xml; charset=utf-8";

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// Writes `<feed>` and everything below it.
pub(crate) fn write_atom(feed: &Feed, xml: &mut XmlEmitter) -> Result<(), FeedError> {
    let config = feed.config();
    let latest = feed.latest_post_date();

    match &config.language {
        Some(lang) => xml.start("feed", &[("xmlns", ATOM_NS), ("xml:lang", lang.as_str())])?,
        None => xml.start("feed", &[("xmlns", ATOM_NS)])?,
    }

    xml.element("title", &config.title, &[])?;
    xml.element("link", "", &[("rel", "alternate"), ("href", config.link.as_str())])?;
    if let Some(feed_url) = &config.feed_url {
        xml.element("link", "", &[("rel", "self"), ("href", feed_url.as_str())])?;
    }
    xml.element("id", config.feed_guid.as_deref().unwrap_or(&config.link), &[])?;
    xml.element("updated", &rfc3339_date(&latest), &[])?;
    write_person(
        xml,
        config.author_name.as_deref(),
        config.author_email.as_deref(),
        config.author_link.as_deref(),
    )?;
    xml.optional(
        "subtitle",
        config.subtitle.as_deref().or(config.description.as_deref()),
    )?;
    for category in &config.categories {
        xml.element("category", "", &[("term", category.as_str())])?;
    }
    xml.optional("rights", config.feed_copyright.as_deref())?;

    for item in feed.items() {
        write_entry(item, &latest, xml)?;
    }
    xml.end("feed")
}

fn write_entry(
    item: &FeedItem,
    latest: &Timestamp,
    xml: &mut XmlEmitter,
) -> Result<(), FeedError> {
    xml.start("entry", &[])?;
    xml.element("title", &item.title, &[])?;
    xml.element("link", "", &[("rel", "alternate"), ("href", item.link.as_str())])?;
    if let Some(pubdate) = &item.pubdate {
        xml.element("published", &rfc3339_date(pubdate), &[])?;
    }
    // Atom requires <updated> on every entry
    let updated = item.effective_date().unwrap_or(latest);
    xml.element("updated", &rfc3339_date(updated), &[])?;
    write_person(
        xml,
        item.author_name.as_deref(),
        item.author_email.as_deref(),
        item.author_link.as_deref(),
    )?;
    xml.element("id", &entry_id(item)?, &[])?;
    if let Some(description) = &item.description {
        xml.element("summary", description, &[("type", "html")])?;
    }
    if let Some(enclosure) = &item.enclosure {
        xml.element(
            "link",
            "",
            &[
                ("rel", "enclosure"),
                ("href", enclosure.url.as_str()),
                ("length", enclosure.length.as_str()),
                ("type", enclosure.mime_type.as_str()),
            ],
        )?;
    }
    for category in &item.categories {
        xml.element("category", "", &[("term", category.as_str())])?;
    }
    xml.optional("rights", item.item_copyright.as_deref())?;
    xml.end("entry")
}

/// An explicit `unique_id` always wins. Otherwise a tag URI is derived from
/// the link and the item's own date; undated items fall back to the link.
fn entry_id(item: &FeedItem) -> Result<String, FeedError> {
    if let Some(id) = &item.unique_id {
        return Ok(id.clone());
    }
    match item.pubdate.as_ref().or(item.updateddate.as_ref()) {
        Some(date) => tag_uri(&item.link, date),
        None => Ok(item.link.clone()),
    }
}

/// `<author>` is written only when a name is known.
fn write_person(
    xml: &mut XmlEmitter,
    name: Option<&str>,
    email: Option<&str>,
    uri: Option<&str>,
) -> Result<(), FeedError> {
    let Some(name) = name else {
        return Ok(());
    };
    xml.start("author", &[])?;
    xml.element("name", name, &[])?;
    xml.optional("email", email)?;
    xml.optional("uri", uri)?;
    xml.end("author")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::model::{Enclosure, FeedConfig};

    fn render(feed: &Feed) -> String {
        let mut xml = XmlEmitter::new();
        write_atom(feed, &mut xml).unwrap();
        xml.finish().unwrap()
    }

    fn feed() -> Feed {
        Feed::new(FeedConfig::new("title", "https://example.org/")).unwrap()
    }

    #[test]
    fn test_root_without_language() {
        let out = render(&feed());
        assert!(out.starts_with(r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>title</title>"#));
        assert!(out.contains(r#"<link href="https://example.org/" rel="alternate"></link>"#));
        assert!(out.contains("<id>https://example.org/</id>"));
        assert!(out.contains("<updated>"));
        assert!(!out.contains("rel=\"self\""));
    }

    #[test]
    fn test_root_with_language_and_self_link() {
        let feed = Feed::new(FeedConfig {
            language: Some("en".into()),
            feed_url: Some("/feed/".into()),
            ..FeedConfig::new("title", "https://example.org/")
        })
        .unwrap();
        let out = render(&feed);
        assert!(out.starts_with(r#"<feed xml:lang="en" xmlns="http://www.w3.org/2005/Atom">"#));
        assert_eq!(out.matches("rel=\"self\"").count(), 1);
        assert!(out.contains(r#"<link href="/feed/" rel="self"></link>"#));
    }

    #[test]
    fn test_subtitle_absent_when_no_description() {
        assert!(!render(&feed()).contains("<subtitle>"));

        let described = Feed::new(FeedConfig {
            description: Some("About".into()),
            ..FeedConfig::new("title", "https://example.org/")
        })
        .unwrap();
        assert!(render(&described).contains("<subtitle>About</subtitle>"));
    }

    #[test]
    fn test_feed_guid_overrides_id() {
        let feed = Feed::new(FeedConfig {
            feed_guid: Some("urn:uuid:feed".into()),
            ..FeedConfig::new("title", "https://example.org/")
        })
        .unwrap();
        assert!(render(&feed).contains("<id>urn:uuid:feed</id>"));
    }

    #[test]
    fn test_entry_id_from_tag_uri() {
        let mut feed = feed();
        feed.add_item(FeedItem {
            pubdate: Some("2004-10-25".parse().unwrap()),
            ..FeedItem::new("Hello", "http://example.org/foo/bar#headline")
        })
        .unwrap();
        assert!(render(&feed).contains("<id>tag:example.org,2004-10-25:/foo/bar/headline</id>"));
    }

    #[test]
    fn test_entry_explicit_unique_id_preferred() {
        let mut feed = feed();
        feed.add_item(FeedItem {
            unique_id: Some("urn:uuid:entry".into()),
            unique_id_is_permalink: Some(false),
            pubdate: Some("2004-10-25".parse().unwrap()),
            ..FeedItem::new("Hello", "http://example.org/foo/bar#headline")
        })
        .unwrap();
        assert!(render(&feed).contains("<id>urn:uuid:entry</id>"));
    }

    #[test]
    fn test_entry_undated_uses_link_and_feed_updated() {
        let mut feed = feed();
        feed.add_item(FeedItem::new("Hello", "/relative/")).unwrap();
        let out = render(&feed);
        assert!(out.contains("<id>/relative/</id>"));
        assert!(!out.contains("<published>"));
        assert_eq!(out.matches("<updated>").count(), 2);
    }

    #[test]
    fn test_entry_relative_link_with_date_fails() {
        let mut feed = feed();
        feed.add_item(FeedItem {
            pubdate: Some("2004-10-25".parse().unwrap()),
            ..FeedItem::new("Hello", "/relative/")
        })
        .unwrap();
        let mut xml = XmlEmitter::new();
        let err = write_atom(&feed, &mut xml).unwrap_err();
        assert!(matches!(err, FeedError::Format(_)));
    }

    #[test]
    fn test_entry_author_and_enclosure() {
        let mut feed = feed();
        feed.add_item(FeedItem {
            unique_id: Some("urn:uuid:1".into()),
            author_name: Some("Jane".into()),
            author_link: Some("https://example.org/~jane".into()),
            enclosure: Some(Enclosure::new("https://example.org/a.mp3", "99", "audio/mpeg")),
            item_copyright: Some("CC-BY".into()),
            ..FeedItem::new("Hello", "https://example.org/hello/")
        })
        .unwrap();
        let out = render(&feed);
        assert!(out.contains(
            "<author><name>Jane</name><uri>https://example.org/~jane</uri></author><id>urn:uuid:1</id>"
        ));
        assert!(out.contains(concat!(
            r#"<link href="https://example.org/a.mp3" length="99" rel="enclosure" "#,
            r#"type="audio/mpeg"></link>"#
        )));
        assert!(out.contains("<rights>CC-BY</rights></entry>"));
    }
}
