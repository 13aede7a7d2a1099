//! RSS 2.0 layout.

use super::model::{Feed, FeedItem};
use super::xml::XmlEmitter;
use crate::error::FeedError;
use crate::util::rfc2822_date;

pub(crate) const CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
const DC_NS: &str = "http://purl.org/dc/elements/1.1/";

/// Writes `<rss>` and everything below it.
pub(crate) fn write_rss(feed: &Feed, xml: &mut XmlEmitter) -> Result<(), FeedError> {
    // xmlns:atom is declared even without a self link
    xml.start("rss", &[("version", "2.0"), ("xmlns:atom", ATOM_NS)])?;
    xml.start("channel", &[])?;
    write_channel_elements(feed, xml)?;
    for item in feed.items() {
        write_item(item, xml)?;
    }
    xml.end("channel")?;
    xml.end("rss")
}

fn write_channel_elements(feed: &Feed, xml: &mut XmlEmitter) -> Result<(), FeedError> {
    let config = feed.config();

    xml.element("title", &config.title, &[])?;
    xml.element("link", &config.link, &[])?;
    xml.element("description", config.description.as_deref().unwrap_or(""), &[])?;
    if let Some(feed_url) = &config.feed_url {
        xml.element("atom:link", "", &[("href", feed_url.as_str()), ("rel", "self")])?;
    }
    xml.optional("language", config.language.as_deref())?;
    for category in &config.categories {
        xml.element("category", category, &[])?;
    }
    xml.optional("copyright", config.feed_copyright.as_deref())?;
    if let Some(latest) = feed.latest_item_date() {
        xml.element("lastBuildDate", &rfc2822_date(latest), &[])?;
    }
    xml.optional("ttl", config.ttl.as_deref())
}

fn write_item(item: &FeedItem, xml: &mut XmlEmitter) -> Result<(), FeedError> {
    xml.start("item", &[])?;
    xml.element("title", &item.title, &[])?;
    xml.element("link", &item.link, &[])?;
    xml.optional("description", item.description.as_deref())?;
    write_author(item, xml)?;
    for category in &item.categories {
        xml.element("category", category, &[])?;
    }
    xml.optional("comments", item.comments.as_deref())?;

    // Without a unique_id the guid is the link itself, which RSS already
    // treats as a permalink.
    let permalink = match (&item.unique_id, item.unique_id_is_permalink) {
        (None, _) => None,
        (Some(_), Some(true)) => Some("true"),
        (Some(_), _) => Some("false"),
    };
    match permalink {
        Some(flag) => xml.element("guid", item.guid(), &[("isPermaLink", flag)])?,
        None => xml.element("guid", item.guid(), &[])?,
    }

    if let Some(pubdate) = &item.pubdate {
        xml.element("pubDate", &rfc2822_date(pubdate), &[])?;
    }
    xml.optional("ttl", item.ttl.as_deref())?;
    if let Some(enclosure) = &item.enclosure {
        xml.element(
            "enclosure",
            "",
            &[
                ("url", enclosure.url.as_str()),
                ("length", enclosure.length.as_str()),
                ("type", enclosure.mime_type.as_str()),
            ],
        )?;
    }
    xml.end("item")
}

/// RSS `<author>` must hold an email address; a bare name goes to
/// `<dc:creator>` instead.
fn write_author(item: &FeedItem, xml: &mut XmlEmitter) -> Result<(), FeedError> {
    match (&item.author_name, &item.author_email) {
        (Some(name), Some(email)) => xml.element("author", &format!("{email} ({name})"), &[]),
        (None, Some(email)) => xml.element("author", email, &[]),
        (Some(name), None) => xml.element("dc:creator", name, &[("xmlns:dc", DC_NS)]),
        (None, None) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::model::{Enclosure, FeedConfig};
    use crate::util::Timestamp;

    fn render(feed: &Feed) -> String {
        let mut xml = XmlEmitter::new();
        write_rss(feed, &mut xml).unwrap();
        xml.finish().unwrap()
    }

    fn feed_with(item: FeedItem) -> Feed {
        let mut feed = Feed::new(FeedConfig::new("title", "/link/")).unwrap();
        feed.add_item(item).unwrap();
        feed
    }

    #[test]
    fn test_channel_without_items() {
        let feed = Feed::new(FeedConfig {
            description: Some("descr".into()),
            language: Some("en".into()),
            ..FeedConfig::new("title", "/link/")
        })
        .unwrap();
        assert_eq!(
            render(&feed),
            concat!(
                r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom"><channel>"#,
                "<title>title</title><link>/link/</link><description>descr</description>",
                "<language>en</language></channel></rss>"
            )
        );
    }

    #[test]
    fn test_missing_description_renders_empty_element() {
        let feed = Feed::new(FeedConfig::new("title", "/link/")).unwrap();
        assert!(render(&feed).contains("<description></description>"));
    }

    #[test]
    fn test_self_link_only_with_feed_url() {
        let without = Feed::new(FeedConfig::new("title", "/link/")).unwrap();
        let out = render(&without);
        assert!(!out.contains("<atom:link"));
        assert!(!out.contains("rel=\"self\""));

        let with = Feed::new(FeedConfig {
            feed_url: Some("/feed/".into()),
            ..FeedConfig::new("title", "/link/")
        })
        .unwrap();
        let out = render(&with);
        assert_eq!(out.matches("rel=\"self\"").count(), 1);
        assert!(out.contains(r#"<atom:link href="/feed/" rel="self"></atom:link>"#));
    }

    #[test]
    fn test_guid_defaults_to_link_without_attribute() {
        let out = render(&feed_with(FeedItem::new("Hello", "/hello/")));
        assert!(out.contains("<guid>/hello/</guid>"));
    }

    #[test]
    fn test_guid_not_permalink() {
        let out = render(&feed_with(FeedItem {
            unique_id: Some("urn:uuid:42".into()),
            ..FeedItem::new("Hello", "/hello/")
        }));
        assert!(out.contains(r#"<guid isPermaLink="false">urn:uuid:42</guid>"#));
    }

    #[test]
    fn test_guid_permalink() {
        let out = render(&feed_with(FeedItem {
            unique_id: Some("https://example.org/hello/".into()),
            unique_id_is_permalink: Some(true),
            ..FeedItem::new("Hello", "/hello/")
        }));
        assert!(out.contains(r#"<guid isPermaLink="true">https://example.org/hello/</guid>"#));
    }

    #[test]
    fn test_author_variants() {
        let both = render(&feed_with(FeedItem {
            author_name: Some("John Doe".into()),
            author_email: Some("john@example.org".into()),
            ..FeedItem::new("Hello", "/hello/")
        }));
        assert!(both.contains("<author>john@example.org (John Doe)</author>"));

        let name_only = render(&feed_with(FeedItem {
            author_name: Some("John Doe".into()),
            ..FeedItem::new("Hello", "/hello/")
        }));
        assert!(name_only.contains(
            r#"<dc:creator xmlns:dc="http://purl.org/dc/elements/1.1/">John Doe</dc:creator>"#
        ));
    }

    #[test]
    fn test_item_element_order() {
        let pubdate: Timestamp = "2008-11-14T13:37:00".parse().unwrap();
        let out = render(&feed_with(FeedItem {
            description: Some("<p>Hi & bye</p>".into()),
            categories: vec!["b".into(), "a".into()],
            comments: Some("/hello/#comments".into()),
            pubdate: Some(pubdate),
            enclosure: Some(Enclosure::new("/a.mp3", "1234", "audio/mpeg")),
            ..FeedItem::new("Hello", "/hello/")
        }));
        assert!(out.contains(concat!(
            "<item><title>Hello</title><link>/hello/</link>",
            "<description>&lt;p&gt;Hi &amp; bye&lt;/p&gt;</description>",
            "<category>b</category><category>a</category>",
            "<comments>/hello/#comments</comments><guid>/hello/</guid>",
            "<pubDate>Fri, 14 Nov 2008 13:37:00 -0000</pubDate>",
            r#"<enclosure length="1234" type="audio/mpeg" url="/a.mp3"></enclosure></item>"#
        )));
        assert!(out.contains("<lastBuildDate>Fri, 14 Nov 2008 13:37:00 -0000</lastBuildDate>"));
    }

    #[test]
    fn test_no_last_build_date_without_dated_items() {
        let out = render(&feed_with(FeedItem::new("Hello", "/hello/")));
        assert!(!out.contains("lastBuildDate"));
    }
}
