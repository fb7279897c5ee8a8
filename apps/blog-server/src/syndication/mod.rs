//! XML documents for feed readers and crawlers.

mod atom;
mod rss;
mod sitemap;

use std::io::Cursor;

use anyhow::Result;
use chrono::{DateTime, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

pub use atom::render_atom;
pub use rss::render_rss;
pub use sitemap::{SitemapUrl, render_sitemap};

/// Number of posts a feed carries.
pub const FEED_SIZE: u64 = 5;

/// Feed-level metadata.
#[derive(Debug, Clone)]
pub struct FeedChannel {
    pub title: String,
    pub description: String,
    /// Absolute URL of the blog index.
    pub link: String,
    /// Absolute URL of the feed document itself.
    pub self_link: String,
}

#[derive(Debug, Clone)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    /// HTML excerpt.
    pub description: String,
    pub published: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

type XmlWriter = Writer<Cursor<Vec<u8>>>;

fn new_document() -> Result<XmlWriter> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    Ok(writer)
}

fn finish(writer: XmlWriter) -> Result<String> {
    Ok(String::from_utf8(writer.into_inner().into_inner())?)
}

/// `<name>text</name>`, with `text` escaped.
fn text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
