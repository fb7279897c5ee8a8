use anyhow::Result;
use quick_xml::events::{BytesEnd, BytesStart, Event};

use super::{FeedChannel, FeedItem, finish, new_document, text_element};

/// Render an RSS 2.0 document.
pub fn render_rss(channel: &FeedChannel, items: &[FeedItem]) -> Result<String> {
    let mut writer = new_document()?;

    writer.write_event(Event::Start(
        BytesStart::new("rss").with_attributes([
            ("version", "2.0"),
            ("xmlns:atom", "http://www.w3.org/2005/Atom"),
        ]),
    ))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    text_element(&mut writer, "title", &channel.title)?;
    text_element(&mut writer, "link", &channel.link)?;
    text_element(&mut writer, "description", &channel.description)?;
    writer.write_event(Event::Empty(BytesStart::new("atom:link").with_attributes([
        ("href", channel.self_link.as_str()),
        ("rel", "self"),
    ])))?;
    if let Some(latest) = items.iter().map(|i| i.published).max() {
        text_element(&mut writer, "lastBuildDate", &latest.to_rfc2822())?;
    }

    for item in items {
        writer.write_event(Event::Start(BytesStart::new("item")))?;
        text_element(&mut writer, "title", &item.title)?;
        text_element(&mut writer, "link", &item.link)?;
        text_element(&mut writer, "description", &item.description)?;
        text_element(&mut writer, "pubDate", &item.published.to_rfc2822())?;
        text_element(&mut writer, "guid", &item.link)?;
        writer.write_event(Event::End(BytesEnd::new("item")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;
    finish(writer)
}
