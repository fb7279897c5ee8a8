use anyhow::Result;
use chrono::Utc;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use super::{FeedChannel, FeedItem, XmlWriter, finish, new_document, text_element};

fn link(writer: &mut XmlWriter, href: &str, rel: &str) -> Result<()> {
    writer.write_event(Event::Empty(
        BytesStart::new("link").with_attributes([("href", href), ("rel", rel)]),
    ))?;
    Ok(())
}

/// Render an Atom 1.0 document.
pub fn render_atom(channel: &FeedChannel, items: &[FeedItem]) -> Result<String> {
    let mut writer = new_document()?;

    writer.write_event(Event::Start(
        BytesStart::new("feed").with_attributes([("xmlns", "http://www.w3.org/2005/Atom")]),
    ))?;
    text_element(&mut writer, "title", &channel.title)?;
    text_element(&mut writer, "subtitle", &channel.description)?;
    link(&mut writer, &channel.link, "alternate")?;
    link(&mut writer, &channel.self_link, "self")?;
    text_element(&mut writer, "id", &channel.link)?;

    let updated = items
        .iter()
        .map(|i| i.updated)
        .max()
        .unwrap_or_else(Utc::now);
    text_element(&mut writer, "updated", &updated.to_rfc3339())?;

    for item in items {
        writer.write_event(Event::Start(BytesStart::new("entry")))?;
        text_element(&mut writer, "title", &item.title)?;
        link(&mut writer, &item.link, "alternate")?;
        text_element(&mut writer, "id", &item.link)?;
        text_element(&mut writer, "published", &item.published.to_rfc3339())?;
        text_element(&mut writer, "updated", &item.updated.to_rfc3339())?;

        writer.write_event(Event::Start(
            BytesStart::new("summary").with_attributes([("type", "html")]),
        ))?;
        writer.write_event(Event::Text(BytesText::new(&item.description)))?;
        writer.write_event(Event::End(BytesEnd::new("summary")))?;

        writer.write_event(Event::End(BytesEnd::new("entry")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("feed")))?;
    finish(writer)
}
