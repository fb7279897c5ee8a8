use anyhow::Result;
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesEnd, BytesStart, Event};

use super::{finish, new_document, text_element};

const CHANGEFREQ: &str = "weekly";
const PRIORITY: &str = "0.9";

/// One `<url>` entry.
#[derive(Debug, Clone)]
pub struct SitemapUrl {
    pub loc: String,
    pub lastmod: DateTime<Utc>,
}

/// Render a sitemaps.org `urlset`.
pub fn render_sitemap(urls: &[SitemapUrl]) -> Result<String> {
    let mut writer = new_document()?;

    writer.write_event(Event::Start(BytesStart::new("urlset").with_attributes([(
        "xmlns",
        "http://www.sitemaps.org/schemas/sitemap/0.9",
    )])))?;

    for url in urls {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        text_element(&mut writer, "loc", &url.loc)?;
        text_element(
            &mut writer,
            "lastmod",
            &url.lastmod.format("%Y-%m-%d").to_string(),
        )?;
        text_element(&mut writer, "changefreq", CHANGEFREQ)?;
        text_element(&mut writer, "priority", PRIORITY)?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;
    finish(writer)
}
