use std::io::Cursor;

use chrono::{TimeZone, Utc};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::content::PostMeta;

pub struct RssChannel<'a> {
    pub ch_title: &'a str,
    pub ch_link: &'a str,
    pub ch_desc: &'a str,
}

impl<'a> RssChannel<'a> {
    pub fn render(&self, posts: &[PostMeta]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        writer.write_event(Event::Start(rss))?;

        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        push_text(&mut writer, "title", self.ch_title)?;
        push_text(&mut writer, "link", self.ch_link)?;
        push_text(&mut writer, "description", self.ch_desc)?;

        for post in posts {
            writer.write_event(Event::Start(BytesStart::new("item")))?;

            push_text(&mut writer, "title", post.title.as_str())?;

            let link = full_link(self.ch_link, post.slug.as_str());
            push_text(&mut writer, "link", link.as_str())?;

            // The slug-derived URL is the canonical identity of a post
            let mut guid_elem = BytesStart::new("guid");
            guid_elem.push_attribute(("isPermaLink", "true"));
            writer.write_event(Event::Start(guid_elem))?;
            writer.write_event(Event::Text(BytesText::new(link.as_str())))?;
            writer.write_event(Event::End(BytesEnd::new("guid")))?;

            push_cdata(&mut writer, "description", post.excerpt.as_str())?;

            let midnight = post.date.and_hms_opt(0, 0, 0).unwrap_or_default();
            let pub_date = Utc.from_utc_datetime(&midnight);
            push_text(&mut writer, "pubDate", &pub_date.to_rfc2822())?;

            writer.write_event(Event::End(BytesEnd::new("item")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(writer.into_inner().into_inner())
    }
}

fn full_link(base_url: &str, slug: &str) -> String {
    format!("{}/blog/{}", base_url.trim_end_matches('/'), slug)
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn push_cdata(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    if text.contains("]]>") {
        let new_text = text.replace("]]>", "]] >");
        writer.write_event(Event::CData(BytesCData::new(&new_text)))?;
    } else {
        writer.write_event(Event::CData(BytesCData::new(text)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str;

    use chrono::NaiveDate;

    use crate::content::{Author, PostMeta};
    use crate::text_utils::format_date;

    use super::*;

    fn create_meta(slug: &str, title: &str, excerpt: &str) -> PostMeta {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        PostMeta {
            slug: slug.to_string(),
            title: title.to_string(),
            formatted_date: format_date(&date),
            date,
            cover_image: "/images/blog/default-cover.jpg".to_string(),
            excerpt: excerpt.to_string(),
            category: "Firmware Dev".to_string(),
            featured: false,
            tags: vec![],
            author: Author {
                name: "Rexin".to_string(),
                image: "/images/author-default.jpg".to_string(),
            },
            reading_time: "2 min read".to_string(),
        }
    }

    #[test]
    fn render_xml() {
        let posts = vec![
            create_meta("rtos-basics", "RTOS Basics", "Scheduling from scratch."),
            create_meta("intro-to-drivers", "Intro to Drivers", "Registers and friends."),
        ];

        let rss = RssChannel {
            ch_title: "Rexin blog posts",
            ch_link: "https://rexin.dev",
            ch_desc: "Firmware and hardware notes",
        };
        let xml = rss.render(&posts).unwrap();
        assert_eq!(str::from_utf8(&xml).unwrap(), EXPECTED);
    }

    const EXPECTED: &str = r##"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>Rexin blog posts</title><link>https://rexin.dev</link><description>Firmware and hardware notes</description><item><title>RTOS Basics</title><link>https://rexin.dev/blog/rtos-basics</link><guid isPermaLink="true">https://rexin.dev/blog/rtos-basics</guid><description><![CDATA[Scheduling from scratch.]]></description><pubDate>Fri, 1 Mar 2024 00:00:00 +0000</pubDate></item><item><title>Intro to Drivers</title><link>https://rexin.dev/blog/intro-to-drivers</link><guid isPermaLink="true">https://rexin.dev/blog/intro-to-drivers</guid><description><![CDATA[Registers and friends.]]></description><pubDate>Fri, 1 Mar 2024 00:00:00 +0000</pubDate></item></channel></rss>"##;
}
