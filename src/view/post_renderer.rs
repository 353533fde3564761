use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::{Post, PostMeta};
use crate::text_utils::slugify;
use crate::view::{post_cards, PostCard};

#[derive(ramhorns::Content)]
struct TagItem {
    tag: String,
    link: String,
}

#[derive(ramhorns::Content)]
struct PostPage {
    title: String,
    category: String,
    category_link: String,
    date: String,
    reading_time: String,
    author_name: String,
    author_image: String,
    cover_image: String,
    content: String,
    tags: Vec<TagItem>,
    related: Vec<PostCard>,
    has_related: bool,
    show_greeting: bool,
    show_floating_icons: bool,
}

pub struct PostRenderer<'a> {
    template: Template<'a>,
}

impl PostRenderer<'_> {
    pub fn new(view_tpl_src: &str) -> io::Result<PostRenderer> {
        let template = match Template::new(view_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("Error parsing post view template: {}", e),
                ))
            }
        };

        Ok(PostRenderer { template })
    }

    pub fn render(&self, post: &Post, related: &[PostMeta]) -> String {
        let meta = &post.meta;
        let tags = meta
            .tags
            .iter()
            .map(|tag| TagItem {
                link: format!("/blog/tag/{}", slugify(tag)),
                tag: tag.clone(),
            })
            .collect();

        // Embedded component tags come back out-of-band, pinned to the
        // top of the article rather than their original position.
        let has_embed = |name: &str| post.embeds.iter().any(|embed| embed.name == name);

        self.template.render(&PostPage {
            title: meta.title.clone(),
            category: meta.category.clone(),
            category_link: format!("/blog/category/{}", slugify(&meta.category)),
            date: meta.formatted_date.clone(),
            reading_time: meta.reading_time.clone(),
            author_name: meta.author.name.clone(),
            author_image: meta.author.image.clone(),
            cover_image: meta.cover_image.clone(),
            content: post.content_html.clone(),
            tags,
            related: post_cards(related),
            has_related: !related.is_empty(),
            show_greeting: has_embed("AnimatedGreeting"),
            show_floating_icons: has_embed("FloatingIcons"),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::content::{Author, EmbedTag, Post, PostMeta};
    use crate::text_utils::format_date;

    use super::*;

    fn sample_post() -> Post {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        Post {
            meta: PostMeta {
                slug: "sample".to_string(),
                title: "<Sample> Post".to_string(),
                formatted_date: format_date(&date),
                date,
                cover_image: "/images/blog/default-cover.jpg".to_string(),
                excerpt: "".to_string(),
                category: "Firmware Dev".to_string(),
                featured: false,
                tags: vec!["rust".to_string()],
                author: Author {
                    name: "Rexin".to_string(),
                    image: "/images/author-default.jpg".to_string(),
                },
                reading_time: "1 min read".to_string(),
            },
            content_html: "<p>body</p>".to_string(),
            embeds: vec![EmbedTag {
                name: "AnimatedGreeting".to_string(),
                attributes: vec![],
                offset: 0,
            }],
        }
    }

    #[test]
    fn test_render_post_page() {
        let template_src = r##"
TITLE=[{{title}}]
CATEGORY=[{{category}} -> {{category_link}}]
DATE=[{{date}}]
READING=[{{reading_time}}]
AUTHOR=[{{author_name}}]
TAGS=[{{#tags}}({{tag}}){{/tags}}]
GREETING=[{{#show_greeting}}yes{{/show_greeting}}]
ICONS=[{{#show_floating_icons}}yes{{/show_floating_icons}}]
CONTENT=[{{{content}}}]
"##;
        let renderer = PostRenderer::new(template_src).unwrap();
        let rendered = renderer.render(&sample_post(), &[]);

        assert!(rendered.contains("TITLE=[&lt;Sample&gt; Post]"));
        assert!(rendered.contains("CATEGORY=[Firmware Dev -> /blog/category/firmware-dev]"));
        assert!(rendered.contains("DATE=[Jan 2, 2024]"));
        assert!(rendered.contains("READING=[1 min read]"));
        assert!(rendered.contains("TAGS=[(rust)]"));
        assert!(rendered.contains("GREETING=[yes]"));
        assert!(rendered.contains("ICONS=[]"));
        assert!(rendered.contains("CONTENT=[<p>body</p>]"));
    }
}
