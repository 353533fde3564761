use chrono::NaiveDate;

pub mod content_file;
pub mod embeds;
pub mod front_matter;
pub mod markdown_renderer;
pub mod reading_time;

pub use embeds::EmbedTag;

#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub name: String,
    pub image: String,
}

/// Listing view of a post. Cheap to build: front matter only, no markdown
/// rendering involved.
#[derive(Debug, Clone, PartialEq)]
pub struct PostMeta {
    pub slug: String,
    pub title: String,
    pub date: NaiveDate,
    pub formatted_date: String,
    pub cover_image: String,
    pub excerpt: String,
    pub category: String,
    pub featured: bool,
    pub tags: Vec<String>,
    pub author: Author,
    pub reading_time: String,
}

/// Full view of a post, built on demand for the single-post page.
#[derive(Debug, Clone)]
pub struct Post {
    pub meta: PostMeta,
    pub content_html: String,
    pub embeds: Vec<EmbedTag>,
}
