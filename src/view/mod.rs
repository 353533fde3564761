use crate::content::PostMeta;
use crate::text_utils::slugify;

pub mod index_renderer;
pub mod list_renderer;
pub mod post_renderer;
pub mod rss_renderer;

/// One entry in a post grid, shared by the home, listing, category, tag
/// and related-posts sections.
#[derive(ramhorns::Content)]
pub struct PostCard {
    pub link: String,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub category_link: String,
    pub date: String,
    pub reading_time: String,
    pub cover_image: String,
}

pub fn post_card(meta: &PostMeta) -> PostCard {
    PostCard {
        link: format!("/blog/{}", meta.slug),
        title: meta.title.clone(),
        excerpt: meta.excerpt.clone(),
        category: meta.category.clone(),
        category_link: format!("/blog/category/{}", slugify(&meta.category)),
        date: meta.formatted_date.clone(),
        reading_time: meta.reading_time.clone(),
        cover_image: meta.cover_image.clone(),
    }
}

pub fn post_cards(metas: &[PostMeta]) -> Vec<PostCard> {
    metas.iter().map(post_card).collect()
}
