use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use spdlog::warn;

use crate::content::content_file::{ContentFile, ContentFormat};
use crate::content::front_matter::FrontMatter;
use crate::content::markdown_renderer::render_body;
use crate::content::reading_time::ReadingTime;
use crate::content::{Author, Post, PostMeta};
use crate::text_utils::{format_date, slugify};

const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Site-wide fallbacks applied when a content file leaves a field out.
#[derive(Clone)]
pub struct PostDefaults {
    pub author: Author,
    pub cover_image: String,
}

/// Read-only view over a directory of `.md`/`.mdx` content files. Every
/// call re-enumerates the directory; callers that serve several lookups
/// per page wrap results in a `ContentCache`.
pub struct PostRepository {
    content_dir: PathBuf,
    defaults: PostDefaults,
}

impl PostRepository {
    pub fn new(content_dir: PathBuf, defaults: PostDefaults) -> PostRepository {
        PostRepository {
            content_dir,
            defaults,
        }
    }

    /// Slugs with a loadable post behind them, listing order.
    pub fn list_slugs(&self) -> Vec<String> {
        self.list_all().into_iter().map(|meta| meta.slug).collect()
    }

    /// All valid posts, newest first. Posts with an equal date keep their
    /// enumeration order. A file that cannot be parsed is logged and
    /// skipped, never aborting the listing.
    pub fn list_all(&self) -> Vec<PostMeta> {
        let mut metas = vec![];
        for (slug, path) in self.enumerate() {
            let built = ContentFile::from_file(slug, path.clone())
                .map_err(anyhow::Error::from)
                .and_then(|file| self.build_meta(&file).map(|(meta, _body)| meta));
            match built {
                Ok(meta) => metas.push(meta),
                Err(e) => warn!("Skipping content file {}: {:#}", path.display(), e),
            }
        }
        metas.sort_by(|a, b| b.date.cmp(&a.date));
        metas
    }

    /// Loads and renders one post. `None` covers absent slugs and files
    /// that fail to parse; the latter are logged.
    pub fn get_by_slug(&self, slug: &str) -> Option<Post> {
        let path = self.resolve_path(slug)?;
        let loaded = ContentFile::from_file(slug.to_string(), path)
            .map_err(anyhow::Error::from)
            .and_then(|file| self.build_meta(&file));
        let (meta, body) = match loaded {
            Ok(parts) => parts,
            Err(e) => {
                warn!("Not serving post {}: {:#}", slug, e);
                return None;
            }
        };

        let rendered = render_body(&body);
        Some(Post {
            meta,
            content_html: rendered.html,
            embeds: rendered.embeds,
        })
    }

    pub fn list_featured(&self) -> Vec<PostMeta> {
        Self::filter_featured(&self.list_all())
    }

    pub fn list_by_category(&self, category_slug: &str) -> Vec<PostMeta> {
        Self::filter_by_category(&self.list_all(), category_slug)
    }

    pub fn list_by_tag(&self, tag_slug: &str) -> Vec<PostMeta> {
        Self::filter_by_tag(&self.list_all(), tag_slug)
    }

    pub fn list_related(&self, meta: &PostMeta, limit: usize) -> Vec<PostMeta> {
        Self::filter_related(&self.list_all(), meta, limit)
    }

    // The filter halves are separate so a caller holding a cached
    // `list_all` result does not pay for a second directory scan.

    pub fn filter_featured(posts: &[PostMeta]) -> Vec<PostMeta> {
        posts.iter().filter(|p| p.featured).cloned().collect()
    }

    pub fn filter_by_category(posts: &[PostMeta], category_slug: &str) -> Vec<PostMeta> {
        posts
            .iter()
            .filter(|p| slugify(&p.category) == category_slug)
            .cloned()
            .collect()
    }

    pub fn filter_by_tag(posts: &[PostMeta], tag_slug: &str) -> Vec<PostMeta> {
        posts
            .iter()
            .filter(|p| p.tags.iter().any(|tag| slugify(tag) == tag_slug))
            .cloned()
            .collect()
    }

    pub fn filter_related(posts: &[PostMeta], meta: &PostMeta, limit: usize) -> Vec<PostMeta> {
        posts
            .iter()
            .filter(|p| p.category == meta.category && p.slug != meta.slug)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Content files in file-name order, one entry per slug. An `.mdx`
    /// file shadows an `.md` file with the same stem; the shadowed file is
    /// logged and skipped everywhere.
    fn enumerate(&self) -> Vec<(String, PathBuf)> {
        let entries = match fs::read_dir(&self.content_dir) {
            Ok(entries) => entries,
            // A missing content directory means zero posts
            Err(_) => return vec![],
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|entry| entry.path())
            .filter(|path| ContentFormat::from_path(path).is_some())
            .collect();
        files.sort();

        let mut posts: Vec<(String, PathBuf)> = vec![];
        for path in files {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let slug = stem.to_string();

            if let Some(existing) = posts.iter_mut().find(|(s, _)| *s == slug) {
                if ContentFormat::from_path(&path) == Some(ContentFormat::Mdx) {
                    warn!(
                        "Content file {} shadows {}",
                        path.display(),
                        existing.1.display()
                    );
                    existing.1 = path;
                } else {
                    warn!(
                        "Skipping {}: slug {} already taken by {}",
                        path.display(),
                        slug,
                        existing.1.display()
                    );
                }
                continue;
            }
            posts.push((slug, path));
        }
        posts
    }

    fn resolve_path(&self, slug: &str) -> Option<PathBuf> {
        if slug.contains("..") || slug.contains('/') || slug.contains('\\') {
            return None;
        }
        let mdx = self.content_dir.join(format!("{slug}.mdx"));
        if mdx.is_file() {
            return Some(mdx);
        }
        let md = self.content_dir.join(format!("{slug}.md"));
        md.is_file().then_some(md)
    }

    /// Metadata record plus the still-unrendered body. Title and date are
    /// the only hard requirements; everything else falls back to the
    /// site-wide defaults.
    fn build_meta(&self, file: &ContentFile) -> Result<(PostMeta, String)> {
        let (front, body) = FrontMatter::parse(&file.raw_content);

        let title = front.title.ok_or_else(|| anyhow!("front matter has no title"))?;
        let date_str = front.date.ok_or_else(|| anyhow!("front matter has no date"))?;
        let date = parse_iso_date(&date_str)
            .with_context(|| format!("invalid date {:?}", date_str))?;

        let author = match front.author {
            Some(a) => Author {
                name: a.name,
                image: a.image.unwrap_or_else(|| self.defaults.author.image.clone()),
            },
            None => self.defaults.author.clone(),
        };

        let meta = PostMeta {
            slug: file.slug.clone(),
            title,
            formatted_date: format_date(&date),
            date,
            cover_image: front
                .cover_image
                .unwrap_or_else(|| self.defaults.cover_image.clone()),
            excerpt: front.excerpt.unwrap_or_default(),
            category: front.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            featured: front.featured.unwrap_or(false),
            tags: front.tags.unwrap_or_default(),
            author,
            reading_time: ReadingTime::estimate(&body).display(),
        };

        Ok((meta, body))
    }
}

fn parse_iso_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    // Tolerate a full ISO-8601 timestamp by using its date part
    match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(e) => match date_str.get(..10) {
            Some(prefix) => NaiveDate::parse_from_str(prefix, "%Y-%m-%d").map_err(|_| e),
            None => Err(e),
        },
    }
}
