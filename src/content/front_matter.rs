use gray_matter::engine::YAML;
use gray_matter::Matter;
use serde::Deserialize;

/// Raw front matter as written in a content file. Every field is optional
/// here; defaulting happens once, at the repository boundary.
#[derive(Deserialize, Default, Debug, Clone, PartialEq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub excerpt: Option<String>,
    #[serde(rename = "coverImage")]
    pub cover_image: Option<String>,
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub author: Option<FrontAuthor>,
}

#[derive(Deserialize, Default, Debug, Clone, PartialEq)]
pub struct FrontAuthor {
    pub name: String,
    pub image: Option<String>,
}

impl FrontMatter {
    /// Splits raw file contents into metadata and body. A missing or
    /// malformed `---` block yields empty metadata and the whole input as
    /// body; this never fails.
    pub fn parse(raw: &str) -> (FrontMatter, String) {
        let matter = Matter::<YAML>::new();
        match matter.parse::<FrontMatter>(raw) {
            Ok(parsed) => (parsed.data.unwrap_or_default(), parsed.content),
            Err(_) => (FrontMatter::default(), raw.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_data::{POST_BAD_YAML, POST_FULL_FRONT_MATTER};

    use super::*;

    #[test]
    fn test_parse_full_header() {
        let (meta, body) = FrontMatter::parse(POST_FULL_FRONT_MATTER);
        assert_eq!(meta.title.as_deref(), Some("Dumping SPI Flash"));
        assert_eq!(meta.date.as_deref(), Some("2024-02-12"));
        assert_eq!(meta.excerpt.as_deref(), Some("Reading firmware off an 8-pin flash chip."));
        assert_eq!(meta.cover_image.as_deref(), Some("/images/blog/spi-flash.jpg"));
        assert_eq!(meta.category.as_deref(), Some("Firmware Extract"));
        assert_eq!(meta.featured, Some(true));
        assert_eq!(
            meta.tags,
            Some(vec!["spi".to_string(), "flash dump".to_string()])
        );
        let author = meta.author.unwrap();
        assert_eq!(author.name, "Rexin");
        assert_eq!(author.image.as_deref(), Some("/images/author.jpg"));
        assert!(body.trim_start().starts_with("So you found an SOIC-8 package"));
    }

    #[test]
    fn test_parse_without_front_matter() {
        let raw = "# Just a title\n\nNo metadata block at all.\n";
        let (meta, body) = FrontMatter::parse(raw);
        assert_eq!(meta, FrontMatter::default());
        assert!(meta.title.is_none());
        assert!(body.contains("No metadata block at all."));
    }

    #[test]
    fn test_parse_malformed_front_matter() {
        let (meta, body) = FrontMatter::parse(POST_BAD_YAML);
        assert_eq!(meta, FrontMatter::default());
        // The broken block stays in the body instead of raising
        assert!(body.contains("broken"));
    }

    #[test]
    fn test_parse_partial_header() {
        let raw = "---\ntitle: Only a title\n---\nBody text.\n";
        let (meta, body) = FrontMatter::parse(raw);
        assert_eq!(meta.title.as_deref(), Some("Only a title"));
        assert!(meta.date.is_none());
        assert!(meta.featured.is_none());
        assert_eq!(body.trim(), "Body text.");
    }
}
