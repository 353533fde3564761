use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use unidecode::unidecode;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref NON_WORD: Regex = Regex::new(r"[^\w\-]+").unwrap();
    static ref HYPHEN_RUN: Regex = Regex::new(r"-{2,}").unwrap();
}

/// Turns free text into a URL slug: lowercase, whitespace runs become a
/// single hyphen, `&` becomes `-and-`, everything that is not a word
/// character or hyphen is dropped, hyphen runs collapse to one.
/// Idempotent, so already-slugged input passes through unchanged.
pub fn slugify(text: &str) -> String {
    let text = unidecode(text).to_lowercase();
    let text = text.trim();
    let text = WHITESPACE_RUN.replace_all(text, "-");
    let text = text.replace('&', "-and-");
    let text = NON_WORD.replace_all(&text, "");
    let text = HYPHEN_RUN.replace_all(&text, "-");
    text.trim_matches('-').to_string()
}

/// Tag URL segments carry hyphens where the tag text had spaces, so the
/// segment is widened back before slugifying for comparison.
pub fn tag_slug_from_segment(segment: &str) -> String {
    slugify(&segment.replace('-', " "))
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello & World!"), "hello-and-world");
        assert_eq!(slugify("Firmware Dev"), "firmware-dev");
        assert_eq!(slugify("  Spaces   everywhere  "), "spaces-everywhere");
        assert_eq!(slugify("Rust Programming"), "rust-programming");
    }

    #[test]
    fn test_slugify_strips_special_chars() {
        assert_eq!(slugify("C++ Programming"), "c-programming");
        assert_eq!(slugify("100% coverage?"), "100-coverage");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_transliterates() {
        assert_eq!(slugify("Café & Crème"), "cafe-and-creme");
    }

    #[test]
    fn test_slugify_idempotent() {
        for input in ["Hello & World!", "What I learned, 20+ years later", "déjà vu", ""] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn test_tag_slug_from_segment() {
        assert_eq!(tag_slug_from_segment("rust-embedded"), "rust-embedded");
        assert_eq!(tag_slug_from_segment("Bare-Metal"), "bare-metal");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2023, 10, 12).unwrap();
        assert_eq!(format_date(&date), "Oct 12, 2023");
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(format_date(&date), "Mar 1, 2024");
    }
}
