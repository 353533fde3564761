/// A rich component tag found in a post body, e.g.
/// `<AnimatedGreeting />` or `<FloatingIcons count="12" />`.
///
/// Tags are stripped from the body before markdown conversion; the page
/// layer decides where (and whether) to show the matching rich content.
/// `offset` is the byte position of the tag in the original body.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedTag {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub offset: usize,
}

/// Tokenizing pre-pass over a post body. Extracts every self-closing,
/// capitalized component tag and returns the body with those tags removed.
/// Anything that does not parse as a component tag is left untouched, so
/// inline HTML and `a < b` comparisons in prose survive.
pub fn extract_embeds(body: &str) -> (String, Vec<EmbedTag>) {
    let mut cleaned = String::with_capacity(body.len());
    let mut embeds = vec![];
    let mut rest = body;
    let mut consumed = 0usize;

    while let Some(start) = rest.find('<') {
        match parse_component_tag(&rest[start..]) {
            Some((name, attributes, len)) => {
                cleaned.push_str(&rest[..start]);
                embeds.push(EmbedTag {
                    name,
                    attributes,
                    offset: consumed + start,
                });
                consumed += start + len;
                rest = &rest[start + len..];
            }
            None => {
                cleaned.push_str(&rest[..start + 1]);
                consumed += start + 1;
                rest = &rest[start + 1..];
            }
        }
    }
    cleaned.push_str(rest);

    (cleaned, embeds)
}

/// Parses `<Name attr="value" flag />` at the start of `input` (which must
/// begin with `<`). Returns the tag pieces and the byte length consumed.
fn parse_component_tag(input: &str) -> Option<(String, Vec<(String, String)>, usize)> {
    let bytes = input.as_bytes();
    let mut i = 1;

    if i >= bytes.len() || !bytes[i].is_ascii_uppercase() {
        return None;
    }
    let name_start = i;
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
        i += 1;
    }
    let name = input[name_start..i].to_string();

    let mut attributes = vec![];
    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if input[i..].starts_with("/>") {
            return Some((name, attributes, i + 2));
        }
        if i >= bytes.len() || bytes[i] == b'>' || bytes[i] == b'<' {
            return None;
        }

        let attr_start = i;
        while i < bytes.len()
            && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'-')
        {
            i += 1;
        }
        if i == attr_start {
            return None;
        }
        let attr_name = input[attr_start..i].to_string();

        let mut value = String::new();
        if i < bytes.len() && bytes[i] == b'=' {
            i += 1;
            if i >= bytes.len() {
                return None;
            }
            let quote = bytes[i];
            if quote != b'"' && quote != b'\'' {
                return None;
            }
            i += 1;
            let value_start = i;
            while i < bytes.len() && bytes[i] != quote {
                i += 1;
            }
            if i >= bytes.len() {
                return None;
            }
            value = input[value_start..i].to_string();
            i += 1;
        }
        attributes.push((attr_name, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_tag() {
        let body = "Intro text.\n\n<AnimatedGreeting />\n\nRest of the post.";
        let (cleaned, embeds) = extract_embeds(body);
        assert_eq!(cleaned, "Intro text.\n\n\n\nRest of the post.");
        assert_eq!(embeds.len(), 1);
        assert_eq!(embeds[0].name, "AnimatedGreeting");
        assert!(embeds[0].attributes.is_empty());
        assert_eq!(embeds[0].offset, 13);
    }

    #[test]
    fn test_extract_tag_with_attributes() {
        let body = "<FloatingIcons count=\"12\" dense />";
        let (cleaned, embeds) = extract_embeds(body);
        assert_eq!(cleaned, "");
        assert_eq!(embeds.len(), 1);
        assert_eq!(embeds[0].name, "FloatingIcons");
        assert_eq!(
            embeds[0].attributes,
            vec![
                ("count".to_string(), "12".to_string()),
                ("dense".to_string(), "".to_string()),
            ]
        );
    }

    #[test]
    fn test_lowercase_html_is_kept() {
        let body = "Some <em>inline</em> html and <br /> stay.";
        let (cleaned, embeds) = extract_embeds(body);
        assert_eq!(cleaned, body);
        assert!(embeds.is_empty());
    }

    #[test]
    fn test_comparison_in_prose_is_kept() {
        let body = "When a < b and b > c, nothing happens.";
        let (cleaned, embeds) = extract_embeds(body);
        assert_eq!(cleaned, body);
        assert!(embeds.is_empty());
    }

    #[test]
    fn test_non_self_closing_tag_is_kept() {
        let body = "A <Wrapper>child</Wrapper> block.";
        let (cleaned, embeds) = extract_embeds(body);
        assert_eq!(cleaned, body);
        assert!(embeds.is_empty());
    }

    #[test]
    fn test_multiple_tags() {
        let body = "<AnimatedGreeting />middle<FloatingIcons />";
        let (cleaned, embeds) = extract_embeds(body);
        assert_eq!(cleaned, "middle");
        assert_eq!(embeds.len(), 2);
        assert_eq!(embeds[0].offset, 0);
        assert_eq!(embeds[1].offset, body.find("<FloatingIcons").unwrap());
    }
}
