use lazy_static::lazy_static;
use markdown::Options;
use regex::{Captures, Regex};
use spdlog::warn;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};

use crate::content::embeds::{extract_embeds, EmbedTag};

lazy_static! {
    static ref SYNTAX_SET: SyntaxSet = SyntaxSet::load_defaults_newlines();
    static ref TAGGED_CODE_BLOCK: Regex =
        Regex::new(r#"(?s)<pre><code class="language-([^"]+)">(.*?)</code></pre>"#).unwrap();
    static ref PLAIN_CODE_BLOCK: Regex =
        Regex::new(r"(?s)<pre><code>(.*?)</code></pre>").unwrap();
}

pub struct RenderedBody {
    pub html: String,
    pub embeds: Vec<EmbedTag>,
}

/// Renders a post body to HTML: component tags are tokenized out first,
/// the remaining markdown goes through GFM conversion, and fenced code
/// blocks get class-based syntax highlighting as a post-pass.
pub fn render_body(md_text: &str) -> RenderedBody {
    let (cleaned, embeds) = extract_embeds(md_text);

    let html = match markdown::to_html_with_options(cleaned.as_str(), &Options::gfm()) {
        Ok(html) => html,
        Err(e) => {
            warn!("GFM conversion failed ({}), falling back to CommonMark", e.reason);
            markdown::to_html(cleaned.as_str())
        }
    };

    RenderedBody {
        html: highlight_code_blocks(&html),
        embeds,
    }
}

/// Rewrites `<pre><code class="language-x">` blocks with highlighted
/// markup. A language token syntect does not know leaves the block
/// untouched. Untagged blocks get a first-line sniff, which is a display
/// nicety only.
fn highlight_code_blocks(html: &str) -> String {
    let tagged = TAGGED_CODE_BLOCK.replace_all(html, |caps: &Captures| {
        let lang = &caps[1];
        match SYNTAX_SET.find_syntax_by_token(lang) {
            Some(syntax) => {
                let code = unescape_html(&caps[2]);
                format!(
                    "<pre class=\"language-{lang}\"><code class=\"language-{lang}\">{}</code></pre>",
                    highlight(&code, syntax),
                )
            }
            None => caps[0].to_string(),
        }
    });

    PLAIN_CODE_BLOCK
        .replace_all(&tagged, |caps: &Captures| {
            let code = unescape_html(&caps[1]);
            match code.lines().next().and_then(|l| SYNTAX_SET.find_syntax_by_first_line(l)) {
                Some(syntax) => format!(
                    "<pre class=\"highlight\"><code>{}</code></pre>",
                    highlight(&code, syntax),
                ),
                None => caps[0].to_string(),
            }
        })
        .to_string()
}

fn highlight(code: &str, syntax: &SyntaxReference) -> String {
    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, ClassStyle::Spaced);
    for line in code.lines() {
        // The generator wants lines with their newline back on
        let _ = generator.parse_html_for_line_which_includes_newline(&format!("{line}\n"));
    }
    generator.finalize()
}

/// The markdown converter escapes code block contents; syntect needs the
/// original text back.
fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let rendered = render_body("## Heading\n\nSome *emphasis* here.\n");
        assert!(rendered.html.contains("<h2>Heading</h2>"));
        assert!(rendered.html.contains("<em>emphasis</em>"));
        assert!(rendered.embeds.is_empty());
    }

    #[test]
    fn test_render_strips_embeds() {
        let rendered = render_body("<AnimatedGreeting />\n\nHello.\n");
        assert_eq!(rendered.embeds.len(), 1);
        assert_eq!(rendered.embeds[0].name, "AnimatedGreeting");
        assert!(!rendered.html.contains("AnimatedGreeting"));
        assert!(rendered.html.contains("<p>Hello.</p>"));
    }

    #[test]
    fn test_render_highlights_tagged_block() {
        let rendered = render_body("```rust\nfn main() {\n    println!(\"hi\");\n}\n```\n");
        assert!(rendered.html.contains("class=\"language-rust\""));
        assert!(rendered.html.contains("<span class="));
    }

    #[test]
    fn test_unknown_language_degrades_to_plain_block() {
        let rendered = render_body("```nosuchlang\nabc def\n```\n");
        assert!(rendered.html.contains("language-nosuchlang"));
        assert!(!rendered.html.contains("<span class="));
    }

    #[test]
    fn test_plain_block_sniffs_shebang() {
        let rendered = render_body("```\n#!/bin/bash\necho hi\n```\n");
        assert!(rendered.html.contains("<span class="));
    }

    #[test]
    fn test_unescape_html() {
        assert_eq!(unescape_html("a &lt; b &amp;&amp; c &gt; d"), "a < b && c > d");
    }
}
