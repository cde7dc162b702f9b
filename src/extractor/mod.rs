//! Extraction of the grammatical analysis from the upstream HTML page.
//!
//! The page marks its heading with `id="e3rab"` and wraps each analysis
//! block in a `<div class="... card mt-3 ...">`. Matching is pattern based,
//! not a full HTML parse: it handles the markup the page actually produces
//! and nothing more elaborate.

mod entities;

pub use entities::decode_entities;

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::analysis::{GrammarAnalysis, MAX_FRAGMENTS};

struct Patterns {
    title: Regex,
    card: Regex,
    script: Regex,
    style: Regex,
    line_break: Regex,
    block_end: Regex,
    tag: Regex,
    blank_lines: Regex,
    horizontal_space: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        title: Regex::new(r#"(?i)<([a-z][a-z0-9]*)\b[^>]*\bid\s*=\s*["']e3rab["'][^>]*>"#)
            .expect("title regex is valid"),
        card: Regex::new(r#"(?s)<div[^>]*class="[^"]*card mt-3[^"]*"[^>]*>(.*?)</div>\s*</div>"#)
            .expect("card regex is valid"),
        script: Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("script regex is valid"),
        style: Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("style regex is valid"),
        line_break: Regex::new(r"(?i)<br[^>]*>").expect("br regex is valid"),
        block_end: Regex::new(r"(?i)</(?:p|div)>").expect("block regex is valid"),
        tag: Regex::new(r"<[^>]+>").expect("tag regex is valid"),
        blank_lines: Regex::new(r"\n(?:[ \t]*\n)+").expect("blank line regex is valid"),
        horizontal_space: Regex::new(r"[ \t]+").expect("space regex is valid"),
    })
}

/// Extract the title and the first analysis cards from a grammar page.
///
/// Never fails: a page without a title yields an empty title, and a page
/// with fewer cards yields fewer fragments.
pub fn extract_grammar_analysis(html: &str) -> GrammarAnalysis {
    GrammarAnalysis {
        title: extract_title(html),
        fragments: extract_fragments(html, MAX_FRAGMENTS),
    }
}

/// Text of the first element carrying `id="e3rab"`, whatever its tag.
///
/// The element ends at the first closing tag with the same name, so inline
/// markup inside it is kept but a nested element of the same kind is not.
pub fn extract_title(html: &str) -> String {
    let Some(caps) = patterns().title.captures(html) else {
        return String::new();
    };
    let (Some(open), Some(name)) = (caps.get(0), caps.get(1)) else {
        return String::new();
    };

    let rest = &html[open.end()..];
    let Ok(closing) = Regex::new(&format!(r"(?i)</{}\s*>", regex::escape(name.as_str()))) else {
        return String::new();
    };
    match closing.find(rest) {
        Some(end) => strip_tags(&rest[..end.start()]),
        None => String::new(),
    }
}

/// Cleaned text of at most `limit` cards, in document order.
pub fn extract_fragments(html: &str, limit: usize) -> Vec<String> {
    patterns()
        .card
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .take(limit)
        .map(|inner| clean_fragment(inner.as_str()))
        .collect()
}

/// Turn a card's inner HTML into display text.
///
/// Applying this to its own output is a no-op.
pub fn clean_fragment(html: &str) -> String {
    let p = patterns();

    let text = p.script.replace_all(html, "");
    let text = p.style.replace_all(&text, "");
    let text = p.line_break.replace_all(&text, "\n");
    let text = p.block_end.replace_all(&text, "\n");
    let text = p.tag.replace_all(&text, "");
    let text = decode_entities(&text);
    let text = p.blank_lines.replace_all(&text, "\n\n");
    let text = p.horizontal_space.replace_all(&text, " ");

    text.trim().to_string()
}

fn strip_tags(html: &str) -> String {
    let text = patterns().tag.replace_all(html, "");
    decode_entities(&text).trim().to_string()
}
