use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Named entities the analysis pages are known to use.
const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("nbsp", " "),
    ("lt", "<"),
    ("gt", ">"),
    ("amp", "&"),
    ("quot", "\""),
    ("apos", "'"),
    ("rsquo", "'"),
    ("lsquo", "'"),
    ("rdquo", "\""),
    ("ldquo", "\""),
];

fn entity_regex() -> &'static Regex {
    static ENTITY: OnceLock<Regex> = OnceLock::new();
    ENTITY.get_or_init(|| {
        Regex::new(r"&(?:#([0-9]{1,7})|([A-Za-z][A-Za-z0-9]*));").expect("entity regex is valid")
    })
}

/// Decode the known named entities and decimal character references.
///
/// Single pass: `&amp;lt;` becomes `&lt;`, not `<`. Unknown names and
/// references that are not valid scalar values are kept verbatim.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    entity_regex().replace_all(text, |caps: &Captures| {
        if let Some(code) = caps.get(1) {
            return code
                .as_str()
                .parse::<u32>()
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string());
        }

        let name = &caps[2];
        NAMED_ENTITIES
            .iter()
            .find(|(entity, _)| *entity == name)
            .map(|(_, replacement)| replacement.to_string())
            .unwrap_or_else(|| caps[0].to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_and_numeric() {
        assert_eq!(decode_entities("A &amp; B &#39;quoted&#39;"), "A & B 'quoted'");
    }

    #[test]
    fn test_full_table() {
        assert_eq!(
            decode_entities("&lt;b&gt;&nbsp;&quot;x&quot; &apos;y&apos; &lsquo;z&rsquo; &ldquo;w&rdquo;"),
            "<b> \"x\" 'y' 'z' \"w\""
        );
    }

    #[test]
    fn test_arabic_codepoints() {
        // كتب
        assert_eq!(decode_entities("&#1603;&#1578;&#1576;"), "كتب");
    }

    #[test]
    fn test_unknown_entities_left_verbatim() {
        assert_eq!(decode_entities("&copy; 2024 &bogus;"), "&copy; 2024 &bogus;");
    }

    #[test]
    fn test_invalid_codepoint_left_verbatim() {
        assert_eq!(decode_entities("&#55296; &#9999999;"), "&#55296; &#9999999;");
    }

    #[test]
    fn test_no_double_decoding() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(decode_entities("no entities"), Cow::Borrowed(_)));
        assert_eq!(decode_entities("fish & chips"), "fish & chips");
    }
}
