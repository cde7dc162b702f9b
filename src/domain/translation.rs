use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One verse with its Arabic text and translations.
///
/// Built from a loosely-shaped document: absent fields become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseTranslation {
    pub chapter_number: u32,
    pub chapter_name: String,
    pub verse_number: u32,
    pub arabic_text: String,
    pub english_text: String,
    pub urdu_text: String,
}

impl VerseTranslation {
    pub fn from_document(chapter: u32, verse: u32, doc: &Value) -> Self {
        Self {
            chapter_number: chapter,
            chapter_name: String::new(),
            verse_number: verse,
            arabic_text: text_at(doc, "/arabic1"),
            english_text: text_at(doc, "/english/text"),
            urdu_text: text_at(doc, "/urdu/text"),
        }
    }
}

fn text_at(doc: &Value, pointer: &str) -> String {
    doc.pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
