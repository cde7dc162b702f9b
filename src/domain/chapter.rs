use serde::{Deserialize, Serialize};

/// A surah as listed by the chapter catalog endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub number: u32,
    pub name: String,
    pub english_name: String,
    pub english_name_translation: String,
    #[serde(rename = "numberOfAyahs")]
    pub verse_count: u32,
    pub revelation_type: String,
}

impl Chapter {
    pub fn contains_verse(&self, verse: u32) -> bool {
        (1..=self.verse_count).contains(&verse)
    }

    pub fn display_title(&self) -> String {
        format!("{}. {} ({})", self.number, self.english_name, self.name)
    }
}

/// `{code, status, data}` envelope around the chapter list.
#[derive(Debug, Clone, Deserialize)]
pub struct ChapterListResponse {
    pub code: i64,
    pub status: String,
    pub data: Vec<Chapter>,
}
