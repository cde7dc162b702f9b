use serde::{Deserialize, Serialize};

/// One candidate analysis returned by the dictionary lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorphologyWord {
    #[serde(rename = "form")]
    pub surface_form: String,
    #[serde(rename = "voc_form")]
    pub vocalized_form: String,
    pub gloss: String,
    pub nice_gloss: Option<String>,
    #[serde(rename = "pos")]
    pub part_of_speech: String,
    #[serde(rename = "pos_abbr")]
    pub part_of_speech_abbrev: Option<String>,
    #[serde(rename = "pos_nice")]
    pub part_of_speech_nice: String,
    pub lemma: Option<String>,
    pub root: String,
    pub measure: Option<String>,
}

impl MorphologyWord {
    /// Display key. Not unique: the same form and root can appear more than once.
    pub fn id(&self) -> String {
        format!("{}{}{}", self.surface_form, self.vocalized_form, self.root)
    }

    /// Prefer the cleaned-up gloss when the source provides one.
    pub fn display_gloss(&self) -> &str {
        self.nice_gloss
            .as_deref()
            .filter(|g| !g.is_empty())
            .unwrap_or(&self.gloss)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MorphologyResponse {
    pub words: Vec<MorphologyWord>,
}
