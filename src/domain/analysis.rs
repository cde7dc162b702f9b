use serde::{Deserialize, Serialize};

/// Most fragments kept from one analysis page; later cards repeat earlier ones.
pub const MAX_FRAGMENTS: usize = 2;

/// Cleaned grammatical analysis ("e'arab") of a single verse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarAnalysis {
    pub title: String,
    pub fragments: Vec<String>,
}

impl GrammarAnalysis {
    /// Neither a title nor any fragment was found.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.fragments.is_empty()
    }
}
