pub mod analysis;
pub mod chapter;
pub mod morphology;
pub mod translation;

pub use analysis::GrammarAnalysis;
pub use chapter::{Chapter, ChapterListResponse};
pub use morphology::{MorphologyResponse, MorphologyWord};
pub use translation::VerseTranslation;
