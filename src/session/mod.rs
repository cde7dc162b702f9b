//! Per-session orchestration of the content source and the extractor.
//!
//! Each orchestrator owns one [`LoadState`]. Request operations take
//! `&mut self`, so a second request on the same orchestrator cannot start
//! while one is in flight and results are applied in request order.

mod lookup;
mod navigation;

pub use lookup::{LookupOutcome, MorphologyLookup};
pub use navigation::{Direction, VerseNavigator};

/// What a front-end should show for an orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    /// User-facing message; no result is shown alongside it.
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
