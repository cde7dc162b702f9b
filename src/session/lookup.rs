use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::app::{QuranError, Result, ValidationError};
use crate::domain::MorphologyWord;
use crate::session::LoadState;
use crate::source::ContentSource;

/// Result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(Vec<MorphologyWord>),
    /// The dictionary answered but knows no analysis for the word.
    NoResults,
}

impl LookupOutcome {
    pub fn words(&self) -> &[MorphologyWord] {
        match self {
            LookupOutcome::Found(words) => words,
            LookupOutcome::NoResults => &[],
        }
    }

    pub fn is_no_results(&self) -> bool {
        matches!(self, LookupOutcome::NoResults)
    }
}

/// Morphology ("sarf") lookup of a single word.
pub struct MorphologyLookup {
    source: Arc<ContentSource>,
    state: watch::Sender<LoadState<LookupOutcome>>,
}

impl MorphologyLookup {
    pub fn new(source: Arc<ContentSource>) -> Self {
        let (state, _) = watch::channel(LoadState::Idle);
        Self { source, state }
    }

    pub fn state(&self) -> LoadState<LookupOutcome> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState<LookupOutcome>> {
        self.state.subscribe()
    }

    pub async fn analyze(&mut self, word: &str) -> Result<LookupOutcome> {
        let word = word.trim();
        if word.is_empty() {
            return Err(self.fail(ValidationError::EmptyWord.into()));
        }

        self.state.send_replace(LoadState::Loading);

        let words = match self.source.fetch_morphology(word).await {
            Ok(words) => words,
            Err(e) => return Err(self.fail(e)),
        };

        debug!(%word, analyses = words.len(), "morphology lookup finished");
        let outcome = if words.is_empty() {
            LookupOutcome::NoResults
        } else {
            LookupOutcome::Found(words)
        };

        self.state.send_replace(LoadState::Ready(outcome.clone()));
        Ok(outcome)
    }

    fn fail(&self, err: QuranError) -> QuranError {
        self.state.send_replace(LoadState::Failed(err.user_message()));
        err
    }
}
