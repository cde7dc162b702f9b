use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};
use url::Url;

use crate::app::{QuranError, Result, ValidationError};
use crate::domain::{Chapter, GrammarAnalysis};
use crate::extractor::extract_grammar_analysis;
use crate::session::LoadState;
use crate::source::ContentSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn offset(self) -> i64 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Chapter catalog, selected chapter and verse, and the analysis shown for it.
pub struct VerseNavigator {
    source: Arc<ContentSource>,
    chapters: Vec<Chapter>,
    selected: Option<Chapter>,
    verse: u32,
    state: watch::Sender<LoadState<GrammarAnalysis>>,
}

impl VerseNavigator {
    pub fn new(source: Arc<ContentSource>) -> Self {
        let (state, _) = watch::channel(LoadState::Idle);
        Self {
            source,
            chapters: Vec::new(),
            selected: None,
            verse: 1,
            state,
        }
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn selected_chapter(&self) -> Option<&Chapter> {
        self.selected.as_ref()
    }

    pub fn current_verse(&self) -> u32 {
        self.verse
    }

    pub fn state(&self) -> LoadState<GrammarAnalysis> {
        self.state.borrow().clone()
    }

    /// Follow state changes, including `Loading` while a request is in flight.
    pub fn subscribe(&self) -> watch::Receiver<LoadState<GrammarAnalysis>> {
        self.state.subscribe()
    }

    /// Load the catalog unless this session already has it.
    pub async fn load_chapters(&mut self) -> Result<&[Chapter]> {
        if self.chapters.is_empty() {
            self.refresh_chapters().await
        } else {
            Ok(&self.chapters)
        }
    }

    /// Fetch the catalog again. On failure the previous catalog is kept.
    pub async fn refresh_chapters(&mut self) -> Result<&[Chapter]> {
        let settled = match &*self.state.borrow() {
            LoadState::Ready(analysis) => LoadState::Ready(analysis.clone()),
            _ => LoadState::Idle,
        };
        self.state.send_replace(LoadState::Loading);

        match self.source.list_chapters().await {
            Ok(chapters) => {
                info!(count = chapters.len(), "chapter catalog loaded");
                self.chapters = chapters;
                self.state.send_replace(settled);
                Ok(&self.chapters)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    pub fn select_chapter(&mut self, chapter: Chapter) {
        debug!(chapter = chapter.number, "chapter selected");
        self.selected = Some(chapter);
        self.verse = 1;
        self.state.send_replace(LoadState::Idle);
    }

    /// Select a chapter from the loaded catalog by its number.
    pub fn select_chapter_number(&mut self, number: u32) -> Result<()> {
        let chapter = self
            .chapters
            .iter()
            .find(|c| c.number == number)
            .cloned()
            .ok_or(ValidationError::UnknownChapter(number))?;
        self.select_chapter(chapter);
        Ok(())
    }

    /// Jump to a verse. The value is checked when the analysis is requested.
    pub fn set_verse(&mut self, verse: u32) {
        self.verse = verse;
    }

    pub fn can_go_previous(&self) -> bool {
        self.selected.is_some() && self.verse > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.selected
            .as_ref()
            .is_some_and(|c| self.verse < c.verse_count)
    }

    /// Direct link to the analysis page for the current verse.
    pub fn source_url(&self) -> Option<Url> {
        let chapter = self.selected.as_ref()?;
        self.source.analysis_page_url(chapter.number, self.verse).ok()
    }

    /// Fetch and extract the analysis of the current verse.
    pub async fn request_analysis(&mut self) -> Result<GrammarAnalysis> {
        let chapter_number = match self.validate() {
            Ok(number) => number,
            Err(e) => return Err(self.fail(e.into())),
        };

        self.state.send_replace(LoadState::Loading);

        let html = match self
            .source
            .fetch_grammar_analysis_html(chapter_number, self.verse)
            .await
        {
            Ok(html) => html,
            Err(e) => return Err(self.fail(e)),
        };

        let analysis = extract_grammar_analysis(&html);
        debug!(
            chapter = chapter_number,
            verse = self.verse,
            fragments = analysis.fragments.len(),
            "analysis extracted"
        );
        self.state.send_replace(LoadState::Ready(analysis.clone()));
        Ok(analysis)
    }

    /// Move one verse and load its analysis.
    ///
    /// Returns `Ok(false)` without doing anything when the move would leave
    /// the chapter.
    pub async fn navigate(&mut self, direction: Direction) -> Result<bool> {
        let Some(chapter) = &self.selected else {
            return Ok(false);
        };

        let target = i64::from(self.verse) + direction.offset();
        if target < 1 || target > i64::from(chapter.verse_count) {
            return Ok(false);
        }

        self.verse = target as u32;
        self.request_analysis().await.map(|_| true)
    }

    fn validate(&self) -> std::result::Result<u32, ValidationError> {
        let chapter = self
            .selected
            .as_ref()
            .ok_or(ValidationError::NoChapterSelected)?;

        if !chapter.contains_verse(self.verse) {
            return Err(ValidationError::VerseOutOfRange {
                verse: self.verse,
                verse_count: chapter.verse_count,
            });
        }

        Ok(chapter.number)
    }

    fn fail(&self, err: QuranError) -> QuranError {
        self.state.send_replace(LoadState::Failed(err.user_message()));
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fetcher::stub::{StubFetcher, StubReply};
    use tokio_test::{assert_err, assert_ok};

    const CHAPTERS: &str = r#"{"code":200,"status":"OK","data":[
        {"number":1,"name":"الفاتحة","englishName":"Al-Faatiha","englishNameTranslation":"The Opening","numberOfAyahs":7,"revelationType":"Meccan"},
        {"number":108,"name":"الكوثر","englishName":"Al-Kawthar","englishNameTranslation":"Abundance","numberOfAyahs":3,"revelationType":"Meccan"}
    ]}"#;

    const PAGE: &str = r#"<h3 id="e3rab">إعراب</h3>
        <div class="card mt-3"><div class="card-body">الحمد: مبتدأ مرفوع</div></div>
        <div class="card mt-3"><div class="card-body">لله: جار ومجرور</div></div>
        <div class="card mt-3"><div class="card-body">نسخة مكررة</div></div>"#;

    fn envelope() -> String {
        serde_json::json!({ "contents": PAGE }).to_string()
    }

    fn working_stub() -> Arc<StubFetcher> {
        Arc::new(
            StubFetcher::new()
                .on("alquran.cloud", StubReply::text(CHAPTERS))
                .on("allorigins", StubReply::text(&envelope())),
        )
    }

    fn navigator(stub: Arc<StubFetcher>) -> VerseNavigator {
        let config = Config::default().with_default_proxies();
        VerseNavigator::new(Arc::new(ContentSource::new(stub, &config)))
    }

    async fn loaded(stub: Arc<StubFetcher>, chapter: u32) -> VerseNavigator {
        let mut nav = navigator(stub);
        nav.load_chapters().await.unwrap();
        nav.select_chapter_number(chapter).unwrap();
        nav
    }

    #[tokio::test]
    async fn test_catalog_is_fetched_once() {
        let stub = working_stub();
        let mut nav = navigator(stub.clone());

        assert_eq!(assert_ok!(nav.load_chapters().await).len(), 2);
        assert_eq!(assert_ok!(nav.load_chapters().await).len(), 2);
        assert_eq!(stub.call_count(), 1);
        assert_eq!(nav.state(), LoadState::Idle);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_catalog() {
        let stub = working_stub();
        let mut nav = navigator(stub);
        nav.load_chapters().await.unwrap();

        // Same navigator, now pointed at a failing catalog.
        let failing = Arc::new(StubFetcher::new().on("alquran.cloud", StubReply::Status(500)));
        let config = Config::default().with_default_proxies();
        nav.source = Arc::new(ContentSource::new(failing, &config));

        assert_err!(nav.refresh_chapters().await);
        assert_eq!(nav.chapters().len(), 2);
        assert!(nav.state().error().is_some());
    }

    #[tokio::test]
    async fn test_first_catalog_failure_leaves_it_empty() {
        let stub = Arc::new(StubFetcher::new().on("alquran.cloud", StubReply::text("oops")));
        let mut nav = navigator(stub);

        let err = assert_err!(nav.load_chapters().await);
        assert!(err.is_upstream());
        assert!(nav.chapters().is_empty());
        assert!(matches!(nav.state(), LoadState::Failed(_)));
    }

    #[tokio::test]
    async fn test_catalog_reload_keeps_shown_analysis() {
        let mut nav = loaded(working_stub(), 1).await;
        let analysis = nav.request_analysis().await.unwrap();

        nav.refresh_chapters().await.unwrap();
        assert_eq!(nav.state(), LoadState::Ready(analysis));
    }

    #[tokio::test]
    async fn test_select_chapter_resets_verse_and_result() {
        let mut nav = loaded(working_stub(), 1).await;
        nav.set_verse(5);
        nav.request_analysis().await.unwrap();
        assert!(nav.state().result().is_some());

        nav.select_chapter_number(108).unwrap();
        assert_eq!(nav.current_verse(), 1);
        assert_eq!(nav.state(), LoadState::Idle);
        assert_eq!(nav.selected_chapter().map(|c| c.number), Some(108));
    }

    #[tokio::test]
    async fn test_unknown_chapter_number() {
        let mut nav = loaded(working_stub(), 1).await;
        let err = assert_err!(nav.select_chapter_number(200));
        assert!(matches!(
            err,
            QuranError::Validation(ValidationError::UnknownChapter(200))
        ));
        assert_eq!(nav.selected_chapter().map(|c| c.number), Some(1));
    }

    #[tokio::test]
    async fn test_request_analysis_extracts_two_cards() {
        let mut nav = loaded(working_stub(), 1).await;
        nav.set_verse(2);

        let analysis = assert_ok!(nav.request_analysis().await);
        assert_eq!(analysis.title, "إعراب");
        assert_eq!(
            analysis.fragments,
            vec!["الحمد: مبتدأ مرفوع", "لله: جار ومجرور"]
        );
        assert_eq!(nav.state(), LoadState::Ready(analysis));
    }

    #[tokio::test]
    async fn test_no_chapter_fails_without_network() {
        let stub = working_stub();
        let mut nav = navigator(stub.clone());

        let err = assert_err!(nav.request_analysis().await);
        assert!(matches!(
            err,
            QuranError::Validation(ValidationError::NoChapterSelected)
        ));
        assert_eq!(stub.call_count(), 0);
        assert!(nav.state().error().is_some());
    }

    #[tokio::test]
    async fn test_verse_past_end_fails_without_network() {
        let stub = working_stub();
        let mut nav = loaded(stub.clone(), 1).await;
        let calls_before = stub.call_count();

        nav.set_verse(8);
        let err = assert_err!(nav.request_analysis().await);
        assert!(matches!(
            err,
            QuranError::Validation(ValidationError::VerseOutOfRange {
                verse: 8,
                verse_count: 7
            })
        ));

        nav.set_verse(0);
        assert_err!(nav.request_analysis().await);
        assert_eq!(stub.call_count(), calls_before);
    }

    #[tokio::test]
    async fn test_failure_clears_previous_result() {
        let mut nav = loaded(working_stub(), 1).await;
        nav.request_analysis().await.unwrap();
        assert!(nav.state().result().is_some());

        let dead = Arc::new(StubFetcher::new());
        let config = Config::default().with_default_proxies();
        nav.source = Arc::new(ContentSource::new(dead, &config));

        let err = assert_err!(nav.request_analysis().await);
        assert!(matches!(err, QuranError::AllSourcesExhausted { attempts: 4 }));
        assert_eq!(nav.state().result(), None);
        assert!(nav.state().error().is_some());
    }

    #[tokio::test]
    async fn test_navigate_round_trip() {
        let mut nav = loaded(working_stub(), 1).await;

        for verse in 1..=7 {
            nav.set_verse(verse);

            if nav.can_go_next() {
                assert!(assert_ok!(nav.navigate(Direction::Next).await));
                assert!(assert_ok!(nav.navigate(Direction::Previous).await));
            } else {
                assert!(!assert_ok!(nav.navigate(Direction::Next).await));
            }
            assert_eq!(nav.current_verse(), verse);
        }
    }

    #[tokio::test]
    async fn test_navigation_bounds() {
        let stub = working_stub();
        let mut nav = loaded(stub.clone(), 108).await;

        assert!(!nav.can_go_previous());
        assert!(nav.can_go_next());
        let calls = stub.call_count();
        assert!(!assert_ok!(nav.navigate(Direction::Previous).await));
        assert_eq!(stub.call_count(), calls);
        assert_eq!(nav.current_verse(), 1);

        assert!(assert_ok!(nav.navigate(Direction::Next).await));
        assert!(assert_ok!(nav.navigate(Direction::Next).await));
        assert_eq!(nav.current_verse(), 3);
        assert!(nav.can_go_previous());
        assert!(!nav.can_go_next());

        let calls = stub.call_count();
        assert!(!assert_ok!(nav.navigate(Direction::Next).await));
        assert_eq!(stub.call_count(), calls);
    }

    #[tokio::test]
    async fn test_navigation_without_chapter() {
        let stub = working_stub();
        let mut nav = navigator(stub.clone());
        nav.set_verse(3);

        assert!(!nav.can_go_previous());
        assert!(!nav.can_go_next());
        assert!(!assert_ok!(nav.navigate(Direction::Next).await));
        assert_eq!(stub.call_count(), 0);
        assert_eq!(nav.source_url(), None);
    }

    #[tokio::test]
    async fn test_source_url_follows_verse() {
        let mut nav = loaded(working_stub(), 108).await;
        nav.set_verse(2);
        assert_eq!(
            nav.source_url().map(String::from).as_deref(),
            Some("https://surahquran.com/quran-search/e3rab-aya-2-sora-108.html")
        );
    }

    #[tokio::test]
    async fn test_subscriber_sees_final_state() {
        let mut nav = loaded(working_stub(), 1).await;
        let mut rx = nav.subscribe();

        nav.request_analysis().await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().result().is_some());
    }
}
