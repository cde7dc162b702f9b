//! # quran-tools
//!
//! Retrieval of Quranic grammatical analysis ("e'arab") and word
//! morphology ("sarf") from third-party web sources.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → ContentSource → Extractor → Session state → CLI
//! ```
//!
//! - [`fetcher`]: HTTP transport behind an async trait
//! - [`source`]: Upstream endpoints and the relay fallback chain
//! - [`extractor`]: HTML to title + cleaned text fragments
//! - [`session`]: Verse navigation and morphology lookup state
//!
//! ## Quick Start
//!
//! ```bash
//! # List chapters
//! quran-tools chapters
//!
//! # Grammatical analysis of Al-Baqara 255
//! quran-tools earab 2 255
//!
//! # Morphology of a word
//! quran-tools sarf كتب
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together config,
/// transport and content source.
pub mod app;

/// Command-line interface using clap.
///
/// - `chapters` - List all chapters
/// - `earab <chapter> <verse>` - Grammatical analysis of a verse
/// - `translate <chapter> <verse>` - Text and translations of a verse
/// - `sarf <word>` - Morphological analysis of a word
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/quran-tools/config.toml`: endpoints, timeouts
/// and the relay chain.
pub mod config;

/// Core domain models.
///
/// - [`Chapter`](domain::Chapter): A surah from the catalog
/// - [`VerseTranslation`](domain::VerseTranslation): Verse text and translations
/// - [`MorphologyWord`](domain::MorphologyWord): One dictionary analysis
/// - [`GrammarAnalysis`](domain::GrammarAnalysis): Extracted e'arab
pub mod domain;

/// Grammar page extraction and HTML entity decoding.
pub mod extractor;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for GET requests
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Per-session orchestrators.
///
/// - [`VerseNavigator`](session::VerseNavigator): Chapter/verse selection and analysis
/// - [`MorphologyLookup`](session::MorphologyLookup): Word lookup
pub mod session;

/// Upstream endpoints.
///
/// - [`ContentSource`](source::ContentSource): Chapters, translation, morphology, analysis page
/// - [`ProxyEndpoint`](source::ProxyEndpoint): One relay in the fallback chain
pub mod source;
