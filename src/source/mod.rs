//! Client for the upstream content sources.
//!
//! ```text
//! chapters ──────────── GET ──────────────▶ catalog API
//! translation ───────── GET ──────────────▶ translation API
//! morphology ────────── GET ──────────────▶ dictionary API
//! grammar page ─▶ relay 1 ─▶ relay 2 ─▶ … ─▶ analysis site
//! ```
//!
//! The analysis site refuses cross-origin requests, so its page is only
//! ever requested through the configured relays, one at a time, in order.

mod proxy;

pub use proxy::{ProxyEndpoint, ProxyResponse, TargetPlacement};

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use url::Url;

use crate::app::{QuranError, Result};
use crate::config::{Config, EndpointConfig};
use crate::domain::{
    Chapter, ChapterListResponse, MorphologyResponse, MorphologyWord, VerseTranslation,
};
use crate::fetcher::Fetcher;

pub struct ContentSource {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    endpoints: EndpointConfig,
    proxies: Vec<ProxyEndpoint>,
    proxy_timeout: Duration,
}

impl ContentSource {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, config: &Config) -> Self {
        Self {
            fetcher,
            endpoints: config.endpoints.clone(),
            proxies: config.proxies.clone(),
            proxy_timeout: config.http.proxy_timeout(),
        }
    }

    pub fn proxies(&self) -> &[ProxyEndpoint] {
        &self.proxies
    }

    /// All chapters, in catalog order.
    pub async fn list_chapters(&self) -> Result<Vec<Chapter>> {
        let body = self.fetcher.fetch(&self.endpoints.chapters_url).await?;
        let response: ChapterListResponse = serde_json::from_slice(&body)?;

        debug!(
            code = response.code,
            status = %response.status,
            chapters = response.data.len(),
            "chapter catalog decoded"
        );
        Ok(response.data)
    }

    pub async fn fetch_translation(&self, chapter: u32, verse: u32) -> Result<VerseTranslation> {
        let url = expand_template(&self.endpoints.translation_url, chapter, verse)?;
        let body = self.fetcher.fetch(url.as_str()).await?;

        // The shape of this document drifts; read it loosely.
        let doc: serde_json::Value = serde_json::from_slice(&body)?;
        Ok(VerseTranslation::from_document(chapter, verse, &doc))
    }

    /// Direct URL of the grammar page for a verse.
    pub fn analysis_page_url(&self, chapter: u32, verse: u32) -> Result<Url> {
        expand_template(&self.endpoints.analysis_page_url, chapter, verse)
    }

    /// Raw HTML of the grammar page, fetched through the relay chain.
    ///
    /// Each relay gets one attempt bounded by the proxy timeout; any failure
    /// moves on to the next relay. Fails only when every relay has failed.
    pub async fn fetch_grammar_analysis_html(&self, chapter: u32, verse: u32) -> Result<String> {
        let target = self.analysis_page_url(chapter, verse)?;

        for (attempt, proxy) in self.proxies.iter().enumerate() {
            match self.fetch_via(proxy, target.as_str()).await {
                Ok(html) => {
                    info!(proxy = %proxy.name, attempt, bytes = html.len(), "analysis page fetched");
                    return Ok(html);
                }
                Err(e) => {
                    warn!(proxy = %proxy.name, attempt, error = %e, "relay failed, trying next");
                }
            }
        }

        Err(QuranError::AllSourcesExhausted {
            attempts: self.proxies.len(),
        })
    }

    async fn fetch_via(&self, proxy: &ProxyEndpoint, target: &str) -> Result<String> {
        let url = proxy.request_url(target);
        let body = tokio::time::timeout(self.proxy_timeout, self.fetcher.fetch(&url))
            .await
            .map_err(|_| QuranError::Timeout {
                url: url.clone(),
                after: self.proxy_timeout,
            })??;

        proxy.unwrap_body(body)
    }

    /// Dictionary analyses of `word`. An empty list is a valid answer.
    pub async fn fetch_morphology(&self, word: &str) -> Result<Vec<MorphologyWord>> {
        // URL parsing resolves `.` and `..` segments, even percent-encoded,
        // so such a word can never reach the server as a path segment.
        if word == "." || word == ".." {
            return Err(QuranError::InvalidRequest(format!(
                "{word:?} cannot be sent as a path segment"
            )));
        }

        let mut url = Url::parse(&self.endpoints.morphology_url)?;
        url.path_segments_mut()
            .map_err(|_| {
                QuranError::InvalidRequest(format!(
                    "morphology endpoint cannot take a path: {}",
                    self.endpoints.morphology_url
                ))
            })?
            .pop_if_empty()
            .push(word);
        url.query_pairs_mut().append_pair("filter_diacritics", "true");

        let body = self.fetcher.fetch(url.as_str()).await?;
        let response: MorphologyResponse = serde_json::from_slice(&body)?;
        Ok(response.words)
    }
}

fn expand_template(template: &str, chapter: u32, verse: u32) -> Result<Url> {
    let url = template
        .replace("{chapter}", &chapter.to_string())
        .replace("{verse}", &verse.to_string());
    Ok(Url::parse(&url)?)
}
