use std::path::Path;
use std::sync::Arc;

use crate::app::error::Result;
use crate::config::Config;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::session::{MorphologyLookup, VerseNavigator};
use crate::source::ContentSource;

pub struct AppContext {
    pub config: Config,
    pub source: Arc<ContentSource>,
}

impl AppContext {
    /// Context from the config file at `config_path`, or the default location.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let config = config.with_default_proxies();
        config.validate()?;

        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.http)?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Context over any transport, e.g. a canned one in tests.
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        let config = config.with_default_proxies();
        let source = Arc::new(ContentSource::new(fetcher, &config));

        Self { config, source }
    }

    pub fn navigator(&self) -> VerseNavigator {
        VerseNavigator::new(self.source.clone())
    }

    pub fn morphology_lookup(&self) -> MorphologyLookup {
        MorphologyLookup::new(self.source.clone())
    }
}
