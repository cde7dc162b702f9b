//! Configuration management for quran-tools.
//!
//! Configuration is read from `~/.config/quran-tools/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::source::{ProxyEndpoint, ProxyResponse, TargetPlacement};

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub endpoints: EndpointConfig,
    pub http: HttpConfig,
    /// Relays for the grammar page, tried in order.
    pub proxies: Vec<ProxyEndpoint>,
}

/// Upstream URLs. Templates use `{chapter}` and `{verse}` placeholders.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub chapters_url: String,
    pub translation_url: String,
    /// Base URL; the looked-up word is appended as a path segment.
    pub morphology_url: String,
    pub analysis_page_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            chapters_url: "https://api.alquran.cloud/v1/surah".to_string(),
            translation_url: "https://quranapi.pages.dev/api/{chapter}/{verse}.json".to_string(),
            morphology_url: "https://aratools.com/api/v1/dictionary/lookup/ar/".to_string(),
            analysis_page_url:
                "https://surahquran.com/quran-search/e3rab-aya-{verse}-sora-{chapter}.html"
                    .to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,

    /// Overall timeout for direct API requests (default: 30)
    pub request_timeout_secs: u64,

    /// Bound on each individual proxy attempt (default: 10)
    pub proxy_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("quran-tools/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout_secs: 30,
            proxy_timeout_secs: 10,
        }
    }
}

impl HttpConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn proxy_timeout(&self) -> Duration {
        Duration::from_secs(self.proxy_timeout_secs)
    }
}

/// The relay chain used when no `[[proxies]]` are configured.
pub fn default_proxies() -> Vec<ProxyEndpoint> {
    vec![
        ProxyEndpoint {
            name: "allorigins".to_string(),
            prefix: "https://api.allorigins.win/get?url=".to_string(),
            target: TargetPlacement::Query,
            response: ProxyResponse::JsonContents,
        },
        ProxyEndpoint {
            name: "corsproxy".to_string(),
            prefix: "https://corsproxy.io/?".to_string(),
            target: TargetPlacement::Query,
            response: ProxyResponse::Raw,
        },
        ProxyEndpoint {
            name: "thingproxy".to_string(),
            prefix: "https://thingproxy.freeboard.io/fetch/".to_string(),
            target: TargetPlacement::Path,
            response: ProxyResponse::Raw,
        },
        ProxyEndpoint {
            name: "codetabs".to_string(),
            prefix: "https://api.codetabs.com/v1/proxy?quest=".to_string(),
            target: TargetPlacement::Query,
            response: ProxyResponse::Raw,
        },
    ]
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default().with_default_proxies());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config = config.with_default_proxies();
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path: `~/.config/quran-tools/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("quran-tools").join("config.toml"))
    }

    /// Fill in the built-in relay chain when none is configured.
    pub fn with_default_proxies(mut self) -> Self {
        if self.proxies.is_empty() {
            self.proxies = default_proxies();
        }
        self
    }

    /// Check that every URL template expands to a parseable URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let templates = [
            ("chapters_url", &self.endpoints.chapters_url),
            ("translation_url", &self.endpoints.translation_url),
            ("morphology_url", &self.endpoints.morphology_url),
            ("analysis_page_url", &self.endpoints.analysis_page_url),
        ];
        for (key, template) in templates {
            let sample = template.replace("{chapter}", "1").replace("{verse}", "1");
            url::Url::parse(&sample)
                .map_err(|e| ConfigError::Invalid(format!("{key}: {e}")))?;
        }

        for proxy in &self.proxies {
            url::Url::parse(&proxy.prefix)
                .map_err(|e| ConfigError::Invalid(format!("proxy {}: {e}", proxy.name)))?;
        }

        if self.http.proxy_timeout_secs == 0 {
            return Err(ConfigError::Invalid("proxy_timeout_secs must be > 0".into()));
        }

        Ok(())
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# quran-tools configuration
#
# URL templates accept {chapter} and {verse} placeholders.

[endpoints]
chapters_url = "https://api.alquran.cloud/v1/surah"
translation_url = "https://quranapi.pages.dev/api/{chapter}/{verse}.json"
# The looked-up word is appended as an encoded path segment
morphology_url = "https://aratools.com/api/v1/dictionary/lookup/ar/"
analysis_page_url = "https://surahquran.com/quran-search/e3rab-aya-{verse}-sora-{chapter}.html"

[http]
user_agent = "quran-tools/0.1.0"

# Timeout for direct API requests in seconds
request_timeout_secs = 30

# Timeout for each proxy attempt in seconds
proxy_timeout_secs = 10

# Relays used to reach the analysis page, tried in order.
#
# target   = "query": the encoded page URL is appended to the prefix
#            "path":  the page URL is appended verbatim
# response = "json_contents": body is {"contents": "<html>"}
#            "raw":           body is the page itself

[[proxies]]
name = "allorigins"
prefix = "https://api.allorigins.win/get?url="
target = "query"
response = "json_contents"

[[proxies]]
name = "corsproxy"
prefix = "https://corsproxy.io/?"
target = "query"
response = "raw"

[[proxies]]
name = "thingproxy"
prefix = "https://thingproxy.freeboard.io/fetch/"
target = "path"
response = "raw"

[[proxies]]
name = "codetabs"
prefix = "https://api.codetabs.com/v1/proxy?quest="
target = "query"
response = "raw"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
