use serde::{Deserialize, Serialize};

use crate::app::{QuranError, Result};

/// Where a relay expects the target URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetPlacement {
    /// Percent-encoded and appended to a prefix ending in `?`, `=` or `&`.
    #[default]
    Query,
    /// Appended verbatim to a path prefix.
    Path,
}

/// How a relay returns the fetched page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProxyResponse {
    /// The page body itself, as UTF-8.
    #[default]
    Raw,
    /// A JSON object whose `contents` field holds the page.
    JsonContents,
}

/// One entry in the relay fallback chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyEndpoint {
    pub name: String,
    pub prefix: String,
    #[serde(default)]
    pub target: TargetPlacement,
    #[serde(default)]
    pub response: ProxyResponse,
}

impl ProxyEndpoint {
    /// URL that asks this relay for `target`.
    pub fn request_url(&self, target: &str) -> String {
        match self.target {
            TargetPlacement::Query => {
                let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
                format!("{}{}", self.prefix, encoded)
            }
            TargetPlacement::Path => format!("{}{}", self.prefix, target),
        }
    }

    /// Page HTML from a response body of this relay.
    pub fn unwrap_body(&self, body: Vec<u8>) -> Result<String> {
        match self.response {
            ProxyResponse::Raw => String::from_utf8(body)
                .map_err(|e| QuranError::Transport(format!("{}: body is not UTF-8: {}", self.name, e))),
            ProxyResponse::JsonContents => {
                let envelope: serde_json::Value = serde_json::from_slice(&body)?;
                envelope
                    .get("contents")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_string)
                    .ok_or_else(|| {
                        QuranError::Transport(format!("{}: envelope has no contents", self.name))
                    })
            }
        }
    }
}
