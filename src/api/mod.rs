// src/api/mod.rs
use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::model::RawArticle;

pub const DEFAULT_BASE_URL: &str = "https://gnews.io";
/// The search endpoint caps results; one page is all the dashboard shows.
pub const MAX_ARTICLES: usize = 10;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub enum FetchError {
    Http(reqwest::Error),
    Json(serde_json::Error),
    /// The body parsed as JSON but had no `articles` field (an invalid
    /// key, a quota error, or some other service-side payload).
    Api(Option<String>),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Http(e) => write!(f, "HTTP error: {}", e),
            FetchError::Json(e) => write!(f, "JSON error: {}", e),
            FetchError::Api(Some(msg)) => write!(f, "API error: {}", msg),
            FetchError::Api(None) => write!(f, "API error: response carried no articles"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Http(e) => Some(e),
            FetchError::Json(e) => Some(e),
            FetchError::Api(_) => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}
impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    articles: Vec<RawArticle>,
}

/// Client for the news search API. The key is injected at construction and
/// never logged; the base URL can be overridden to point tests at a mock
/// server.
pub struct NewsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NewsClient {
    pub fn new(api_key: String) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        })
    }

    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// One GET per cycle, no retries. Success or failure is decided by the
    /// body shape alone, not the HTTP status: an object with an `articles`
    /// field is a result set, anything else JSON is an API failure, and a
    /// body that is not JSON at all is a decode failure.
    pub async fn fetch(&self, topic: &str) -> Result<Vec<RawArticle>, FetchError> {
        let url = format!(
            "{}/api/v4/search?q={}&lang=en&country=us&max={}&apikey={}",
            self.base_url,
            urlencoding::encode(topic),
            MAX_ARTICLES,
            self.api_key
        );

        debug!(topic, "requesting news");
        let body = self.http.get(&url).send().await?.text().await?;
        let value: serde_json::Value = serde_json::from_str(&body)?;

        if value.get("articles").is_none() {
            return Err(FetchError::Api(error_message(&value)));
        }

        let parsed: SearchResponse = serde_json::from_value(value)?;
        debug!(count = parsed.articles.len(), "received articles");
        Ok(parsed.articles)
    }
}

/// Pull a human-readable message out of a failure payload. GNews reports
/// `{"errors": [...]}`; other gateways use `error` or `message`.
fn error_message(value: &serde_json::Value) -> Option<String> {
    if let Some(items) = value.get("errors").and_then(|v| v.as_array()) {
        if let Some(first) = items.first().and_then(|v| v.as_str()) {
            return Some(first.to_string());
        }
    }
    for field in ["error", "message"] {
        if let Some(msg) = value.get(field).and_then(|v| v.as_str()) {
            return Some(msg.to_string());
        }
    }
    None
}
