//! HTTP client for the search backend's read-only endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use url::Url;

use super::models::{
    DocumentPayload, ErrorBody, RelevanceCheck, SearchRequest, SearchResponse, SearchStatistics,
};
use crate::config::Settings;
use crate::viewer::DocumentSource;

const USER_AGENT: &str = concat!("docviewer/", env!("CARGO_PKG_VERSION"));

/// Minimum input length before suggestions are offered.
const SUGGESTION_MIN_CHARS: usize = 3;
/// Maximum number of suggestions returned.
const SUGGESTION_LIMIT: usize = 3;

/// Errors from talking to the search backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Connection error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Status {
        status: u16,
        message: Option<String>,
    },

    #[error("Backend error: {0}")]
    Application(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// The message the backend supplied with the failure, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            ApiError::Application(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Client for `/api/*` on the search backend.
#[derive(Clone)]
pub struct SearchApiClient {
    client: Client,
    base_url: String,
}

impl SearchApiClient {
    /// Create a client with the default user agent.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        Self::with_user_agent(base_url, timeout, None)
    }

    /// Create a client, optionally overriding the user agent.
    pub fn with_user_agent(
        base_url: &str,
        timeout: Duration,
        user_agent: Option<&str>,
    ) -> Result<Self, ApiError> {
        let parsed =
            Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .user_agent(user_agent.unwrap_or(USER_AGENT))
            .timeout(timeout)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from loaded settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        Self::with_user_agent(
            &settings.base_url,
            Duration::from_secs(settings.request_timeout),
            settings.user_agent.as_deref(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an endpoint URL with percent-encoded query parameters.
    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}{}", self.base_url, path);
        for (i, (key, value)) in params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    /// GET a JSON endpoint, mapping failures onto [`ApiError`].
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!("GET {}", url);
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .filter(|m| !m.is_empty());
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))?;
        if let Some(error) = value.get("error").and_then(|e| e.as_str()) {
            return Err(ApiError::Application(error.to_string()));
        }

        serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Fetch a document's full text with highlights for `query`.
    pub async fn full_document(
        &self,
        doc_id: &str,
        query: &str,
    ) -> Result<DocumentPayload, ApiError> {
        let url = self.endpoint("/api/document/full", &[("docId", doc_id), ("query", query)]);
        let mut payload: DocumentPayload = self.get_json(&url).await?;
        payload.document_id = doc_id.to_string();
        Ok(payload)
    }

    /// Run a ranked search.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError> {
        request.validate().map_err(ApiError::InvalidRequest)?;

        let threshold = request.threshold.to_string();
        let max_results = request.max_results.to_string();
        let url = self.endpoint(
            "/api/search",
            &[
                ("query", request.query.as_str()),
                ("threshold", threshold.as_str()),
                ("maxResults", max_results.as_str()),
            ],
        );

        let response: SearchResponse = self.get_json(&url).await?;
        if !response.success {
            return Err(ApiError::Application(
                response
                    .message
                    .unwrap_or_else(|| "search failed".to_string()),
            ));
        }
        Ok(response)
    }

    /// Corpus statistics.
    pub async fn statistics(&self) -> Result<SearchStatistics, ApiError> {
        let url = self.endpoint("/api/search/statistics", &[]);
        self.get_json(&url).await
    }

    /// Ask whether any document is relevant to `query`.
    pub async fn check_relevance(&self, query: &str) -> Result<RelevanceCheck, ApiError> {
        if query.trim().is_empty() {
            return Err(ApiError::InvalidRequest("query must not be blank".to_string()));
        }
        let url = self.endpoint("/api/search/check-relevance", &[("query", query)]);
        self.get_json(&url).await
    }

    /// Autocomplete suggestions for partially typed input.
    pub async fn suggestions(&self, input: &str) -> Result<Vec<String>, ApiError> {
        if input.trim().chars().count() < SUGGESTION_MIN_CHARS {
            return Ok(Vec::new());
        }
        let url = self.endpoint("/api/suggestions", &[("term", input)]);
        let candidates: Vec<String> = self.get_json(&url).await?;
        Ok(filter_suggestions(input, &candidates))
    }
}

/// Keep candidates containing `input` (case-insensitive), first few only.
pub fn filter_suggestions(input: &str, candidates: &[String]) -> Vec<String> {
    let needle = input.trim().to_lowercase();
    if needle.chars().count() < SUGGESTION_MIN_CHARS {
        return Vec::new();
    }
    candidates
        .iter()
        .filter(|c| c.to_lowercase().contains(&needle))
        .take(SUGGESTION_LIMIT)
        .cloned()
        .collect()
}

#[async_trait]
impl DocumentSource for SearchApiClient {
    async fn fetch_full_document(
        &self,
        doc_id: &str,
        query: &str,
    ) -> Result<DocumentPayload, ApiError> {
        self.full_document(doc_id, query).await
    }
}
