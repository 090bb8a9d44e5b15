//! Wire types for the search backend.

use serde::{Deserialize, Serialize};

/// Full text of one document plus its relevance metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPayload {
    /// Identifier the document was requested with. Not part of the body.
    #[serde(skip)]
    pub document_id: String,
    pub document_name: String,
    pub score_percentage: String,
    pub word_count: u64,
    /// HTML fragment with `<mark>` highlights around query terms.
    pub full_content: String,
}

/// Query parameters for `/api/search`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub threshold: f64,
    pub max_results: u32,
}

/// Smallest similarity threshold the backend accepts.
pub const MIN_THRESHOLD: f64 = 0.001;
pub const DEFAULT_THRESHOLD: f64 = 0.01;
pub const DEFAULT_MAX_RESULTS: u32 = 5;

impl SearchRequest {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            threshold: DEFAULT_THRESHOLD,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Check the request against the backend's constraints.
    pub fn validate(&self) -> Result<(), String> {
        if self.query.trim().is_empty() {
            return Err("query must not be blank".to_string());
        }
        if self.threshold.is_nan() || self.threshold < MIN_THRESHOLD {
            return Err(format!("threshold must be at least {}", MIN_THRESHOLD));
        }
        if self.max_results < 1 {
            return Err("max results must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Result list returned by `/api/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub results: Vec<DocumentResult>,
    #[serde(default)]
    pub total_results: u32,
    /// Backend execution time in milliseconds.
    #[serde(default)]
    pub execution_time: f64,
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

/// One ranked document in a search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResult {
    pub document_name: String,
    pub similarity_score: f64,
    #[serde(default)]
    pub matching_terms: Vec<String>,
    #[serde(default)]
    pub formatted_score: Option<String>,
    #[serde(default)]
    pub score_percentage: Option<String>,
}

impl DocumentResult {
    /// Score as a percentage string, computed if the backend omitted it.
    pub fn percentage(&self) -> String {
        self.score_percentage
            .clone()
            .unwrap_or_else(|| format!("{:.1}%", self.similarity_score * 100.0))
    }
}

/// Corpus statistics from `/api/search/statistics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStatistics {
    pub total_documents: u64,
    pub total_unique_terms: u64,
}

/// Answer from `/api/search/check-relevance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelevanceCheck {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(alias = "hasRelevantDocuments", alias = "relevant")]
    pub has_relevant: bool,
    #[serde(default, alias = "totalResults")]
    pub result_count: Option<u32>,
}

/// Error body the backend sends alongside failures.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}
