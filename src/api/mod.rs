//! Client for the document-search backend.

mod client;
mod models;

pub use client::{filter_suggestions, ApiError, SearchApiClient};
pub use models::{
    DocumentPayload, DocumentResult, RelevanceCheck, SearchRequest, SearchResponse,
    SearchStatistics, DEFAULT_MAX_RESULTS, DEFAULT_THRESHOLD, MIN_THRESHOLD,
};
