//! Wire types for the crawler backend's `/search` endpoint.
//!
//! The backend drives a headless browser against the map site and returns
//! each result card's visible text unparsed in `raw_text`. `name` is the
//! card title when the backend could isolate it and may be empty. Ranks are
//! 1-based and follow on-page order; older backends omit them.

use serde::{Deserialize, Serialize};

/// Request body for `POST /search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub limit: u32,
}

/// One result card as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaceResult {
    #[serde(default)]
    pub name: String,

    /// 1-based position on the results page; `None` or `0` when unknown.
    #[serde(default)]
    pub rank: Option<u32>,

    #[serde(default)]
    pub raw_text: String,
}

impl PlaceResult {
    /// The text to extract from: `raw_text`, or `name` when the backend sent
    /// no card text.
    #[must_use]
    pub fn listing_text(&self) -> &str {
        if self.raw_text.trim().is_empty() {
            &self.name
        } else {
            &self.raw_text
        }
    }
}

/// Response body for `POST /search`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: String,

    #[serde(default)]
    pub results: Vec<PlaceResult>,

    /// Number of results the backend found, which may exceed `results.len()`.
    #[serde(default)]
    pub total_count: u64,
}
