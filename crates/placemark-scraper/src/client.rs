//! HTTP client for the crawler backend's `/search` endpoint.

use std::time::Duration;

use placemark_core::{ExtractedListing, SearchConfig};
use reqwest::{Client, Url};

use crate::error::ScraperError;
use crate::extract::extract;
use crate::rate_limit::retry_with_backoff;
use crate::types::{SearchRequest, SearchResponse};

/// Seconds to wait when a 429 carries no usable `Retry-After` header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Client for the crawler backend.
///
/// Non-2xx responses become typed errors. Transient failures (429, 5xx,
/// network errors) are retried with exponential backoff up to `max_retries`
/// additional attempts.
pub struct SearchClient {
    client: Client,
    search_url: Url,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    backoff_base_secs: u64,
}

impl SearchClient {
    /// Creates a client for the backend rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidEndpoint`] if `base_url` is not an `http(s)` URL.
    /// - [`ScraperError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let search_url = Self::search_url(base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            search_url,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Creates a client from the loaded backend settings.
    ///
    /// # Errors
    ///
    /// See [`SearchClient::new`].
    pub fn from_config(config: &SearchConfig) -> Result<Self, ScraperError> {
        Self::new(
            &config.api_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
        )
    }

    /// Searches the backend for `query`, asking for at most `limit` results.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::EmptyQuery`] if `query` is blank; no request is sent.
    /// - [`ScraperError::RateLimited`] on HTTP 429 after all retries.
    /// - [`ScraperError::UnexpectedStatus`] on any other non-2xx status (5xx retried).
    /// - [`ScraperError::Http`] on network failure after all retries.
    /// - [`ScraperError::Deserialize`] if the body is not a search response.
    pub async fn search(&self, query: &str, limit: u32) -> Result<SearchResponse, ScraperError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ScraperError::EmptyQuery);
        }
        let body = SearchRequest {
            query: query.to_owned(),
            limit,
        };

        let body = &body;
        let client = &self.client;
        let url = &self.search_url;

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
            let response = client.post(url.clone()).json(body).send().await?;
            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.trim().parse::<u64>().ok())
                    .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                return Err(ScraperError::RateLimited {
                    endpoint: url.to_string(),
                    retry_after_secs,
                });
            }

            if !status.is_success() {
                return Err(ScraperError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            let text = response.text().await?;
            serde_json::from_str::<SearchResponse>(&text).map_err(|e| ScraperError::Deserialize {
                context: format!("search results for \"{query}\""),
                source: e,
            })
        })
        .await
    }

    /// Searches for `query` and extracts every returned card.
    ///
    /// At most `limit` listings are returned even if the backend sends more.
    /// Each keeps the backend's rank, or its 1-based position when the
    /// backend sent none.
    ///
    /// # Errors
    ///
    /// Same as [`SearchClient::search`].
    pub async fn fetch_listings(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<ExtractedListing>, ScraperError> {
        let response = self.search(query, limit).await?;
        let take = usize::try_from(limit).unwrap_or(usize::MAX);

        let listings: Vec<ExtractedListing> = response
            .results
            .iter()
            .take(take)
            .enumerate()
            .map(|(idx, place)| {
                let position = u32::try_from(idx + 1).unwrap_or(u32::MAX);
                let rank = place.rank.filter(|r| *r > 0).unwrap_or(position);
                extract(place.listing_text(), Some(rank))
            })
            .collect();

        tracing::info!(
            query = %response.query,
            returned = response.results.len(),
            total_count = response.total_count,
            extracted = listings.len(),
            "search results extracted"
        );
        Ok(listings)
    }

    /// Resolves the `/search` endpoint under `base_url`.
    ///
    /// A base whose path already ends in `/search` is used as-is.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidEndpoint`] if `base_url` does not parse
    /// or is not `http`/`https`.
    fn search_url(base_url: &str) -> Result<Url, ScraperError> {
        let invalid = |reason: String| ScraperError::InvalidEndpoint {
            url: base_url.to_owned(),
            reason,
        };

        let mut url = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme \"{}\"", url.scheme())));
        }

        let path = url.path().trim_end_matches('/').to_owned();
        if !path.ends_with("/search") {
            url.set_path(&format!("{path}/search"));
        }
        Ok(url)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
