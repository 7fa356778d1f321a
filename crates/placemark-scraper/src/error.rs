use thiserror::Error;

/// Failure to interpret an input value as listing text.
///
/// Field-level misses are never errors; this only fires when the input is not
/// text at all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("listing input must be text, got {found}")]
    InvalidInput { found: &'static str },
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {endpoint} (retry after {retry_after_secs}s)")]
    RateLimited {
        endpoint: String,
        retry_after_secs: u64,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid search endpoint \"{url}\": {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("search keyword must not be empty")]
    EmptyQuery,
}
