pub mod batch;
pub mod client;
pub mod error;
pub mod extract;
pub mod lexicon;
pub(crate) mod rate_limit;
pub mod rules;
pub mod types;

pub use batch::{extract_all, extract_values};
pub use client::SearchClient;
pub use error::{ExtractError, ScraperError};
pub use extract::{extract, extract_value};
pub use rules::{field_rules, Field, FieldRule};
pub use types::{PlaceResult, SearchRequest, SearchResponse};
