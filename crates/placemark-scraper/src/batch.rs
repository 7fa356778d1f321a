//! Extraction over whole result pages.

use placemark_core::ExtractedListing;
use serde_json::Value;

use crate::extract::{extract, extract_value};

fn positional_rank(index: usize) -> Option<u32> {
    Some(u32::try_from(index + 1).unwrap_or(u32::MAX))
}

/// Extracts every text in order, ranking each by its 1-based position.
#[must_use]
pub fn extract_all<I, S>(texts: I) -> Vec<ExtractedListing>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts
        .into_iter()
        .enumerate()
        .map(|(idx, text)| extract(text.as_ref(), positional_rank(idx)))
        .collect()
}

/// Extracts every value in order. An entry that is not listing text becomes
/// an empty record holding its JSON rendering, so the output always has one
/// record per input.
#[must_use]
pub fn extract_values(values: &[Value]) -> Vec<ExtractedListing> {
    values
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            let rank = positional_rank(idx);
            extract_value(value, rank).unwrap_or_else(|err| {
                tracing::warn!(index = idx, error = %err, "skipping fields of invalid listing input");
                ExtractedListing::empty(value.to_string(), rank)
            })
        })
        .collect()
}
