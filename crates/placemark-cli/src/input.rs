//! Reading listing text from files or stdin.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use placemark_core::ExtractedListing;
use placemark_scraper::{extract_all, extract_values};
use serde_json::Value;

/// Reads the whole of `source`, where `-` means stdin.
pub(crate) fn read_source(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read listings from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(source).with_context(|| format!("failed to read {source}"))
}

/// Extracts every listing in `text`.
///
/// A JSON array is treated as one listing per element; anything else as one
/// listing per non-blank line.
pub(crate) fn parse_listings(text: &str) -> Vec<ExtractedListing> {
    if text.trim_start().starts_with('[') {
        if let Ok(Value::Array(values)) = serde_json::from_str::<Value>(text) {
            return extract_values(&values);
        }
        tracing::debug!("input looks like JSON but does not parse; reading it line by line");
    }
    extract_all(text.lines().filter(|line| !line.trim().is_empty()))
}

/// Label used in export metadata and file names for a given input source.
pub(crate) fn keyword_for(source: &str) -> String {
    if source == "-" {
        return "stdin".to_owned();
    }
    Path::new(source)
        .file_stem()
        .map_or_else(|| source.to_owned(), |stem| stem.to_string_lossy().into_owned())
}
