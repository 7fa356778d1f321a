//! Field extraction from a single free-form listing string.
//!
//! Each field is extracted independently and a miss only leaves that field
//! empty. Order matters because pattern rules claim the text they match; see
//! [`crate::rules`].

use std::ops::Range;

use placemark_core::{BusinessStatus, ExtractedListing, PromoMarker};
use serde_json::Value;

use crate::error::ExtractError;
use crate::lexicon::{
    CATEGORY_LEXICON, LABEL_TOKENS, NAME_MAX_CHARS, PAYMENT_MARKERS, PROMO_MARKERS, REGIONS,
    RESERVATION_MARKERS, STATUS_PHRASES,
};
use crate::rules::{blank, rule, Field};

/// Object keys that may carry listing text, in preference order.
const TEXT_KEYS: &[&str] = &["raw_text", "text", "name"];

/// Extracts structured fields from one raw listing.
///
/// Never fails: unmatched fields stay empty, and `raw_text` is always the
/// input verbatim. A `rank` of `0` is treated as unset.
#[must_use]
pub fn extract(raw_text: &str, rank: Option<u32>) -> ExtractedListing {
    let mut listing = ExtractedListing::empty(raw_text, rank);
    if raw_text.trim().is_empty() {
        return listing;
    }

    // 1. Markers: pure containment on the raw text.
    listing.payment_available = contains_any(raw_text, PAYMENT_MARKERS);
    listing.reservation_available = contains_any(raw_text, RESERVATION_MARKERS);
    listing.other_markers = promo_markers(raw_text);

    // 2. Status: first status in priority order with a contained phrase.
    listing.business_status = business_status(raw_text);

    let mut working = raw_text.to_owned();
    blank_all(
        &mut working,
        PAYMENT_MARKERS
            .iter()
            .chain(RESERVATION_MARKERS)
            .chain(PROMO_MARKERS.iter().map(|(_, phrase)| phrase)),
    );

    // The name is bounded on the marker-free copy so that a marker never
    // decides where the name ends.
    let name_span = name_span(&working);
    listing.name = name_span
        .clone()
        .and_then(|span| clean_name(&working[span]))
        .or_else(|| clean_name(&raw_text[..prefix_end(raw_text)]));

    // 3-6. Pattern rules, each claiming its match.
    listing.business_hours = rule(Field::BusinessHours).claim(&mut working);
    listing.review_count = rule(Field::ReviewCount).claim(&mut working);
    listing.rating = rule(Field::Rating).claim(&mut working);
    listing.address = rule(Field::Address).claim(&mut working);

    // Leftover status phrases and bare labels would only confuse the category guess.
    blank_all(
        &mut working,
        STATUS_PHRASES
            .iter()
            .flat_map(|(_, phrases)| phrases.iter())
            .chain(LABEL_TOKENS),
    );

    // 7. Category; the fallback never reads inside the name span.
    listing.category = category(&working, name_span);

    listing
}

/// Extracts from a dynamically typed value.
///
/// Accepts a JSON string, or an object carrying its text under `raw_text`,
/// `text` or `name` (the first non-empty string wins) and an optional
/// positive integer `rank` that takes precedence over the `rank` argument.
///
/// # Errors
///
/// Returns [`ExtractError::InvalidInput`] when the value is not text and is
/// not an object with a string text field. No partial extraction is attempted.
pub fn extract_value(value: &Value, rank: Option<u32>) -> Result<ExtractedListing, ExtractError> {
    match value {
        Value::String(text) => Ok(extract(text, rank)),
        Value::Object(map) => {
            let texts: Vec<&str> = TEXT_KEYS
                .iter()
                .filter_map(|key| map.get(*key).and_then(Value::as_str))
                .collect();
            let Some(first) = texts.first() else {
                return Err(ExtractError::InvalidInput {
                    found: "object without a text field",
                });
            };
            let text = texts
                .iter()
                .find(|t| !t.trim().is_empty())
                .unwrap_or(first);
            let embedded_rank = map
                .get("rank")
                .and_then(Value::as_u64)
                .and_then(|r| u32::try_from(r).ok())
                .filter(|r| *r > 0);
            Ok(extract(text, embedded_rank.or(rank)))
        }
        other => Err(ExtractError::InvalidInput {
            found: json_type_name(other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

/// Promotional markers present in the text, in [`PROMO_MARKERS`] order.
fn promo_markers(text: &str) -> Vec<PromoMarker> {
    PROMO_MARKERS
        .iter()
        .filter(|(_, phrase)| text.contains(phrase))
        .map(|(marker, _)| *marker)
        .collect()
}

fn business_status(text: &str) -> Option<BusinessStatus> {
    STATUS_PHRASES
        .iter()
        .find(|(_, phrases)| contains_any(text, phrases))
        .map(|(status, _)| *status)
}

fn blank_all<'a>(working: &mut String, phrases: impl IntoIterator<Item = &'a &'a str>) {
    for phrase in phrases {
        while let Some(pos) = working.find(*phrase) {
            blank(working, pos..pos + phrase.len());
        }
    }
}

/// Lexicon hit on the working copy, else the fallback rule with the name
/// segment blanked so the name is never reported as its own category.
fn category(working: &str, name_span: Option<Range<usize>>) -> Option<String> {
    if let Some(hit) = CATEGORY_LEXICON.iter().find(|c| working.contains(*c)) {
        return Some((*hit).to_owned());
    }

    let mut remainder = working.to_owned();
    if let Some(span) = name_span {
        blank(&mut remainder, span);
    }
    rule(Field::Category).claim(&mut remainder)
}

/// Byte range of the name segment within `text`, which has its markers
/// blanked.
///
/// The segment starts at the first alphanumeric character and runs up to the
/// first boundary token. Without a boundary it is the first
/// [`NAME_MAX_CHARS`] characters of `text`.
fn name_span(text: &str) -> Option<Range<usize>> {
    let start = text.find(char::is_alphanumeric)?;
    if let Some(end) = boundary_offset(&text[start..]).map(|offset| start + offset) {
        return Some(start..end);
    }
    Some(0..prefix_end(text))
}

/// Byte offset just past the first [`NAME_MAX_CHARS`] characters.
fn prefix_end(text: &str) -> usize {
    text.char_indices()
        .nth(NAME_MAX_CHARS)
        .map_or(text.len(), |(idx, _)| idx)
}

/// Byte offset of the first whitespace-preceded token in `body` that marks
/// the end of a name.
fn boundary_offset(body: &str) -> Option<usize> {
    let mut prev_is_space = false;
    for (idx, ch) in body.char_indices() {
        let is_space = ch.is_whitespace();
        if prev_is_space && !is_space {
            let token = body[idx..]
                .split(char::is_whitespace)
                .next()
                .unwrap_or_default();
            if is_boundary_token(token) {
                return Some(idx);
            }
        }
        prev_is_space = is_space;
    }
    None
}

/// Labels, status words, regions, lexicon categories, and venue words
/// (anything the category fallback would pick up) all end a name.
fn is_boundary_token(token: &str) -> bool {
    LABEL_TOKENS.iter().any(|w| token.starts_with(w))
        || STATUS_PHRASES
            .iter()
            .flat_map(|(_, phrases)| phrases.iter())
            .filter_map(|phrase| phrase.split_whitespace().next())
            .any(|head| token.starts_with(head))
        || REGIONS.iter().any(|w| token.starts_with(w))
        || CATEGORY_LEXICON.iter().any(|c| *c == token)
        || rule(Field::Category).find(token).is_some()
}

/// Drops characters that are neither word characters nor whitespace and
/// collapses whitespace runs. Returns `None` when nothing is left.
fn clean_name(segment: &str) -> Option<String> {
    let cleaned: String = segment
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    let name = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
