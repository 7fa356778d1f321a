//! Run summary over extracted listings, one per keyword.

use std::collections::{BTreeMap, BTreeSet};

use placemark_core::ExtractedListing;

use crate::render::KeywordResults;

#[derive(Debug, PartialEq)]
pub(crate) struct Summary {
    pub total_places: usize,
    /// Mean over listings whose rating parses.
    pub mean_rating: Option<f64>,
    /// Mean over listings whose review count parses; `999+` counts as 999.
    pub mean_reviews: Option<f64>,
    pub distinct_categories: usize,
}

impl Summary {
    pub(crate) fn from_listings<'a>(
        listings: impl IntoIterator<Item = &'a ExtractedListing>,
    ) -> Self {
        let listings: Vec<&ExtractedListing> = listings.into_iter().collect();
        let ratings = listings
            .iter()
            .filter_map(|l| l.rating.as_deref())
            .filter_map(|r| r.parse::<f64>().ok());
        let reviews = listings
            .iter()
            .filter_map(|l| l.review_count.as_deref())
            .filter_map(|r| r.trim_end_matches('+').parse::<f64>().ok());
        let categories: BTreeSet<&str> = listings
            .iter()
            .filter_map(|l| l.category.as_deref())
            .collect();

        Self {
            total_places: listings.len(),
            mean_rating: mean(ratings),
            mean_reviews: mean(reviews),
            distinct_categories: categories.len(),
        }
    }

    /// Summaries keyed and ordered by keyword; repeated keywords are merged.
    pub(crate) fn by_keyword(results: &[KeywordResults]) -> BTreeMap<&str, Summary> {
        let mut grouped: BTreeMap<&str, Vec<&ExtractedListing>> = BTreeMap::new();
        for set in results {
            grouped
                .entry(set.keyword.as_str())
                .or_default()
                .extend(&set.listings);
        }
        grouped
            .into_iter()
            .map(|(keyword, listings)| (keyword, Summary::from_listings(listings)))
            .collect()
    }

    pub(crate) fn log(&self, keyword: &str) {
        tracing::info!(
            keyword,
            total_places = self.total_places,
            mean_rating = ?self.mean_rating.map(|m| (m * 100.0).round() / 100.0),
            mean_reviews = ?self.mean_reviews.map(f64::round),
            distinct_categories = self.distinct_categories,
            "extraction summary"
        );
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0u32), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / f64::from(count))
}
