//! Structured record produced from one crawled map-search listing.

use serde::{Deserialize, Serialize};

/// Column headers for a rendered listing table, in row-flattening order.
pub const COLUMN_HEADERS: [&str; 12] = [
    "순위",
    "장소명",
    "카테고리",
    "주소",
    "영업상태",
    "영업시간",
    "평점",
    "리뷰수",
    "네이버페이",
    "예약가능",
    "기타정보",
    "원본텍스트",
];

/// Business status phrase recognised in a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusinessStatus {
    Open,
    Closed,
    /// Regular holiday or temporary suspension.
    DayOff,
    NewlyOpened,
    Advertisement,
}

impl BusinessStatus {
    /// Canonical source-locale label, used when rendering rows.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BusinessStatus::Open => "영업 중",
            BusinessStatus::Closed => "영업 종료",
            BusinessStatus::DayOff => "휴무",
            BusinessStatus::NewlyOpened => "새로오픈",
            BusinessStatus::Advertisement => "광고",
        }
    }
}

impl std::fmt::Display for BusinessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Promotional marker found anywhere in a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromoMarker {
    /// Listed in a restaurant guide (Michelin).
    FeaturedGuide,
    Advertisement,
    NewlyOpened,
}

impl PromoMarker {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PromoMarker::FeaturedGuide => "미쉐린",
            PromoMarker::Advertisement => "광고",
            PromoMarker::NewlyOpened => "새로오픈",
        }
    }
}

impl std::fmt::Display for PromoMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields extracted from a single raw listing string.
///
/// Every field except `raw_text` is best-effort: `None`/`false`/empty means
/// the field was not found, never that extraction failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedListing {
    /// 1-indexed position, caller-supplied or positional.
    pub rank: Option<u32>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub address: Option<String>,
    pub business_status: Option<BusinessStatus>,
    pub business_hours: Option<String>,
    /// Decimal rating kept as text, e.g. `"4.5"`.
    pub rating: Option<String>,
    /// Integer text, possibly saturated with a `+` suffix (`"999+"`).
    pub review_count: Option<String>,
    pub payment_available: bool,
    pub reservation_available: bool,
    /// Promotional markers in canonical order (미쉐린, 광고, 새로오픈), without duplicates.
    pub other_markers: Vec<PromoMarker>,
    /// The unmodified input.
    pub raw_text: String,
}

impl ExtractedListing {
    /// A record with every optional field empty, preserving `raw_text`.
    ///
    /// A `rank` of `0` is treated as unset.
    #[must_use]
    pub fn empty(raw_text: impl Into<String>, rank: Option<u32>) -> Self {
        Self {
            rank: rank.filter(|r| *r > 0),
            raw_text: raw_text.into(),
            ..Self::default()
        }
    }

    /// Returns `true` when no optional field carries a value.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.address.is_none()
            && self.business_status.is_none()
            && self.business_hours.is_none()
            && self.rating.is_none()
            && self.review_count.is_none()
            && !self.payment_available
            && !self.reservation_available
            && self.other_markers.is_empty()
    }

    /// Flattens the record into cells matching [`COLUMN_HEADERS`].
    ///
    /// Absent values become empty cells and booleans render as `"O"` / `""`.
    #[must_use]
    pub fn to_row(&self) -> [String; 12] {
        let flag = |b: bool| if b { "O".to_owned() } else { String::new() };
        let text = |v: Option<&str>| v.unwrap_or_default().to_owned();

        [
            self.rank.map(|r| r.to_string()).unwrap_or_default(),
            text(self.name.as_deref()),
            text(self.category.as_deref()),
            text(self.address.as_deref()),
            self.business_status
                .map(|s| s.as_str().to_owned())
                .unwrap_or_default(),
            text(self.business_hours.as_deref()),
            text(self.rating.as_deref()),
            text(self.review_count.as_deref()),
            flag(self.payment_available),
            flag(self.reservation_available),
            self.other_markers
                .iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            self.raw_text.clone(),
        ]
    }
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
