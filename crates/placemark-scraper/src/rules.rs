//! Ordered table of pattern-based field rules.
//!
//! Listing text has no delimiters, so several patterns can match overlapping
//! text. Rules are applied in ascending `priority`; each rule that matches
//! claims its whole match by blanking it out of the working copy, so later
//! rules never see text an earlier rule consumed.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::lexicon::{ADMIN_UNIT_SUFFIXES, REGIONS, REGION_LONG_SUFFIXES};

/// Fields extracted by a pattern rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    BusinessHours,
    ReviewCount,
    Rating,
    Address,
    /// Pattern fallback used only when no lexicon category is present.
    Category,
}

/// One entry of the rule table.
#[derive(Debug)]
pub struct FieldRule {
    pub field: Field,
    pub priority: u8,
    pattern: Regex,
    /// Capture group holding the value; `0` means the whole match.
    group: usize,
}

impl FieldRule {
    fn new(field: Field, priority: u8, pattern: &str, group: usize) -> Self {
        Self {
            field,
            priority,
            pattern: Regex::new(pattern).expect("valid regex"),
            group,
        }
    }

    /// Finds the first match in `text`, returning the span of the whole match
    /// and the normalized value.
    #[must_use]
    pub fn find(&self, text: &str) -> Option<(Range<usize>, String)> {
        let caps = self.pattern.captures(text)?;
        let whole = caps.get(0)?.range();
        let value = normalize(self.field, caps.get(self.group)?.as_str());
        if value.is_empty() {
            return None;
        }
        Some((whole, value))
    }

    /// Applies the rule to `working`, blanking the matched span on success.
    pub fn claim(&self, working: &mut String) -> Option<String> {
        let (span, value) = self.find(working)?;
        blank(working, span);
        tracing::trace!(field = ?self.field, value = %value, "field claimed");
        Some(value)
    }
}

fn normalize(field: Field, raw: &str) -> String {
    let trimmed = raw.trim();
    match field {
        Field::ReviewCount => trimmed.replace(',', ""),
        _ => trimmed.to_owned(),
    }
}

/// Overwrites `range` with spaces of the same byte length so that byte
/// offsets computed against the original text stay valid.
pub(crate) fn blank(working: &mut String, range: Range<usize>) {
    let width = range.len();
    working.replace_range(range, &" ".repeat(width));
}

/// Builds the address pattern: a region, optional long-form suffix, one or
/// more unit tokens ending in an administrative suffix, and an optional lot
/// number.
fn address_pattern() -> String {
    let regions = REGIONS.join("|");
    let long_suffixes = REGION_LONG_SUFFIXES.join("|");
    let unit_suffixes: String = ADMIN_UNIT_SUFFIXES.iter().collect();
    format!(
        r"(?:{regions})(?:{long_suffixes})?(?:\s+[가-힣0-9-]*[가-힣0-9][{unit_suffixes}]\b)+(?:\s+\d+(?:-\d+)?(?:번지)?(?:\s|$))?"
    )
}

static RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    let mut rules = vec![
        FieldRule::new(
            Field::BusinessHours,
            30,
            r"\d{1,2}:\d{2}에\s*영업\s*(?:시작|종료)",
            0,
        ),
        FieldRule::new(Field::ReviewCount, 40, r"리뷰\s*(\d+(?:,\d{3})*\+?)", 1),
        FieldRule::new(Field::Rating, 50, r"별점\s*(\d+(?:\.\d+)?)", 1),
        FieldRule::new(Field::Address, 60, &address_pattern(), 0),
        FieldRule::new(
            Field::Category,
            70,
            r"(?:[가-힣]+[점집관당원샵]|음식|요리)\b",
            0,
        ),
    ];
    rules.sort_by_key(|rule| rule.priority);
    rules
});

/// The full rule table in application order.
#[must_use]
pub fn field_rules() -> &'static [FieldRule] {
    &RULES
}

/// Looks up the rule for `field`.
///
/// Every [`Field`] variant has exactly one rule.
#[must_use]
pub fn rule(field: Field) -> &'static FieldRule {
    RULES
        .iter()
        .find(|r| r.field == field)
        .expect("every field has a rule")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(field: Field, text: &str) -> Option<String> {
        rule(field).find(text).map(|(_, v)| v)
    }

    #[test]
    fn rules_are_sorted_by_priority() {
        let priorities: Vec<u8> = field_rules().iter().map(|r| r.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort_unstable();
        assert_eq!(priorities, sorted);
    }

    #[test]
    fn table_order_matches_extraction_order() {
        let fields: Vec<Field> = field_rules().iter().map(|r| r.field).collect();
        assert_eq!(
            fields,
            vec![
                Field::BusinessHours,
                Field::ReviewCount,
                Field::Rating,
                Field::Address,
                Field::Category,
            ]
        );
    }

    #[test]
    fn hours_matches_open_and_close_phrases() {
        assert_eq!(
            value(Field::BusinessHours, "영업 중 22:00에 영업 종료"),
            Some("22:00에 영업 종료".to_owned())
        );
        assert_eq!(
            value(Field::BusinessHours, "곧 영업 시작 11:30에 영업 시작"),
            Some("11:30에 영업 시작".to_owned())
        );
        assert_eq!(value(Field::BusinessHours, "영업 중"), None);
    }

    #[test]
    fn review_count_keeps_saturation_suffix() {
        assert_eq!(value(Field::ReviewCount, "리뷰 999+"), Some("999+".to_owned()));
    }

    #[test]
    fn review_count_removes_comma_grouping() {
        assert_eq!(
            value(Field::ReviewCount, "방문자리뷰 1,234 블로그리뷰 56"),
            Some("1234".to_owned())
        );
    }

    #[test]
    fn review_count_requires_adjacent_label() {
        assert_eq!(value(Field::ReviewCount, "리뷰 없음 128"), None);
        assert_eq!(value(Field::ReviewCount, "별점4.5 128"), None);
    }

    #[test]
    fn rating_requires_label() {
        assert_eq!(value(Field::Rating, "별점4.5"), Some("4.5".to_owned()));
        assert_eq!(value(Field::Rating, "별점 4.12"), Some("4.12".to_owned()));
        assert_eq!(value(Field::Rating, "리뷰 4.5"), None);
    }

    #[test]
    fn address_stops_at_first_non_unit_token() {
        assert_eq!(
            value(Field::Address, "한식당 서울 강남구 역삼동 영업 중"),
            Some("서울 강남구 역삼동".to_owned())
        );
    }

    #[test]
    fn address_accepts_long_form_region_and_lot_number() {
        assert_eq!(
            value(Field::Address, "서울특별시 마포구 양화로 45 영업 중"),
            Some("서울특별시 마포구 양화로 45".to_owned())
        );
        assert_eq!(
            value(Field::Address, "경기도 성남시 분당구 정자동 12-3"),
            Some("경기도 성남시 분당구 정자동 12-3".to_owned())
        );
    }

    #[test]
    fn address_ignores_time_after_unit() {
        assert_eq!(
            value(Field::Address, "부산 해운대구 우동 11:00에 영업 시작"),
            Some("부산 해운대구 우동".to_owned())
        );
    }

    #[test]
    fn address_rejects_partial_unit_token() {
        assert_eq!(value(Field::Address, "서울 동대문구청 앞"), None);
    }

    #[test]
    fn address_requires_known_region() {
        assert_eq!(value(Field::Address, "도쿄 시부야구 진구마에"), None);
    }

    #[test]
    fn category_fallback_matches_venue_suffix() {
        assert_eq!(
            value(Field::Category, "   감성 칼국수집 리뷰"),
            Some("칼국수집".to_owned())
        );
        assert_eq!(value(Field::Category, "   퓨전 요리"), Some("요리".to_owned()));
    }

    #[test]
    fn claim_blanks_span_without_shifting_offsets() {
        let mut working = "리뷰 128 별점4.5".to_owned();
        let original_len = working.len();
        let reviews = rule(Field::ReviewCount).claim(&mut working);
        assert_eq!(reviews, Some("128".to_owned()));
        assert_eq!(working.len(), original_len);
        assert!(!working.contains("리뷰"));
        assert_eq!(rule(Field::Rating).claim(&mut working), Some("4.5".to_owned()));
    }

    #[test]
    fn earlier_rule_claims_shared_text() {
        // The hours phrase ends in `영업 종료`; once claimed, no later rule can reuse it.
        let mut working = "서울 중구 명동 21:00에 영업 종료".to_owned();
        assert!(rule(Field::BusinessHours).claim(&mut working).is_some());
        assert_eq!(
            rule(Field::Address).claim(&mut working),
            Some("서울 중구 명동".to_owned())
        );
        assert!(!working.contains("영업"));
    }
}
