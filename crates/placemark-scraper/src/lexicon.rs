//! Fixed vocabularies used by the listing extractor.
//!
//! Everything here is source-locale text as it appears in crawled map
//! listings. Slice order is significant wherever a first-hit-wins scan is
//! applied.

use placemark_core::{BusinessStatus, PromoMarker};

/// Payment-integration markers.
pub const PAYMENT_MARKERS: &[&str] = &["네이버페이"];

/// Reservation and chat-reservation markers.
pub const RESERVATION_MARKERS: &[&str] = &["예약", "톡톡"];

/// Promotional markers, in canonical order.
pub const PROMO_MARKERS: &[(PromoMarker, &str)] = &[
    (PromoMarker::FeaturedGuide, "미쉐린"),
    (PromoMarker::Advertisement, "광고"),
    (PromoMarker::NewlyOpened, "새로오픈"),
];

/// Status phrases in priority order: the first status with any phrase
/// contained in the text wins.
///
/// Closed is checked before open, and suspension phrases before open because
/// `영업 중단` contains `영업 중`.
pub const STATUS_PHRASES: &[(BusinessStatus, &[&str])] = &[
    (BusinessStatus::Closed, &["영업 종료", "영업종료"]),
    (
        BusinessStatus::DayOff,
        &["휴무", "휴업", "영업 중단", "영업중단"],
    ),
    (BusinessStatus::Open, &["영업 중", "영업중"]),
    (BusinessStatus::NewlyOpened, &["새로오픈"]),
    (BusinessStatus::Advertisement, &["광고"]),
];

/// Label tokens that introduce a value (`별점4.5`, `리뷰 128`) or a status.
pub const LABEL_TOKENS: &[&str] = &["별점", "리뷰", "영업"];

/// Known categories, checked by containment in this order.
///
/// `바` is last because as a single syllable it occurs inside many unrelated
/// words.
pub const CATEGORY_LEXICON: &[&str] = &[
    "한식",
    "중식",
    "일식",
    "양식",
    "카페",
    "베이커리",
    "치킨",
    "피자",
    "분식",
    "냉면",
    "갈비",
    "삼겹살",
    "스테이크",
    "이자카야",
    "술집",
    "공방",
    "미용실",
    "병원",
    "약국",
    "은행",
    "바",
];

/// Top-level administrative regions an address must start with.
pub const REGIONS: &[&str] = &[
    "서울", "부산", "대구", "인천", "광주", "대전", "울산", "세종", "경기", "강원", "충북", "충남",
    "전북", "전남", "경북", "경남", "제주",
];

/// Long-form suffixes that may directly follow a region name (`서울특별시`).
pub const REGION_LONG_SUFFIXES: &[&str] = &["특별자치시", "특별자치도", "특별시", "광역시", "도"];

/// Final syllables of administrative units and road names.
pub const ADMIN_UNIT_SUFFIXES: &[char] = &['시', '군', '구', '동', '읍', '면', '리', '로', '길', '가'];

/// Maximum name length, in characters, when no boundary keyword is found.
pub const NAME_MAX_CHARS: usize = 20;
