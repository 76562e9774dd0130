// src/models/review.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;
pub const DEFAULT_PAGE_SIZE: u32 = 5;
pub const MAX_PAGE_SIZE: u32 = 10_000;

/// A stored review as it travels over the wire.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: i64,         // Server-assigned, monotonic
    #[serde(default)]
    pub text: String,    // Free-text comment, may be empty
    pub rating: u8,      // Always within MIN_RATING..=MAX_RATING
}

/// Body of `POST /api/reviews`. `text` may be missing or `null`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    #[serde(default)]
    pub text: Option<String>,
    pub rating: i64,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("rating must be between {MIN_RATING} and {MAX_RATING}, got {0}")]
pub struct InvalidRating(pub i64);

impl NewReview {
    pub fn validated_rating(&self) -> Result<u8, InvalidRating> {
        u8::try_from(self.rating)
            .ok()
            .filter(|rating| (MIN_RATING..=MAX_RATING).contains(rating))
            .ok_or(InvalidRating(self.rating))
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// One page of a listing plus the total number of matching rows.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReviewPage {
    pub data: Vec<Review>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl ReviewPage {
    /// Number of pages the filtered set spans, never less than one.
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.limit)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages() && self.total > 0
    }
}

pub fn total_pages(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(limit));
    u32::try_from(pages).unwrap_or(u32::MAX).max(1)
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Partial,
    Exact,
}

impl SearchMode {
    pub fn from_param(value: &str) -> Self {
        match value.trim() {
            "exact" => SearchMode::Exact,
            _ => SearchMode::Partial,
        }
    }

    pub fn as_param(self) -> &'static str {
        match self {
            SearchMode::Partial => "partial",
            SearchMode::Exact => "exact",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Id,
    Rating,
    Text,
}

impl SortField {
    pub fn from_param(value: &str) -> Self {
        match value.trim() {
            "rating" => SortField::Rating,
            "text" => SortField::Text,
            _ => SortField::Id,
        }
    }

    pub fn as_param(self) -> &'static str {
        self.column()
    }

    /// Column name used in `ORDER BY`. Only these fixed names ever reach SQL.
    pub fn column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Rating => "rating",
            SortField::Text => "text",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn from_param(value: &str) -> Self {
        match value.trim() {
            "asc" => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn as_param(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Raw query string of `GET /api/reviews`, every field exactly as sent.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQueryParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub search_type: Option<String>,
    pub case_sensitive: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// A normalized listing request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReviewQuery {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    pub mode: SearchMode,
    pub case_sensitive: bool,
    pub sort_by: SortField,
    pub order: SortOrder,
}

impl Default for ReviewQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: String::new(),
            mode: SearchMode::Partial,
            case_sensitive: false,
            sort_by: SortField::Id,
            order: SortOrder::Desc,
        }
    }
}

impl ReviewQuery {
    /// Coerces loose query parameters into a query. Garbage never fails the
    /// request; it falls back to the default for that parameter.
    pub fn from_params(params: &ReviewQueryParams, max_limit: u32) -> Self {
        let defaults = Self::default();
        let page = parse_number(params.page.as_deref())
            .map(|page| page.clamp(1, i64::from(u32::MAX)) as u32)
            .unwrap_or(defaults.page);
        let limit = parse_number(params.limit.as_deref())
            .map(|limit| limit.clamp(1, i64::from(max_limit.max(1))) as u32)
            .unwrap_or(defaults.limit.min(max_limit.max(1)));

        Self {
            page,
            limit,
            search: params.search.as_deref().unwrap_or("").trim().to_string(),
            mode: params
                .search_type
                .as_deref()
                .map(SearchMode::from_param)
                .unwrap_or_default(),
            case_sensitive: matches!(params.case_sensitive.as_deref().map(str::trim), Some("true" | "1")),
            sort_by: params
                .sort_by
                .as_deref()
                .map(SortField::from_param)
                .unwrap_or_default(),
            order: params
                .order
                .as_deref()
                .map(SortOrder::from_param)
                .unwrap_or_default(),
        }
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }

    pub fn has_search(&self) -> bool {
        !self.search.trim().is_empty()
    }

    /// Encodes the query the way the listing endpoint expects it.
    pub fn to_query_string(&self) -> String {
        format!(
            "page={}&limit={}&search={}&searchType={}&caseSensitive={}&sortBy={}&order={}",
            self.page,
            self.limit,
            urlencoding::encode(&self.search),
            self.mode.as_param(),
            self.case_sensitive,
            self.sort_by.as_param(),
            self.order.as_param(),
        )
    }
}

fn parse_number(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
}
