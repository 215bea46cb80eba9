use super::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ts_rs::TS;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Keyset page request for review feeds.
///
/// `review_id` is the last id the client has seen; the next page holds ids strictly
/// below it, newest first. The first page omits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CursorRequest {
    pub review_id: Option<i64>,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for CursorRequest {
    fn default() -> Self {
        Self {
            review_id: None,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CursorRequest {
    pub fn new(review_id: Option<i64>, size: i64) -> Self {
        Self { review_id, size }
    }

    pub fn safe_size(&self) -> i64 {
        self.size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// Id order of a listing. With `Asc` a cursor selects ids above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    /// Whether `id` lies past `cursor` in this order.
    pub fn is_after(&self, id: i64, cursor: i64) -> bool {
        match self {
            SortDirection::Asc => id > cursor,
            SortDirection::Desc => id < cursor,
        }
    }
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(DomainError::ValidationError(format!(
                "unknown sort direction: {}",
                other
            ))),
        }
    }
}
