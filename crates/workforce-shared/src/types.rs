//! Common types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DEPARTMENT_PAGE_SIZE;

pub type EntityId = Uuid;

pub fn new_id() -> EntityId {
    Uuid::new_v4()
}

pub fn parse_entity_id(raw: &str) -> Option<EntityId> {
    Uuid::parse_str(raw.trim()).ok()
}

/// One-based page window over a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, per_page: DEPARTMENT_PAGE_SIZE }
    }
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Lenient `?page=` parsing: only the leading integer counts (`2abc` and
    /// `2.7` are page 2); anything missing, unparsable or below one is page 1.
    pub fn from_query(raw: Option<&str>, per_page: u32) -> Self {
        let page = raw
            .and_then(leading_integer)
            .filter(|p| *p >= 1)
            .map(|p| u32::try_from(p).unwrap_or(u32::MAX))
            .unwrap_or(1);
        Self::new(page, per_page)
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }

    pub fn total_pages(&self, total_results: u64) -> u64 {
        total_results.div_ceil(u64::from(self.per_page))
    }
}

/// Optional sign followed by the leading run of ASCII digits.
fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    let digits = unsigned.len() - unsigned.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let end = trimmed.len() - unsigned.len() + digits;
    // Overflowing runs saturate instead of falling back to the first page.
    Some(trimmed[..end].parse::<i64>().unwrap_or(if trimmed.starts_with('-') { i64::MIN } else { i64::MAX }))
}

/// Paginated listing envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_results: u64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(pagination: Pagination, total_results: u64, results: Vec<T>) -> Self {
        Self {
            current_page: pagination.page,
            total_pages: pagination.total_pages(total_results),
            total_results,
            results,
        }
    }
}
