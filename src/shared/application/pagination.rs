/// Pagination support for queries
///
/// Standard pagination model used across all bounded contexts. Callers send a
/// zero-indexed `page` and a `size`; both arrive as raw strings and are
/// normalized here rather than rejected.
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const MIN_PAGE_SIZE: u32 = 1;

/// Normalized pagination parameters (zero-indexed page)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationParams {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size: page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE),
        }
    }

    /// Normalize raw page/size inputs.
    ///
    /// Absent or non-numeric page becomes 0, negative page becomes 0.
    /// Absent or non-numeric size becomes 20, any other size is clamped to [1, 100].
    pub fn from_raw(page: Option<&str>, size: Option<&str>) -> Self {
        let page = parse_integer(page).map_or(0, |p| p.clamp(0, i64::from(u32::MAX)) as u32);
        let page_size = parse_integer(size).map_or(DEFAULT_PAGE_SIZE, |s| {
            s.clamp(i64::from(MIN_PAGE_SIZE), i64::from(MAX_PAGE_SIZE)) as u32
        });

        Self { page, page_size }
    }

    /// One-indexed page number as the store addresses pages
    fn store_page(&self) -> u64 {
        u64::from(self.page) + 1
    }

    /// Calculate offset for store queries
    pub fn offset(&self) -> u64 {
        (self.store_page() - 1) * u64::from(self.page_size)
    }

    /// Get limit for store queries
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }

    /// Build the response envelope once the store has reported a total
    pub fn envelope(&self, total_items: u64) -> PaginationEnvelope {
        PaginationEnvelope::new(self.page, self.page_size, total_items)
    }
}

fn parse_integer(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
}

/// Pagination block returned next to paged data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationEnvelope {
    pub page: u32,
    pub size: u32,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PaginationEnvelope {
    pub fn new(page: u32, size: u32, total_items: u64) -> Self {
        let size_u64 = u64::from(size.max(MIN_PAGE_SIZE));
        let total_pages = total_items.div_ceil(size_u64);
        let has_next = (u64::from(page) + 1) * size_u64 < total_items;

        Self {
            page,
            size,
            total_items,
            total_pages,
            has_next,
            has_previous: page > 0,
        }
    }
}

/// Paginated result wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub pagination: PaginationEnvelope,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total_count: u64, params: &PaginationParams) -> Self {
        Self {
            items,
            pagination: params.envelope(total_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        let params = PaginationParams::from_raw(None, None);
        assert_eq!(params.page, 0);
        assert_eq!(params.page_size, 20);
        assert_eq!(params.offset(), 0);
        assert_eq!(params.limit(), 20);
    }

    #[test]
    fn test_page_normalization() {
        assert_eq!(PaginationParams::from_raw(Some("-3"), None).page, 0);
        assert_eq!(PaginationParams::from_raw(Some("abc"), None).page, 0);
        assert_eq!(PaginationParams::from_raw(Some(" 4 "), None).page, 4);
        assert_eq!(PaginationParams::from_raw(Some("2.5"), None).page, 0);
    }

    #[test]
    fn test_size_boundaries() {
        for raw in ["0", "-5", "101", "abc", "1e3"] {
            let size = PaginationParams::from_raw(None, Some(raw)).page_size;
            assert!((1..=100).contains(&size), "size {} for {:?}", size, raw);
        }
        assert_eq!(PaginationParams::from_raw(None, Some("0")).page_size, 1);
        assert_eq!(PaginationParams::from_raw(None, Some("-5")).page_size, 1);
        assert_eq!(PaginationParams::from_raw(None, Some("101")).page_size, 100);
        assert_eq!(PaginationParams::from_raw(None, Some("abc")).page_size, 20);
        assert_eq!(PaginationParams::from_raw(None, Some("1")).page_size, 1);
        assert_eq!(PaginationParams::from_raw(None, Some("100")).page_size, 100);
    }

    #[test]
    fn test_offset_is_page_times_size() {
        let params = PaginationParams::from_raw(Some("2"), Some("20"));
        assert_eq!(params.offset(), 40);
        assert_eq!(params.limit(), 20);

        let params = PaginationParams::new(7, 15);
        assert_eq!(params.offset(), 105);
    }

    #[test]
    fn test_envelope_last_partial_page() {
        let envelope = PaginationEnvelope::new(2, 20, 45);
        assert_eq!(envelope.total_pages, 3);
        assert!(!envelope.has_next);
        assert!(envelope.has_previous);
    }

    #[test]
    fn test_envelope_invariants() {
        for total in [0u64, 1, 19, 20, 21, 99, 100, 101, 1000] {
            for size in [1u32, 7, 20, 100] {
                for page in 0u32..6 {
                    let envelope = PaginationEnvelope::new(page, size, total);
                    let expected_pages = (total + u64::from(size) - 1) / u64::from(size);
                    assert_eq!(envelope.total_pages, expected_pages);
                    assert_eq!(
                        envelope.has_next,
                        (u64::from(page) + 1) * u64::from(size) < total
                    );
                    assert_eq!(envelope.has_previous, page > 0);
                }
            }
        }
    }

    #[test]
    fn test_empty_population() {
        let envelope = PaginationEnvelope::new(0, 20, 0);
        assert_eq!(envelope.total_pages, 0);
        assert!(!envelope.has_next);
        assert!(!envelope.has_previous);
    }
}
