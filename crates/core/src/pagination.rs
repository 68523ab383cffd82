//! Page window rules shared by every list endpoint.

/// Rows returned when a list request names no `limit`.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Largest page a single list request may ask for.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Normalized `(limit, offset)` window for a list query.
///
/// A missing limit becomes [`DEFAULT_PAGE_LIMIT`]; any limit is forced into
/// `1..=MAX_PAGE_LIMIT`. Negative or missing offsets start at the first row.
pub fn page_window(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT);
    let offset = offset.map_or(0, |o| o.max(0));
    (limit, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_use_first_default_page() {
        assert_eq!(page_window(None, None), (DEFAULT_PAGE_LIMIT, 0));
    }

    #[test]
    fn oversized_limit_is_capped() {
        assert_eq!(page_window(Some(5_000), Some(10)), (MAX_PAGE_LIMIT, 10));
    }

    #[test]
    fn non_positive_limit_returns_one_row() {
        assert_eq!(page_window(Some(0), None).0, 1);
        assert_eq!(page_window(Some(-3), None).0, 1);
    }

    #[test]
    fn negative_offset_starts_at_zero() {
        assert_eq!(page_window(Some(5), Some(-40)), (5, 0));
    }
}
