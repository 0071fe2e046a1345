//! Limit/offset clamping for paginated listings.

/// Default page size for the login history listing.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Maximum page size accepted from clients.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Clamp a user-provided limit into `1..=max`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_when_absent() {
        assert_eq!(clamp_limit(None, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT), 20);
    }

    #[test]
    fn limit_is_capped_and_floored() {
        assert_eq!(clamp_limit(Some(5000), 20, 100), 100);
        assert_eq!(clamp_limit(Some(0), 20, 100), 1);
        assert_eq!(clamp_limit(Some(-3), 20, 100), 1);
    }

    #[test]
    fn negative_offset_becomes_zero() {
        assert_eq!(clamp_offset(Some(-10)), 0);
        assert_eq!(clamp_offset(Some(40)), 40);
        assert_eq!(clamp_offset(None), 0);
    }
}
