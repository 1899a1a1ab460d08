//! Limit/offset pagination.

use crate::validation::{FieldErrorKind, ValidationErrors};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIMIT: u32 = 2;

/// Largest page size a caller may receive. Larger requests are clamped.
pub const MAX_LIMIT: u32 = 6;

/// A validated window into an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    limit: u32,
    offset: u64,
}

impl Page {
    /// Build a page from optional caller input.
    ///
    /// A missing or non-positive `limit` falls back to [`DEFAULT_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns a field error when `offset` does not fit the database's signed
    /// integer range.
    pub fn new(limit: Option<i64>, offset: Option<u64>) -> Result<Self, ValidationErrors> {
        let limit = match limit {
            Some(limit) if limit > 0 => {
                u32::try_from(limit).map_or(MAX_LIMIT, |limit| limit.min(MAX_LIMIT))
            }
            _ => DEFAULT_LIMIT,
        };

        let offset = offset.unwrap_or_default();

        if i64::try_from(offset).is_err() {
            return Err(ValidationErrors::single("offset", FieldErrorKind::OutOfRange));
        }

        Ok(Self { limit, offset })
    }

    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    #[must_use]
    pub const fn offset(self) -> u64 {
        self.offset
    }

    pub(crate) fn limit_i64(self) -> i64 {
        i64::from(self.limit)
    }

    pub(crate) fn offset_i64(self) -> i64 {
        i64::try_from(self.offset).unwrap_or(i64::MAX)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_use_defaults() {
        let page = Page::new(None, None).expect("defaults are valid");

        assert_eq!(page.limit(), DEFAULT_LIMIT);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn limit_above_maximum_is_clamped() {
        let page = Page::new(Some(50), Some(4)).expect("large limits are clamped");

        assert_eq!(page.limit(), MAX_LIMIT);
        assert_eq!(page.offset(), 4);
    }

    #[test]
    fn non_positive_limits_use_the_default() {
        for limit in [0, -1, i64::MIN] {
            let page = Page::new(Some(limit), Some(2)).expect("non-positive limits are valid");

            assert_eq!(page.limit(), DEFAULT_LIMIT, "limit={limit}");
            assert_eq!(page.offset(), 2);
        }
    }

    #[test]
    fn limit_beyond_u32_is_clamped() {
        let page = Page::new(Some(i64::MAX), None).expect("huge limits are clamped");

        assert_eq!(page.limit(), MAX_LIMIT);
    }

    #[test]
    fn offset_beyond_signed_range_is_rejected() {
        let result = Page::new(None, Some(u64::MAX));

        assert!(result.is_err(), "u64::MAX cannot be bound as BIGINT");
    }
}
