//! Offset/limit windows for list operations.

use serde::{Deserialize, Serialize};

/// A window over a result set.
///
/// A `limit` of zero means "no upper bound": every row from `offset` on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetLimit {
    /// Number of rows to skip.
    pub offset: usize,
    /// Maximum number of rows to return (0 = unbounded).
    pub limit: usize,
}

impl OffsetLimit {
    /// Creates a new window.
    #[must_use]
    pub const fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// The window covering every row.
    #[must_use]
    pub const fn all() -> Self {
        Self::new(0, 0)
    }

    /// Returns true if the window has no upper bound.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.limit == 0
    }

    /// Returns the limit, or `None` when unbounded.
    #[must_use]
    pub const fn bounded_limit(&self) -> Option<usize> {
        if self.limit == 0 {
            None
        } else {
            Some(self.limit)
        }
    }

    /// Applies the window to an in-memory slice.
    #[must_use]
    pub fn apply<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset.min(items.len());
        let end = match self.bounded_limit() {
            Some(limit) => start.saturating_add(limit).min(items.len()),
            None => items.len(),
        };
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limit_is_unbounded() {
        assert!(OffsetLimit::all().is_unbounded());
        assert_eq!(OffsetLimit::new(3, 0).bounded_limit(), None);
        assert_eq!(OffsetLimit::new(3, 5).bounded_limit(), Some(5));
    }

    #[test]
    fn test_apply_window() {
        let items = [1, 2, 3, 4, 5];
        assert_eq!(OffsetLimit::new(1, 2).apply(&items), &[2, 3]);
        assert_eq!(OffsetLimit::new(3, 0).apply(&items), &[4, 5]);
        assert_eq!(OffsetLimit::new(4, 10).apply(&items), &[5]);
        assert!(OffsetLimit::new(9, 1).apply(&items).is_empty());
        assert_eq!(OffsetLimit::all().apply(&items), &items);
    }
}
