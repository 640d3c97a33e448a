//! Result windows: page size and offset.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A (page size, offset) pair limiting and positioning a result window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of results in the window.
    pub limit: usize,
    /// Number of matching results skipped before the window starts.
    pub offset: usize,
}

impl Pagination {
    pub fn new(limit: usize, offset: usize) -> Self {
        Pagination { limit, offset }
    }

    /// Creates the window for a 1-based page number. Page 0 is treated as
    /// page 1.
    pub fn page(number: usize, size: usize) -> Self {
        let index = number.max(1) - 1;
        Pagination {
            limit: size,
            offset: index.saturating_mul(size),
        }
    }

    /// Returns the 1-based page number this window starts on.
    pub fn page_number(&self) -> usize {
        if self.limit == 0 {
            return 1;
        }
        self.offset / self.limit + 1
    }

    /// Returns the index range of this window within `len` results.
    pub fn window(&self, len: usize) -> Range<usize> {
        let start = self.offset.min(len);
        let end = start.saturating_add(self.limit).min(len);
        start..end
    }
}

/// One window of search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Results inside the window.
    pub items: Vec<T>,
    /// Number of matching results before pagination was applied.
    pub total: usize,
    /// The window that produced `items`, if any.
    pub pagination: Option<Pagination>,
}

impl<T> Page<T> {
    /// Returns `true` if matching results exist past this window.
    pub fn has_more(&self) -> bool {
        match self.pagination {
            Some(p) => p.offset.saturating_add(self.items.len()) < self.total,
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maps every item, keeping the totals.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            pagination: self.pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_numbers() {
        assert_eq!(Pagination::page(1, 10), Pagination::new(10, 0));
        assert_eq!(Pagination::page(3, 10), Pagination::new(10, 20));
        assert_eq!(Pagination::page(0, 10), Pagination::new(10, 0));
        assert_eq!(Pagination::new(10, 20).page_number(), 3);
        assert_eq!(Pagination::new(0, 20).page_number(), 1);
    }

    #[test]
    fn window_clamps_to_len() {
        assert_eq!(Pagination::new(10, 20).window(100), 20..30);
        assert_eq!(Pagination::new(10, 95).window(100), 95..100);
        assert_eq!(Pagination::new(10, 200).window(100), 100..100);
        assert_eq!(Pagination::new(usize::MAX, 5).window(8), 5..8);
    }

    #[test]
    fn has_more() {
        let page = Page {
            items: vec![1, 2],
            total: 5,
            pagination: Some(Pagination::new(2, 0)),
        };
        assert!(page.has_more());

        let last = Page {
            items: vec![5],
            total: 5,
            pagination: Some(Pagination::new(2, 4)),
        };
        assert!(!last.has_more());

        let unpaged = Page {
            items: vec![1],
            total: 1,
            pagination: None,
        };
        assert!(!unpaged.has_more());
    }
}
