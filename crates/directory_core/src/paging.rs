//! Paging vocabulary for repository queries
//!
//! A [`PageRequest`] names the zero-based page index and page size a caller
//! wants; a [`Page`] carries one page of content plus the totals needed for
//! first/next navigation. Repositories fill in the total element count from
//! a separate COUNT query, everything else is derived.

use serde::{Deserialize, Serialize};

/// Sort direction for an ordered query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Returns the SQL keyword for this direction
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A request for one page of results
///
/// Page indices are zero-based. A size of zero is clamped to one so that
/// offset arithmetic stays well defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Creates a request for the given zero-based page index and page size
    pub fn of(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.max(1),
        }
    }

    /// The zero-based page index
    pub fn page(&self) -> u32 {
        self.page
    }

    /// The page size
    pub fn size(&self) -> u32 {
        self.size
    }

    /// The row offset for a LIMIT/OFFSET query
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    /// The row limit for a LIMIT/OFFSET query
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

/// One page of results plus navigation totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    content: Vec<T>,
    page: u32,
    size: u32,
    total_elements: u64,
}

impl<T> Page<T> {
    /// Builds a page from fetched content and the total row count
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page: request.page(),
            size: request.size(),
            total_elements,
        }
    }

    /// The content of this page
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// Consumes the page, yielding its content
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// The zero-based page index
    pub fn number(&self) -> u32 {
        self.page
    }

    /// The requested page size
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Total number of matching rows across all pages
    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Total number of pages
    pub fn total_pages(&self) -> u32 {
        if self.total_elements == 0 {
            return 0;
        }
        let size = u64::from(self.size);
        (self.total_elements.div_ceil(size)) as u32
    }

    /// Whether this is the first page
    pub fn is_first(&self) -> bool {
        self.page == 0
    }

    /// Whether this is the last page
    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    /// Whether a page follows this one
    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages()
    }

    /// Whether a page precedes this one
    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// Converts the content of this page, keeping the paging totals
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_rows_at_size_three_page_zero() {
        let request = PageRequest::of(0, 3);
        let page = Page::new(vec!["m5", "m4", "m3"], &request, 5);

        assert_eq!(page.content().len(), 3);
        assert_eq!(page.total_elements(), 5);
        assert_eq!(page.number(), 0);
        assert_eq!(page.total_pages(), 2);
        assert!(page.is_first());
        assert!(page.has_next());
    }

    #[test]
    fn last_page_has_no_next() {
        let request = PageRequest::of(1, 3);
        let page = Page::new(vec!["m2", "m1"], &request, 5);

        assert!(!page.is_first());
        assert!(page.has_previous());
        assert!(!page.has_next());
        assert!(page.is_last());
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let request = PageRequest::of(0, 10);
        let page: Page<i32> = Page::new(vec![], &request, 0);

        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_next());
        assert!(page.is_last());
    }

    #[test]
    fn offset_skips_whole_pages() {
        let request = PageRequest::of(2, 25);
        assert_eq!(request.offset(), 50);
        assert_eq!(request.limit(), 25);
    }

    #[test]
    fn zero_size_is_clamped() {
        let request = PageRequest::of(0, 0);
        assert_eq!(request.size(), 1);
    }

    #[test]
    fn map_preserves_totals() {
        let request = PageRequest::of(0, 2);
        let page = Page::new(vec![1, 2], &request, 5);
        let mapped = page.map(|n| n.to_string());

        assert_eq!(mapped.content(), ["1", "2"]);
        assert_eq!(mapped.total_elements(), 5);
        assert_eq!(mapped.total_pages(), 3);
    }
}
