//! Page-number pagination with lenient page parsing.
//!
//! A page number that is not an integer resolves to the first page; one that is
//! out of range (below 1 or past the end) resolves to the last page. An empty
//! result set still has a single, empty page.

use std::num::IntErrorKind;

use serde::Serialize;

/// Posts shown per page on the listing.
pub const POSTS_PER_PAGE: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    count: u64,
    per_page: u64,
}

impl Paginator {
    pub fn new(count: u64, per_page: u64) -> Self {
        Self {
            count,
            per_page: per_page.max(1),
        }
    }

    pub fn num_pages(&self) -> u64 {
        if self.count == 0 {
            1
        } else {
            self.count.div_ceil(self.per_page)
        }
    }

    /// Resolve a raw `page` query value to a valid 1-based page number.
    pub fn resolve(&self, raw: Option<&str>) -> u64 {
        let Some(raw) = raw else {
            return 1;
        };

        match raw.trim().parse::<i64>() {
            // An integer too large to represent is still out of range.
            Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                self.num_pages()
            }
            Err(_) => 1,
            Ok(n) if n < 1 || n as u64 > self.num_pages() => self.num_pages(),
            Ok(n) => n as u64,
        }
    }

    /// Row offset of the first item on `number`.
    pub fn offset(&self, number: u64) -> u64 {
        number.saturating_sub(1) * self.per_page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Wrap the items fetched for `number` into a page.
    pub fn page<T>(&self, number: u64, items: Vec<T>) -> Page<T> {
        Page {
            items,
            number,
            num_pages: self.num_pages(),
            count: self.count,
        }
    }
}

/// One page of results plus navigation metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn next_page_number(&self) -> Option<u64> {
        self.has_next().then(|| self.number + 1)
    }

    pub fn previous_page_number(&self) -> Option<u64> {
        self.has_previous().then(|| self.number - 1)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_pages() {
        assert_eq!(Paginator::new(0, 3).num_pages(), 1);
        assert_eq!(Paginator::new(3, 3).num_pages(), 1);
        assert_eq!(Paginator::new(4, 3).num_pages(), 2);
        assert_eq!(Paginator::new(7, 3).num_pages(), 3);
    }

    #[test]
    fn test_missing_or_non_integer_page_is_first() {
        let paginator = Paginator::new(10, 3);
        assert_eq!(paginator.resolve(None), 1);
        assert_eq!(paginator.resolve(Some("abc")), 1);
        assert_eq!(paginator.resolve(Some("")), 1);
        assert_eq!(paginator.resolve(Some("2.5")), 1);
    }

    #[test]
    fn test_out_of_range_page_is_last() {
        let paginator = Paginator::new(10, 3);
        assert_eq!(paginator.resolve(Some("0")), 4);
        assert_eq!(paginator.resolve(Some("-3")), 4);
        assert_eq!(paginator.resolve(Some("5")), 4);
        assert_eq!(paginator.resolve(Some("999999999999")), 4);
        assert_eq!(paginator.resolve(Some("99999999999999999999")), 4);
        assert_eq!(paginator.resolve(Some("-99999999999999999999")), 4);
    }

    #[test]
    fn test_in_range_page() {
        let paginator = Paginator::new(10, 3);
        assert_eq!(paginator.resolve(Some("2")), 2);
        assert_eq!(paginator.resolve(Some(" 3 ")), 3);
        assert_eq!(paginator.offset(3), 6);
    }

    #[test]
    fn test_empty_listing_has_one_page() {
        let paginator = Paginator::new(0, 3);
        assert_eq!(paginator.resolve(Some("7")), 1);

        let page = paginator.page::<u8>(1, vec![]);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_page_navigation() {
        let paginator = Paginator::new(7, 3);
        let page = paginator.page(2, vec!["d", "e", "f"]);
        assert_eq!(page.previous_page_number(), Some(1));
        assert_eq!(page.next_page_number(), Some(3));

        let last = paginator.page(3, vec!["g"]).map(str::to_uppercase);
        assert_eq!(last.items, vec!["G".to_string()]);
        assert_eq!(last.next_page_number(), None);
    }
}
