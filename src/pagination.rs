//! Client-side pagination over an already-fetched collection.

/// Rows per table page.
pub const PAGE_SIZE: usize = 5;

/// `ceil(len / PAGE_SIZE)`; zero for an empty collection.
pub fn page_count(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

/// One-based page cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl Pager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Slice of `items` visible on the current page.
    ///
    /// Out-of-range pages yield an empty slice rather than panicking.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page - 1).saturating_mul(PAGE_SIZE);
        if start >= items.len() {
            return &[];
        }
        let end = (start + PAGE_SIZE).min(items.len());
        &items[start..end]
    }

    /// Advances one page. Returns `true` if the page changed.
    pub fn next(&mut self, len: usize) -> bool {
        if self.page < page_count(len) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Goes back one page. Returns `true` if the page changed.
    pub fn prev(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Jumps to `page`, clamped to `1..=max(pages, 1)`.
    pub fn go_to(&mut self, page: usize, len: usize) {
        self.page = page.clamp(1, page_count(len).max(1));
    }

    /// Pulls the cursor back onto the last existing page after the collection shrank.
    pub fn clamp(&mut self, len: usize) {
        self.go_to(self.page, len);
    }

    /// "Page X of Y" with Y never below 1.
    pub fn label(&self, len: usize) -> String {
        format!("Page {} of {}", self.page, page_count(len).max(1))
    }
}
