//! Paginated, selectable snapshot of one fetched collection.

use crate::pagination::{page_count, Pager};

/// State behind every resource table.
///
/// `items` is `None` until the first fetch lands. A reload replaces the whole
/// snapshot; nothing is patched in place.
#[derive(Debug, Clone)]
pub struct CollectionState<T> {
    items: Option<Vec<T>>,
    /// Current page cursor.
    pub pager: Pager,
    /// Selected row within the current page.
    pub selected: usize,
    /// A fetch for this collection is outstanding.
    pub loading: bool,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: None,
            pager: Pager::new(),
            selected: 0,
            loading: false,
        }
    }
}

impl<T> CollectionState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a fetch as outstanding. The previous snapshot stays visible.
    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    /// Installs a freshly fetched snapshot.
    ///
    /// The page index is clamped to the last existing page and the selection
    /// to the length of that page.
    pub fn replace(&mut self, items: Vec<T>) {
        self.pager.clamp(items.len());
        self.items = Some(items);
        self.loading = false;
        self.clamp_selection();
    }

    /// Ends a failed fetch without touching the snapshot.
    pub fn fail(&mut self) {
        self.loading = false;
    }

    /// Drops the snapshot, e.g. when leaving the view.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_loaded(&self) -> bool {
        self.items.is_some()
    }

    /// Shows the spinner only until the first snapshot arrives.
    pub fn shows_spinner(&self) -> bool {
        self.loading && self.items.is_none()
    }

    pub fn items(&self) -> &[T] {
        self.items.as_deref().unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pages(&self) -> usize {
        page_count(self.len())
    }

    pub fn page_items(&self) -> &[T] {
        self.pager.slice(self.items())
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.page_items().get(self.selected)
    }

    /// Returns `true` if the selection changed.
    pub fn select_next(&mut self) -> bool {
        if self.selected + 1 < self.page_items().len() {
            self.selected += 1;
            true
        } else {
            false
        }
    }

    /// Returns `true` if the selection changed.
    pub fn select_prev(&mut self) -> bool {
        if self.selected > 0 {
            self.selected -= 1;
            true
        } else {
            false
        }
    }

    pub fn next_page(&mut self) -> bool {
        let moved = self.pager.next(self.len());
        if moved {
            self.selected = 0;
        }
        moved
    }

    pub fn prev_page(&mut self) -> bool {
        let moved = self.pager.prev();
        if moved {
            self.selected = 0;
        }
        moved
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.page_items().len().saturating_sub(1));
    }
}
