//! Filter → sort → page window over a loaded collection.
//!
//! Everything here is a pure function of `(items, FilterState)`; the view
//! owns the state and passes it in.

use crate::model::{Category, NewsItem, SourceFilter};

/// Items added to the window per page.
pub const PAGE_SIZE: usize = 10;

/// Active filters plus the number of extra pages revealed by scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterState {
    pub category: Category,
    pub source: SourceFilter,
    pub page: usize,
}

impl FilterState {
    pub fn new(category: Category, source: SourceFilter) -> Self {
        Self {
            category,
            source,
            page: 0,
        }
    }

    /// Switch tab; the window restarts at the first page.
    pub fn set_category(&mut self, category: Category) {
        self.category = category;
        self.page = 0;
    }

    /// Switch source filter; the window restarts at the first page.
    pub fn set_source(&mut self, source: SourceFilter) {
        self.source = source;
        self.page = 0;
    }

    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    /// Maximum number of items the window may expose.
    pub fn window_len(&self) -> usize {
        self.page.saturating_add(1).saturating_mul(PAGE_SIZE)
    }
}

fn matches(item: &NewsItem, state: &FilterState) -> bool {
    let category_ok = match state.category {
        Category::All => true,
        c => item.has_tag(c.as_str()),
    };
    category_ok && state.source.accepts(&item.source_class)
}

/// Filtered collection, newest first. Equal timestamps keep load order.
pub fn filter_sorted<'a>(items: &'a [NewsItem], state: &FilterState) -> Vec<&'a NewsItem> {
    let mut list: Vec<&NewsItem> = items.iter().filter(|n| matches(n, state)).collect();
    // `sort_by` is stable.
    list.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    list
}

/// What the list view renders: the first `(page + 1) * PAGE_SIZE` filtered items.
pub fn visible<'a>(items: &'a [NewsItem], state: &FilterState) -> Vec<&'a NewsItem> {
    let mut list = filter_sorted(items, state);
    list.truncate(state.window_len());
    list
}
