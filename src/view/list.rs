//! List view: owns the loaded collection, the filter state and the
//! infinite-scroll controller for one mount.

use crate::loader::{load_news, ResourceFetcher};
use crate::model::{Category, NewsItem, SourceFilter};
use crate::nav::Route;
use crate::pipeline::{self, FilterState};
use crate::render::{DateFormatter, ListPage};
use crate::scroll::{InfiniteScroll, IntersectionEntry, VisibilityObserver};

use super::{Lifecycle, LoadTicket};

pub struct ListView<O: VisibilityObserver> {
    items: Vec<NewsItem>,
    state: FilterState,
    lifecycle: Lifecycle,
    scroll: Option<InfiniteScroll<O>>,
    dates: DateFormatter,
}

impl<O: VisibilityObserver> ListView<O> {
    pub fn new(dates: DateFormatter) -> Self {
        Self {
            items: Vec::new(),
            state: FilterState::default(),
            lifecycle: Lifecycle::default(),
            scroll: None,
            dates,
        }
    }

    /// Fresh state, start watching the sentinel. The caller fetches and hands
    /// the result to `finish_load` with the returned ticket.
    pub fn mount(&mut self, observer: O) -> LoadTicket {
        self.items.clear();
        self.state = FilterState::default();
        self.scroll = Some(InfiniteScroll::attach(observer));
        self.lifecycle.mount()
    }

    /// Apply a settled load. Returns false when the result is stale.
    pub fn finish_load(&mut self, ticket: LoadTicket, items: Vec<NewsItem>) -> bool {
        if !self.lifecycle.settle(ticket) {
            return false;
        }
        self.items = items;
        true
    }

    /// Mount and run the single load for this mount.
    pub async fn mount_and_load(&mut self, observer: O, fetcher: &dyn ResourceFetcher) {
        let ticket = self.mount(observer);
        let items = load_news(fetcher).await;
        self.finish_load(ticket, items);
    }

    /// Stop observing and drop the collection.
    pub fn unmount(&mut self) {
        if let Some(mut scroll) = self.scroll.take() {
            scroll.detach();
        }
        self.items.clear();
        self.lifecycle.unmount();
    }

    pub fn set_category(&mut self, category: Category) {
        self.state.set_category(category);
    }

    pub fn set_source(&mut self, source: SourceFilter) {
        self.state.set_source(source);
    }

    /// Observer callback; true when the window grew by a page.
    pub fn on_intersection(&mut self, entries: &[IntersectionEntry]) -> bool {
        match &self.scroll {
            Some(scroll) => scroll.on_intersection(entries, &mut self.state),
            None => false,
        }
    }

    pub fn observer_mut(&mut self) -> Option<&mut O> {
        self.scroll.as_mut().map(|s| s.observer_mut())
    }

    pub fn visible(&self) -> Vec<&NewsItem> {
        pipeline::visible(&self.items, &self.state)
    }

    /// Filtered size before windowing.
    pub fn filtered_len(&self) -> usize {
        pipeline::filter_sorted(&self.items, &self.state).len()
    }

    pub fn page(&self) -> ListPage {
        ListPage::build(
            &self.visible(),
            &self.state,
            self.lifecycle.is_loading(),
            &self.dates,
        )
    }

    /// Card click: route to the detail view of the card at `index`.
    pub fn open(&self, index: usize) -> Option<Route> {
        self.visible()
            .get(index)
            .map(|n| Route::Detail(n.id.clone()))
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn items(&self) -> &[NewsItem] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.lifecycle.is_loading()
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle.is_mounted()
    }
}
