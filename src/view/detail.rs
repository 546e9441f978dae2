//! Detail view: loads the feed on its own and resolves one id.

use crate::loader::{load_news, ResourceFetcher};
use crate::model::NewsItem;
use crate::render::{DateFormatter, DetailPage};

use super::{Lifecycle, LoadTicket};

/// First item whose string id equals `id`, in load order.
pub fn find_by_id<'a>(items: &'a [NewsItem], id: &str) -> Option<&'a NewsItem> {
    items.iter().find(|n| n.id == id)
}

pub struct DetailView {
    id: String,
    items: Vec<NewsItem>,
    lifecycle: Lifecycle,
    dates: DateFormatter,
}

impl DetailView {
    pub fn new(id: impl Into<String>, dates: DateFormatter) -> Self {
        Self {
            id: id.into(),
            items: Vec::new(),
            lifecycle: Lifecycle::default(),
            dates,
        }
    }

    pub fn mount(&mut self) -> LoadTicket {
        self.items.clear();
        self.lifecycle.mount()
    }

    pub fn finish_load(&mut self, ticket: LoadTicket, items: Vec<NewsItem>) -> bool {
        if !self.lifecycle.settle(ticket) {
            return false;
        }
        self.items = items;
        if self.item().is_none() {
            tracing::info!(id = %self.id, "article not found");
        }
        true
    }

    pub async fn mount_and_load(&mut self, fetcher: &dyn ResourceFetcher) {
        let ticket = self.mount();
        let items = load_news(fetcher).await;
        self.finish_load(ticket, items);
    }

    pub fn unmount(&mut self) {
        self.items.clear();
        self.lifecycle.unmount();
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_loading(&self) -> bool {
        self.lifecycle.is_loading()
    }

    pub fn item(&self) -> Option<&NewsItem> {
        find_by_id(&self.items, &self.id)
    }

    pub fn page(&self) -> DetailPage {
        if self.lifecycle.is_loading() {
            return DetailPage::Loading;
        }
        match self.item() {
            Some(item) => DetailPage::article(item, &self.dates),
            None => DetailPage::NotFound,
        }
    }
}
