//! Infinite scroll: a sentinel after the last card, watched by a
//! `VisibilityObserver`. Each time the sentinel comes into view the page
//! window grows by one.

use metrics::counter;

use crate::pipeline::FilterState;
use crate::telemetry::PAGE_ADVANCE_TOTAL;

/// Element id of the sentinel placed after the last rendered card.
pub const SENTINEL_ID: &str = "news-sentinel";

/// Visibility change reported by an observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub target: String,
    pub is_intersecting: bool,
}

/// Capability to watch an element's visibility in the viewport.
pub trait VisibilityObserver {
    fn observe(&mut self, target: &str);
    /// Stop all observation. Called once on teardown.
    fn disconnect(&mut self);
}

/// Owns the observer for the lifetime of a mounted list view.
pub struct InfiniteScroll<O: VisibilityObserver> {
    observer: O,
    attached: bool,
}

impl<O: VisibilityObserver> InfiniteScroll<O> {
    pub fn attach(mut observer: O) -> Self {
        observer.observe(SENTINEL_ID);
        Self {
            observer,
            attached: true,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Observer callback. Returns true when the page advanced.
    pub fn on_intersection(&self, entries: &[IntersectionEntry], state: &mut FilterState) -> bool {
        if !self.attached {
            return false;
        }
        let hit = entries.first().is_some_and(|e| e.is_intersecting);
        if hit {
            state.next_page();
            counter!(PAGE_ADVANCE_TOTAL).increment(1);
            tracing::debug!(page = state.page, "sentinel visible, page advanced");
        }
        hit
    }

    pub fn detach(&mut self) {
        if self.attached {
            self.observer.disconnect();
            self.attached = false;
        }
    }
}

impl<O: VisibilityObserver> Drop for InfiniteScroll<O> {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Row-based viewport for terminal rendering: `height` rows starting at
/// `offset`, over a list whose sentinel sits on the row after the last card.
#[derive(Debug, Clone, Default)]
pub struct RowViewport {
    pub offset: usize,
    pub height: usize,
    watched: Vec<String>,
    last_visible: bool,
}

impl RowViewport {
    pub fn new(height: usize) -> Self {
        Self {
            offset: 0,
            height: height.max(1),
            watched: Vec::new(),
            last_visible: false,
        }
    }

    pub fn scroll_by(&mut self, rows: usize) {
        self.offset = self.offset.saturating_add(rows);
    }

    /// Back to the top, e.g. after the filter changed.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.last_visible = false;
    }

    /// Visibility changes of the sentinel for a list of `rendered` cards.
    /// Only transitions are reported, like a browser intersection observer;
    /// the sentinel moving further down after growth counts as leaving view.
    ///
    /// The offset is clamped to the content first: when the list shrinks below
    /// the viewport, the window slides up to its end.
    pub fn entries(&mut self, rendered: usize) -> Vec<IntersectionEntry> {
        if !self.watched.iter().any(|t| t == SENTINEL_ID) {
            return Vec::new();
        }
        let sentinel_row = rendered;
        // cards plus the sentinel row
        let max_offset = (rendered + 1).saturating_sub(self.height);
        self.offset = self.offset.min(max_offset);
        let visible = sentinel_row >= self.offset && sentinel_row < self.offset + self.height;
        if visible == self.last_visible {
            return Vec::new();
        }
        self.last_visible = visible;
        vec![IntersectionEntry {
            target: SENTINEL_ID.to_string(),
            is_intersecting: visible,
        }]
    }
}

impl VisibilityObserver for RowViewport {
    fn observe(&mut self, target: &str) {
        self.watched.push(target.to_string());
    }

    fn disconnect(&mut self) {
        self.watched.clear();
        self.last_visible = false;
    }
}
