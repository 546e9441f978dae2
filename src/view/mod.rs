//! Mounted views and their load lifecycle.
//!
//! A view issues one fetch per mount. The fetch result comes back through
//! `finish_load` together with the `LoadTicket` the mount handed out; results
//! for an unmounted view or an older mount are dropped.

pub mod detail;
pub mod list;

pub use detail::{find_by_id, DetailView};
pub use list::ListView;

/// Proof that a load was started by a particular mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct Lifecycle {
    generation: u64,
    mounted: bool,
    loading: bool,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self {
            generation: 0,
            mounted: false,
            loading: true,
        }
    }
}

impl Lifecycle {
    pub fn mount(&mut self) -> LoadTicket {
        self.generation += 1;
        self.mounted = true;
        self.loading = true;
        LoadTicket {
            generation: self.generation,
        }
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    /// Accepts the ticket of the current mount once; flips `loading` off.
    pub fn settle(&mut self, ticket: LoadTicket) -> bool {
        let current = self.mounted && self.loading && ticket.generation == self.generation;
        if current {
            self.loading = false;
        } else {
            tracing::debug!(
                ticket = ticket.generation,
                generation = self.generation,
                mounted = self.mounted,
                "dropping stale load result"
            );
        }
        current
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
