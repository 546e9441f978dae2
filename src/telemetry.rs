//! Counters emitted by the loader and the scroll controller, plus an
//! in-process Prometheus recorder the binary can render on demand.

use anyhow::{Context, Result};
use metrics::{describe_counter, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub const LOAD_TOTAL: &str = "news_load_total";
pub const ITEMS_LOADED_TOTAL: &str = "news_items_loaded_total";
pub const LOAD_FAILURES_TOTAL: &str = "news_load_failures_total";
pub const PAGE_ADVANCE_TOTAL: &str = "news_page_advance_total";

/// Register descriptions for every series. Safe to call more than once.
pub fn describe() {
    describe_counter!(LOAD_TOTAL, "Feed loads started.");
    describe_counter!(ITEMS_LOADED_TOTAL, Unit::Count, "Items returned by successful loads.");
    describe_counter!(LOAD_FAILURES_TOTAL, "Feed loads that fell back to an empty list.");
    describe_counter!(PAGE_ADVANCE_TOTAL, "Page windows added by the scroll sentinel.");
}

pub struct Telemetry {
    pub handle: PrometheusHandle,
}

impl Telemetry {
    /// Install the global recorder. Fails if one is already installed.
    pub fn install() -> Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("installing prometheus recorder")?;
        describe();
        Ok(Self { handle })
    }

    /// Current values in the Prometheus text format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}
