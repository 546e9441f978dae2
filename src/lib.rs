// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod loader;
pub mod model;
pub mod nav;
pub mod pipeline;
pub mod render;
pub mod scroll;
pub mod telemetry;
pub mod view;

// ---- Re-exports for stable public API ----
pub use crate::loader::{load_news, ResourceFetcher};
pub use crate::model::{Category, NewsItem, SourceClass, SourceFilter};
pub use crate::pipeline::{FilterState, PAGE_SIZE};
pub use crate::view::{DetailView, ListView};
