//! Routes and navigation history.

use std::fmt;

pub const LIST_PATH: &str = "/news";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    /// Decoded item id.
    Detail(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::List => LIST_PATH.to_string(),
            Route::Detail(id) => detail_path(id),
        }
    }

    /// `/news` or `/news/<percent-encoded id>`; anything else is `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let rest = path.strip_prefix(LIST_PATH)?;
        let rest = rest.trim_end_matches('/');
        if rest.is_empty() {
            return Some(Route::List);
        }
        let encoded = rest.strip_prefix('/')?;
        if encoded.contains('/') {
            return None;
        }
        let id = urlencoding::decode(encoded).ok()?;
        Some(Route::Detail(id.into_owned()))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Detail link for an item id.
pub fn detail_path(id: &str) -> String {
    format!("{LIST_PATH}/{}", urlencoding::encode(id))
}

pub trait Navigator {
    fn push(&mut self, route: Route);
    /// Return to the immediately preceding entry. `None` at the root.
    fn back(&mut self) -> Option<&Route>;
    fn current(&self) -> &Route;
}

/// In-memory history stack.
#[derive(Debug, Clone)]
pub struct HistoryNavigator {
    stack: Vec<Route>,
}

impl HistoryNavigator {
    pub fn new(start: Route) -> Self {
        Self { stack: vec![start] }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new(Route::List)
    }
}

impl Navigator for HistoryNavigator {
    fn push(&mut self, route: Route) {
        tracing::debug!(to = %route, "navigate");
        self.stack.push(route);
    }

    fn back(&mut self) -> Option<&Route> {
        if self.stack.len() <= 1 {
            return None;
        }
        self.stack.pop();
        let cur = self.stack.last();
        if let Some(r) = cur {
            tracing::debug!(to = %r, "navigate back");
        }
        cur
    }

    fn current(&self) -> &Route {
        // never empty: `back` keeps the root entry
        &self.stack[self.stack.len() - 1]
    }
}
