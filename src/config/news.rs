// src/config/news.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{env, fs, path::Path, path::PathBuf};

pub const ENV_CONFIG_PATH: &str = "GRID_NEWS_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config/news.toml";

const ENV_RESOURCE: &str = "GRID_NEWS_RESOURCE";
const ENV_TIMEOUT: &str = "GRID_NEWS_TIMEOUT_SECS";
const ENV_UTC_OFFSET: &str = "GRID_NEWS_UTC_OFFSET_MINUTES";
const ENV_VIEWPORT_ROWS: &str = "GRID_NEWS_VIEWPORT_ROWS";

fn default_resource() -> String {
    "public/news.json".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_utc_offset_minutes() -> i32 {
    540 // KST
}
fn default_viewport_rows() -> usize {
    6
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Feed location: `http(s)://` URL or a file path.
    #[serde(default = "default_resource")]
    pub resource: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Display offset for publication dates, minutes east of UTC.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
    /// Cards visible at once in the terminal browser.
    #[serde(default = "default_viewport_rows")]
    pub viewport_rows: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            resource: default_resource(),
            request_timeout_secs: default_timeout_secs(),
            utc_offset_minutes: default_utc_offset_minutes(),
            viewport_rows: default_viewport_rows(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let cfg: AppConfig =
            toml::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
        Ok(cfg.sanitized())
    }

    /// Resolution order:
    /// 1) $GRID_NEWS_CONFIG (must exist)
    /// 2) config/news.toml
    /// 3) built-in defaults
    ///
    /// then `GRID_NEWS_*` env overrides on top.
    pub fn load_default() -> Result<Self> {
        let base = if let Ok(p) = env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from_file(&pb)?
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::load_from_file(DEFAULT_CONFIG_PATH)?
        } else {
            Self::default()
        };
        Ok(base.with_env_overrides())
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var(ENV_RESOURCE) {
            if !v.trim().is_empty() {
                self.resource = v.trim().to_string();
            }
        }
        if let Some(v) = env_number(ENV_TIMEOUT) {
            self.request_timeout_secs = v;
        }
        if let Some(v) = env_number(ENV_UTC_OFFSET) {
            self.utc_offset_minutes = v;
        }
        if let Some(v) = env_number(ENV_VIEWPORT_ROWS) {
            self.viewport_rows = v;
        }
        self.sanitized()
    }

    fn sanitized(mut self) -> Self {
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = default_timeout_secs();
        }
        self.utc_offset_minutes = self.utc_offset_minutes.clamp(-1439, 1439);
        if self.viewport_rows == 0 {
            self.viewport_rows = default_viewport_rows();
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn env_number<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring invalid numeric override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: AppConfig = toml::from_str(r#"resource = "https://example.test/news.json""#).unwrap();
        assert_eq!(cfg.resource, "https://example.test/news.json");
        assert_eq!(cfg.request_timeout_secs, 10);
        assert_eq!(cfg.utc_offset_minutes, 540);
    }

    #[test]
    fn sanitize_fixes_out_of_range_values() {
        let cfg = AppConfig {
            request_timeout_secs: 0,
            utc_offset_minutes: 5000,
            viewport_rows: 0,
            ..AppConfig::default()
        }
        .sanitized();
        assert_eq!(cfg.request_timeout_secs, 10);
        assert_eq!(cfg.utc_offset_minutes, 1439);
        assert_eq!(cfg.viewport_rows, 6);
    }
}
