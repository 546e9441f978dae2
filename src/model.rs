//! # News model
//!
//! Wire shape of the static feed (`RawNewsItem`) and the fully-defaulted
//! in-memory form (`NewsItem`) every other module works with.
//!
//! - The feed is read leniently: every field is optional and scalar fields
//!   accept strings, numbers or booleans.
//! - `normalize` runs exactly once per load; downstream code never re-derives
//!   defaults.
//! - Timestamps are parsed once, into a `DateTime` for display and unix
//!   milliseconds for sorting (`0` when absent or unparseable). The raw string
//!   is kept for display fallback.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Article category used by the list tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    All,
    Team,
    Driver,
    Tech,
    Reg,
    Rumor,
}

impl Category {
    /// Tab order as shown in the list view.
    pub const TABS: [Category; 6] = [
        Category::All,
        Category::Team,
        Category::Driver,
        Category::Tech,
        Category::Reg,
        Category::Rumor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Team => "team",
            Category::Driver => "driver",
            Category::Tech => "tech",
            Category::Reg => "reg",
            Category::Rumor => "rumor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::All => "전체",
            Category::Team => "팀",
            Category::Driver => "드라이버",
            Category::Tech => "기술",
            Category::Reg => "규정",
            Category::Rumor => "루머",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::TABS
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance class of an article.
///
/// The four known classes get their own variant; any other value present in
/// the feed is kept verbatim so it only ever matches itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceClass {
    Official,
    #[default]
    Media,
    Reporter,
    Rumor,
    Other(String),
}

impl SourceClass {
    pub fn as_str(&self) -> &str {
        match self {
            SourceClass::Official => "official",
            SourceClass::Media => "media",
            SourceClass::Reporter => "reporter",
            SourceClass::Rumor => "rumor",
            SourceClass::Other(raw) => raw,
        }
    }

    /// Only an absent field defaults to `Media`; present values are taken
    /// as-is, without trimming or case folding.
    pub fn from_wire(s: Option<&str>) -> Self {
        match s {
            None => SourceClass::Media,
            Some("official") => SourceClass::Official,
            Some("media") => SourceClass::Media,
            Some("reporter") => SourceClass::Reporter,
            Some("rumor") => SourceClass::Rumor,
            Some(other) => SourceClass::Other(other.to_string()),
        }
    }
}

impl From<String> for SourceClass {
    fn from(s: String) -> Self {
        match SourceClass::from_wire(Some(&s)) {
            SourceClass::Other(_) => SourceClass::Other(s),
            known => known,
        }
    }
}

impl From<SourceClass> for String {
    fn from(c: SourceClass) -> Self {
        match c {
            SourceClass::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SourceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source filter of the list view (`All` or one source class).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFilter {
    #[default]
    All,
    Official,
    Media,
    Reporter,
    Rumor,
}

impl SourceFilter {
    pub const OPTIONS: [SourceFilter; 5] = [
        SourceFilter::All,
        SourceFilter::Official,
        SourceFilter::Media,
        SourceFilter::Reporter,
        SourceFilter::Rumor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFilter::All => "all",
            SourceFilter::Official => "official",
            SourceFilter::Media => "media",
            SourceFilter::Reporter => "reporter",
            SourceFilter::Rumor => "rumor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SourceFilter::All => "전체 소스",
            SourceFilter::Official => "공식",
            SourceFilter::Media => "전문매체",
            SourceFilter::Reporter => "기자",
            SourceFilter::Rumor => "루머",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::OPTIONS
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Exact string match against an item's effective class.
    pub fn accepts(&self, class: &SourceClass) -> bool {
        match self {
            SourceFilter::All => true,
            other => other.as_str() == class.as_str(),
        }
    }
}

impl fmt::Display for SourceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Card layout variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Analysis,
    #[default]
    Short,
}

impl CardType {
    pub fn from_wire(s: Option<&str>) -> Self {
        match s.map(str::trim) {
            Some("analysis") => CardType::Analysis,
            _ => CardType::Short,
        }
    }
}

/// One article exactly as it appears in the feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNewsItem {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub pub_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub source_class: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub card_type: Option<String>,
}

/// Fully-defaulted article. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// String form of the feed id; numeric ids compare by their string form.
    pub id: String,
    pub title: String,
    pub summary: String,
    pub image: Option<String>,
    pub source: Option<String>,
    /// Original `pubDate` text, kept for display fallback.
    pub pub_date: Option<String>,
    /// Parsed `pubDate`, when it parses.
    pub published: Option<DateTime<Utc>>,
    /// `pubDate` as unix millis; `0` when absent or unparseable.
    pub published_at: i64,
    pub tags: Vec<String>,
    pub source_class: SourceClass,
    pub card_type: CardType,
}

impl NewsItem {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Build the defaulted form of a raw item.
pub fn normalize(raw: RawNewsItem) -> NewsItem {
    let published = raw.pub_date.as_deref().and_then(parse_datetime);
    let published_at = published.map_or(0, |dt| dt.timestamp_millis());
    NewsItem {
        id: raw.id.unwrap_or_default(),
        title: raw.title.unwrap_or_default(),
        summary: raw.summary.unwrap_or_default(),
        image: raw.image.filter(|s| !s.trim().is_empty()),
        source: raw.source,
        pub_date: raw.pub_date.filter(|s| !s.is_empty()),
        published,
        published_at,
        tags: raw.tags,
        source_class: SourceClass::from_wire(raw.source_class.as_deref()),
        card_type: CardType::from_wire(raw.card_type.as_deref()),
    }
}

/// Parse a feed timestamp into unix millis.
///
/// Accepted: RFC 3339, RFC 2822, `YYYY-MM-DDTHH:MM[:SS[.fff]]` and
/// `YYYY-MM-DD HH:MM[:SS]` (read as UTC), date-only `YYYY-MM-DD` (UTC midnight).
pub fn parse_timestamp(s: &str) -> Option<i64> {
    parse_datetime(s).map(|dt| dt.timestamp_millis())
}

pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Deserializers that never reject an item over a field's JSON type.
mod lenient {
    use super::*;

    pub fn string<'de, D>(d: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = Option::<Value>::deserialize(d)?;
        Ok(v.as_ref().and_then(scalar_to_string))
    }

    pub fn string_list<'de, D>(d: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = Option::<Value>::deserialize(d)?;
        Ok(match v {
            Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
            _ => Vec::new(),
        })
    }

    fn scalar_to_string(v: &Value) -> Option<String> {
        match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(number_to_string(n)),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    // 7.0 and 7 must produce the same id string.
    fn number_to_string(n: &serde_json::Number) -> String {
        if let Some(i) = n.as_i64() {
            return i.to_string();
        }
        if let Some(u) = n.as_u64() {
            return u.to_string();
        }
        match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            Some(f) => f.to_string(),
            None => n.to_string(),
        }
    }
}
