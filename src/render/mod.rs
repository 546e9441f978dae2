//! View models for the list and detail pages.
//!
//! Cards, badges and meta lines are plain data; `html` and `text` turn them
//! into output. Nothing in here builds markup from feed strings.

pub mod html;
pub mod text;

use chrono::{DateTime, Datelike, FixedOffset, Offset, Timelike, Utc};

use crate::model::{CardType, Category, NewsItem, SourceClass, SourceFilter};
use crate::nav::detail_path;
use crate::pipeline::FilterState;
use crate::scroll::SENTINEL_ID;

pub const BACK_LABEL: &str = "← 뒤로가기";
pub const LOADING_TEXT: &str = "불러오는 중...";
pub const NOT_FOUND_TEXT: &str = "기사를 찾을 수 없습니다.";

/// Tag badges shown on analysis cards.
const MAX_TAG_BADGES: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BadgeStyle {
    Tag,
    Source(SourceClass),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub style: BadgeStyle,
}

/// First two tags, then the source-class badge.
pub fn badges(item: &NewsItem) -> Vec<Badge> {
    let mut out: Vec<Badge> = item
        .tags
        .iter()
        .take(MAX_TAG_BADGES)
        .map(|t| Badge {
            label: t.clone(),
            style: BadgeStyle::Tag,
        })
        .collect();
    out.push(Badge {
        label: item.source_class.as_str().to_string(),
        style: BadgeStyle::Source(item.source_class.clone()),
    });
    out
}

/// Formats publication dates as the ko-KR short form, e.g. `6월 1일 오후 03:05`.
#[derive(Debug, Clone, Copy)]
pub struct DateFormatter {
    offset: FixedOffset,
}

impl DateFormatter {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Offset in minutes east of UTC; out-of-range values are clamped to ±23:59.
    pub fn from_offset_minutes(minutes: i32) -> Self {
        let secs = minutes.clamp(-1439, 1439) * 60;
        let offset = FixedOffset::east_opt(secs).unwrap_or_else(|| Utc.fix());
        Self { offset }
    }

    pub fn format(&self, at: DateTime<Utc>) -> String {
        let local = at.with_timezone(&self.offset);
        let (pm, hour12) = local.hour12();
        format!(
            "{}월 {}일 {} {:02}:{:02}",
            local.month(),
            local.day(),
            if pm { "오후" } else { "오전" },
            hour12,
            local.minute()
        )
    }

    /// Date shown for an item: `None` when absent, the raw text when it did
    /// not parse at load time.
    pub fn for_item(&self, item: &NewsItem) -> Option<String> {
        match item.published {
            Some(at) => Some(self.format(at)),
            None => item.pub_date.clone(),
        }
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}

/// `source · date` line shared by both card layouts and the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetaLine {
    pub source: Option<String>,
    pub date: Option<String>,
}

impl MetaLine {
    pub fn for_item(item: &NewsItem, dates: &DateFormatter) -> Self {
        Self {
            source: item.source.clone(),
            date: dates.for_item(item),
        }
    }

    pub fn text(&self) -> String {
        let source = self.source.as_deref().unwrap_or_default();
        match &self.date {
            Some(d) => format!("{source} · {d}").trim().to_string(),
            None => source.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thumb {
    Image(String),
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisCard {
    pub id: String,
    pub href: String,
    pub badges: Vec<Badge>,
    pub meta: MetaLine,
    pub image: Option<String>,
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortCard {
    pub id: String,
    pub href: String,
    pub thumb: Thumb,
    pub title: String,
    pub summary: String,
    pub meta: MetaLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Card {
    Analysis(AnalysisCard),
    Short(ShortCard),
}

impl Card {
    pub fn for_item(item: &NewsItem, dates: &DateFormatter) -> Self {
        let href = detail_path(&item.id);
        let meta = MetaLine::for_item(item, dates);
        match item.card_type {
            CardType::Analysis => Card::Analysis(AnalysisCard {
                id: item.id.clone(),
                href,
                badges: badges(item),
                meta,
                image: item.image.clone(),
                title: item.title.clone(),
                summary: item.summary.clone(),
            }),
            CardType::Short => Card::Short(ShortCard {
                id: item.id.clone(),
                href,
                thumb: item
                    .image
                    .clone()
                    .map_or(Thumb::Placeholder, Thumb::Image),
                title: item.title.clone(),
                summary: item.summary.clone(),
                meta,
            }),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Card::Analysis(c) => &c.id,
            Card::Short(c) => &c.id,
        }
    }

    /// Click target.
    pub fn href(&self) -> &str {
        match self {
            Card::Analysis(c) => &c.href,
            Card::Short(c) => &c.href,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub category: Category,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOption {
    pub value: SourceFilter,
    pub label: &'static str,
    pub selected: bool,
}

/// Everything the list page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPage {
    pub tabs: Vec<Tab>,
    pub sources: Vec<SourceOption>,
    pub cards: Vec<Card>,
    pub loading: bool,
    pub sentinel_id: &'static str,
}

impl ListPage {
    pub fn build(
        visible: &[&NewsItem],
        state: &FilterState,
        loading: bool,
        dates: &DateFormatter,
    ) -> Self {
        let tabs = Category::TABS
            .into_iter()
            .map(|category| Tab {
                category,
                label: category.label(),
                active: category == state.category,
            })
            .collect();
        let sources = SourceFilter::OPTIONS
            .into_iter()
            .map(|value| SourceOption {
                value,
                label: value.label(),
                selected: value == state.source,
            })
            .collect();
        let cards = visible.iter().map(|n| Card::for_item(n, dates)).collect();
        Self {
            tabs,
            sources,
            cards,
            loading,
            sentinel_id: SENTINEL_ID,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleBody {
    pub id: String,
    pub title: String,
    pub meta: MetaLine,
    pub image: Option<String>,
    pub summary: String,
}

/// Detail page states; all of them render the back control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailPage {
    Loading,
    NotFound,
    Article(ArticleBody),
}

impl DetailPage {
    pub fn article(item: &NewsItem, dates: &DateFormatter) -> Self {
        DetailPage::Article(ArticleBody {
            id: item.id.clone(),
            title: item.title.clone(),
            meta: MetaLine::for_item(item, dates),
            image: item.image.clone(),
            summary: item.summary.clone(),
        })
    }

    pub fn back_label(&self) -> &'static str {
        BACK_LABEL
    }
}
