//! Plain-text output for the terminal browser.
//!
//! Feed strings pass through `clean` before printing, so escape sequences
//! and other control characters in the feed never reach the terminal.

use std::borrow::Cow;
use std::fmt::Write as _;

use super::{Badge, Card, DetailPage, ListPage, Thumb, LOADING_TEXT, NOT_FOUND_TEXT};

/// Control characters become spaces.
fn clean(s: &str) -> Cow<'_, str> {
    if s.chars().any(char::is_control) {
        Cow::Owned(s.chars().map(|c| if c.is_control() { ' ' } else { c }).collect())
    } else {
        Cow::Borrowed(s)
    }
}

fn badge_line(badges: &[Badge]) -> String {
    badges
        .iter()
        .map(|b| format!("[{}]", clean(&b.label)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One card as a block of lines, prefixed with its position in the list.
pub fn card(index: usize, c: &Card) -> String {
    let mut out = String::new();
    match c {
        Card::Analysis(a) => {
            let _ = writeln!(
                out,
                "{:>3}. {}  {}",
                index + 1,
                badge_line(&a.badges),
                clean(&a.meta.text())
            );
            if a.image.is_some() {
                out.push_str("     [image]\n");
            }
            let _ = writeln!(out, "     {}", clean(&a.title));
            if !a.summary.is_empty() {
                let _ = writeln!(out, "     {}", clean(&a.summary));
            }
        }
        Card::Short(s) => {
            let thumb = match s.thumb {
                Thumb::Image(_) => "▣",
                Thumb::Placeholder => "□",
            };
            let _ = writeln!(out, "{:>3}. {} {}", index + 1, thumb, clean(&s.title));
            if !s.summary.is_empty() {
                let _ = writeln!(out, "       {}", clean(&s.summary));
            }
            let meta = s.meta.text();
            if !meta.is_empty() {
                let _ = writeln!(out, "       {}", clean(&meta));
            }
        }
    }
    let _ = writeln!(out, "     → {}", c.href());
    out
}

pub fn list_page(page: &ListPage) -> String {
    let mut out = String::new();
    let tabs: Vec<String> = page
        .tabs
        .iter()
        .map(|t| {
            if t.active {
                format!("[{}]", t.label)
            } else {
                t.label.to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "{}", tabs.join(" | "));
    let source = page
        .sources
        .iter()
        .find(|o| o.selected)
        .map(|o| o.label)
        .unwrap_or_default();
    let _ = writeln!(out, "소스: {source}");
    out.push_str("────────────────────────────\n");
    if page.loading {
        let _ = writeln!(out, "{LOADING_TEXT}");
    }
    for (i, c) in page.cards.iter().enumerate() {
        out.push_str(&card(i, c));
    }
    out
}

pub fn detail_page(page: &DetailPage) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", page.back_label());
    match page {
        DetailPage::Loading => {
            let _ = writeln!(out, "{LOADING_TEXT}");
        }
        DetailPage::NotFound => {
            let _ = writeln!(out, "{NOT_FOUND_TEXT}");
        }
        DetailPage::Article(a) => {
            let _ = writeln!(out, "\n{}", clean(&a.title));
            let meta = a.meta.text();
            if !meta.is_empty() {
                let _ = writeln!(out, "{}", clean(&meta));
            }
            if let Some(img) = &a.image {
                let _ = writeln!(out, "[image] {}", clean(img));
            }
            let _ = writeln!(out, "\n{}", clean(&a.summary));
        }
    }
    out
}
