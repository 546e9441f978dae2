//! HTML output for the list and detail pages.
//!
//! Every feed-derived string goes through `html_escape` before it lands in
//! markup, both in text nodes and in attributes.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write as _;

use super::{AnalysisCard, Badge, BadgeStyle, Card, DetailPage, ListPage, MetaLine, ShortCard, Thumb};
use super::{LOADING_TEXT, NOT_FOUND_TEXT};
use crate::model::SourceClass;

fn badge_class(b: &Badge) -> String {
    match &b.style {
        BadgeStyle::Tag => "badge tag".to_string(),
        BadgeStyle::Source(SourceClass::Other(_)) => "badge source-other".to_string(),
        BadgeStyle::Source(sc) => format!("badge source-{}", sc.as_str()),
    }
}

fn write_meta(out: &mut String, meta: &MetaLine) {
    let _ = write!(out, r#"<div class="meta">{}</div>"#, text(&meta.text()));
}

fn write_analysis(out: &mut String, c: &AnalysisCard) {
    let _ = write!(
        out,
        r#"<article class="news-card analysis" data-id="{}" data-href="{}">"#,
        attr(&c.id),
        attr(&c.href)
    );
    out.push_str(r#"<div class="meta-row"><div class="badges">"#);
    for b in &c.badges {
        let _ = write!(
            out,
            r#"<span class="{}">{}</span>"#,
            badge_class(b),
            text(&b.label)
        );
    }
    out.push_str("</div>");
    write_meta(out, &c.meta);
    out.push_str("</div>");
    if let Some(src) = &c.image {
        let _ = write!(out, r#"<img src="{}" alt="">"#, attr(src));
    }
    let _ = write!(
        out,
        r#"<div class="card-title">{}</div><div class="card-summary">{}</div></article>"#,
        text(&c.title),
        text(&c.summary)
    );
}

fn write_short(out: &mut String, c: &ShortCard) {
    let _ = write!(
        out,
        r#"<article class="news-card short" data-id="{}" data-href="{}">"#,
        attr(&c.id),
        attr(&c.href)
    );
    match &c.thumb {
        Thumb::Image(src) => {
            let _ = write!(out, r#"<img class="thumb" src="{}" alt="">"#, attr(src));
        }
        Thumb::Placeholder => out.push_str(r#"<div class="thumb"></div>"#),
    }
    let _ = write!(
        out,
        r#"<div class="short-body"><div class="s-title">{}</div><div class="s-text">{}</div>"#,
        text(&c.title),
        text(&c.summary)
    );
    write_meta(out, &c.meta);
    out.push_str("</div></article>");
}

pub fn card(c: &Card) -> String {
    let mut out = String::new();
    match c {
        Card::Analysis(a) => write_analysis(&mut out, a),
        Card::Short(s) => write_short(&mut out, s),
    }
    out
}

pub fn list_page(page: &ListPage) -> String {
    let mut out = String::with_capacity(1024 + page.cards.len() * 512);
    out.push_str(r#"<main id="news-main"><nav class="news-category-tabs">"#);
    for tab in &page.tabs {
        let _ = write!(
            out,
            r#"<button data-category="{}" class="{}">{}</button>"#,
            tab.category.as_str(),
            if tab.active { "active" } else { "" },
            text(tab.label)
        );
    }
    out.push_str(r#"</nav><section class="news-source-filter"><select id="newsSourceFilter">"#);
    for opt in &page.sources {
        let _ = write!(
            out,
            r#"<option value="{}"{}>{}</option>"#,
            opt.value.as_str(),
            if opt.selected { " selected" } else { "" },
            text(opt.label)
        );
    }
    out.push_str(r#"</select></section><section class="news-list">"#);
    if page.loading {
        let _ = write!(out, r#"<p class="loading">{}</p>"#, text(LOADING_TEXT));
    }
    for c in &page.cards {
        out.push_str(&card(c));
    }
    let _ = write!(out, r#"<div id="{}"></div></section></main>"#, page.sentinel_id);
    out
}

pub fn detail_page(page: &DetailPage) -> String {
    let mut out = String::from(r#"<main class="detail-wrapper">"#);
    let _ = write!(
        out,
        r#"<button class="back-btn" data-action="back">{}</button>"#,
        text(page.back_label())
    );
    match page {
        DetailPage::Loading => {
            let _ = write!(out, "<p>{}</p>", text(LOADING_TEXT));
        }
        DetailPage::NotFound => {
            let _ = write!(out, "<p>{}</p>", text(NOT_FOUND_TEXT));
        }
        DetailPage::Article(a) => {
            let _ = write!(
                out,
                r#"<article class="detail-article" data-id="{}"><h1 class="detail-title">{}</h1><div class="detail-meta">{}</div>"#,
                attr(&a.id),
                text(&a.title),
                text(&a.meta.text())
            );
            if let Some(src) = &a.image {
                let _ = write!(out, r#"<img src="{}" alt="">"#, attr(src));
            }
            let _ = write!(
                out,
                r#"<div class="detail-summary">{}</div></article>"#,
                text(&a.summary)
            );
        }
    }
    out.push_str("</main>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{normalize, Category, RawNewsItem, SourceFilter};
    use crate::pipeline::FilterState;
    use crate::render::DateFormatter;

    fn card_for(json: &str) -> Card {
        let n = normalize(serde_json::from_str::<RawNewsItem>(json).unwrap());
        Card::for_item(&n, &DateFormatter::default())
    }

    #[test]
    fn tag_text_is_escaped_not_interpolated() {
        let c = card_for(
            r#"{"id":"1","cardType":"analysis","tags":["<img src=x onerror=alert(1)>"]}"#,
        );
        let html = card(&c);
        assert!(!html.contains("<img src=x"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    }

    #[test]
    fn unknown_source_class_keeps_class_attribute_fixed() {
        let c = card_for(r#"{"id":"1","cardType":"analysis","sourceClass":"x\" onclick=\"y"}"#);
        let html = card(&c);
        assert!(html.contains(r#"<span class="badge source-other">x" onclick="y</span>"#));
        assert!(!html.contains(r#"source-x"#));
    }

    #[test]
    fn id_attribute_is_escaped() {
        let c = card_for(r#"{"id":"a\"b"}"#);
        let html = card(&c);
        assert!(html.contains(r#"data-id="a&quot;b""#));
    }

    #[test]
    fn short_card_without_image_has_placeholder() {
        let html = card(&card_for(r#"{"id":1,"title":"t"}"#));
        assert!(html.contains(r#"<div class="thumb"></div>"#));
        assert!(html.contains(r#"data-id="1""#));
    }

    #[test]
    fn list_page_marks_active_tab_and_selected_source() {
        let st = FilterState::new(Category::Tech, SourceFilter::Reporter);
        let page = ListPage::build(&[], &st, false, &DateFormatter::default());
        let html = list_page(&page);
        assert!(html.contains(r#"data-category="tech" class="active""#));
        assert!(html.contains(r#"<option value="reporter" selected>"#));
        assert!(html.contains(r#"id="newsSourceFilter""#));
        assert!(html.contains(r#"<div id="news-sentinel"></div>"#));
    }

    #[test]
    fn detail_states_all_have_back_button() {
        for page in [DetailPage::Loading, DetailPage::NotFound] {
            assert!(detail_page(&page).contains("back-btn"));
        }
        assert!(detail_page(&DetailPage::NotFound).contains(NOT_FOUND_TEXT));
    }
}
