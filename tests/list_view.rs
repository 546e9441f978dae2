// tests/list_view.rs
use std::cell::RefCell;
use std::rc::Rc;

use grid_news::loader::{parse_feed, FixtureFetcher};
use grid_news::nav::Route;
use grid_news::render::{Card, DateFormatter};
use grid_news::scroll::{IntersectionEntry, RowViewport, VisibilityObserver, SENTINEL_ID};
use grid_news::{Category, ListView, NewsItem, SourceFilter};

#[derive(Default)]
struct Watch {
    observing: Vec<String>,
    disconnects: usize,
}

#[derive(Clone, Default)]
struct MockObserver(Rc<RefCell<Watch>>);

impl VisibilityObserver for MockObserver {
    fn observe(&mut self, target: &str) {
        self.0.borrow_mut().observing.push(target.to_string());
    }
    fn disconnect(&mut self) {
        let mut w = self.0.borrow_mut();
        w.observing.clear();
        w.disconnects += 1;
    }
}

fn sentinel_visible() -> Vec<IntersectionEntry> {
    vec![IntersectionEntry {
        target: SENTINEL_ID.to_string(),
        is_intersecting: true,
    }]
}

fn numbered(n: usize) -> Vec<NewsItem> {
    let body: Vec<String> = (1..=n)
        .map(|i| format!(r#"{{"id": {i}, "title": "t{i}", "summary": "", "pubDate": "2024-01-{:02}"}}"#, (i % 28) + 1))
        .collect();
    parse_feed(&format!("[{}]", body.join(","))).unwrap()
}

fn mounted(items: Vec<NewsItem>) -> (ListView<MockObserver>, MockObserver) {
    let obs = MockObserver::default();
    let mut view = ListView::new(DateFormatter::default());
    let ticket = view.mount(obs.clone());
    assert!(view.finish_load(ticket, items));
    (view, obs)
}

#[test]
fn scroll_triggers_expand_window_until_capped() {
    let (mut view, _) = mounted(numbered(25));
    assert_eq!(view.visible().len(), 10);
    assert!(view.on_intersection(&sentinel_visible()));
    assert_eq!(view.state().page, 1);
    assert_eq!(view.visible().len(), 20);
    assert!(view.on_intersection(&sentinel_visible()));
    assert_eq!(view.visible().len(), 25);
    // no upper bound on the page counter, the slice just stays capped
    assert!(view.on_intersection(&sentinel_visible()));
    assert_eq!(view.visible().len(), 25);
}

#[test]
fn filter_change_restarts_at_first_page() {
    let (mut view, _) = mounted(numbered(25));
    view.on_intersection(&sentinel_visible());
    assert_eq!(view.visible().len(), 20);
    view.set_source(SourceFilter::Media);
    assert_eq!(view.state().page, 0);
    assert_eq!(view.visible().len(), 10);
    view.on_intersection(&sentinel_visible());
    view.set_category(Category::Team);
    assert_eq!(view.state().page, 0);
    assert!(view.visible().is_empty());
}

#[test]
fn mount_observes_sentinel_and_unmount_releases_it() {
    let (mut view, obs) = mounted(numbered(3));
    assert_eq!(obs.0.borrow().observing, vec![SENTINEL_ID.to_string()]);
    view.unmount();
    assert!(obs.0.borrow().observing.is_empty());
    assert_eq!(obs.0.borrow().disconnects, 1);
    assert!(!view.on_intersection(&sentinel_visible()));
    assert!(view.items().is_empty());
}

#[test]
fn result_after_unmount_is_dropped() {
    let mut view: ListView<MockObserver> = ListView::new(DateFormatter::default());
    let ticket = view.mount(MockObserver::default());
    assert!(view.is_loading());
    view.unmount();
    assert!(!view.finish_load(ticket, numbered(5)));
    assert!(view.items().is_empty());
}

#[test]
fn remount_starts_fresh() {
    let (mut view, _) = mounted(numbered(15));
    view.set_category(Category::Tech);
    view.unmount();
    let ticket = view.mount(MockObserver::default());
    assert_eq!(view.state().category, Category::All);
    assert!(view.is_loading());
    assert!(view.finish_load(ticket, numbered(2)));
    assert!(!view.is_loading());
    assert_eq!(view.visible().len(), 2);
}

#[test]
fn card_click_routes_to_detail_with_item_id() {
    let items = parse_feed(
        r#"[{"id": "a/b c", "title": "t", "summary": "", "cardType": "analysis"}]"#,
    )
    .unwrap();
    let (view, _) = mounted(items);
    let page = view.page();
    assert_eq!(page.cards.len(), 1);
    assert!(matches!(page.cards[0], Card::Analysis(_)));
    assert_eq!(page.cards[0].id(), "a/b c");
    assert_eq!(page.cards[0].href(), "/news/a%2Fb%20c");
    assert_eq!(view.open(0), Some(Route::Detail("a/b c".to_string())));
    assert_eq!(Route::parse(page.cards[0].href()), view.open(0));
    assert_eq!(view.open(1), None);
}

#[tokio::test]
async fn row_viewport_drives_pagination() {
    let body = std::fs::read_to_string("tests/fixtures/news.json").expect("fixture");
    let feed: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
    // 3 copies with distinct ids -> 21 items
    let mut all = Vec::new();
    for copy in 0..3 {
        for entry in &feed {
            let mut e = entry.clone();
            let id = entry["id"].to_string();
            e["id"] = serde_json::json!(format!("{copy}-{}", id.trim_matches('"')));
            all.push(e);
        }
    }
    let fetcher = FixtureFetcher::from_fixture(&serde_json::to_string(&all).unwrap());

    let mut view = ListView::new(DateFormatter::default());
    view.mount_and_load(RowViewport::new(4), &fetcher).await;
    assert_eq!(view.items().len(), 21);
    assert_eq!(view.visible().len(), 10);

    let vp = view.observer_mut().unwrap();
    vp.scroll_by(8);
    let entries = vp.entries(10);
    assert!(view.on_intersection(&entries));
    assert_eq!(view.visible().len(), 20);

    // sentinel moved to row 20, out of the 7..11 window
    let entries = view.observer_mut().unwrap().entries(20);
    assert!(!view.on_intersection(&entries));
    assert_eq!(view.visible().len(), 20);
}

fn tagged(n: usize) -> Vec<NewsItem> {
    let body: Vec<String> = (1..=n)
        .map(|i| {
            let tag = if i % 2 == 0 { "team" } else { "driver" };
            format!(r#"{{"id": {i}, "title": "t{i}", "tags": ["{tag}"]}}"#)
        })
        .collect();
    parse_feed(&format!("[{}]", body.join(","))).unwrap()
}

/// Feed viewport transitions to the view until the sentinel settles.
fn pump(view: &mut ListView<RowViewport>) {
    loop {
        let rendered = view.visible().len();
        let entries = view.observer_mut().unwrap().entries(rendered);
        if entries.is_empty() || !view.on_intersection(&entries) {
            break;
        }
    }
}

fn scroll(view: &mut ListView<RowViewport>, rows: usize) {
    view.observer_mut().unwrap().scroll_by(rows);
    pump(view);
}

#[test]
fn scrolling_keeps_paging_after_tab_switch() {
    let mut view = ListView::new(DateFormatter::default());
    let ticket = view.mount(RowViewport::new(6));
    assert!(view.finish_load(ticket, tagged(50)));
    for _ in 0..4 {
        scroll(&mut view, 6);
    }
    assert_eq!(view.state().page, 2);

    view.set_category(Category::Team);
    view.observer_mut().unwrap().reset();
    pump(&mut view);
    assert_eq!(view.state().page, 0);
    assert_eq!(view.filtered_len(), 25);

    for _ in 0..5 {
        scroll(&mut view, 6);
    }
    assert!(view.state().page > 0);
    assert_eq!(view.visible().len(), 25);
}

#[test]
fn shrunk_list_under_scrolled_viewport_still_pages() {
    let mut view = ListView::new(DateFormatter::default());
    let ticket = view.mount(RowViewport::new(6));
    assert!(view.finish_load(ticket, tagged(50)));
    for _ in 0..4 {
        scroll(&mut view, 6);
    }
    // no reset: the viewport is far below the new, shorter list
    view.set_source(SourceFilter::Media);
    pump(&mut view);
    assert_eq!(view.state().page, 1);
    assert_eq!(view.visible().len(), 20);
}

#[test]
fn mounted_flag_follows_lifecycle() {
    let (mut view, _) = mounted(numbered(3));
    assert!(view.is_mounted());
    view.unmount();
    assert!(!view.is_mounted());
}
