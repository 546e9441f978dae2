// tests/render_list.rs
use grid_news::loader::parse_feed;
use grid_news::pipeline::visible;
use grid_news::render::{html, text, BadgeStyle, Card, DateFormatter, ListPage, Thumb};
use grid_news::{Category, FilterState, SourceClass, SourceFilter};

fn page_for(state: FilterState) -> ListPage {
    let body = std::fs::read_to_string("tests/fixtures/news.json").expect("fixture");
    let items = parse_feed(&body).unwrap();
    ListPage::build(
        &visible(&items, &state),
        &state,
        false,
        &DateFormatter::from_offset_minutes(540),
    )
}

#[test]
fn card_layouts_follow_card_type() {
    let page = page_for(FilterState::default());
    let kinds: Vec<(&str, bool)> = page
        .cards
        .iter()
        .map(|c| (c.id(), matches!(c, Card::Analysis(_))))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("2", true),
            ("4", false),
            ("3", false),
            ("1", true),
            ("5", false),
            ("6", false),
            ("7", true),
        ]
    );
}

#[test]
fn analysis_card_badges_and_short_card_thumb() {
    let page = page_for(FilterState::new(Category::Team, SourceFilter::All));
    let Card::Analysis(budget) = &page.cards[1] else {
        panic!("expected analysis card");
    };
    // "7" has no sourceClass: media badge after its two tags
    let labels: Vec<&str> = budget.badges.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["reg", "team", "media"]);
    assert_eq!(budget.badges[2].style, BadgeStyle::Source(SourceClass::Media));

    let page = page_for(FilterState::new(Category::Driver, SourceFilter::Reporter));
    let Card::Short(notebook) = &page.cards[0] else {
        panic!("expected short card");
    };
    assert_eq!(notebook.thumb, Thumb::Image("https://img.example.test/monaco.jpg".into()));
}

#[test]
fn html_exposes_ids_and_sentinel_after_cards() {
    let out = html::list_page(&page_for(FilterState::default()));
    for id in ["1", "2", "3", "4", "5", "6", "7"] {
        assert!(out.contains(&format!(r#"data-id="{id}""#)), "missing card {id}");
    }
    let last_card = out.rfind("</article>").unwrap();
    let sentinel = out.find(r#"id="news-sentinel""#).unwrap();
    assert!(sentinel > last_card);
}

#[test]
fn text_output_lists_cards_in_order() {
    let out = text::list_page(&page_for(FilterState::new(Category::All, SourceFilter::Official)));
    let stewards = out.find("Stewards publish").unwrap();
    let lineup = out.find("Team confirms").unwrap();
    assert!(stewards < lineup);
    assert!(out.contains("→ /news/4"));
}
