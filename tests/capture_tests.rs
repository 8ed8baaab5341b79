mod common;

use common::fixtures::{capture_section, line_chart};
use powerdeck::capture::FALLBACK_SECTION;
use powerdeck::{Card, Registry, RenderCache};
use std::time::Duration;

#[test]
fn charts_keep_capture_order() {
    let mut registry = Registry::new();
    let handle = registry.begin("Overview");
    for title in ["First", "Second", "Third"] {
        registry.capture_chart(&handle, line_chart(title, [1.0, 2.0, 3.0]));
    }

    let titles: Vec<_> = registry
        .get_charts("Overview")
        .iter()
        .map(|c| c.title().unwrap_or_default().to_string())
        .collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
}

#[test]
fn beginning_again_drops_charts_and_cards_together() {
    let mut registry = Registry::new();
    capture_section(&mut registry, "Expenses", 3);
    assert_eq!(registry.get_cards("Expenses").len(), 1);

    let handle = registry.begin("Expenses");
    assert!(registry.get_charts("Expenses").is_empty());
    assert!(registry.get_cards("Expenses").is_empty());

    registry.capture_cards(&handle, vec![Card::new("Rate", "Rs 42")], "Rates");
    assert_eq!(registry.get_cards("Expenses")[0].title, "Rates");
    assert!(registry.get_charts("Expenses").is_empty());
}

#[test]
fn stale_handles_are_redirected_to_the_fallback_section() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut registry = Registry::new();
    let stale = registry.begin("Overview");
    let current = registry.begin("Overview");

    registry.capture_chart(&stale, line_chart("Late", [1.0, 1.0, 1.0]));
    registry.capture_chart(&current, line_chart("On time", [1.0, 1.0, 1.0]));

    assert_eq!(registry.get_charts("Overview").len(), 1);
    assert_eq!(registry.get_charts(FALLBACK_SECTION).len(), 1);
    assert_eq!(registry.get_charts(FALLBACK_SECTION)[0].title(), Some("Late"));
}

#[test]
fn unknown_sections_are_empty() {
    let registry = Registry::new();
    assert!(registry.get_charts("Gas Consumption").is_empty());
    assert!(registry.get_cards("Gas Consumption").is_empty());
}

#[test]
fn rendered_charts_are_shared_through_the_cache() {
    let mut registry = Registry::new();
    let cache = RenderCache::new(Duration::from_secs(60));
    let chart = line_chart("Generation", [10.0, 50.0, 30.0]);

    let handle = registry.begin("Overview");
    let first = registry.capture_rendered(&handle, &chart, &cache, true);
    let second = registry.capture_rendered(&handle, &chart, &cache, true);

    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(registry.get_charts("Overview").len(), 2);
    assert_eq!(cache.len(), 1);
}
