// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{search_page, FakeNavigator};
use linkrs::config::settings::SearchConfig;
use linkrs::domain::services::search_service::PeopleSearch;
use std::collections::BTreeMap;

const BASE: &str = "https://net.example";
const PATH: &str = "/search/results/people/";

fn page_one() -> &'static str {
    "https://net.example/search/results/people/?keywords=jane"
}

fn page_n(n: u32) -> String {
    format!("{}&page={}", page_one(), n)
}

fn search(max_pages: u32, targets: &[&str]) -> PeopleSearch {
    let mut filters = BTreeMap::new();
    filters.insert("keywords".to_string(), "jane".to_string());
    PeopleSearch::new(
        SearchConfig {
            filters,
            max_pages,
            delay_ms: 0,
            target_affiliations: targets.iter().map(|t| t.to_string()).collect(),
        },
        BASE,
        PATH,
    )
}

#[tokio::test]
async fn test_pagination_stops_on_disabled_next_control() {
    // 第2页的下一页控件被禁用，页数上限是3
    let navigator = FakeNavigator::new()
        .with_page(
            page_one(),
            search_page(
                &[("Jane", "https://net.example/in/jane")],
                Some(true),
            ),
        )
        .with_page(
            &page_n(2),
            search_page(
                &[("John", "https://net.example/in/john")],
                Some(false),
            ),
        )
        .with_page(
            &page_n(3),
            search_page(&[("Never", "https://net.example/in/never")], None),
        );

    let outcome = search(3, &[]).run(&navigator).await;

    assert_eq!(outcome.pages, 2);
    assert_eq!(outcome.cards.len(), 2);
    let log = navigator.goto_log();
    assert_eq!(log.len(), 2);
    assert!(!log.contains(&page_n(3)));
}

#[tokio::test]
async fn test_pagination_respects_page_cap() {
    // 每页都有可用的下一页控件，页数上限是2
    let navigator = FakeNavigator::new()
        .with_page(
            page_one(),
            search_page(&[("Jane", "https://net.example/in/jane")], Some(true)),
        )
        .with_page(
            &page_n(2),
            search_page(&[("John", "https://net.example/in/john")], Some(true)),
        )
        .with_page(
            &page_n(3),
            search_page(&[("Never", "https://net.example/in/never")], Some(true)),
        );

    let outcome = search(2, &[]).run(&navigator).await;

    assert_eq!(outcome.pages, 2);
    assert_eq!(navigator.goto_log().len(), 2);
}

#[tokio::test]
async fn test_missing_next_control_ends_after_first_page() {
    let navigator = FakeNavigator::new().with_page(
        page_one(),
        search_page(&[("Jane", "https://net.example/in/jane")], None),
    );

    let outcome = search(5, &[]).run(&navigator).await;

    assert_eq!(outcome.pages, 1);
    assert_eq!(outcome.cards.len(), 1);
    assert_eq!(outcome.cards[0].name, "Jane");
    assert_eq!(outcome.cards[0].profile_url, "https://net.example/in/jane");
}

#[tokio::test]
async fn test_target_filter_applies_to_cards() {
    let navigator = FakeNavigator::new().with_page(
        page_one(),
        search_page(
            &[
                ("Jane", "https://net.example/in/jane"),
                ("John", "https://net.example/in/john"),
            ],
            None,
        ),
    );

    // 卡片头衔都是 "Engineer at Acme"
    let kept = search(1, &["acme"]).run(&navigator).await;
    assert_eq!(kept.cards.len(), 2);

    let filtered = search(1, &["globex"]).run(&navigator).await;
    assert!(filtered.cards.is_empty());
    assert_eq!(filtered.pages, 1);
}

#[tokio::test]
async fn test_navigation_failure_ends_run_with_collected_cards() {
    let navigator = FakeNavigator::new()
        .with_page(
            page_one(),
            search_page(&[("Jane", "https://net.example/in/jane")], Some(true)),
        )
        .with_failing(&page_n(2));

    let outcome = search(3, &[]).run(&navigator).await;

    assert_eq!(outcome.pages, 1);
    assert_eq!(outcome.cards.len(), 1);
}

#[tokio::test]
async fn test_zero_max_pages_never_navigates() {
    let navigator = FakeNavigator::new();
    let outcome = search(0, &[]).run(&navigator).await;

    assert_eq!(outcome.pages, 0);
    assert!(outcome.cards.is_empty());
    assert!(navigator.goto_log().is_empty());
}
