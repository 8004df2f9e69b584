// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{profile_page, FailingSession, FakeNavigator};
use linkrs::config::settings::CrawlConfig;
use linkrs::domain::models::profile::ProfileRecord;
use linkrs::domain::services::crawl_service::ProfileCrawler;
use linkrs::engines::session::NoopSession;
use linkrs::infrastructure::repositories::memory_profile_repo::MemoryProfileRepository;
use std::sync::atomic::Ordering;
use std::sync::Arc;

const SEED: &str = "https://net.example/in/seed";
const ALICE: &str = "https://net.example/in/alice";
const BOB: &str = "https://net.example/in/bob";
const DEEP: &str = "https://net.example/in/deep";

fn config(max_profiles: u32, max_depth: u32, targets: &[&str]) -> CrawlConfig {
    CrawlConfig {
        seed_url: SEED.to_string(),
        max_profiles,
        max_depth,
        delay_min_ms: 0,
        delay_max_ms: 0,
        target_affiliations: targets.iter().map(|t| t.to_string()).collect(),
    }
}

/// 种子 + 深度1的两个档案，深度2的链接存在但不被抓取
fn two_level_navigator() -> FakeNavigator {
    FakeNavigator::new()
        .with_page(SEED, profile_page("Seed Person", &[ALICE, BOB]))
        .with_page(ALICE, profile_page("Alice", &[DEEP]))
        .with_page(BOB, profile_page("Bob", &[DEEP]))
        .with_page(DEEP, profile_page("Deep", &[]))
}

#[tokio::test]
async fn test_bfs_respects_depth_cap() {
    let navigator = two_level_navigator();
    let repo = Arc::new(MemoryProfileRepository::new());
    let crawler = ProfileCrawler::new(config(10, 1, &["mcgill"]), repo.clone());

    let summary = crawler.run(&navigator, &NoopSession).await.unwrap();

    // 种子 + 两个深度1档案，深度2永不抓取
    assert_eq!(summary.visited, 3);
    let log = navigator.goto_log();
    assert_eq!(log.len(), 3);
    assert_eq!(log[0], SEED);
    assert!(!log.contains(&DEEP.to_string()));
    assert_eq!(summary.saved, 3);
    assert_eq!(repo.len(), 3);
}

#[tokio::test]
async fn test_bfs_visits_in_breadth_first_order() {
    let navigator = two_level_navigator();
    let repo = Arc::new(MemoryProfileRepository::new());
    let crawler = ProfileCrawler::new(config(10, 2, &["mcgill"]), repo.clone());

    let summary = crawler.run(&navigator, &NoopSession).await.unwrap();

    let log = navigator.goto_log();
    assert_eq!(log[0], SEED);
    // 深度1的两个档案先于深度2
    assert_eq!(log[3], DEEP);
    assert_eq!(summary.visited, 4);
}

#[tokio::test]
async fn test_max_profiles_caps_fetches() {
    let navigator = two_level_navigator();
    let repo = Arc::new(MemoryProfileRepository::new());
    let crawler = ProfileCrawler::new(config(2, 5, &["mcgill"]), repo.clone());

    let summary = crawler.run(&navigator, &NoopSession).await.unwrap();

    assert_eq!(summary.visited, 2);
    assert_eq!(navigator.goto_log().len(), 2);
}

#[tokio::test]
async fn test_zero_max_profiles_fetches_nothing() {
    let navigator = two_level_navigator();
    let repo = Arc::new(MemoryProfileRepository::new());
    let crawler = ProfileCrawler::new(config(0, 5, &["mcgill"]), repo.clone());

    let summary = crawler.run(&navigator, &NoopSession).await.unwrap();

    assert_eq!(summary.visited, 0);
    assert!(navigator.goto_log().is_empty());
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_zero_max_depth_visits_only_seed() {
    let navigator = two_level_navigator();
    let repo = Arc::new(MemoryProfileRepository::new());
    let crawler = ProfileCrawler::new(config(10, 0, &["mcgill"]), repo.clone());

    let summary = crawler.run(&navigator, &NoopSession).await.unwrap();

    assert_eq!(summary.visited, 1);
    assert_eq!(navigator.goto_log(), vec![SEED.to_string()]);
}

#[tokio::test]
async fn test_rerun_skips_existing_record_without_writing() {
    let navigator = FakeNavigator::new().with_page(SEED, profile_page("Seed Person", &[]));
    let repo = Arc::new(MemoryProfileRepository::new());
    repo.seed(ProfileRecord {
        canonical_url: SEED.to_string(),
        name: "Seed Person".to_string(),
        ..Default::default()
    });

    let crawler = ProfileCrawler::new(config(10, 0, &["mcgill"]), repo.clone());
    let summary = crawler.run(&navigator, &NoopSession).await.unwrap();

    assert_eq!(summary.duplicates, 1);
    assert_eq!(summary.saved, 0);
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_no_target_match_is_not_persisted() {
    let navigator = FakeNavigator::new().with_page(SEED, profile_page("Seed Person", &[]));
    let repo = Arc::new(MemoryProfileRepository::new());
    let crawler = ProfileCrawler::new(config(10, 0, &["stanford"]), repo.clone());

    let summary = crawler.run(&navigator, &NoopSession).await.unwrap();

    assert_eq!(summary.no_match, 1);
    assert_eq!(summary.saved, 0);
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_empty_targets_save_nothing() {
    let navigator = FakeNavigator::new().with_page(SEED, profile_page("Seed Person", &[]));
    let repo = Arc::new(MemoryProfileRepository::new());
    let crawler = ProfileCrawler::new(config(10, 0, &[]), repo.clone());

    let summary = crawler.run(&navigator, &NoopSession).await.unwrap();

    assert_eq!(summary.no_match, 1);
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_navigation_failure_does_not_abort_run() {
    let navigator = FakeNavigator::new()
        .with_page(SEED, profile_page("Seed Person", &[ALICE, BOB]))
        .with_failing(ALICE)
        .with_page(BOB, profile_page("Bob", &[]));
    let repo = Arc::new(MemoryProfileRepository::new());
    let crawler = ProfileCrawler::new(config(10, 1, &["mcgill"]), repo.clone());

    let summary = crawler.run(&navigator, &NoopSession).await.unwrap();

    assert_eq!(summary.errors, 1);
    assert_eq!(summary.saved, 2);
    // 失败的URL不在本次运行内重试
    let failures = navigator
        .goto_log()
        .iter()
        .filter(|u| u.as_str() == ALICE)
        .count();
    assert_eq!(failures, 1);
}

#[tokio::test]
async fn test_auth_failure_aborts_before_traversal() {
    let navigator = two_level_navigator();
    let repo = Arc::new(MemoryProfileRepository::new());
    let crawler = ProfileCrawler::new(config(10, 1, &["mcgill"]), repo.clone());

    let result = crawler.run(&navigator, &FailingSession).await;

    assert!(result.is_err());
    assert!(navigator.goto_log().is_empty());
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_cancellation_drains_before_next_entry() {
    let navigator = two_level_navigator();
    let repo = Arc::new(MemoryProfileRepository::new());
    let crawler = ProfileCrawler::new(config(10, 1, &["mcgill"]), repo.clone());

    crawler.stop_handle().store(true, Ordering::SeqCst);
    let summary = crawler.run(&navigator, &NoopSession).await.unwrap();

    assert_eq!(summary.visited, 0);
    assert!(navigator.goto_log().is_empty());
}

#[tokio::test]
async fn test_worker_pool_follows_chain_discovered_in_flight() {
    // 链式图：任一时刻队列里最多一个条目，出队的条目在途时队列为空。
    // 看到空队列的工作器必须等在途的工作器产出后继链接，而不是提前收尾。
    fn chain_navigator() -> FakeNavigator {
        FakeNavigator::new()
            .with_page(SEED, profile_page("Seed Person", &[ALICE]))
            .with_page(ALICE, profile_page("Alice", &[BOB]))
            .with_page(BOB, profile_page("Bob", &[]))
    }

    let repo = Arc::new(MemoryProfileRepository::new());
    let crawler = ProfileCrawler::new(config(10, 2, &["mcgill"]), repo.clone());

    let navigators: Vec<Arc<dyn linkrs::engines::navigator::PageNavigator>> =
        vec![Arc::new(chain_navigator()), Arc::new(chain_navigator())];
    let summary = crawler.run_pool(&navigators, &NoopSession).await.unwrap();

    assert_eq!(summary.visited, 3);
    assert_eq!(summary.saved, 3);
    assert_eq!(repo.len(), 3);
}

#[tokio::test]
async fn test_worker_pool_preserves_caps_and_dedup() {
    let repo = Arc::new(MemoryProfileRepository::new());
    let crawler = ProfileCrawler::new(config(10, 1, &["mcgill"]), repo.clone());

    let navigators: Vec<Arc<dyn linkrs::engines::navigator::PageNavigator>> = vec![
        Arc::new(two_level_navigator()),
        Arc::new(two_level_navigator()),
    ];
    let summary = crawler.run_pool(&navigators, &NoopSession).await.unwrap();

    // 共享边界下两个工作器合计仍是3次抓取，每条记录只保存一次
    assert_eq!(summary.visited, 3);
    assert_eq!(summary.saved, 3);
    assert_eq!(repo.len(), 3);
}
