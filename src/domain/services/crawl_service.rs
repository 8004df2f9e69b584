// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 档案爬取编排
//!
//! 把边界队列、礼貌延迟、页面导航器、提取规则、目标过滤和持久化
//! 闸门组合成一条遍历循环：
//! `Idle -> Authenticating -> Traversing -> Draining -> Done`，
//! Traversing内循环 出队 -> 导航 -> 延迟 -> 提取 -> 过滤 ->
//! (保存) -> 发现链接 -> 延迟 -> 入队。
//!
//! 单个条目的导航超时或提取异常只记录日志并继续下一个条目；
//! 整次运行只有认证失败是致命的。

use crate::config::settings::CrawlConfig;
use crate::domain::repositories::profile_repository::{PersistenceError, ProfileRepository};
use crate::domain::services::politeness::PolitenessDelay;
use crate::domain::services::target_filter;
use crate::engines::navigator::{page_html, PageNavigator};
use crate::engines::session::{SessionBootstrap, SessionError};
use crate::extraction::links::discover_profile_links;
use crate::extraction::profile::extract_profile;
use crate::queue::frontier::SharedFrontier;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// 一次爬取运行的汇总
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSummary {
    /// 实际抓取的页面数
    pub visited: u32,
    /// 新保存的记录数
    pub saved: u32,
    /// 因已存在而跳过的记录数
    pub duplicates: u32,
    /// 未命中目标归属的记录数
    pub no_match: u32,
    /// 单页/单记录失败数
    pub errors: u32,
}

/// 跨工作器共享的运行计数
#[derive(Default)]
struct Counters {
    visited: AtomicU32,
    saved: AtomicU32,
    duplicates: AtomicU32,
    no_match: AtomicU32,
    errors: AtomicU32,
    in_flight: AtomicU32,
}

impl Counters {
    fn summary(&self) -> CrawlSummary {
        CrawlSummary {
            visited: self.visited.load(Ordering::SeqCst),
            saved: self.saved.load(Ordering::SeqCst),
            duplicates: self.duplicates.load(Ordering::SeqCst),
            no_match: self.no_match.load(Ordering::SeqCst),
            errors: self.errors.load(Ordering::SeqCst),
        }
    }
}

/// 档案爬取编排器
pub struct ProfileCrawler<R: ProfileRepository> {
    config: CrawlConfig,
    repo: Arc<R>,
    delay: PolitenessDelay,
    stop: Arc<AtomicBool>,
}

impl<R: ProfileRepository> ProfileCrawler<R> {
    pub fn new(config: CrawlConfig, repo: Arc<R>) -> Self {
        let delay = PolitenessDelay::from_millis(config.delay_min_ms, config.delay_max_ms);
        Self {
            config,
            repo,
            delay,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 外部取消句柄
    ///
    /// 置位后编排器在循环迭代之间转入Draining并结束；
    /// 正在进行的导航自行完成或超时，不会被强杀。
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.stop.clone()
    }

    /// 单会话顺序运行（默认变体）
    pub async fn run(
        &self,
        navigator: &dyn PageNavigator,
        session: &dyn SessionBootstrap,
    ) -> Result<CrawlSummary, SessionError> {
        info!("Crawl state: Idle -> Authenticating");
        session.authenticate(navigator).await?;

        let frontier = SharedFrontier::new();
        if !frontier.offer(&self.config.seed_url, 0) {
            warn!("Seed URL rejected: {}", self.config.seed_url);
        }
        let counters = Counters::default();

        info!(
            "Crawl state: Authenticating -> Traversing (seed={}, max_profiles={}, max_depth={})",
            self.config.seed_url, self.config.max_profiles, self.config.max_depth
        );
        self.worker_loop(0, navigator, &frontier, &counters).await;

        info!(
            "Crawl state: Traversing -> Draining ({} URLs dequeued, {} pending entries discarded)",
            frontier.visited_len(),
            frontier.pending_len()
        );

        let summary = counters.summary();
        info!(
            "Crawl state: Draining -> Done. visited={} saved={} duplicates={} no_match={} errors={}",
            summary.visited, summary.saved, summary.duplicates, summary.no_match, summary.errors
        );
        Ok(summary)
    }

    /// 有界工作池运行
    ///
    /// 每个导航器会话跑同一条遍历循环，共享一个边界队列；
    /// 礼貌延迟按工作器各自计。
    pub async fn run_pool(
        &self,
        navigators: &[Arc<dyn PageNavigator>],
        session: &dyn SessionBootstrap,
    ) -> Result<CrawlSummary, SessionError> {
        info!("Crawl state: Idle -> Authenticating ({} sessions)", navigators.len());
        for navigator in navigators {
            session.authenticate(navigator.as_ref()).await?;
        }

        let frontier = SharedFrontier::new();
        if !frontier.offer(&self.config.seed_url, 0) {
            warn!("Seed URL rejected: {}", self.config.seed_url);
        }
        let counters = Counters::default();

        info!(
            "Crawl state: Authenticating -> Traversing (workers={}, seed={})",
            navigators.len(),
            self.config.seed_url
        );
        let workers = navigators
            .iter()
            .enumerate()
            .map(|(id, navigator)| self.worker_loop(id, navigator.as_ref(), &frontier, &counters));
        futures::future::join_all(workers).await;

        info!(
            "Crawl state: Traversing -> Draining ({} URLs dequeued, {} pending entries discarded)",
            frontier.visited_len(),
            frontier.pending_len()
        );
        let summary = counters.summary();
        info!(
            "Crawl state: Draining -> Done. visited={} saved={} duplicates={} no_match={} errors={}",
            summary.visited, summary.saved, summary.duplicates, summary.no_match, summary.errors
        );
        Ok(summary)
    }

    /// 遍历循环
    ///
    /// 运行直到边界耗尽、抓取数达到上限或收到取消信号。
    async fn worker_loop(
        &self,
        worker_id: usize,
        navigator: &dyn PageNavigator,
        frontier: &SharedFrontier,
        counters: &Counters,
    ) {
        loop {
            if self.stop.load(Ordering::SeqCst) {
                info!("Worker {}: cancellation requested, draining", worker_id);
                break;
            }

            // 队列空或名额用尽即耗尽；在途的别的工作器还可能产出新链接
            if frontier.is_exhausted(
                counters.visited.load(Ordering::SeqCst),
                self.config.max_profiles,
            ) {
                if counters.in_flight.load(Ordering::SeqCst) == 0 {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(50)).await;
                continue;
            }

            // 弹出与in_flight递增在边界锁下原子完成
            let Some(entry) = frontier.next_tracked(&counters.in_flight) else {
                continue;
            };

            // 超深条目已标记为visited，但不抓取，也不触发终止
            if entry.depth > self.config.max_depth {
                debug!(
                    "Worker {}: skipping {} (depth {} > max {})",
                    worker_id, entry.url, entry.depth, self.config.max_depth
                );
                counters.in_flight.fetch_sub(1, Ordering::SeqCst);
                continue;
            }

            // 占一个抓取名额；名额用尽即结束
            let claimed = counters
                .visited
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| {
                    (v < self.config.max_profiles).then_some(v + 1)
                });
            let Ok(previous) = claimed else {
                counters.in_flight.fetch_sub(1, Ordering::SeqCst);
                break;
            };

            info!(
                "Worker {}: visiting {}/{} depth={} url={}",
                worker_id,
                previous + 1,
                self.config.max_profiles,
                entry.depth,
                entry.url
            );
            self.process_entry(navigator, frontier, counters, &entry.url, entry.depth)
                .await;
            counters.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
    }

    /// 处理一个已出队的条目；任何失败都止于本条目
    async fn process_entry(
        &self,
        navigator: &dyn PageNavigator,
        frontier: &SharedFrontier,
        counters: &Counters,
        url: &str,
        depth: u32,
    ) {
        if let Err(e) = navigator.goto(url).await {
            warn!("Navigation failed for {}: {}", url, e);
            counters.errors.fetch_add(1, Ordering::SeqCst);
            return;
        }

        // 导航后提取前的礼貌延迟
        self.delay.wait().await;

        let html = match page_html(navigator).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Failed to read page content for {}: {}", url, e);
                counters.errors.fetch_add(1, Ordering::SeqCst);
                return;
            }
        };

        let record = extract_profile(&html, url);
        if target_filter::matches(
            &record.affiliation_strings(),
            &self.config.target_affiliations,
        ) {
            self.persist(counters, &record).await;
        } else {
            info!("Skipped (no target match): {}", url);
            counters.no_match.fetch_add(1, Ordering::SeqCst);
        }

        let discovered = discover_profile_links(&html, url);
        let mut offered = 0usize;
        for link in &discovered {
            if frontier.offer(link, depth + 1) {
                offered += 1;
            }
        }
        debug!(
            "Discovered {} profile links at {} ({} newly queued)",
            discovered.len(),
            url,
            offered
        );

        // 下一次导航前的礼貌延迟
        self.delay.wait().await;
    }

    /// exists-then-save闸门；冲突视为已保存的no-op
    async fn persist(&self, counters: &Counters, record: &crate::domain::models::profile::ProfileRecord) {
        match self.repo.exists(&record.canonical_url).await {
            Ok(true) => {
                info!("Skipped (duplicate): {}", record.canonical_url);
                counters.duplicates.fetch_add(1, Ordering::SeqCst);
                return;
            }
            Ok(false) => {}
            Err(e) => {
                warn!("Existence check failed for {}: {}", record.canonical_url, e);
                counters.errors.fetch_add(1, Ordering::SeqCst);
                return;
            }
        }

        match self.repo.save(record).await {
            Ok(id) => {
                info!("Saved {} as {}", record.canonical_url, id);
                counters.saved.fetch_add(1, Ordering::SeqCst);
            }
            Err(PersistenceError::Conflict(_)) => {
                // 两个工作器经不同路径同时发现同一档案
                info!("Skipped (duplicate): {}", record.canonical_url);
                counters.duplicates.fetch_add(1, Ordering::SeqCst);
            }
            Err(PersistenceError::Transient(e)) => {
                warn!("Save failed for {}: {}", record.canonical_url, e);
                counters.errors.fetch_add(1, Ordering::SeqCst);
            }
        }
    }
}
