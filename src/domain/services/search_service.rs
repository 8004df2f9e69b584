// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 搜索编排
//!
//! `Idle -> Querying -> ExtractingPage -> (Paginating | Done)`。
//! 用过滤器键值对构造搜索URL，逐页提取结果卡片，只在页数未达上限
//! 且页面上存在可用的"下一页"控件时继续翻页。与BFS爬取编排相互
//! 独立，但复用同一套提取规则和礼貌延迟。

use crate::config::settings::SearchConfig;
use crate::domain::models::search_card::SearchResultCard;
use crate::domain::services::politeness::PolitenessDelay;
use crate::domain::services::target_filter;
use crate::engines::navigator::{page_html, PageNavigator};
use crate::extraction::search::extract_search_page;
use tracing::{info, warn};

/// 一次搜索运行的结果
#[derive(Debug, Default)]
pub struct SearchOutcome {
    /// 提取出的结果卡片（调用方自行决定是否与存储去重）
    pub cards: Vec<SearchResultCard>,
    /// 实际提取的页数
    pub pages: u32,
}

/// 人员搜索编排器
pub struct PeopleSearch {
    config: SearchConfig,
    base_url: String,
    search_path: String,
    delay: PolitenessDelay,
}

impl PeopleSearch {
    pub fn new(config: SearchConfig, base_url: &str, search_path: &str) -> Self {
        let delay = PolitenessDelay::fixed(config.delay_ms);
        Self {
            config,
            base_url: base_url.trim_end_matches('/').to_string(),
            search_path: search_path.to_string(),
            delay,
        }
    }

    /// 构造一页搜索URL
    ///
    /// 固定基础路径拼接URL编码的 `key=value` 对，空值的键被省略；
    /// 第一页不带页码参数。
    pub fn page_url(&self, page: u32) -> String {
        let mut params: Vec<String> = self
            .config
            .filters
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect();
        if page > 1 {
            params.push(format!("page={}", page));
        }

        let mut url = format!("{}{}", self.base_url, self.search_path);
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }
        url
    }

    /// 卡片是否通过目标过滤
    ///
    /// 搜索侧约定：空目标列表放行全部卡片。
    fn card_matches(&self, card: &SearchResultCard) -> bool {
        self.config.target_affiliations.is_empty()
            || target_filter::matches(&card.filter_strings(), &self.config.target_affiliations)
    }

    /// 执行搜索并跟随分页
    pub async fn run(&self, navigator: &dyn PageNavigator) -> SearchOutcome {
        let mut outcome = SearchOutcome::default();
        info!(
            "Search state: Idle -> Querying (filters={:?}, max_pages={})",
            self.config.filters, self.config.max_pages
        );

        for page in 1..=self.config.max_pages {
            let url = self.page_url(page);
            info!("Search page {}/{}: {}", page, self.config.max_pages, url);

            if let Err(e) = navigator.goto(&url).await {
                warn!("Search navigation failed for {}: {}", url, e);
                break;
            }

            // 导航后提取前的礼貌延迟
            self.delay.wait().await;

            let html = match page_html(navigator).await {
                Ok(html) => html,
                Err(e) => {
                    warn!("Failed to read search page {}: {}", url, e);
                    break;
                }
            };

            let extracted = extract_search_page(&html);
            let total = extracted.cards.len();
            let kept: Vec<SearchResultCard> = extracted
                .cards
                .into_iter()
                .filter(|card| self.card_matches(card))
                .collect();
            info!(
                "Search page {}: {} cards extracted, {} kept",
                page,
                total,
                kept.len()
            );
            outcome.cards.extend(kept);
            outcome.pages += 1;

            // 控件缺失或禁用时结束，无论页数上限
            if !extracted.has_enabled_next {
                info!("Search state: ExtractingPage -> Done (no enabled next control)");
                return outcome;
            }
            if page < self.config.max_pages {
                info!("Search state: ExtractingPage -> Paginating");
                // 下一次导航前的礼貌延迟
                self.delay.wait().await;
            }
        }

        info!("Search state: -> Done ({} pages)", outcome.pages);
        outcome
    }
}
