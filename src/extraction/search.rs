// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 搜索结果页提取
//!
//! 每张结果卡片独立提取，单张畸形卡片跳过而不中止整页；
//! 同时报告"下一页"控件是否存在且可用，供分页控制器决定是否继续。

use crate::domain::models::search_card::SearchResultCard;
use crate::extraction::selectors;
use crate::extraction::text::clean_text;
use crate::utils::url_utils::canonicalize_profile_url;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// 解析常量选择器
fn sel(raw: &str) -> Selector {
    Selector::parse(raw).unwrap()
}

/// 一页搜索结果
#[derive(Debug, Default)]
pub struct SearchPage {
    /// 本页提取出的结果卡片
    pub cards: Vec<SearchResultCard>,
    /// "下一页"控件存在且未禁用
    pub has_enabled_next: bool,
}

/// 提取单张结果卡片，畸形卡片返回 `None`
fn extract_card(item: ElementRef) -> Option<SearchResultCard> {
    let link = item
        .select(&sel(selectors::SEARCH_RESULT_LINK))
        .next()
        .and_then(|a| a.value().attr("href"))?;
    let profile_url = canonicalize_profile_url(link)?;

    let name = item
        .select(&sel(selectors::SEARCH_RESULT_NAME))
        .next()
        .map(|e| clean_text(&e.text().collect::<String>()))
        .unwrap_or_default();
    if name.is_empty() {
        return None;
    }

    let field = |raw_sel: &str| {
        item.select(&sel(raw_sel))
            .next()
            .map(|e| clean_text(&e.text().collect::<String>()))
            .unwrap_or_default()
    };

    Some(SearchResultCard {
        name,
        headline: field(selectors::SEARCH_RESULT_HEADLINE),
        location: field(selectors::SEARCH_RESULT_LOCATION),
        picture_url: item
            .select(&sel(selectors::SEARCH_RESULT_PICTURE))
            .next()
            .and_then(|e| e.value().attr("src"))
            .unwrap_or_default()
            .to_string(),
        profile_url,
    })
}

/// "下一页"控件是否可用
fn next_control_enabled(doc: &Html) -> bool {
    doc.select(&sel(selectors::SEARCH_NEXT_BUTTON))
        .next()
        .map(|button| {
            let element = button.value();
            let disabled_class = element
                .attr("class")
                .is_some_and(|c| c.contains("artdeco-button--disabled"));
            element.attr("disabled").is_none() && !disabled_class
        })
        .unwrap_or(false)
}

/// 提取一页搜索结果
pub fn extract_search_page(html: &str) -> SearchPage {
    let doc = Html::parse_document(html);

    let mut cards = Vec::new();
    for item in doc.select(&sel(selectors::SEARCH_RESULT_ITEM)) {
        match extract_card(item) {
            Some(card) => cards.push(card),
            None => debug!("Skipping malformed search result card"),
        }
    }

    SearchPage {
        cards,
        has_enabled_next: next_control_enabled(&doc),
    }
}
