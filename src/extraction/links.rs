// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 档案链接发现
//!
//! 从已渲染页面提取站内档案链接（`/in/` 路径），规范化后交给
//! 边界队列去重入队。

use crate::extraction::selectors;
use crate::utils::url_utils::{canonicalize_profile_url, resolve_url};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// 档案路径标记
const PROFILE_PATH: &str = "/in/";

/// 从HTML中发现出站档案链接
///
/// 只保留与 `base_url` 同主机、路径含 `/in/` 的 http(s) 链接；
/// 页面自身的规范化URL被排除。返回集合已去重。
pub fn discover_profile_links(html: &str, base_url: &str) -> HashSet<String> {
    let Ok(base) = Url::parse(base_url) else {
        return HashSet::new();
    };
    let doc = Html::parse_document(html);
    let anchor = Selector::parse(selectors::ANCHOR).unwrap();
    let own_canonical = canonicalize_profile_url(base_url);

    let mut links = HashSet::new();
    for element in doc.select(&anchor) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        // Ignore fragment identifiers, mailto and javascript links
        if href.starts_with('#') || href.starts_with("mailto:") || href.starts_with("javascript:")
        {
            continue;
        }
        let Ok(resolved) = resolve_url(&base, href) else {
            continue;
        };
        if resolved.host_str() != base.host_str() || !resolved.path().contains(PROFILE_PATH) {
            continue;
        }
        if let Some(canonical) = canonicalize_profile_url(resolved.as_str()) {
            if own_canonical.as_deref() != Some(canonical.as_str()) {
                links.insert(canonical);
            }
        }
    }
    links
}
