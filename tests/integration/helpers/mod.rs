// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 测试辅助：脚本化导航器与页面构造器

use async_trait::async_trait;
use linkrs::engines::navigator::{NavigatorError, PageNavigator, OUTER_HTML_SCRIPT};
use linkrs::engines::session::{SessionBootstrap, SessionError};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// 脚本化页面导航器
///
/// 按URL返回预置的HTML；记录每次goto以便断言抓取次数与顺序。
#[derive(Default)]
pub struct FakeNavigator {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    goto_log: Mutex<Vec<String>>,
    current: Mutex<Option<String>>,
}

impl FakeNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置一个URL与其渲染后的HTML
    pub fn with_page(mut self, url: &str, html: String) -> Self {
        self.pages.insert(url.to_string(), html);
        self
    }

    /// 让某个URL的导航以超时失败
    pub fn with_failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    /// 实际发生过的goto调用
    pub fn goto_log(&self) -> Vec<String> {
        self.goto_log.lock().clone()
    }
}

#[async_trait]
impl PageNavigator for FakeNavigator {
    async fn goto(&self, url: &str) -> Result<(), NavigatorError> {
        self.goto_log.lock().push(url.to_string());
        if self.failing.contains(url) {
            return Err(NavigatorError::Timeout);
        }
        if !self.pages.contains_key(url) {
            return Err(NavigatorError::Network(format!("no such page: {}", url)));
        }
        *self.current.lock() = Some(url.to_string());
        Ok(())
    }

    async fn wait_for_selector(
        &self,
        _selector: &str,
        _timeout: Duration,
    ) -> Result<(), NavigatorError> {
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value, NavigatorError> {
        if script != OUTER_HTML_SCRIPT {
            return Ok(serde_json::Value::Null);
        }
        let current = self.current.lock();
        let url = current
            .as_ref()
            .ok_or_else(|| NavigatorError::Evaluation("no page loaded".to_string()))?;
        Ok(serde_json::Value::String(self.pages[url].clone()))
    }
}

/// 总是失败的会话引导
pub struct FailingSession;

#[async_trait]
impl SessionBootstrap for FailingSession {
    async fn authenticate(&self, _navigator: &dyn PageNavigator) -> Result<(), SessionError> {
        Err(SessionError::AuthFailed("invalid cookie".to_string()))
    }
}

/// 构造一张档案页
///
/// 含McGill教育经历（供目标过滤命中）和指向 `links` 的出站档案链接。
pub fn profile_page(name: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|link| format!(r#"<a href="{}">{}</a>"#, link, link))
        .collect();
    format!(
        r##"<html><body>
        <h1>{name}</h1>
        <div class="text-body-medium">Software Engineer</div>
        <span class="text-body-small">Montreal, Canada</span>
        <section><div id="education"></div>
          <ul>
            <li class="artdeco-list__item">
              <div class="t-bold"><span aria-hidden="true">McGill University</span></div>
              <span class="t-14 t-normal"><span aria-hidden="true">B.S. · Computer Science</span></span>
            </li>
          </ul>
        </section>
        {anchors}
        </body></html>"##
    )
}

/// 构造一页搜索结果
pub fn search_page(names_and_urls: &[(&str, &str)], next_enabled: Option<bool>) -> String {
    let items: String = names_and_urls
        .iter()
        .map(|(name, url)| {
            format!(
                r##"<li class="reusable-search__result-container">
                    <span class="entity-result__title-text">
                      <a href="{url}"><span aria-hidden="true">{name}</span></a>
                    </span>
                    <div class="entity-result__primary-subtitle">Engineer at Acme</div>
                    <div class="entity-result__secondary-subtitle">Montreal, Canada</div>
                </li>"##
            )
        })
        .collect();
    let button = match next_enabled {
        Some(true) => r#"<button class="artdeco-pagination__button--next">Next</button>"#,
        Some(false) => {
            r#"<button class="artdeco-pagination__button--next" disabled>Next</button>"#
        }
        None => "",
    };
    format!("<html><body><ul>{items}</ul>{button}</body></html>")
}
