// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::navigator::{NavigatorError, PageNavigator};
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::OnceCell;

// Global browser instance to avoid re-launching Chrome on every session.
static BROWSER_INSTANCE: OnceCell<Browser> = OnceCell::const_new();

// Asynchronously gets or initializes the shared browser instance.
// This function ensures that the browser is launched only once.
pub async fn get_browser() -> Result<&'static Browser, NavigatorError> {
    BROWSER_INSTANCE
        .get_or_try_init(|| async {
            let remote_debugging_url = std::env::var("CHROMIUM_REMOTE_DEBUGGING_URL").ok();

            let (browser, mut handler) = if let Some(ref url) = remote_debugging_url {
                tracing::info!("Connecting to remote Chrome instance at: {}", url);
                Browser::connect(url)
                    .await
                    .map_err(|e| NavigatorError::Network(format!("Failed to connect to remote Chrome: {}", e)))?
            } else {
                let mut builder = BrowserConfig::builder()
                    .no_sandbox()
                    .request_timeout(Duration::from_secs(30));

                builder = builder.arg("--disable-gpu").arg("--disable-dev-shm-usage");

                Browser::launch(
                    builder
                        .build()
                        .map_err(|e| NavigatorError::Network(e.to_string()))?,
                )
                .await
                .map_err(|e| NavigatorError::Network(e.to_string()))?
            };

            // Spawn a handler to process browser events
            tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            Ok(browser)
        })
        .await
}

/// Chromium导航器
///
/// 每个导航器持有一个页面，复用进程级共享的浏览器实例；
/// 工作池变体为每个工作器创建一个独立的导航器会话。
pub struct ChromiumNavigator {
    page: Page,
    navigation_timeout: Duration,
}

impl ChromiumNavigator {
    /// 在共享浏览器上打开一个新会话
    pub async fn new_session(navigation_timeout: Duration) -> Result<Self, NavigatorError> {
        let browser = get_browser().await?;
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| NavigatorError::Network(format!("Failed to create new page: {}", e)))?;
        Ok(Self {
            page,
            navigation_timeout,
        })
    }

    /// 关闭会话页面
    pub async fn close(&self) {
        self.page.clone().close().await.ok();
    }
}

#[async_trait]
impl PageNavigator for ChromiumNavigator {
    async fn goto(&self, url: &str) -> Result<(), NavigatorError> {
        // goto waits for the load event by default
        tokio::time::timeout(self.navigation_timeout, async {
            self.page
                .goto(url)
                .await
                .map_err(|e| NavigatorError::Network(e.to_string()))?;
            self.page.wait_for_navigation().await.ok();
            Ok(())
        })
        .await
        .map_err(|_| NavigatorError::Timeout)?
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), NavigatorError> {
        // chromiumoxide没有原生的waitForSelector，轮询find_element
        let poll = Duration::from_millis(200);
        tokio::time::timeout(timeout, async {
            loop {
                if self.page.find_element(selector).await.is_ok() {
                    return Ok(());
                }
                tokio::time::sleep(poll).await;
            }
        })
        .await
        .map_err(|_| NavigatorError::NotFound(selector.to_string()))?
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value, NavigatorError> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| NavigatorError::Evaluation(e.to_string()))?;
        Ok(result.into_value().unwrap_or(serde_json::Value::Null))
    }
}
