// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::navigator::{NavigatorError, PageNavigator};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// 会话引导错误
#[derive(Error, Debug)]
pub enum SessionError {
    /// 缺少凭据，启动前即失败
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// 登录未生效
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// 导航层错误
    #[error(transparent)]
    Navigator(#[from] NavigatorError),
}

/// 会话引导特质
///
/// 目标站点的登录属于外部协作者，核心只依赖这个窄接口；
/// 引导失败会在遍历开始前中止整次运行。
#[async_trait]
pub trait SessionBootstrap: Send + Sync {
    async fn authenticate(&self, navigator: &dyn PageNavigator) -> Result<(), SessionError>;
}

/// 基于会话Cookie的引导
///
/// 把既有会话Cookie写入浏览器上下文，然后访问首页并等待
/// 已登录标记出现来验证会话有效。
pub struct CookieSession {
    base_url: String,
    cookie_name: String,
    cookie_value: String,
    verify_selector: String,
}

impl CookieSession {
    pub fn new(base_url: &str, cookie_name: &str, cookie_value: &str, verify_selector: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            cookie_name: cookie_name.to_string(),
            cookie_value: cookie_value.to_string(),
            verify_selector: verify_selector.to_string(),
        }
    }
}

#[async_trait]
impl SessionBootstrap for CookieSession {
    async fn authenticate(&self, navigator: &dyn PageNavigator) -> Result<(), SessionError> {
        if self.cookie_value.is_empty() {
            return Err(SessionError::MissingCredentials(
                "session cookie is empty".to_string(),
            ));
        }

        navigator.goto(&self.base_url).await?;
        let script = format!(
            "document.cookie = '{}={}; path=/; secure'",
            self.cookie_name, self.cookie_value
        );
        navigator.evaluate(&script).await?;

        // 带着Cookie重新加载并确认已登录标记
        navigator.goto(&self.base_url).await?;
        navigator
            .wait_for_selector(&self.verify_selector, Duration::from_secs(15))
            .await
            .map_err(|e| SessionError::AuthFailed(format!("login marker not found: {}", e)))?;

        info!("Session bootstrap succeeded");
        Ok(())
    }
}

/// 免登录引导，用于测试与已认证的远程浏览器
pub struct NoopSession;

#[async_trait]
impl SessionBootstrap for NoopSession {
    async fn authenticate(&self, _navigator: &dyn PageNavigator) -> Result<(), SessionError> {
        Ok(())
    }
}
