// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// 导航器错误类型
#[derive(Error, Debug)]
pub enum NavigatorError {
    /// 导航或等待超时
    #[error("Timeout")]
    Timeout,

    /// 网络层失败
    #[error("Network error: {0}")]
    Network(String),

    /// 选择器未命中
    #[error("Selector not found: {0}")]
    NotFound(String),

    /// 页面内脚本执行失败
    #[error("Evaluation failed: {0}")]
    Evaluation(String),
}

/// 页面导航器特质
///
/// 浏览器自动化层的窄接口。核心不假设具体的选择器语法，
/// 三个调用都按可失败处理；规范化等文本处理全部在宿主侧进行，
/// 不向浏览器上下文注入辅助代码。
#[async_trait]
pub trait PageNavigator: Send + Sync {
    /// 导航到目标URL并等待加载完成
    async fn goto(&self, url: &str) -> Result<(), NavigatorError>;

    /// 等待选择器出现
    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), NavigatorError>;

    /// 在页面上下文中执行脚本并返回结果
    async fn evaluate(&self, script: &str) -> Result<serde_json::Value, NavigatorError>;
}

/// 取回整页HTML的脚本
pub const OUTER_HTML_SCRIPT: &str = "document.documentElement.outerHTML";

/// 从导航器取回当前页面的HTML
///
/// 返回的字符串交给宿主侧的提取层解析。
pub async fn page_html(navigator: &dyn PageNavigator) -> Result<String, NavigatorError> {
    let value = navigator.evaluate(OUTER_HTML_SCRIPT).await?;
    value
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| NavigatorError::Evaluation("outerHTML did not return a string".to_string()))
}
