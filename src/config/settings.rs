// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::BTreeMap;

/// 应用程序配置设置
///
/// 包含目标站点、浏览器与数据库等环境配置；一次运行的爬取/搜索
/// 参数由CLI提供（见 [`CrawlConfig`] 与 [`SearchConfig`]）。
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 目标站点配置
    pub site: SiteSettings,
    /// 浏览器配置
    pub browser: BrowserSettings,
    /// 数据库配置
    pub database: DatabaseSettings,
}

/// 目标站点配置设置
#[derive(Debug, Deserialize)]
pub struct SiteSettings {
    /// 站点基础URL
    pub base_url: String,
    /// 人员搜索基础路径
    pub search_path: String,
    /// 会话Cookie名
    pub session_cookie_name: String,
}

/// 浏览器配置设置
#[derive(Debug, Deserialize)]
pub struct BrowserSettings {
    /// 单次导航超时（秒）
    pub navigation_timeout: u64,
}

/// 数据库配置设置
#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite连接URL
    pub url: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("site.base_url", "https://www.linkedin.com")?
            .set_default("site.search_path", "/search/results/people/")?
            .set_default("site.session_cookie_name", "li_at")?
            .set_default("browser.navigation_timeout", 30)?
            .set_default("database.url", "sqlite://linkrs.db?mode=rwc")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("LINKRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}

/// 一次档案爬取运行的参数
///
/// 构造编排器时提供，整次运行内不可变。
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// 种子档案URL
    pub seed_url: String,
    /// 抓取页面数上限
    pub max_profiles: u32,
    /// BFS深度上限，0表示只访问种子
    pub max_depth: u32,
    /// 礼貌延迟窗口下界（毫秒）
    pub delay_min_ms: u64,
    /// 礼貌延迟窗口上界（毫秒）
    pub delay_max_ms: u64,
    /// 目标归属列表，保存闸门只放行命中的记录
    pub target_affiliations: Vec<String>,
}

/// 一次搜索运行的参数
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// 过滤器键值对，空值的键不参与URL构造
    pub filters: BTreeMap<String, String>,
    /// 翻页上限
    pub max_pages: u32,
    /// 页间固定延迟（毫秒）
    pub delay_ms: u64,
    /// 目标归属列表，空表示全部放行
    pub target_affiliations: Vec<String>,
}
