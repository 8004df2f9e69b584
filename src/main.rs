// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use clap::{Parser, Subcommand};
use linkrs::config::settings::{CrawlConfig, SearchConfig, Settings};
use linkrs::domain::services::crawl_service::ProfileCrawler;
use linkrs::domain::services::search_service::PeopleSearch;
use linkrs::engines::chromium::ChromiumNavigator;
use linkrs::engines::navigator::PageNavigator;
use linkrs::engines::session::{CookieSession, SessionBootstrap};
use linkrs::extraction::selectors;
use linkrs::infrastructure::database;
use linkrs::infrastructure::repositories::sqlite_profile_repo::SqliteProfileRepository;
use linkrs::utils::telemetry;
use std::collections::BTreeMap;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// 档案图BFS爬取与人员搜索
#[derive(Parser)]
#[command(name = "linkrs", version, about = "Profile graph crawler and people search")]
struct Cli {
    /// 会话Cookie值（也可用 LINKRS_SESSION_COOKIE 环境变量）
    #[arg(long, global = true)]
    session_cookie: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 从种子档案开始BFS爬取
    Crawl {
        /// 种子档案URL
        seed_url: String,
        /// 抓取页面数上限
        #[arg(long, default_value_t = 50)]
        max_profiles: u32,
        /// BFS深度上限（0只访问种子）
        #[arg(long, default_value_t = 2)]
        max_depth: u32,
        /// 礼貌延迟下界（毫秒）
        #[arg(long, default_value_t = 2_000)]
        delay_min_ms: u64,
        /// 礼貌延迟上界（毫秒）
        #[arg(long, default_value_t = 6_000)]
        delay_max_ms: u64,
        /// 目标归属（可多次指定），只保存命中的档案
        #[arg(long = "target")]
        targets: Vec<String>,
        /// 浏览器会话数（>1启用工作池变体）
        #[arg(long, default_value_t = 1)]
        workers: usize,
    },

    /// 过滤式人员搜索并跟随分页
    Search {
        /// 过滤器键值对，形如 key=value（可多次指定）
        #[arg(long = "filter", value_parser = parse_key_val)]
        filters: Vec<(String, String)>,
        /// 翻页上限
        #[arg(long, default_value_t = 5)]
        max_pages: u32,
        /// 页间延迟（毫秒）
        #[arg(long, default_value_t = 3_000)]
        delay_ms: u64,
        /// 目标归属（可多次指定），空表示全部保留
        #[arg(long = "target")]
        targets: Vec<String>,
    },
}

/// 解析 key=value 形式的过滤器参数
fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("invalid filter '{}', expected key=value", raw))
}

/// 取会话Cookie；缺失凭据在启动前即失败
fn resolve_cookie(cli_value: Option<String>) -> anyhow::Result<String> {
    cli_value
        .or_else(|| std::env::var("LINKRS_SESSION_COOKIE").ok())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "missing session cookie: pass --session-cookie or set LINKRS_SESSION_COOKIE"
            )
        })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_telemetry();
    info!("Starting linkrs...");

    let cli = Cli::parse();
    let settings = Settings::new()?;
    let cookie = resolve_cookie(cli.session_cookie)?;
    let session = CookieSession::new(
        &settings.site.base_url,
        &settings.site.session_cookie_name,
        &cookie,
        selectors::LOGGED_IN_MARKER,
    );
    let navigation_timeout = Duration::from_secs(settings.browser.navigation_timeout);

    match cli.command {
        Commands::Crawl {
            seed_url,
            max_profiles,
            max_depth,
            delay_min_ms,
            delay_max_ms,
            targets,
            workers,
        } => {
            let pool = database::create_pool(&settings.database).await?;
            let repo = Arc::new(SqliteProfileRepository::new(pool));
            let config = CrawlConfig {
                seed_url,
                max_profiles,
                max_depth,
                delay_min_ms,
                delay_max_ms,
                target_affiliations: targets,
            };
            let crawler = ProfileCrawler::new(config, repo);

            // Ctrl-C 触发取消，转入Draining后正常收尾
            let stop = crawler.stop_handle();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupt received, draining crawl");
                    stop.store(true, Ordering::SeqCst);
                }
            });

            if workers <= 1 {
                let navigator = ChromiumNavigator::new_session(navigation_timeout).await?;
                crawler.run(&navigator, &session).await?;
                navigator.close().await;
            } else {
                let mut sessions: Vec<Arc<ChromiumNavigator>> = Vec::with_capacity(workers);
                for _ in 0..workers {
                    sessions
                        .push(Arc::new(ChromiumNavigator::new_session(navigation_timeout).await?));
                }
                let navigators: Vec<Arc<dyn PageNavigator>> = sessions
                    .iter()
                    .map(|s| s.clone() as Arc<dyn PageNavigator>)
                    .collect();
                crawler.run_pool(&navigators, &session).await?;
                for worker_session in &sessions {
                    worker_session.close().await;
                }
            }
        }

        Commands::Search {
            filters,
            max_pages,
            delay_ms,
            targets,
        } => {
            let navigator = ChromiumNavigator::new_session(navigation_timeout).await?;
            session.authenticate(&navigator).await?;

            let config = SearchConfig {
                filters: filters.into_iter().collect::<BTreeMap<_, _>>(),
                max_pages,
                delay_ms,
                target_affiliations: targets,
            };
            let search = PeopleSearch::new(
                config,
                &settings.site.base_url,
                &settings.site.search_path,
            );
            let outcome = search.run(&navigator).await;
            navigator.close().await;

            info!("Search done: {} cards over {} pages", outcome.cards.len(), outcome.pages);
            println!("{}", serde_json::to_string_pretty(&outcome.cards)?);
        }
    }

    Ok(())
}
