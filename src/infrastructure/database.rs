// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::DatabaseSettings;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::info;

/// 档案表结构
///
/// 规范化URL上的唯一约束在存储侧封死exists/save之间的竞口，
/// 分区集合按JSON整体存储。
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS profiles (
    id TEXT PRIMARY KEY,
    canonical_url TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    headline TEXT NOT NULL,
    location TEXT NOT NULL,
    picture_url TEXT NOT NULL,
    sections TEXT NOT NULL,
    created_at TEXT NOT NULL
)
"#;

/// 创建SQLite连接池并确保表结构存在
pub async fn create_pool(settings: &DatabaseSettings) -> anyhow::Result<SqlitePool> {
    // 内存库按连接隔离，多连接会各见各的空库
    let max_connections = if settings.url.contains(":memory:") { 1 } else { 5 };
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(&settings.url)
        .await?;
    sqlx::query(SCHEMA).execute(&pool).await?;
    info!("Database ready at {}", settings.url);
    Ok(pool)
}
