// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::profile::ProfileRecord;
use crate::domain::repositories::profile_repository::{PersistenceError, ProfileRepository};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use sqlx::sqlite::SqlitePool;
use uuid::Uuid;

/// SQLite档案仓库
///
/// `canonical_url` 上的唯一约束保证并发工作器经不同路径发现同一
/// 档案时只有一次插入成功，后到者得到 `Conflict`。
pub struct SqliteProfileRepository {
    pool: SqlitePool,
}

impl SqliteProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for SqliteProfileRepository {
    async fn exists(&self, canonical_url: &str) -> Result<bool, PersistenceError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(1) FROM profiles WHERE canonical_url = ?")
                .bind(canonical_url)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| PersistenceError::Transient(e.to_string()))?;
        Ok(count > 0)
    }

    async fn save(&self, record: &ProfileRecord) -> Result<Uuid, PersistenceError> {
        let id = Uuid::new_v4();
        let sections = json!({
            "experiences": record.experiences,
            "educations": record.educations,
            "projects": record.projects,
            "honors": record.honors,
            "recommendations": record.recommendations,
        });

        sqlx::query(
            "INSERT INTO profiles (id, canonical_url, name, headline, location, picture_url, sections, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(&record.canonical_url)
        .bind(&record.name)
        .bind(&record.headline)
        .bind(&record.location)
        .bind(&record.picture_url)
        .bind(sections.to_string())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                PersistenceError::Conflict(record.canonical_url.clone())
            }
            _ => PersistenceError::Transient(e.to_string()),
        })?;

        Ok(id)
    }
}
