// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::profile::ProfileRecord;
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// 持久化错误类型
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// 记录已存在（规范化URL唯一约束冲突）
    #[error("Record already exists: {0}")]
    Conflict(String),

    /// 暂时性存储错误，调用方记录后继续遍历
    #[error("Transient storage error: {0}")]
    Transient(String),
}

/// 档案仓库特质
///
/// 核心只通过这道窄接口访问存储：`exists` 后 `save`，
/// 并发发现同一档案时由存储侧唯一约束兜底。
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// 按规范化URL查重
    async fn exists(&self, canonical_url: &str) -> Result<bool, PersistenceError>;

    /// 保存档案记录，返回记录ID
    async fn save(&self, record: &ProfileRecord) -> Result<Uuid, PersistenceError>;
}
