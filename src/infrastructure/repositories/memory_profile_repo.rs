// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::profile::ProfileRecord;
use crate::domain::repositories::profile_repository::{PersistenceError, ProfileRepository};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use uuid::Uuid;

/// 内存档案仓库
///
/// 测试与演练运行使用；语义与SQLite实现一致，重复保存返回冲突。
#[derive(Default)]
pub struct MemoryProfileRepository {
    records: Mutex<HashMap<String, (Uuid, ProfileRecord)>>,
}

impl MemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置一条记录（模拟既有存量）
    pub fn seed(&self, record: ProfileRecord) {
        self.records
            .lock()
            .insert(record.canonical_url.clone(), (Uuid::new_v4(), record));
    }

    /// 当前保存的记录数
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// 按规范化URL取一条记录
    pub fn get(&self, canonical_url: &str) -> Option<ProfileRecord> {
        self.records
            .lock()
            .get(canonical_url)
            .map(|(_, record)| record.clone())
    }
}

#[async_trait]
impl ProfileRepository for MemoryProfileRepository {
    async fn exists(&self, canonical_url: &str) -> Result<bool, PersistenceError> {
        Ok(self.records.lock().contains_key(canonical_url))
    }

    async fn save(&self, record: &ProfileRecord) -> Result<Uuid, PersistenceError> {
        let mut records = self.records.lock();
        if records.contains_key(&record.canonical_url) {
            return Err(PersistenceError::Conflict(record.canonical_url.clone()));
        }
        let id = Uuid::new_v4();
        records.insert(record.canonical_url.clone(), (id, record.clone()));
        Ok(id)
    }
}
