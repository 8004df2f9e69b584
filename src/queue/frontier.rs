// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! BFS边界队列
//!
//! 严格FIFO的待访问队列加上两个哈希集合：queued防止同一档案被多条
//! 发现路径重复入队，visited保证一次运行内任何URL只被出队一次。
//! 集合只在一次爬取运行内有效，运行结束即丢弃。

use crate::utils::url_utils::canonicalize_profile_url;
use parking_lot::Mutex;
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// 边界队列条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// 规范化后的档案URL
    pub url: String,
    /// 距种子的深度，种子为0
    pub depth: u32,
}

/// BFS边界控制器
#[derive(Debug, Default)]
pub struct FrontierController {
    queue: VecDeque<FrontierEntry>,
    queued: HashSet<String>,
    visited: HashSet<String>,
}

impl FrontierController {
    pub fn new() -> Self {
        Self::default()
    }

    /// 尝试入队一个发现的URL
    ///
    /// URL先规范化（去查询参数/锚点）；已在queued或visited中的URL
    /// 被忽略。返回是否实际入队。
    pub fn offer(&mut self, url: &str, depth: u32) -> bool {
        let Some(canonical) = canonicalize_profile_url(url) else {
            return false;
        };
        if self.queued.contains(&canonical) || self.visited.contains(&canonical) {
            return false;
        }
        self.queued.insert(canonical.clone());
        self.queue.push_back(FrontierEntry {
            url: canonical,
            depth,
        });
        true
    }

    /// 是否还有待访问条目
    pub fn has_next(&self) -> bool {
        !self.queue.is_empty()
    }

    /// FIFO出队下一个条目，URL从queued移入visited
    pub fn next(&mut self) -> Option<FrontierEntry> {
        let entry = self.queue.pop_front()?;
        self.queued.remove(&entry.url);
        self.visited.insert(entry.url.clone());
        Some(entry)
    }

    /// 遍历是否应当结束
    ///
    /// 队列为空，或已抓取页面数达到上限。
    pub fn is_exhausted(&self, visited_count: u32, max_profiles: u32) -> bool {
        self.queue.is_empty() || visited_count >= max_profiles
    }

    /// 已出队URL数量
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// 队列中等待的条目数量
    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }
}

/// 跨工作器共享的边界队列
///
/// 工作池变体中多个浏览器会话共用一个边界，offer/next在同一把锁下
/// 执行，深度与去重不变式对所有工作器成立。
#[derive(Clone, Default)]
pub struct SharedFrontier {
    inner: Arc<Mutex<FrontierController>>,
}

impl SharedFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offer(&self, url: &str, depth: u32) -> bool {
        self.inner.lock().offer(url, depth)
    }

    pub fn next(&self) -> Option<FrontierEntry> {
        self.inner.lock().next()
    }

    /// 出队并在同一把锁下递增在途计数
    ///
    /// 弹出与计数递增原子完成：别的工作器看到队列为空时，本次弹出
    /// 的条目必定已计入 `in_flight`，不会被误判为全部收尾。
    pub fn next_tracked(&self, in_flight: &AtomicU32) -> Option<FrontierEntry> {
        let mut inner = self.inner.lock();
        let entry = inner.next();
        if entry.is_some() {
            in_flight.fetch_add(1, Ordering::SeqCst);
        }
        entry
    }

    pub fn is_exhausted(&self, visited_count: u32, max_profiles: u32) -> bool {
        self.inner.lock().is_exhausted(visited_count, max_profiles)
    }

    pub fn visited_len(&self) -> usize {
        self.inner.lock().visited_len()
    }

    pub fn pending_len(&self) -> usize {
        self.inner.lock().pending_len()
    }
}
