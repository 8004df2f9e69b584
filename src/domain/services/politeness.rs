// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 礼貌延迟调度
//!
//! 每次导航后提取前、以及下一次导航前各等待一次，窗口内均匀随机。
//! 固定窗口就是完整的礼貌模型：失败后不升级退避，一次运行内
//! 边界不变。工作池变体中每个工作器各自延迟。

use rand::Rng;
use std::time::Duration;
use tracing::debug;

/// 礼貌延迟器
#[derive(Debug, Clone, Copy)]
pub struct PolitenessDelay {
    min: Duration,
    max: Duration,
}

impl PolitenessDelay {
    /// 按毫秒窗口创建，`max < min` 时取 `min` 为上界
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min: Duration::from_millis(min_ms),
            max: Duration::from_millis(min_ms.max(max_ms)),
        }
    }

    /// 固定延迟（搜索分页使用单一值）
    pub fn fixed(ms: u64) -> Self {
        Self::from_millis(ms, ms)
    }

    /// 在窗口内均匀随机取一个时长
    pub fn pick(&self) -> Duration {
        if self.min >= self.max {
            return self.min;
        }
        let mut rng = rand::rng();
        let millis = rng.random_range(self.min.as_millis() as u64..=self.max.as_millis() as u64);
        Duration::from_millis(millis)
    }

    /// 挂起调用方一个随机时长
    pub async fn wait(&self) {
        let duration = self.pick();
        debug!("Politeness delay: {} ms", duration.as_millis());
        tokio::time::sleep(duration).await;
    }
}
