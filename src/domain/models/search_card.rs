// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 搜索结果卡片
///
/// 只有身份字段，没有档案分区；是否与存储去重由调用方决定。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultCard {
    /// 姓名
    pub name: String,
    /// 头衔
    pub headline: String,
    /// 所在地
    pub location: String,
    /// 头像URL
    pub picture_url: String,
    /// 档案URL（已规范化）
    pub profile_url: String,
}

impl SearchResultCard {
    /// 用于目标过滤的候选字符串
    pub fn filter_strings(&self) -> Vec<String> {
        vec![self.headline.clone(), self.location.clone()]
    }
}
