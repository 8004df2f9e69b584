// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 目标归属过滤
//!
//! 单一的纯谓词：任一目标串（小写）是任一候选归属串（小写）的
//! 子串即命中。空目标列表在谓词层面是"不命中"；搜索编排把空目标
//! 显式解释为"全部命中"，爬取侧的保存闸门直接使用谓词本身，
//! 两种约定由调用方选择。

/// 候选归属是否命中目标列表
///
/// 大小写不敏感的子串匹配。
pub fn matches(candidates: &[String], targets: &[String]) -> bool {
    targets.iter().any(|target| {
        let target = target.to_lowercase();
        !target.is_empty()
            && candidates
                .iter()
                .any(|candidate| candidate.to_lowercase().contains(&target))
    })
}
