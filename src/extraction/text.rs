// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 文本规范化模块
//!
//! 档案页面为无障碍访问渲染了视觉上隐藏的重复文本，抓取到的字符串
//! 经常呈现 `S + S` 的镜像形态。本模块提供镜像折叠、分隔字段拆分和
//! 日期范围解析等纯函数，所有叶子文本在进一步解析前都要先经过
//! [`clean_text`]。

/// 组合字段的分隔符（"Acme · Full-time" 中的间隔点）
const FIELD_SEPARATOR: char = '·';

/// 折叠镜像重复文本
///
/// 取修剪后字符串的中点，前半等于后半时返回前半，否则原样返回。
/// 幂等：`collapse_mirror(collapse_mirror(s)) == collapse_mirror(s)`。
pub fn collapse_mirror(raw: &str) -> String {
    let trimmed = raw.trim();
    let mid = trimmed.len() / 2;
    if mid > 0 && trimmed.len() % 2 == 0 && trimmed.is_char_boundary(mid) {
        let (first, second) = trimmed.split_at(mid);
        if first == second {
            return first.trim().to_string();
        }
    }
    trimmed.to_string()
}

/// 将内部空白压缩为单个空格
fn squash_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 叶子文本清理入口：压缩空白后折叠镜像重复
pub fn clean_text(raw: &str) -> String {
    collapse_mirror(&squash_whitespace(raw))
}

/// 按间隔点拆分组合字段
///
/// "Acme · Full-time" 拆为 `("Acme", "Full-time")`；
/// 分隔符缺失时第二个字段为空字符串。
pub fn split_delimited(raw: &str) -> (String, String) {
    let cleaned = clean_text(raw);
    match cleaned.split_once(FIELD_SEPARATOR) {
        Some((first, second)) => (first.trim().to_string(), second.trim().to_string()),
        None => (cleaned.trim().to_string(), String::new()),
    }
}

/// 解析后的日期范围
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    /// 起始日期（如 "Jan 2020"）
    pub start: String,
    /// 结束日期（如 "Present"），缺失时为空
    pub end: String,
    /// 时长标注（如 "2 yrs 3 mos"），缺失时为空
    pub duration: String,
}

/// 解析日期范围字符串
///
/// "Jan 2020 - Present · 2 yrs" 先按间隔点分离时长标注，
/// 再按两侧带空格的连字符/短横线拆出起止日期；
/// 没有连字符时整段文本作为起始日期。
pub fn parse_date_range(raw: &str) -> DateRange {
    let (range_part, duration) = split_delimited(raw);

    for dash in [" - ", " – ", " — "] {
        if let Some((start, end)) = range_part.split_once(dash) {
            return DateRange {
                start: start.trim().to_string(),
                end: end.trim().to_string(),
                duration,
            };
        }
    }

    DateRange {
        start: range_part,
        end: String::new(),
        duration,
    }
}
