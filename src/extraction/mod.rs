// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 提取规则集
//!
//! 纯函数：输入一张已渲染页面的HTML，输出类型化记录。爬取与搜索
//! 两条控制流共用同一套规则，避免两份近似提取管线各自漂移。
//! 规范化（镜像折叠、组合字段拆分、日期解析）全部在宿主侧进行，
//! 不向浏览器上下文注入任何辅助代码。

/// 档案链接发现
pub mod links;

/// 档案页面提取
pub mod profile;

/// 搜索结果页提取
pub mod search;

/// CSS选择器常量
pub mod selectors;

/// 文本规范化
pub mod text;
