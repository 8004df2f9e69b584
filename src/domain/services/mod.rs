// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 档案爬取编排服务
pub mod crawl_service;

/// 礼貌延迟调度
pub mod politeness;

/// 搜索编排服务
pub mod search_service;

/// 目标归属过滤
pub mod target_filter;
