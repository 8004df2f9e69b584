// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 集成测试主模块
///
/// 用脚本化的导航器与内存仓库驱动两条编排流程的端到端场景
mod helpers;

mod crawl_flow_test;
mod search_flow_test;
