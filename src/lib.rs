// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务实体、服务和仓库接口
pub mod domain;

/// 引擎模块
///
/// 浏览器自动化导航器与会话引导
pub mod engines;

/// 提取模块
///
/// 将渲染后的页面转换为结构化档案记录
pub mod extraction;

/// 基础设施模块
///
/// 提供外部服务集成，如数据库与持久化仓库
pub mod infrastructure;

/// 队列模块
///
/// BFS 边界队列与访问去重
pub mod queue;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
