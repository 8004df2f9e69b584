// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 日志初始化模块
pub mod telemetry;

/// URL处理工具模块
pub mod url_utils;
