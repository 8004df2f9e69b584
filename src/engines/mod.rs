// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基于chromiumoxide的导航器实现
pub mod chromium;

/// 页面导航器特质
pub mod navigator;

/// 会话引导
pub mod session;
