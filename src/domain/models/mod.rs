// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 档案记录模型
pub mod profile;

/// 搜索结果卡片模型
pub mod search_card;
