// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 内存档案仓库实现
pub mod memory_profile_repo;

/// SQLite档案仓库实现
pub mod sqlite_profile_repo;
