// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 通过远端 BreachWatch API 实现领域层定义的仓库接口
pub mod auth_repo_impl;
pub mod crawl_job_repo_impl;
pub mod user_repo_impl;
