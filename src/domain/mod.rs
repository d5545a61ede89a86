// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含控制台的核心业务逻辑，包括：
/// - 领域模型（models）：原始输入、任务配置、调度与任务状态机
/// - 仓库接口（repositories）：远端服务与客户端存储的抽象接口
/// - 服务（services）：规范化、调度构建、翻译、生命周期守卫与准入
///
/// 领域层不依赖于任何传输或存储实现。
pub mod models;
pub mod repositories;
pub mod services;
