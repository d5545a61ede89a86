// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 远端 BreachWatch API 客户端
///
/// 对 reqwest 的薄封装：拼接基础地址、附加 Bearer 令牌，
/// 并把传输和状态码错误统一转换为 [`RepositoryError`](crate::domain::repositories::RepositoryError)。
pub mod http_client;

pub use http_client::ApiClient;
