// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::principal::{AccessToken, Principal, Registration};
use async_trait::async_trait;

/// 认证仓库特质
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// 使用邮箱和密码换取令牌
    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, RepositoryError>;

    /// 注册新用户
    async fn register(&self, registration: &Registration) -> Result<Principal, RepositoryError>;

    /// 根据令牌解析当前身份
    ///
    /// 令牌无效时返回 [`RepositoryError::Unauthenticated`]。
    async fn fetch_principal(&self, token: &str) -> Result<Principal, RepositoryError>;
}
