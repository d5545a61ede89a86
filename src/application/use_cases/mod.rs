// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 用例模块
///
/// 包含控制台的所有业务用例实现，每个用例代表一个完整的业务流程：
/// - 任务控制台（job_console）：预览、创建、查询和受守卫的任务操作
/// - 账户（account）：登录、注册、当前用户的密码与偏好设置
/// - 用户管理（user_admin）：管理员对用户状态、角色的管理
pub mod account;
pub mod job_console;
pub mod user_admin;

#[cfg(test)]
pub(crate) mod test_fakes;

use thiserror::Error;

use crate::domain::models::crawl_job::DomainError;
use crate::domain::repositories::RepositoryError;
use crate::domain::services::session_guard::SessionGuard;

#[derive(Error, Debug)]
pub enum UseCaseError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("{0} not found")]
    NotFound(String),
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

/// 取出会话令牌，没有令牌时视为未认证
pub(crate) fn session_token(session: &SessionGuard) -> Result<String, UseCaseError> {
    session.token().ok_or(UseCaseError::Unauthenticated)
}
