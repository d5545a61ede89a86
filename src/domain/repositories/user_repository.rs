// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::{Page, RepositoryError};
use crate::domain::models::principal::{PreferencesUpdate, Principal, Role, UserPreferences};
use async_trait::async_trait;
use uuid::Uuid;

/// 用户仓库特质
///
/// 用户与偏好的读取在远端返回 404 时视为"不存在"而非错误，返回 `Ok(None)`。
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self, token: &str, page: Page) -> Result<Vec<Principal>, RepositoryError>;

    async fn find_by_id(&self, token: &str, id: Uuid)
        -> Result<Option<Principal>, RepositoryError>;

    async fn update_status(
        &self,
        token: &str,
        id: Uuid,
        is_active: bool,
    ) -> Result<Principal, RepositoryError>;

    async fn update_role(
        &self,
        token: &str,
        id: Uuid,
        role: Role,
    ) -> Result<Principal, RepositoryError>;

    async fn delete(&self, token: &str, id: Uuid) -> Result<(), RepositoryError>;

    /// 修改密码，返回远端给出的提示消息
    async fn change_password(
        &self,
        token: &str,
        id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<String, RepositoryError>;

    async fn find_preferences(
        &self,
        token: &str,
        user_id: Uuid,
    ) -> Result<Option<UserPreferences>, RepositoryError>;

    async fn update_preferences(
        &self,
        token: &str,
        user_id: Uuid,
        update: &PreferencesUpdate,
    ) -> Result<UserPreferences, RepositoryError>;
}
