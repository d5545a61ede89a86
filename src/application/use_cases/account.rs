// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tracing::info;
use validator::Validate;

use super::{session_token, UseCaseError};
use crate::application::dto::account_request::{ChangePasswordDto, UpdatePreferencesDto};
use crate::application::dto::auth_request::{LoginRequestDto, RegisterRequestDto};
use crate::domain::models::principal::{Principal, UserPreferences};
use crate::domain::repositories::auth_repository::AuthRepository;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::repositories::RepositoryError;
use crate::domain::services::session_guard::SessionGuard;

/// 当前用户的账户用例：登录、注册、登出、密码和偏好设置
pub struct AccountUseCase {
    auth: Arc<dyn AuthRepository>,
    users: Arc<dyn UserRepository>,
}

impl AccountUseCase {
    pub fn new(auth: Arc<dyn AuthRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { auth, users }
    }

    /// 登录并在会话中建立令牌，随后解析当前身份
    ///
    /// 凭据被拒绝时会话保持未认证。
    pub async fn login(
        &self,
        session: &SessionGuard,
        dto: LoginRequestDto,
    ) -> Result<Principal, UseCaseError> {
        dto.validate()
            .map_err(|e| UseCaseError::ValidationError(e.to_string()))?;

        let token = self.auth.login(&dto.email, &dto.password).await?;
        session.establish(token.access_token).await;

        let principal = session
            .current_principal(self.auth.as_ref())
            .await?
            .ok_or(UseCaseError::Unauthenticated)?;
        info!(user = principal.display_name(), role = %principal.role, "User logged in");
        Ok(principal)
    }

    pub async fn register(&self, dto: RegisterRequestDto) -> Result<Principal, UseCaseError> {
        dto.validate()
            .map_err(|e| UseCaseError::ValidationError(e.to_string()))?;

        let principal = self.auth.register(&dto.into()).await?;
        info!(user_id = %principal.id, "User registered");
        Ok(principal)
    }

    pub async fn logout(&self, session: &SessionGuard) {
        session.logout().await;
    }

    /// 当前身份，未认证时为 `None`
    pub async fn current(&self, session: &SessionGuard) -> Result<Option<Principal>, UseCaseError> {
        Ok(session.current_principal(self.auth.as_ref()).await?)
    }

    /// 当前身份，未认证时返回错误
    pub async fn me(&self, session: &SessionGuard) -> Result<Principal, UseCaseError> {
        self.current(session)
            .await?
            .ok_or(UseCaseError::Unauthenticated)
    }

    pub async fn change_password(
        &self,
        session: &SessionGuard,
        dto: ChangePasswordDto,
    ) -> Result<String, UseCaseError> {
        dto.validate()
            .map_err(|e| UseCaseError::ValidationError(e.to_string()))?;
        let principal = self.me(session).await?;
        let token = session_token(session)?;

        let message = session
            .observe(
                self.users
                    .change_password(&token, principal.id, &dto.current_password, &dto.new_password)
                    .await,
            )
            .await?;
        info!(user_id = %principal.id, "Password changed");
        Ok(message)
    }

    /// 当前用户的偏好设置，远端没有记录时返回默认值
    pub async fn preferences(&self, session: &SessionGuard) -> Result<UserPreferences, UseCaseError> {
        let principal = self.me(session).await?;
        let token = session_token(session)?;

        let preferences = session
            .observe(self.users.find_preferences(&token, principal.id).await)
            .await?;
        Ok(preferences.unwrap_or_else(|| UserPreferences::defaults_for(principal.id)))
    }

    pub async fn update_preferences(
        &self,
        session: &SessionGuard,
        dto: UpdatePreferencesDto,
    ) -> Result<UserPreferences, UseCaseError> {
        dto.validate()
            .map_err(|e| UseCaseError::ValidationError(e.to_string()))?;
        let principal = self.me(session).await?;
        let token = session_token(session)?;

        let result = self
            .users
            .update_preferences(&token, principal.id, &dto.into())
            .await;
        match session.observe(result).await {
            Ok(preferences) => Ok(preferences),
            Err(RepositoryError::NotFound(_)) => {
                Err(UseCaseError::NotFound(format!("User {}", principal.id)))
            }
            Err(e) => Err(e.into()),
        }
    }
}
