// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use super::{session_token, UseCaseError};
use crate::domain::models::principal::{Principal, Role};
use crate::domain::repositories::auth_repository::AuthRepository;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::repositories::{Page, RepositoryError};
use crate::domain::services::session_guard::SessionGuard;

/// 管理员用户管理
///
/// 每个操作都重新确认调用者是活跃的管理员；管理员不能停用、降级或删除自己。
pub struct UserAdminUseCase {
    auth: Arc<dyn AuthRepository>,
    users: Arc<dyn UserRepository>,
}

impl UserAdminUseCase {
    pub fn new(auth: Arc<dyn AuthRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { auth, users }
    }

    pub async fn list_users(
        &self,
        session: &SessionGuard,
        page: Page,
    ) -> Result<Vec<Principal>, UseCaseError> {
        let (token, _admin) = self.authorize(session).await?;
        Ok(session.observe(self.users.list(&token, page).await).await?)
    }

    pub async fn get_user(&self, session: &SessionGuard, id: Uuid) -> Result<Principal, UseCaseError> {
        let (token, _admin) = self.authorize(session).await?;
        session
            .observe(self.users.find_by_id(&token, id).await)
            .await?
            .ok_or_else(|| user_not_found(id))
    }

    pub async fn set_active(
        &self,
        session: &SessionGuard,
        id: Uuid,
        is_active: bool,
    ) -> Result<Principal, UseCaseError> {
        let (token, admin) = self.authorize(session).await?;
        if admin.id == id && !is_active {
            return Err(UseCaseError::Forbidden(
                "Administrators cannot deactivate their own account".to_string(),
            ));
        }

        let result = self.users.update_status(&token, id, is_active).await;
        let user = session.observe(result).await.map_err(|e| not_found_as(e, id))?;
        info!(user_id = %id, is_active, admin = admin.display_name(), "User status updated");
        Ok(user)
    }

    pub async fn set_role(
        &self,
        session: &SessionGuard,
        id: Uuid,
        role: Role,
    ) -> Result<Principal, UseCaseError> {
        let (token, admin) = self.authorize(session).await?;
        if admin.id == id && role != Role::Admin {
            return Err(UseCaseError::Forbidden(
                "Administrators cannot remove their own admin role".to_string(),
            ));
        }

        let result = self.users.update_role(&token, id, role).await;
        let user = session.observe(result).await.map_err(|e| not_found_as(e, id))?;
        info!(user_id = %id, %role, admin = admin.display_name(), "User role updated");
        Ok(user)
    }

    pub async fn delete_user(&self, session: &SessionGuard, id: Uuid) -> Result<(), UseCaseError> {
        let (token, admin) = self.authorize(session).await?;
        if admin.id == id {
            return Err(UseCaseError::Forbidden(
                "Administrators cannot delete their own account".to_string(),
            ));
        }

        let result = self.users.delete(&token, id).await;
        session.observe(result).await.map_err(|e| not_found_as(e, id))?;
        info!(user_id = %id, admin = admin.display_name(), "User deleted");
        Ok(())
    }

    async fn authorize(&self, session: &SessionGuard) -> Result<(String, Principal), UseCaseError> {
        let principal = session
            .current_principal(self.auth.as_ref())
            .await?
            .ok_or(UseCaseError::Unauthenticated)?;

        if !principal.has_role(Role::Admin) {
            warn!(user = principal.display_name(), "Non-admin attempted user administration");
            return Err(UseCaseError::Forbidden(
                "Administrator role required".to_string(),
            ));
        }

        Ok((session_token(session)?, principal))
    }
}

fn user_not_found(id: Uuid) -> UseCaseError {
    UseCaseError::NotFound(format!("User {}", id))
}

fn not_found_as(error: RepositoryError, id: Uuid) -> UseCaseError {
    match error {
        RepositoryError::NotFound(_) => user_not_found(id),
        other => other.into(),
    }
}
