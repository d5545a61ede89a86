// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::models::principal::{PreferencesUpdate, Principal, Role, UserPreferences};
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::repositories::{Page, RepositoryError};
use crate::infrastructure::api::ApiClient;

#[derive(Deserialize)]
struct MessageResponse {
    message: String,
}

/// 基于远端 `/users` 接口的用户仓库实现
pub struct UserRepositoryImpl {
    client: ApiClient,
}

impl UserRepositoryImpl {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn list(&self, token: &str, page: Page) -> Result<Vec<Principal>, RepositoryError> {
        let request = self
            .client
            .request(Method::GET, "/users", Some(token))
            .query(&page);
        self.client.send_json(request).await
    }

    async fn find_by_id(
        &self,
        token: &str,
        id: Uuid,
    ) -> Result<Option<Principal>, RepositoryError> {
        let request = self
            .client
            .request(Method::GET, &format!("/users/{}", id), Some(token));
        self.client.send_optional(request).await
    }

    async fn update_status(
        &self,
        token: &str,
        id: Uuid,
        is_active: bool,
    ) -> Result<Principal, RepositoryError> {
        let request = self
            .client
            .request(Method::PUT, &format!("/users/{}/status", id), Some(token))
            .json(&json!({ "is_active": is_active }));
        self.client.send_json(request).await
    }

    async fn update_role(
        &self,
        token: &str,
        id: Uuid,
        role: Role,
    ) -> Result<Principal, RepositoryError> {
        let request = self
            .client
            .request(Method::PUT, &format!("/users/{}/role", id), Some(token))
            .json(&json!({ "role": role }));
        self.client.send_json(request).await
    }

    async fn delete(&self, token: &str, id: Uuid) -> Result<(), RepositoryError> {
        let request = self
            .client
            .request(Method::DELETE, &format!("/users/{}", id), Some(token));
        self.client.send_empty(request).await
    }

    async fn change_password(
        &self,
        token: &str,
        id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<String, RepositoryError> {
        let request = self
            .client
            .request(Method::PUT, &format!("/users/{}/password", id), Some(token))
            .json(&json!({
                "current_password": current_password,
                "new_password": new_password,
            }));
        let response: MessageResponse = self.client.send_json(request).await?;
        Ok(response.message)
    }

    async fn find_preferences(
        &self,
        token: &str,
        user_id: Uuid,
    ) -> Result<Option<UserPreferences>, RepositoryError> {
        let request = self.client.request(
            Method::GET,
            &format!("/users/{}/preferences", user_id),
            Some(token),
        );
        self.client.send_optional(request).await
    }

    async fn update_preferences(
        &self,
        token: &str,
        user_id: Uuid,
        update: &PreferencesUpdate,
    ) -> Result<UserPreferences, RepositoryError> {
        let request = self
            .client
            .request(
                Method::PUT,
                &format!("/users/{}/preferences", user_id),
                Some(token),
            )
            .json(update);
        self.client.send_json(request).await
    }
}
