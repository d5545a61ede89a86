// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use reqwest::Method;

use crate::domain::models::principal::{AccessToken, Principal, Registration};
use crate::domain::repositories::auth_repository::AuthRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::api::ApiClient;

/// 基于远端 `/auth` 接口的认证仓库实现
pub struct AuthRepositoryImpl {
    client: ApiClient,
}

impl AuthRepositoryImpl {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, RepositoryError> {
        // OAuth2 password form, the email travels as `username`
        let request = self
            .client
            .request(Method::POST, "/auth/login", None)
            .form(&[("username", email), ("password", password)]);
        self.client.send_json(request).await
    }

    async fn register(&self, registration: &Registration) -> Result<Principal, RepositoryError> {
        let request = self
            .client
            .request(Method::POST, "/auth/register", None)
            .json(registration);
        self.client.send_json(request).await
    }

    async fn fetch_principal(&self, token: &str) -> Result<Principal, RepositoryError> {
        let request = self.client.request(Method::GET, "/auth/me", Some(token));
        self.client.send_json(request).await
    }
}
