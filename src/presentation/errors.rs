// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::use_cases::UseCaseError;
use crate::domain::models::crawl_job::DomainError;
use crate::domain::repositories::RepositoryError;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，提供统一的错误处理接口
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    /// 错误对应的状态码与返回给客户端的消息
    pub fn status_and_message(&self) -> (StatusCode, String) {
        if let Some(error) = self.0.downcast_ref::<UseCaseError>() {
            return use_case_status(error);
        }
        if let Some(error) = self.0.downcast_ref::<RepositoryError>() {
            return repository_status(error);
        }
        if let Some(error) = self.0.downcast_ref::<DomainError>() {
            return (domain_status(error), error.to_string());
        }
        (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string())
    }
}

fn use_case_status(error: &UseCaseError) -> (StatusCode, String) {
    let status = match error {
        UseCaseError::ValidationError(_) => StatusCode::BAD_REQUEST,
        UseCaseError::Domain(domain) => domain_status(domain),
        UseCaseError::Repository(repository) => return repository_status(repository),
        UseCaseError::NotFound(_) => StatusCode::NOT_FOUND,
        UseCaseError::Unauthenticated => StatusCode::UNAUTHORIZED,
        UseCaseError::Forbidden(_) => StatusCode::FORBIDDEN,
    };
    (status, error.to_string())
}

fn domain_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::ActionNotPermitted { .. } | DomainError::InvalidStateTransition { .. } => {
            StatusCode::CONFLICT
        }
        DomainError::ValidationError(_) => StatusCode::BAD_REQUEST,
    }
}

/// 远端错误：服务端给出的状态与原因原样透传，连接类错误为 502
fn repository_status(error: &RepositoryError) -> (StatusCode, String) {
    match error {
        RepositoryError::Connectivity(_) | RepositoryError::Decode(_) => {
            (StatusCode::BAD_GATEWAY, error.to_string())
        }
        RepositoryError::Server { status, reason } => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
            reason.clone(),
        ),
        RepositoryError::Unauthenticated(reason) => (StatusCode::UNAUTHORIZED, reason.clone()),
        RepositoryError::NotFound(reason) => (StatusCode::NOT_FOUND, reason.clone()),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{}", error_message);
        }

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
