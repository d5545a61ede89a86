// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    application::{
        dto::account_request::{UpdateRoleDto, UpdateStatusDto},
        use_cases::user_admin::UserAdminUseCase,
    },
    domain::{repositories::Page, services::session_guard::SessionGuard},
    presentation::errors::AppError,
};

pub async fn list_users(
    Extension(admin): Extension<Arc<UserAdminUseCase>>,
    Extension(session): Extension<Arc<SessionGuard>>,
    Query(page): Query<Page>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(admin.list_users(&session, page).await?))
}

pub async fn get_user(
    Extension(admin): Extension<Arc<UserAdminUseCase>>,
    Extension(session): Extension<Arc<SessionGuard>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(admin.get_user(&session, id).await?))
}

pub async fn update_status(
    Extension(admin): Extension<Arc<UserAdminUseCase>>,
    Extension(session): Extension<Arc<SessionGuard>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(admin.set_active(&session, id, payload.is_active).await?))
}

pub async fn update_role(
    Extension(admin): Extension<Arc<UserAdminUseCase>>,
    Extension(session): Extension<Arc<SessionGuard>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(admin.set_role(&session, id, payload.role).await?))
}

pub async fn delete_user(
    Extension(admin): Extension<Arc<UserAdminUseCase>>,
    Extension(session): Extension<Arc<SessionGuard>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    admin.delete_user(&session, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
