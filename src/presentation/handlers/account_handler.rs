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

use axum::{extract::Extension, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::{
    application::{
        dto::account_request::{ChangePasswordDto, UpdatePreferencesDto},
        use_cases::account::AccountUseCase,
    },
    domain::services::session_guard::SessionGuard,
    presentation::errors::AppError,
};

pub async fn get_preferences(
    Extension(account): Extension<Arc<AccountUseCase>>,
    Extension(session): Extension<Arc<SessionGuard>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(account.preferences(&session).await?))
}

pub async fn update_preferences(
    Extension(account): Extension<Arc<AccountUseCase>>,
    Extension(session): Extension<Arc<SessionGuard>>,
    Json(payload): Json<UpdatePreferencesDto>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(account.update_preferences(&session, payload).await?))
}

pub async fn change_password(
    Extension(account): Extension<Arc<AccountUseCase>>,
    Extension(session): Extension<Arc<SessionGuard>>,
    Json(payload): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let message = account.change_password(&session, payload).await?;
    Ok(Json(json!({ "message": message })))
}
