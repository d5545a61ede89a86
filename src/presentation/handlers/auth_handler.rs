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
    extract::{Extension, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    application::{
        dto::auth_request::{LoginRequestDto, RegisterRequestDto},
        use_cases::account::AccountUseCase,
    },
    domain::services::{
        admission::{admit_route, Admission},
        session_guard::SessionGuard,
    },
    presentation::{errors::AppError, middleware::session_middleware::SessionState},
};

/// 登录并建立会话
///
/// 每次登录都在新签发的会话ID上建立令牌，请求携带的旧会话随之废弃，
/// 客户端事先植入的会话ID不会变成已认证会话。
pub async fn login(
    Extension(account): Extension<Arc<AccountUseCase>>,
    Extension(sessions): Extension<SessionState>,
    Extension(current): Extension<Arc<SessionGuard>>,
    Json(payload): Json<LoginRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let fresh = sessions.registry.issue();
    let principal = match account.login(&fresh, payload).await {
        Ok(principal) => principal,
        Err(e) => {
            if fresh.is_authenticated() {
                fresh.logout().await;
            }
            return Err(e.into());
        }
    };

    sessions.registry.register(fresh.clone());
    sessions.registry.retire(&current).await;

    Ok((
        [(header::SET_COOKIE, sessions.session_cookie(fresh.id()))],
        Json(principal),
    ))
}

/// 注册新用户
pub async fn register(
    Extension(account): Extension<Arc<AccountUseCase>>,
    Json(payload): Json<RegisterRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let principal = account.register(payload).await?;
    Ok((StatusCode::CREATED, Json(principal)))
}

/// 登出，清除会话令牌并让浏览器丢弃会话 Cookie
pub async fn logout(
    Extension(account): Extension<Arc<AccountUseCase>>,
    Extension(sessions): Extension<SessionState>,
    Extension(session): Extension<Arc<SessionGuard>>,
) -> impl IntoResponse {
    account.logout(&session).await;
    sessions.registry.remove(session.id());
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, sessions.expired_cookie())],
    )
}

/// 当前用户
pub async fn me(
    Extension(account): Extension<Arc<AccountUseCase>>,
    Extension(session): Extension<Arc<SessionGuard>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(account.me(&session).await?))
}

#[derive(Debug, Deserialize)]
pub struct AdmissionQuery {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct AdmissionView {
    pub path: String,
    #[serde(flatten)]
    pub admission: Admission,
    pub redirect: Option<&'static str>,
}

/// 页面准入查询
///
/// 控制台外壳在渲染页面之前询问当前会话能否进入指定路径。
pub async fn admission(
    Extension(account): Extension<Arc<AccountUseCase>>,
    Extension(session): Extension<Arc<SessionGuard>>,
    Query(query): Query<AdmissionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let principal = account.current(&session).await?;
    let admission = admit_route(&query.path, principal.as_ref(), session.is_authenticated());

    Ok(Json(AdmissionView {
        path: query.path,
        admission,
        redirect: admission.redirect_target(),
    }))
}
