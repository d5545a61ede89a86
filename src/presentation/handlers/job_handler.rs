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
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    application::{
        dto::crawl_job_request::CreateJobRequestDto, use_cases::job_console::JobConsoleUseCase,
    },
    domain::{
        models::principal::Principal, repositories::Page,
        services::session_guard::SessionGuard,
    },
    presentation::errors::AppError,
};

#[derive(Debug, Default, Deserialize)]
pub struct FilesQuery {
    pub job_id: Option<Uuid>,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl FilesQuery {
    fn page(&self) -> Page {
        let default = Page::default();
        Page {
            skip: self.skip.unwrap_or(default.skip),
            limit: self.limit.unwrap_or(default.limit),
        }
    }
}

/// 翻译表单但不提交
pub async fn preview_job(
    Extension(console): Extension<Arc<JobConsoleUseCase>>,
    Json(payload): Json<CreateJobRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(console.preview(&payload)?))
}

/// 创建新的爬取任务
pub async fn create_job(
    Extension(console): Extension<Arc<JobConsoleUseCase>>,
    Extension(session): Extension<Arc<SessionGuard>>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreateJobRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let created = console.create_job(&session, &principal, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_jobs(
    Extension(console): Extension<Arc<JobConsoleUseCase>>,
    Extension(session): Extension<Arc<SessionGuard>>,
    Query(page): Query<Page>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(console.list_jobs(&session, page).await?))
}

pub async fn get_job(
    Extension(console): Extension<Arc<JobConsoleUseCase>>,
    Extension(session): Extension<Arc<SessionGuard>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(console.get_job(&session, id).await?))
}

/// 当前状态下可用的操作
pub async fn job_actions(
    Extension(console): Extension<Arc<JobConsoleUseCase>>,
    Extension(session): Extension<Arc<SessionGuard>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(console.available_actions(&session, id).await?))
}

pub async fn run_job(
    Extension(console): Extension<Arc<JobConsoleUseCase>>,
    Extension(session): Extension<Arc<SessionGuard>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(console.run_now(&session, id).await?))
}

pub async fn stop_job(
    Extension(console): Extension<Arc<JobConsoleUseCase>>,
    Extension(session): Extension<Arc<SessionGuard>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(console.stop(&session, id).await?))
}

pub async fn delete_job(
    Extension(console): Extension<Arc<JobConsoleUseCase>>,
    Extension(session): Extension<Arc<SessionGuard>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(console.delete(&session, id).await?))
}

/// 已发现的文件，可按任务过滤
pub async fn list_files(
    Extension(console): Extension<Arc<JobConsoleUseCase>>,
    Extension(session): Extension<Arc<SessionGuard>>,
    Query(query): Query<FilesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let files = console
        .downloaded_files(&session, query.job_id, query.page())
        .await?;
    Ok(Json(files))
}

/// 最近一次提交的原始设置，用于预填表单
pub async fn last_settings(
    Extension(console): Extension<Arc<JobConsoleUseCase>>,
    Extension(principal): Extension<Principal>,
) -> impl IntoResponse {
    Json(console.last_settings(&principal).await)
}
