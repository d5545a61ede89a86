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

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use super::{session_token, UseCaseError};
use crate::{
    application::dto::crawl_job_request::CreateJobRequestDto,
    domain::{
        models::{
            crawl_job::{ActionOutcome, CrawlJob, DownloadedFile, JobAction, JobStatus, NewCrawlJob},
            principal::Principal,
            settings_input::RawSettingsInput,
        },
        repositories::{
            client_store::{get_json, put_json, ClientStore, StoreKey},
            crawl_job_repository::CrawlJobRepository,
            Page,
        },
        services::{
            config_translator::{translate, Translation},
            job_lifecycle::{check_reported_transition, ensure_action_permitted},
            schedule_builder::ScheduleWarning,
            session_guard::SessionGuard,
        },
    },
};

/// 创建结果
#[derive(Debug, Clone, Serialize)]
pub struct CreatedJob {
    pub job: CrawlJob,
    /// 根据调度推断的初始状态
    pub expected_status: JobStatus,
    pub warnings: Vec<ScheduleWarning>,
}

/// 任务当前可用的操作
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobActionsView {
    pub job_id: Uuid,
    pub status: JobStatus,
    pub actions: Vec<JobAction>,
    pub delete_cascades: bool,
    pub files_found: u64,
}

/// 删除结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeletedJob {
    pub job_id: Uuid,
    /// 删除时任务仍在运行，服务端需要级联清理
    pub cascaded: bool,
}

pub struct JobConsoleUseCase {
    jobs: Arc<dyn CrawlJobRepository>,
    store: Arc<dyn ClientStore>,
}

impl JobConsoleUseCase {
    pub fn new(jobs: Arc<dyn CrawlJobRepository>, store: Arc<dyn ClientStore>) -> Self {
        Self { jobs, store }
    }

    /// 校验并翻译表单，不提交
    pub fn preview(&self, dto: &CreateJobRequestDto) -> Result<Translation, UseCaseError> {
        dto.validate()
            .map_err(|e| UseCaseError::ValidationError(e.to_string()))?;
        Ok(translate(&dto.settings))
    }

    pub async fn create_job(
        &self,
        session: &SessionGuard,
        principal: &Principal,
        dto: CreateJobRequestDto,
    ) -> Result<CreatedJob, UseCaseError> {
        let token = session_token(session)?;
        dto.validate()
            .map_err(|e| UseCaseError::ValidationError(e.to_string()))?;

        let Translation {
            descriptor,
            warnings,
        } = translate(&dto.settings);
        let expected_status = JobStatus::initial(descriptor.schedule.as_ref(), Utc::now());

        self.remember_settings(principal.id, &dto.settings).await;

        let new_job = NewCrawlJob {
            name: dto.job_name(),
            settings: descriptor,
        };
        let job = session
            .observe(self.jobs.create(&token, &new_job).await)
            .await?;

        info!(
            job_id = %job.id,
            user = principal.display_name(),
            status = %job.status,
            "Crawl job created"
        );
        if job.status != expected_status {
            debug!(
                job_id = %job.id,
                expected = %expected_status,
                reported = %job.status,
                "Remote reported a different initial status"
            );
        }

        Ok(CreatedJob {
            job,
            expected_status,
            warnings,
        })
    }

    pub async fn list_jobs(
        &self,
        session: &SessionGuard,
        page: Page,
    ) -> Result<Vec<CrawlJob>, UseCaseError> {
        let token = session_token(session)?;
        Ok(session.observe(self.jobs.list(&token, page).await).await?)
    }

    pub async fn get_job(&self, session: &SessionGuard, id: Uuid) -> Result<CrawlJob, UseCaseError> {
        let token = session_token(session)?;
        self.fetch(session, &token, id).await
    }

    pub async fn available_actions(
        &self,
        session: &SessionGuard,
        id: Uuid,
    ) -> Result<JobActionsView, UseCaseError> {
        let job = self.get_job(session, id).await?;
        Ok(JobActionsView {
            job_id: job.id,
            status: job.status,
            actions: job.available_actions(),
            delete_cascades: job.status.delete_cascades(),
            files_found: job.files_found(),
        })
    }

    /// 立即运行，当前状态不允许时在发出请求之前拒绝
    pub async fn run_now(
        &self,
        session: &SessionGuard,
        id: Uuid,
    ) -> Result<ActionOutcome, UseCaseError> {
        let (token, job) = self.guard(session, id, JobAction::RunNow).await?;
        let outcome = session.observe(self.jobs.run_now(&token, id).await).await?;
        check_outcome(&job, &outcome);
        info!(job_id = %id, "Run-now requested");
        Ok(outcome)
    }

    /// 停止任务，当前状态不允许时在发出请求之前拒绝
    pub async fn stop(&self, session: &SessionGuard, id: Uuid) -> Result<ActionOutcome, UseCaseError> {
        let (token, job) = self.guard(session, id, JobAction::Stop).await?;
        let outcome = session.observe(self.jobs.stop(&token, id).await).await?;
        check_outcome(&job, &outcome);
        info!(job_id = %id, "Stop requested");
        Ok(outcome)
    }

    pub async fn delete(&self, session: &SessionGuard, id: Uuid) -> Result<DeletedJob, UseCaseError> {
        let (token, job) = self.guard(session, id, JobAction::Delete).await?;
        let cascaded = job.status.delete_cascades();
        session.observe(self.jobs.delete(&token, id).await).await?;
        info!(job_id = %id, cascaded, "Crawl job deleted");
        Ok(DeletedJob {
            job_id: id,
            cascaded,
        })
    }

    pub async fn downloaded_files(
        &self,
        session: &SessionGuard,
        job_id: Option<Uuid>,
        page: Page,
    ) -> Result<Vec<DownloadedFile>, UseCaseError> {
        let token = session_token(session)?;
        Ok(session
            .observe(self.jobs.list_downloaded_files(&token, job_id, page).await)
            .await?)
    }

    /// 最近一次提交的原始设置，读取失败时视为没有
    pub async fn last_settings(&self, principal: &Principal) -> Option<RawSettingsInput> {
        match get_json(self.store.as_ref(), StoreKey::LastSettings(principal.id)).await {
            Ok(settings) => settings,
            Err(e) => {
                warn!(user_id = %principal.id, "Failed to load last submitted settings: {}", e);
                None
            }
        }
    }

    async fn remember_settings(&self, user_id: Uuid, settings: &RawSettingsInput) {
        if let Err(e) = put_json(self.store.as_ref(), StoreKey::LastSettings(user_id), settings).await
        {
            warn!(%user_id, "Failed to mirror submitted settings: {}", e);
        }
    }

    async fn fetch(
        &self,
        session: &SessionGuard,
        token: &str,
        id: Uuid,
    ) -> Result<CrawlJob, UseCaseError> {
        session
            .observe(self.jobs.find_by_id(token, id).await)
            .await?
            .ok_or_else(|| UseCaseError::NotFound(format!("Crawl job {}", id)))
    }

    async fn guard(
        &self,
        session: &SessionGuard,
        id: Uuid,
        action: JobAction,
    ) -> Result<(String, CrawlJob), UseCaseError> {
        let token = session_token(session)?;
        let job = self.fetch(session, &token, id).await?;
        ensure_action_permitted(job.status, action)?;
        Ok((token, job))
    }
}

fn check_outcome(previous: &CrawlJob, outcome: &ActionOutcome) {
    if let ActionOutcome::Job(updated) = outcome {
        if let Err(e) = check_reported_transition(previous.status, updated.status) {
            warn!(job_id = %previous.id, "{}", e);
        }
    }
}
