// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 用例测试使用的内存仓库

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::crawl_config::CrawlConfigDescriptor;
use crate::domain::models::crawl_job::{
    ActionOutcome, CrawlJob, DownloadedFile, JobStatus, NewCrawlJob,
};
use crate::domain::models::principal::{
    AccessToken, PreferencesUpdate, Principal, Registration, Role, UserPreferences,
};
use crate::domain::repositories::auth_repository::AuthRepository;
use crate::domain::repositories::crawl_job_repository::CrawlJobRepository;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::repositories::{Page, RepositoryError};
use crate::domain::services::session_guard::SessionGuard;
use crate::infrastructure::storage::MemoryStore;

pub const TOKEN: &str = "token-1";

pub fn principal(role: Role) -> Principal {
    Principal {
        id: Uuid::new_v4(),
        email: format!("{}@example.com", role),
        full_name: None,
        role,
        is_active: true,
        created_at: None,
    }
}

pub fn descriptor() -> CrawlConfigDescriptor {
    CrawlConfigDescriptor {
        keywords: vec!["password".to_string()],
        file_extensions: vec!["sql".to_string()],
        seed_urls: vec![],
        search_dorks: vec![],
        crawl_depth: 2,
        request_delay_seconds: 1.0,
        respect_robots_txt: true,
        use_search_engines: false,
        max_results_per_dork: Some(20),
        max_concurrent_requests_per_domain: Some(2),
        schedule: None,
        proxies: None,
        custom_user_agent: None,
    }
}

pub fn job(status: JobStatus) -> CrawlJob {
    let now = Utc::now();
    CrawlJob {
        id: Uuid::new_v4(),
        name: Some("fixture".to_string()),
        status,
        created_at: now,
        updated_at: now,
        settings: descriptor(),
        results_summary: None,
        next_run_at: None,
        last_run_at: None,
    }
}

/// 记录每次调用的任务仓库
#[derive(Default)]
pub struct FakeJobs {
    pub jobs: DashMap<Uuid, CrawlJob>,
    pub calls: Mutex<Vec<&'static str>>,
    pub created: Mutex<Vec<NewCrawlJob>>,
}

impl FakeJobs {
    pub fn with(job: CrawlJob) -> Arc<Self> {
        let fake = Self::default();
        fake.jobs.insert(job.id, job);
        Arc::new(fake)
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    fn record(&self, call: &'static str, token: &str) -> Result<(), RepositoryError> {
        self.calls.lock().push(call);
        if token == TOKEN {
            Ok(())
        } else {
            Err(RepositoryError::Unauthenticated("Could not validate credentials".to_string()))
        }
    }

    fn transition(&self, id: Uuid, status: JobStatus) -> Result<ActionOutcome, RepositoryError> {
        let mut entry = self
            .jobs
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound("Crawl job not found".to_string()))?;
        entry.status = status;
        Ok(ActionOutcome::Job(Box::new(entry.clone())))
    }
}

#[async_trait]
impl CrawlJobRepository for FakeJobs {
    async fn create(&self, token: &str, job: &NewCrawlJob) -> Result<CrawlJob, RepositoryError> {
        self.record("create", token)?;
        self.created.lock().push(job.clone());

        let now = Utc::now();
        let created = CrawlJob {
            id: Uuid::new_v4(),
            name: job.name.clone(),
            status: JobStatus::initial(job.settings.schedule.as_ref(), now),
            created_at: now,
            updated_at: now,
            settings: job.settings.clone(),
            results_summary: None,
            next_run_at: None,
            last_run_at: None,
        };
        self.jobs.insert(created.id, created.clone());
        Ok(created)
    }

    async fn list(&self, token: &str, page: Page) -> Result<Vec<CrawlJob>, RepositoryError> {
        self.record("list", token)?;
        Ok(self
            .jobs
            .iter()
            .skip(page.skip as usize)
            .take(page.limit as usize)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn find_by_id(&self, token: &str, id: Uuid) -> Result<Option<CrawlJob>, RepositoryError> {
        self.record("find_by_id", token)?;
        Ok(self.jobs.get(&id).map(|entry| entry.value().clone()))
    }

    async fn stop(&self, token: &str, id: Uuid) -> Result<ActionOutcome, RepositoryError> {
        self.record("stop", token)?;
        self.transition(id, JobStatus::Stopping)
    }

    async fn run_now(&self, token: &str, id: Uuid) -> Result<ActionOutcome, RepositoryError> {
        self.record("run_now", token)?;
        self.transition(id, JobStatus::Pending)
    }

    async fn delete(&self, token: &str, id: Uuid) -> Result<(), RepositoryError> {
        self.record("delete", token)?;
        self.jobs.remove(&id);
        Ok(())
    }

    async fn list_downloaded_files(
        &self,
        token: &str,
        _job_id: Option<Uuid>,
        _page: Page,
    ) -> Result<Vec<DownloadedFile>, RepositoryError> {
        self.record("list_downloaded_files", token)?;
        Ok(Vec::new())
    }
}

/// 固定身份的认证仓库
pub struct FakeAuth {
    pub principal: Principal,
}

#[async_trait]
impl AuthRepository for FakeAuth {
    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, RepositoryError> {
        if email == self.principal.email && password == "correct-horse" {
            Ok(AccessToken {
                access_token: TOKEN.to_string(),
                token_type: "bearer".to_string(),
            })
        } else {
            Err(RepositoryError::Unauthenticated(
                "Incorrect email or password".to_string(),
            ))
        }
    }

    async fn register(&self, registration: &Registration) -> Result<Principal, RepositoryError> {
        Ok(Principal {
            id: Uuid::new_v4(),
            email: registration.email.clone(),
            full_name: registration.full_name.clone(),
            role: registration.role,
            is_active: true,
            created_at: Some(Utc::now()),
        })
    }

    async fn fetch_principal(&self, token: &str) -> Result<Principal, RepositoryError> {
        if token == TOKEN {
            Ok(self.principal.clone())
        } else {
            Err(RepositoryError::Unauthenticated(
                "Could not validate credentials".to_string(),
            ))
        }
    }
}

/// 内存用户仓库
#[derive(Default)]
pub struct FakeUsers {
    pub users: DashMap<Uuid, Principal>,
    pub preferences: DashMap<Uuid, UserPreferences>,
    pub calls: Mutex<Vec<&'static str>>,
}

impl FakeUsers {
    pub fn with(users: &[Principal]) -> Arc<Self> {
        let fake = Self::default();
        for user in users {
            fake.users.insert(user.id, user.clone());
        }
        Arc::new(fake)
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    fn update<F: FnOnce(&mut Principal)>(&self, id: Uuid, apply: F) -> Result<Principal, RepositoryError> {
        let mut user = self
            .users
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound("User not found".to_string()))?;
        apply(&mut *user);
        Ok(user.clone())
    }
}

#[async_trait]
impl UserRepository for FakeUsers {
    async fn list(&self, _token: &str, _page: Page) -> Result<Vec<Principal>, RepositoryError> {
        self.calls.lock().push("list");
        Ok(self.users.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn find_by_id(&self, _token: &str, id: Uuid) -> Result<Option<Principal>, RepositoryError> {
        self.calls.lock().push("find_by_id");
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn update_status(
        &self,
        _token: &str,
        id: Uuid,
        is_active: bool,
    ) -> Result<Principal, RepositoryError> {
        self.calls.lock().push("update_status");
        self.update(id, |user| user.is_active = is_active)
    }

    async fn update_role(&self, _token: &str, id: Uuid, role: Role) -> Result<Principal, RepositoryError> {
        self.calls.lock().push("update_role");
        self.update(id, |user| user.role = role)
    }

    async fn delete(&self, _token: &str, id: Uuid) -> Result<(), RepositoryError> {
        self.calls.lock().push("delete");
        self.users
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound("User not found".to_string()))
    }

    async fn change_password(
        &self,
        _token: &str,
        _id: Uuid,
        current_password: &str,
        _new_password: &str,
    ) -> Result<String, RepositoryError> {
        self.calls.lock().push("change_password");
        if current_password == "correct-horse" {
            Ok("Password updated successfully".to_string())
        } else {
            Err(RepositoryError::Server {
                status: 400,
                reason: "Incorrect current password".to_string(),
            })
        }
    }

    async fn find_preferences(
        &self,
        _token: &str,
        user_id: Uuid,
    ) -> Result<Option<UserPreferences>, RepositoryError> {
        self.calls.lock().push("find_preferences");
        Ok(self.preferences.get(&user_id).map(|entry| entry.value().clone()))
    }

    async fn update_preferences(
        &self,
        _token: &str,
        user_id: Uuid,
        update: &PreferencesUpdate,
    ) -> Result<UserPreferences, RepositoryError> {
        self.calls.lock().push("update_preferences");
        let mut current = self
            .preferences
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_else(|| UserPreferences::defaults_for(user_id));
        if let Some(per_page) = update.default_items_per_page {
            current.default_items_per_page = per_page;
        }
        if let Some(notify) = update.receive_email_notifications {
            current.receive_email_notifications = notify;
        }
        self.preferences.insert(user_id, current.clone());
        Ok(current)
    }
}

/// 已认证并缓存了身份的会话
pub async fn signed_in(auth: &FakeAuth) -> (SessionGuard, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let session = SessionGuard::new(Uuid::new_v4(), store.clone());
    session.establish(TOKEN.to_string()).await;
    session
        .current_principal(auth)
        .await
        .expect("fake auth never fails transport");
    (session, store)
}
