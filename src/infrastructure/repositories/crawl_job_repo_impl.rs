// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use reqwest::Method;
use uuid::Uuid;

use crate::domain::models::crawl_job::{ActionOutcome, CrawlJob, DownloadedFile, NewCrawlJob};
use crate::domain::repositories::crawl_job_repository::CrawlJobRepository;
use crate::domain::repositories::{Page, RepositoryError};
use crate::infrastructure::api::ApiClient;

/// 基于远端 `/crawl` 接口的任务仓库实现
pub struct CrawlJobRepositoryImpl {
    client: ApiClient,
}

impl CrawlJobRepositoryImpl {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CrawlJobRepository for CrawlJobRepositoryImpl {
    async fn create(&self, token: &str, job: &NewCrawlJob) -> Result<CrawlJob, RepositoryError> {
        let request = self
            .client
            .request(Method::POST, "/crawl/jobs", Some(token))
            .json(job);
        self.client.send_json(request).await
    }

    async fn list(&self, token: &str, page: Page) -> Result<Vec<CrawlJob>, RepositoryError> {
        let request = self
            .client
            .request(Method::GET, "/crawl/jobs", Some(token))
            .query(&page);
        self.client.send_json(request).await
    }

    async fn find_by_id(&self, token: &str, id: Uuid) -> Result<Option<CrawlJob>, RepositoryError> {
        let request = self
            .client
            .request(Method::GET, &format!("/crawl/jobs/{}", id), Some(token));
        self.client.send_optional(request).await
    }

    async fn stop(&self, token: &str, id: Uuid) -> Result<ActionOutcome, RepositoryError> {
        let request = self
            .client
            .request(Method::POST, &format!("/crawl/jobs/{}/stop", id), Some(token));
        self.client.send_json(request).await
    }

    async fn run_now(&self, token: &str, id: Uuid) -> Result<ActionOutcome, RepositoryError> {
        let request = self
            .client
            .request(Method::POST, &format!("/crawl/jobs/{}/run", id), Some(token));
        self.client.send_json(request).await
    }

    async fn delete(&self, token: &str, id: Uuid) -> Result<(), RepositoryError> {
        let request = self
            .client
            .request(Method::DELETE, &format!("/crawl/jobs/{}", id), Some(token));
        self.client.send_empty(request).await
    }

    async fn list_downloaded_files(
        &self,
        token: &str,
        job_id: Option<Uuid>,
        page: Page,
    ) -> Result<Vec<DownloadedFile>, RepositoryError> {
        let mut request = self
            .client
            .request(Method::GET, "/crawl/results/downloaded", Some(token))
            .query(&page);
        if let Some(job_id) = job_id {
            request = request.query(&[("job_id", job_id.to_string())]);
        }
        self.client.send_json(request).await
    }
}
