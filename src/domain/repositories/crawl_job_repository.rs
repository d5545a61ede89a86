// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::{Page, RepositoryError};
use crate::domain::models::crawl_job::{ActionOutcome, CrawlJob, DownloadedFile, NewCrawlJob};
use async_trait::async_trait;
use uuid::Uuid;

/// 爬取任务仓库特质
///
/// 远端任务接口的抽象。所有调用都携带当前会话的令牌；
/// 状态许可检查在调用之前由用例完成，仓库本身不做任何守卫。
#[async_trait]
pub trait CrawlJobRepository: Send + Sync {
    /// 创建任务
    ///
    /// # 参数
    ///
    /// * `token` - 会话令牌
    /// * `job` - 任务名称与配置描述符
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlJob)` - 远端创建的任务
    /// * `Err(RepositoryError)` - 创建失败
    async fn create(&self, token: &str, job: &NewCrawlJob) -> Result<CrawlJob, RepositoryError>;

    /// 分页列出任务
    async fn list(&self, token: &str, page: Page) -> Result<Vec<CrawlJob>, RepositoryError>;

    /// 根据ID查找任务
    ///
    /// # 返回值
    ///
    /// * `Ok(Some(CrawlJob))` - 找到任务
    /// * `Ok(None)` - 任务不存在
    /// * `Err(RepositoryError)` - 查询失败
    async fn find_by_id(&self, token: &str, id: Uuid) -> Result<Option<CrawlJob>, RepositoryError>;

    /// 请求停止任务
    async fn stop(&self, token: &str, id: Uuid) -> Result<ActionOutcome, RepositoryError>;

    /// 请求立即运行任务
    async fn run_now(&self, token: &str, id: Uuid) -> Result<ActionOutcome, RepositoryError>;

    /// 删除任务及其结果
    async fn delete(&self, token: &str, id: Uuid) -> Result<(), RepositoryError>;

    /// 列出已发现的文件，可按任务过滤
    async fn list_downloaded_files(
        &self,
        token: &str,
        job_id: Option<Uuid>,
        page: Page,
    ) -> Result<Vec<DownloadedFile>, RepositoryError>;
}
