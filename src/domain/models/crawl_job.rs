// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use super::crawl_config::CrawlConfigDescriptor;
use super::schedule::ScheduleDescriptor;

/// 爬取任务实体
///
/// 远端服务拥有的任务记录在控制台侧的镜像。由远端创建接口产生，
/// 通过轮询读取刷新，删除成功后从本地视图移除。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlJob {
    /// 任务唯一标识符
    pub id: Uuid,
    /// 任务名称
    #[serde(default)]
    pub name: Option<String>,
    /// 任务状态
    pub status: JobStatus,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 更新时间
    pub updated_at: DateTime<Utc>,
    /// 创建任务时使用的配置
    pub settings: CrawlConfigDescriptor,
    /// 结果摘要
    #[serde(default)]
    pub results_summary: Option<ResultsSummary>,
    /// 下一次计划运行时间（UTC）
    #[serde(default)]
    pub next_run_at: Option<DateTime<Utc>>,
    /// 上一次运行时间（UTC）
    #[serde(default)]
    pub last_run_at: Option<DateTime<Utc>>,
}

impl CrawlJob {
    /// 当前状态下允许的操作集合，用于渲染可用操作
    pub fn available_actions(&self) -> Vec<JobAction> {
        self.status.permitted_actions()
    }

    /// 已发现文件数量，无摘要时为 0
    pub fn files_found(&self) -> u64 {
        self.results_summary
            .as_ref()
            .map(|summary| summary.files_found)
            .unwrap_or(0)
    }
}

/// 结果摘要
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsSummary {
    #[serde(default)]
    pub files_found: u64,
}

/// 任务状态枚举
///
/// 状态转换由服务端驱动，控制台只负责解释：
/// Pending → Running → Completed/CompletedEmpty/Failed
/// Scheduled → Running，或 Scheduled → Stopping → 终态
/// Running → Stopping → Completed/Failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// 等待处理
    Pending,
    /// 已调度，等待触发
    Scheduled,
    /// 运行中
    Running,
    /// 已完成并发现文件
    Completed,
    /// 已完成但没有发现文件
    CompletedEmpty,
    /// 已失败
    Failed,
    /// 正在停止
    Stopping,
}

impl JobStatus {
    pub const ALL: [JobStatus; 7] = [
        JobStatus::Pending,
        JobStatus::Scheduled,
        JobStatus::Running,
        JobStatus::Completed,
        JobStatus::CompletedEmpty,
        JobStatus::Failed,
        JobStatus::Stopping,
    ];

    /// 新建任务的初始状态
    ///
    /// 携带调度且下一次运行在未来的任务为 Scheduled，其余为 Pending。
    /// 周期性调度总有未来的下一次运行。
    pub fn initial(schedule: Option<&ScheduleDescriptor>, now: DateTime<Utc>) -> JobStatus {
        match schedule {
            None => JobStatus::Pending,
            Some(ScheduleDescriptor::Recurring { .. }) => JobStatus::Scheduled,
            Some(ScheduleDescriptor::OneTime { run_at, .. }) => {
                if *run_at > now {
                    JobStatus::Scheduled
                } else {
                    JobStatus::Pending
                }
            }
        }
    }

    /// 是否为终态
    pub fn is_terminal(self) -> bool {
        match self {
            JobStatus::Completed | JobStatus::CompletedEmpty | JobStatus::Failed => true,
            JobStatus::Pending | JobStatus::Scheduled | JobStatus::Running | JobStatus::Stopping => {
                false
            }
        }
    }

    /// 服务端驱动的合法状态转换
    pub fn can_transition_to(self, next: JobStatus) -> bool {
        match self {
            JobStatus::Pending => matches!(next, JobStatus::Running | JobStatus::Stopping),
            JobStatus::Scheduled => matches!(next, JobStatus::Running | JobStatus::Stopping),
            JobStatus::Running => matches!(
                next,
                JobStatus::Completed
                    | JobStatus::CompletedEmpty
                    | JobStatus::Failed
                    | JobStatus::Stopping
            ),
            JobStatus::Stopping => next.is_terminal(),
            // re-queued by run-now
            JobStatus::Completed | JobStatus::CompletedEmpty | JobStatus::Failed => {
                matches!(next, JobStatus::Pending | JobStatus::Running)
            }
        }
    }

    /// 操作许可表
    ///
    /// | 状态 | run-now | stop | delete | edit |
    /// |---|---|---|---|---|
    /// | pending | 否 | 是 | 是 | 是 |
    /// | scheduled | 是 | 是 | 是 | 是 |
    /// | running | 否 | 是 | 是（级联清理） | 否 |
    /// | stopping | 否 | 否 | 是 | 否 |
    /// | 终态 | 是 | 否 | 是 | 是 |
    pub fn permits(self, action: JobAction) -> bool {
        match self {
            JobStatus::Pending => match action {
                JobAction::RunNow => false,
                JobAction::Stop | JobAction::Delete | JobAction::Edit => true,
            },
            JobStatus::Scheduled => match action {
                JobAction::RunNow | JobAction::Stop | JobAction::Delete | JobAction::Edit => true,
            },
            JobStatus::Running => match action {
                JobAction::Stop | JobAction::Delete => true,
                JobAction::RunNow | JobAction::Edit => false,
            },
            JobStatus::Stopping => match action {
                JobAction::Delete => true,
                JobAction::RunNow | JobAction::Stop | JobAction::Edit => false,
            },
            JobStatus::Completed | JobStatus::CompletedEmpty | JobStatus::Failed => match action {
                JobAction::RunNow | JobAction::Delete | JobAction::Edit => true,
                JobAction::Stop => false,
            },
        }
    }

    /// 当前状态下允许的操作，按 [`JobAction::ALL`] 的顺序
    pub fn permitted_actions(self) -> Vec<JobAction> {
        JobAction::ALL
            .into_iter()
            .filter(|action| self.permits(*action))
            .collect()
    }

    /// 删除运行中的任务需要服务端级联清理
    pub fn delete_cascades(self) -> bool {
        self == JobStatus::Running
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "pending"),
            JobStatus::Scheduled => write!(f, "scheduled"),
            JobStatus::Running => write!(f, "running"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::CompletedEmpty => write!(f, "completed_empty"),
            JobStatus::Failed => write!(f, "failed"),
            JobStatus::Stopping => write!(f, "stopping"),
        }
    }
}

impl FromStr for JobStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(JobStatus::Pending),
            "scheduled" => Ok(JobStatus::Scheduled),
            "running" => Ok(JobStatus::Running),
            "completed" => Ok(JobStatus::Completed),
            "completed_empty" => Ok(JobStatus::CompletedEmpty),
            "failed" => Ok(JobStatus::Failed),
            "stopping" => Ok(JobStatus::Stopping),
            _ => Err(()),
        }
    }
}

/// 客户端可请求的任务操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobAction {
    /// 立即运行
    RunNow,
    /// 停止
    Stop,
    /// 删除
    Delete,
    /// 编辑配置
    Edit,
}

impl JobAction {
    pub const ALL: [JobAction; 4] = [
        JobAction::RunNow,
        JobAction::Stop,
        JobAction::Delete,
        JobAction::Edit,
    ];
}

impl fmt::Display for JobAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JobAction::RunNow => write!(f, "run-now"),
            JobAction::Stop => write!(f, "stop"),
            JobAction::Delete => write!(f, "delete"),
            JobAction::Edit => write!(f, "edit"),
        }
    }
}

impl FromStr for JobAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "run-now" => Ok(JobAction::RunNow),
            "stop" => Ok(JobAction::Stop),
            "delete" => Ok(JobAction::Delete),
            "edit" => Ok(JobAction::Edit),
            _ => Err(()),
        }
    }
}

/// 远端 stop / run-now 的返回：消息或更新后的任务
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionOutcome {
    Job(Box<CrawlJob>),
    Message { message: String },
}

/// 任务发现的文件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadedFile {
    pub id: Uuid,
    pub source_url: String,
    pub file_url: String,
    pub file_type: String,
    pub date_found: DateTime<Utc>,
    #[serde(default)]
    pub keywords_found: Vec<String>,
    pub crawl_job_id: Uuid,
    pub downloaded_at: DateTime<Utc>,
    #[serde(default)]
    pub local_path: Option<String>,
    #[serde(default)]
    pub file_size_bytes: Option<u64>,
    #[serde(default)]
    pub checksum_md5: Option<String>,
}

/// 领域错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// 当前状态不允许请求的操作，在发出任何网络请求之前被拒绝
    #[error("Action '{action}' not permitted in current state '{status}'")]
    ActionNotPermitted { status: JobStatus, action: JobAction },

    /// 服务端报告了不合法的状态转换
    #[error("Invalid state transition from '{from}' to '{to}'")]
    InvalidStateTransition { from: JobStatus, to: JobStatus },

    /// 输入数据不满足领域规则
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// 任务创建请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCrawlJob {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub settings: CrawlConfigDescriptor,
}
