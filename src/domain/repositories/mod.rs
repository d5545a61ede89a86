// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 定义领域层访问远端 BreachWatch 服务的抽象接口：
/// - 任务仓库（crawl_job_repository）：任务的创建、查询、停止、立即运行和删除
/// - 用户仓库（user_repository）：用户管理、密码与偏好设置
/// - 认证仓库（auth_repository）：登录、注册和当前身份解析
/// - 客户端存储（client_store）：会话令牌与最近提交设置的键值存储
///
/// 具体实现位于基础设施层，领域层不依赖任何传输细节。
pub mod auth_repository;
pub mod client_store;
pub mod crawl_job_repository;
pub mod user_repository;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 仓库层错误类型
///
/// 区分"无法连接"与"服务端报告的失败"，服务端给出的原因字符串原样保留。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Remote service unreachable: {0}")]
    Connectivity(String),

    #[error("Remote service returned {status}: {reason}")]
    Server { status: u16, reason: String },

    #[error("Credential rejected: {0}")]
    Unauthenticated(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl RepositoryError {
    /// 错误类别，用于日志和指标标签
    pub fn kind(&self) -> &'static str {
        match self {
            RepositoryError::Connectivity(_) => "connectivity",
            RepositoryError::Server { .. } => "server",
            RepositoryError::Unauthenticated(_) => "unauthenticated",
            RepositoryError::NotFound(_) => "not_found",
            RepositoryError::Decode(_) => "decode",
        }
    }
}

/// 分页参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    100
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}
