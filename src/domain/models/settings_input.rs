// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 操作员表单原始输入
///
/// 对应控制台设置表单的完整状态：列表类字段均为以逗号或换行分隔的自由文本，
/// 数值和布尔字段直接来自表单控件。该结构在表单加载时创建，随每次输入变化，
/// 提交或重置后丢弃；提交时会作为"最近一次提交的设置"被镜像到本地存储。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSettingsInput {
    /// 关键词（逗号或换行分隔）
    pub keywords: String,
    /// 文件扩展名（逗号或换行分隔，可带前导 "."）
    pub file_extensions: String,
    /// 种子 URL（逗号或换行分隔）
    pub seed_urls: String,
    /// 搜索查询（逗号或换行分隔）
    pub search_queries: String,
    /// 爬取深度
    pub crawl_depth: i64,
    /// 请求间隔（秒）
    pub request_delay_seconds: f64,
    /// 是否遵守 robots.txt
    pub respect_robots_txt: bool,
    /// 是否使用搜索引擎查询
    pub use_search_engines: bool,
    /// 每个查询的最大结果数，留空表示不限制
    pub max_results_per_query: Option<String>,
    /// 单域名最大并发请求数，留空表示使用服务端默认值
    pub max_concurrent_requests_per_domain: Option<String>,
    /// 调度字段
    pub schedule: RawScheduleInput,
    /// 代理列表（逗号或换行分隔）
    pub proxies: Option<String>,
    /// 自定义 User-Agent
    pub custom_user_agent: Option<String>,
}

impl Default for RawSettingsInput {
    fn default() -> Self {
        Self {
            keywords: String::new(),
            file_extensions: String::new(),
            seed_urls: String::new(),
            search_queries: String::new(),
            crawl_depth: 2,
            request_delay_seconds: 1.0,
            respect_robots_txt: true,
            use_search_engines: true,
            max_results_per_query: Some("20".to_string()),
            max_concurrent_requests_per_domain: Some("2".to_string()),
            schedule: RawScheduleInput::default(),
            proxies: None,
            custom_user_agent: None,
        }
    }
}

/// 原始调度字段
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawScheduleInput {
    /// 是否启用调度
    pub enabled: bool,
    /// 调度类型：`recurring` 或 `one-time`
    #[serde(rename = "type")]
    pub schedule_type: String,
    /// cron 表达式（仅 recurring）
    pub cron_expression: String,
    /// 运行日期 `YYYY-MM-DD`（仅 one-time）
    pub run_date: Option<String>,
    /// 运行时间 `HH:MM` 或 `HH:MM:SS`（仅 one-time）
    pub run_time: Option<String>,
    /// 时区名称，例如 `UTC` 或 `Asia/Jakarta`
    pub timezone: Option<String>,
}
