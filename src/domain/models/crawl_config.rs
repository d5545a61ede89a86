// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use super::schedule::ScheduleDescriptor;

/// 爬取配置描述符
///
/// 发送给远端任务创建接口的规范化配置。列表成员在去除首尾空白后均非空，
/// 操作员输入中的顺序与重复项被原样保留。每次创建任务时生成一次，之后不再修改。
///
/// 字段名与远端 API 的线上格式一致（搜索查询在远端称为 `search_dorks`）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlConfigDescriptor {
    pub keywords: Vec<String>,
    pub file_extensions: Vec<String>,
    pub seed_urls: Vec<String>,
    pub search_dorks: Vec<String>,
    pub crawl_depth: i64,
    pub request_delay_seconds: f64,
    pub respect_robots_txt: bool,
    pub use_search_engines: bool,
    pub max_results_per_dork: Option<u32>,
    pub max_concurrent_requests_per_domain: Option<u32>,
    #[serde(default)]
    pub schedule: Option<ScheduleDescriptor>,
    #[serde(default)]
    pub proxies: Option<Vec<String>>,
    #[serde(default)]
    pub custom_user_agent: Option<String>,
}
