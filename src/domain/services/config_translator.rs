// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;

use crate::domain::models::crawl_config::CrawlConfigDescriptor;
use crate::domain::models::settings_input::RawSettingsInput;
use crate::domain::services::schedule_builder::{build_schedule, ScheduleWarning};
use crate::domain::services::settings_normalizer::{
    optional_cap, optional_list, optional_text, split_extensions, split_list,
};

/// 翻译结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Translation {
    pub descriptor: CrawlConfigDescriptor,
    pub warnings: Vec<ScheduleWarning>,
}

/// 把表单原始状态翻译为发送给远端的配置描述符
///
/// 纯组合：列表字段逐一规范化，调度字段交给调度构建器，数值和布尔字段原样复制。
/// 这里不做范围截断，超出范围的深度或间隔会被原样传递，
/// 调用方必须在翻译之前完成表单校验。相同输入总是得到相同输出。
pub fn translate(raw: &RawSettingsInput) -> Translation {
    let schedule = build_schedule(&raw.schedule);

    let descriptor = CrawlConfigDescriptor {
        keywords: split_list(&raw.keywords),
        file_extensions: split_extensions(&raw.file_extensions),
        seed_urls: split_list(&raw.seed_urls),
        search_dorks: split_list(&raw.search_queries),
        crawl_depth: raw.crawl_depth,
        request_delay_seconds: raw.request_delay_seconds,
        respect_robots_txt: raw.respect_robots_txt,
        use_search_engines: raw.use_search_engines,
        max_results_per_dork: optional_cap(
            "max_results_per_query",
            raw.max_results_per_query.as_deref(),
        ),
        max_concurrent_requests_per_domain: optional_cap(
            "max_concurrent_requests_per_domain",
            raw.max_concurrent_requests_per_domain.as_deref(),
        ),
        schedule: schedule.schedule,
        proxies: optional_list(raw.proxies.as_deref()),
        custom_user_agent: optional_text(raw.custom_user_agent.as_deref()),
    };

    Translation {
        descriptor,
        warnings: schedule.warning.into_iter().collect(),
    }
}
