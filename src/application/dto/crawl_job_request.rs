// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use url::Url;
use validator::{Validate, ValidationError};

use crate::domain::models::settings_input::RawSettingsInput;
use crate::domain::services::settings_normalizer::{split_extensions, split_list};

/// 创建任务请求
///
/// 提交前的上游校验；翻译本身不做任何截断或拒绝。
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct CreateJobRequestDto {
    #[validate(length(max = 255))]
    #[serde(default)]
    pub name: Option<String>,
    #[validate(custom(function = "validate_settings"))]
    #[serde(default)]
    pub settings: RawSettingsInput,
}

impl CreateJobRequestDto {
    /// 去掉空白名称
    pub fn job_name(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }
}

fn invalid(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

/// 表单设置的上游约束
///
/// 深度与间隔在 [0, 10]，至少一个关键词和一个扩展名，
/// 种子 URL 必须是绝对的 http(s) 地址，数值上限为正整数。
pub fn validate_settings(settings: &RawSettingsInput) -> Result<(), ValidationError> {
    if split_list(&settings.keywords).is_empty() {
        return Err(invalid(
            "keywords",
            "At least one keyword is required".to_string(),
        ));
    }

    if split_extensions(&settings.file_extensions).is_empty() {
        return Err(invalid(
            "file_extensions",
            "At least one file extension is required".to_string(),
        ));
    }

    for seed in split_list(&settings.seed_urls) {
        let valid = Url::parse(&seed)
            .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
            .unwrap_or(false);
        if !valid {
            return Err(invalid(
                "seed_urls",
                format!("Seed URL must be an absolute http(s) URL: {}", seed),
            ));
        }
    }

    if !(0..=10).contains(&settings.crawl_depth) {
        return Err(invalid(
            "crawl_depth",
            format!("Crawl depth must be between 0 and 10, got {}", settings.crawl_depth),
        ));
    }

    let delay = settings.request_delay_seconds;
    if !delay.is_finite() || !(0.0..=10.0).contains(&delay) {
        return Err(invalid(
            "request_delay_seconds",
            format!("Request delay must be between 0 and 10 seconds, got {}", delay),
        ));
    }

    check_cap(
        "max_results_per_query",
        settings.max_results_per_query.as_deref(),
        None,
    )?;
    check_cap(
        "max_concurrent_requests_per_domain",
        settings.max_concurrent_requests_per_domain.as_deref(),
        Some(10),
    )?;

    Ok(())
}

// blank or non-numeric caps are left to the translator, which drops them
fn check_cap(field: &'static str, raw: Option<&str>, max: Option<i64>) -> Result<(), ValidationError> {
    let Some(value) = raw.and_then(|raw| raw.trim().parse::<i64>().ok()) else {
        return Ok(());
    };

    let upper = max.unwrap_or(i64::MAX);
    if value < 1 || value > upper {
        let message = match max {
            Some(max) => format!("{} must be between 1 and {}, got {}", field, max, value),
            None => format!("{} must be at least 1, got {}", field, value),
        };
        return Err(invalid(field, message));
    }
    Ok(())
}
