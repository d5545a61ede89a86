// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

use crate::domain::models::schedule::{ScheduleDescriptor, ScheduleType};
use crate::domain::models::settings_input::RawScheduleInput;
use crate::domain::services::settings_normalizer::optional_text;

/// 调度字段不完整时的告警
///
/// 调度构建失败不会阻止任务创建：描述符整体被丢弃，任务以不调度的方式创建，
/// 告警交给调用方展示给操作员。
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ScheduleWarning {
    #[error("Unknown schedule type '{0}', job will be created unscheduled")]
    UnknownType(String),

    #[error("Recurring schedule requires a cron expression, job will be created unscheduled")]
    MissingCronExpression,

    #[error("One-time schedule requires both a date and a time, job will be created unscheduled")]
    MissingDateOrTime,

    #[error("Invalid run date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid run time '{0}', expected HH:MM or HH:MM:SS")]
    InvalidTime(String),
}

/// 构建结果：描述符或 `None`，以及可选的告警
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleBuild {
    pub schedule: Option<ScheduleDescriptor>,
    pub warning: Option<ScheduleWarning>,
}

impl ScheduleBuild {
    fn none() -> Self {
        Self::default()
    }

    fn built(schedule: ScheduleDescriptor) -> Self {
        Self {
            schedule: Some(schedule),
            warning: None,
        }
    }

    fn dropped(warning: ScheduleWarning) -> Self {
        warn!("Dropping schedule: {}", warning);
        Self {
            schedule: None,
            warning: Some(warning),
        }
    }
}

/// 根据原始调度字段构建调度描述符
///
/// - 未启用：`None`
/// - `recurring`：去除空白后的 cron 表达式必须非空，原样携带
/// - `one-time`：日期与时间都必须存在，组合后的本地时间按 UTC 解释；
///   不做时区换算，原始时区名称与时间戳并列输出，由远端决定最终解释
///
/// 所选类型所需字段缺失时整个描述符为 `None`，并返回告警。
pub fn build_schedule(raw: &RawScheduleInput) -> ScheduleBuild {
    if !raw.enabled {
        return ScheduleBuild::none();
    }

    let timezone = optional_text(raw.timezone.as_deref());
    let schedule_type = match ScheduleType::from_str(raw.schedule_type.trim()) {
        Ok(schedule_type) => schedule_type,
        Err(()) => {
            return ScheduleBuild::dropped(ScheduleWarning::UnknownType(
                raw.schedule_type.clone(),
            ))
        }
    };

    match schedule_type {
        ScheduleType::Recurring => {
            let cron_expression = raw.cron_expression.trim();
            if cron_expression.is_empty() {
                return ScheduleBuild::dropped(ScheduleWarning::MissingCronExpression);
            }
            ScheduleBuild::built(ScheduleDescriptor::Recurring {
                cron_expression: cron_expression.to_string(),
                timezone,
            })
        }
        ScheduleType::OneTime => {
            let (Some(date), Some(time)) = (
                optional_text(raw.run_date.as_deref()),
                optional_text(raw.run_time.as_deref()),
            ) else {
                return ScheduleBuild::dropped(ScheduleWarning::MissingDateOrTime);
            };

            match combine_date_time(&date, &time) {
                Ok(local) => ScheduleBuild::built(ScheduleDescriptor::OneTime {
                    run_at: local.and_utc(),
                    timezone,
                }),
                Err(warning) => ScheduleBuild::dropped(warning),
            }
        }
    }
}

fn combine_date_time(date: &str, time: &str) -> Result<NaiveDateTime, ScheduleWarning> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ScheduleWarning::InvalidDate(date.to_string()))?;
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .map_err(|_| ScheduleWarning::InvalidTime(time.to_string()))?;
    Ok(date.and_time(time))
}
