// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 调度描述符
///
/// 一次性调度与周期性调度二选一。使用带标签的枚举表示，
/// 因此不存在同时携带 `cron_expression` 和 `run_at` 的描述符，
/// 也不存在类型非空却两者皆无的描述符。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScheduleDescriptor {
    /// 周期性调度，cron 表达式原样传递给远端调度器
    #[serde(rename = "recurring")]
    Recurring {
        cron_expression: String,
        timezone: Option<String>,
    },
    /// 一次性调度
    #[serde(rename = "one-time")]
    OneTime {
        #[serde(with = "run_at_format")]
        run_at: DateTime<Utc>,
        timezone: Option<String>,
    },
}

impl ScheduleDescriptor {
    pub fn schedule_type(&self) -> ScheduleType {
        match self {
            ScheduleDescriptor::Recurring { .. } => ScheduleType::Recurring,
            ScheduleDescriptor::OneTime { .. } => ScheduleType::OneTime,
        }
    }

    pub fn timezone(&self) -> Option<&str> {
        match self {
            ScheduleDescriptor::Recurring { timezone, .. }
            | ScheduleDescriptor::OneTime { timezone, .. } => timezone.as_deref(),
        }
    }

    pub fn cron_expression(&self) -> Option<&str> {
        match self {
            ScheduleDescriptor::Recurring {
                cron_expression, ..
            } => Some(cron_expression),
            ScheduleDescriptor::OneTime { .. } => None,
        }
    }

    pub fn run_at(&self) -> Option<DateTime<Utc>> {
        match self {
            ScheduleDescriptor::Recurring { .. } => None,
            ScheduleDescriptor::OneTime { run_at, .. } => Some(*run_at),
        }
    }
}

/// 调度类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleType {
    #[serde(rename = "recurring")]
    Recurring,
    #[serde(rename = "one-time")]
    OneTime,
}

impl fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScheduleType::Recurring => write!(f, "recurring"),
            ScheduleType::OneTime => write!(f, "one-time"),
        }
    }
}

impl FromStr for ScheduleType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recurring" => Ok(ScheduleType::Recurring),
            "one-time" => Ok(ScheduleType::OneTime),
            _ => Err(()),
        }
    }
}

/// `run_at` 以秒精度、`Z` 后缀的 ISO-8601 形式传输，例如 `2024-08-15T14:30:00Z`
mod run_at_format {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
