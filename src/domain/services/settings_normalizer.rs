// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 设置规范化
//!
//! 把操作员输入的自由文本字段拆分为规范化的列表。所有函数都是纯函数，
//! 空输入得到空列表而不是错误；"至少需要一项"由更上层的表单校验负责。

use tracing::warn;

/// 列表字段的分隔符：逗号或换行
fn is_delimiter(c: char) -> bool {
    c == ',' || c == '\n' || c == '\r'
}

/// 拆分关键词、搜索查询、种子 URL 等列表字段
///
/// 去除每一项的首尾空白并丢弃空项，保留原有顺序与重复项。
///
/// # 示例
///
/// ```
/// use breachwatch_console::domain::services::settings_normalizer::split_list;
///
/// assert_eq!(split_list("password,\nsecret"), vec!["password", "secret"]);
/// assert!(split_list("  \n ,").is_empty());
/// ```
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(is_delimiter)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// 拆分文件扩展名字段
///
/// 在 [`split_list`] 的基础上去掉前导 "."，大小写保持不变
/// （匹配策略由后端决定）。只剩 "." 的项会被丢弃。
pub fn split_extensions(raw: &str) -> Vec<String> {
    split_list(raw)
        .into_iter()
        .map(|token| token.trim_start_matches('.').trim().to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

/// 可选文本字段，空白视为未设置
pub fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// 代理列表，空列表视为未设置
pub fn optional_list(raw: Option<&str>) -> Option<Vec<String>> {
    let items = split_list(raw.unwrap_or_default());
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// 可选的数值上限
///
/// 空白视为未设置；无法解析的值同样视为未设置并记录告警，
/// 与调度字段一样采用"降级而非失败"的策略。
pub fn optional_cap(field: &str, raw: Option<&str>) -> Option<u32> {
    let value = optional_text(raw)?;
    match value.parse::<u32>() {
        Ok(cap) => Some(cap),
        Err(e) => {
            warn!(field, value = %value, "Ignoring unparseable cap: {}", e);
            None
        }
    }
}
