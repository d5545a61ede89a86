// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 路由准入
//!
//! 单一的准入决策函数，输入为 `(path, principal, is_authenticated)`，
//! 不涉及任何渲染、跳转或存储；这些副作用由调用方负责。

use serde::Serialize;

use crate::domain::models::principal::{Principal, Role};

/// 未认证时跳转的登录页
pub const LOGIN_PATH: &str = "/login";

/// 权限不足时跳转的默认页
pub const DEFAULT_PATH: &str = "/dashboard";

/// 路由访问级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// 无需登录
    Public,
    /// 需要登录
    Authenticated,
    /// 需要登录且具备指定角色
    RequiresRole(Role),
}

/// 路由规则表，按顺序匹配，未命中的路径需要登录
const ROUTE_RULES: &[(&str, RouteAccess)] = &[
    ("/login", RouteAccess::Public),
    ("/register", RouteAccess::Public),
    ("/health", RouteAccess::Public),
    ("/version", RouteAccess::Public),
    ("/api/auth/login", RouteAccess::Public),
    ("/api/auth/register", RouteAccess::Public),
    ("/api/admission", RouteAccess::Public),
    ("/admin", RouteAccess::RequiresRole(Role::Admin)),
    ("/api/admin", RouteAccess::RequiresRole(Role::Admin)),
];

/// 准入决策
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Admission {
    /// 允许访问
    Allow,
    /// 拒绝并跳转登录页
    RedirectToLogin,
    /// 拒绝并跳转默认页
    RedirectToDefault,
}

impl Admission {
    pub fn is_allowed(self) -> bool {
        self == Admission::Allow
    }

    /// 拒绝时的跳转目标
    pub fn redirect_target(self) -> Option<&'static str> {
        match self {
            Admission::Allow => None,
            Admission::RedirectToLogin => Some(LOGIN_PATH),
            Admission::RedirectToDefault => Some(DEFAULT_PATH),
        }
    }
}

/// 按段前缀匹配：`/admin` 命中 `/admin` 和 `/admin/users`，但不命中 `/administrator`
fn matches_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// 路径规范化
///
/// 去掉查询串和片段，合并重复的 `/`，解析 `.` 与 `..` 段，去掉末尾的 `/`。
/// 路由表只包含小写路径，整个路径按小写比较，`/Admin` 与 `/admin` 是同一条路由。
/// 不做百分号解码。
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    format!("/{}", segments.join("/")).to_lowercase()
}

/// 路径对应的访问级别，匹配前先做 [`normalize_path`]
pub fn classify(path: &str) -> RouteAccess {
    let path = normalize_path(path);

    ROUTE_RULES
        .iter()
        .find(|(prefix, _)| matches_prefix(&path, prefix))
        .map(|(_, access)| *access)
        .unwrap_or(RouteAccess::Authenticated)
}

/// 准入决策函数
///
/// - 受保护路径上未认证：拒绝并跳转登录页
/// - 已认证但角色不足：拒绝并跳转默认页
/// - 其余情况允许
///
/// 未激活的用户按未认证处理。
pub fn admit_route(path: &str, principal: Option<&Principal>, is_authenticated: bool) -> Admission {
    let access = classify(path);
    let active_principal = principal.filter(|p| p.is_active);
    let authenticated = is_authenticated && active_principal.is_some();

    match access {
        RouteAccess::Public => Admission::Allow,
        RouteAccess::Authenticated => {
            if authenticated {
                Admission::Allow
            } else {
                Admission::RedirectToLogin
            }
        }
        RouteAccess::RequiresRole(role) => match active_principal {
            Some(p) if is_authenticated => {
                if p.role.satisfies(role) {
                    Admission::Allow
                } else {
                    Admission::RedirectToDefault
                }
            }
            _ => Admission::RedirectToLogin,
        },
    }
}
