// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use dashmap::DashMap;
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::repositories::auth_repository::AuthRepository;
use crate::domain::repositories::client_store::ClientStore;
use crate::domain::services::admission::{
    admit_route, classify, normalize_path, Admission, RouteAccess,
};
use crate::domain::services::session_guard::SessionGuard;
use crate::infrastructure::metrics::{ACTIVE_SESSIONS, ADMISSION_DENIED};
use crate::presentation::errors::AppError;

struct SessionEntry {
    guard: Arc<SessionGuard>,
    last_seen: Mutex<Instant>,
}

impl SessionEntry {
    fn new(guard: Arc<SessionGuard>) -> Self {
        Self {
            guard,
            last_seen: Mutex::new(Instant::now()),
        }
    }

    fn touch(&self) {
        *self.last_seen.lock() = Instant::now();
    }

    fn idle_for(&self) -> Duration {
        self.last_seen.lock().elapsed()
    }
}

/// 会话注册表
///
/// 只登记已认证的会话。会话ID只在登录成功时由网关签发，
/// 客户端提交的未知ID不会被采纳；进程重启后，存储中仍有令牌的ID会被恢复。
/// 登出、令牌失效或空闲超时的会话会从注册表中移除。
pub struct SessionRegistry {
    sessions: DashMap<Uuid, SessionEntry>,
    store: Arc<dyn ClientStore>,
}

impl SessionRegistry {
    pub fn new(store: Arc<dyn ClientStore>) -> Self {
        Self {
            sessions: DashMap::new(),
            store,
        }
    }

    /// 取得请求对应的会话
    ///
    /// 没有 Cookie、或 Cookie 中的ID既未登记也没有已保存的令牌时，
    /// 返回一个不登记的临时匿名会话。
    pub async fn resolve(&self, id: Option<Uuid>) -> Arc<SessionGuard> {
        let Some(id) = id else {
            return self.issue();
        };

        if let Some(entry) = self.sessions.get(&id) {
            entry.touch();
            return entry.guard.clone();
        }

        let restored = SessionGuard::restore(id, self.store.clone()).await;
        if !restored.is_authenticated() {
            debug!(session_id = %id, "Ignoring unknown session id");
            return self.issue();
        }

        let guard = self
            .sessions
            .entry(id)
            .or_insert_with(|| SessionEntry::new(Arc::new(restored)))
            .guard
            .clone();
        self.report();
        guard
    }

    /// 新建一个未登记的会话，ID由网关随机生成
    pub fn issue(&self) -> Arc<SessionGuard> {
        Arc::new(SessionGuard::new(Uuid::new_v4(), self.store.clone()))
    }

    /// 登记会话，之后携带该ID的请求都会取得它
    pub fn register(&self, guard: Arc<SessionGuard>) {
        self.sessions.insert(guard.id(), SessionEntry::new(guard));
        self.report();
    }

    pub fn remove(&self, id: Uuid) -> Option<Arc<SessionGuard>> {
        let removed = self.sessions.remove(&id).map(|(_, entry)| entry.guard);
        if removed.is_some() {
            self.report();
        }
        removed
    }

    /// 新会话登录成功后废弃旧会话，旧会话的令牌一并清除
    pub async fn retire(&self, guard: &SessionGuard) {
        self.remove(guard.id());
        if guard.is_authenticated() {
            guard.logout().await;
        }
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.sessions.contains_key(&id)
    }

    /// 清除空闲超过 `max_idle` 的会话，返回清除的数量
    pub async fn sweep_idle(&self, max_idle: Duration) -> usize {
        let expired: Vec<Uuid> = self
            .sessions
            .iter()
            .filter(|entry| entry.value().idle_for() >= max_idle)
            .map(|entry| *entry.key())
            .collect();

        let mut swept = 0;
        for id in expired {
            // a request may have touched the entry since it was collected
            let Some((_, entry)) = self
                .sessions
                .remove_if(&id, |_, entry| entry.idle_for() >= max_idle)
            else {
                continue;
            };
            entry.guard.expire().await;
            swept += 1;
        }

        if swept > 0 {
            self.report();
        }
        swept
    }

    /// 启动后台清理任务，每 `period` 检查一次空闲会话，间隔至少一秒
    pub fn spawn_sweeper(self: Arc<Self>, max_idle: Duration, period: Duration) -> JoinHandle<()> {
        let period = period.max(Duration::from_secs(1));
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let swept = self.sweep_idle(max_idle).await;
                if swept > 0 {
                    info!(swept, remaining = self.len(), "Expired idle sessions");
                }
            }
        })
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn report(&self) {
        metrics::gauge!(ACTIVE_SESSIONS).set(self.sessions.len() as f64);
    }
}

/// 会话中间件状态
#[derive(Clone)]
pub struct SessionState {
    pub registry: Arc<SessionRegistry>,
    pub auth: Arc<dyn AuthRepository>,
    pub cookie_name: Arc<str>,
}

impl SessionState {
    /// 指向会话ID的 Set-Cookie 值
    pub fn session_cookie(&self, id: Uuid) -> String {
        format!("{}={}; Path=/; HttpOnly; SameSite=Lax", self.cookie_name, id)
    }

    /// 让浏览器立即丢弃会话 Cookie 的 Set-Cookie 值
    pub fn expired_cookie(&self) -> String {
        format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
            self.cookie_name
        )
    }
}

/// 从 Cookie 头中读取会话ID
pub fn session_id_from_cookies(headers: &HeaderMap, cookie_name: &str) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// 会话与准入中间件
///
/// 为每个请求解析会话和当前身份，调用 [`admit_route`] 做准入决策。
/// `/api` 下被拒绝的请求返回 401/403，其余路径返回跳转。
/// 允许的请求在扩展中携带会话守卫，认证后还携带当前身份。
/// 中间件从不签发会话 Cookie，请求结束时已不再认证的会话会被移出注册表。
///
/// # 参数
///
/// * `state` - 会话注册表与认证仓库
/// * `req` - HTTP请求
/// * `next` - 下一个中间件
pub async fn session_middleware(
    State(state): State<SessionState>,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    debug!("SessionMiddleware processing path: {}", path);

    let cookie_id = session_id_from_cookies(req.headers(), &state.cookie_name);
    let session = state.registry.resolve(cookie_id).await;

    // public routes never depend on the remote API
    let principal = if classify(&path) == RouteAccess::Public {
        None
    } else {
        match session.current_principal(state.auth.as_ref()).await {
            Ok(principal) => principal,
            Err(e) => {
                warn!("Failed to resolve session principal: {}", e);
                return AppError::from(e).into_response();
            }
        }
    };

    let admission = admit_route(&path, principal.as_ref(), session.is_authenticated());
    let response = match admission {
        Admission::Allow => {
            req.extensions_mut().insert(session.clone());
            if let Some(principal) = principal {
                req.extensions_mut().insert(principal);
            }
            next.run(req).await
        }
        denied => deny(&path, denied),
    };

    if !session.is_authenticated() && state.registry.remove(session.id()).is_some() {
        debug!(session_id = %session.id(), "Session left the registry");
    }
    response
}

fn deny(path: &str, admission: Admission) -> Response {
    let (reason, status, message) = match admission {
        Admission::RedirectToDefault => ("forbidden", StatusCode::FORBIDDEN, "Insufficient role"),
        Admission::RedirectToLogin | Admission::Allow => {
            ("unauthenticated", StatusCode::UNAUTHORIZED, "Not authenticated")
        }
    };
    metrics::counter!(ADMISSION_DENIED, "reason" => reason).increment(1);
    debug!(path, reason, "Request denied by admission");

    let target = admission.redirect_target().unwrap_or("/");
    let normalized = normalize_path(path);
    if normalized == "/api" || normalized.starts_with("/api/") {
        (
            status,
            Json(json!({ "error": message, "redirect": target })),
        )
            .into_response()
    } else {
        Redirect::to(target).into_response()
    }
}
