// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    routing::{get, post, put},
    Extension, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::application::use_cases::{
    account::AccountUseCase, job_console::JobConsoleUseCase, user_admin::UserAdminUseCase,
};
use crate::domain::repositories::{
    auth_repository::AuthRepository, client_store::ClientStore,
    crawl_job_repository::CrawlJobRepository, user_repository::UserRepository,
};
use crate::infrastructure::api::ApiClient;
use crate::infrastructure::repositories::{
    auth_repo_impl::AuthRepositoryImpl, crawl_job_repo_impl::CrawlJobRepositoryImpl,
    user_repo_impl::UserRepositoryImpl,
};
use crate::presentation::handlers::{account_handler, admin_handler, auth_handler, job_handler};
use crate::presentation::middleware::session_middleware::{
    session_middleware, SessionRegistry, SessionState,
};

/// 路由依赖的用例与会话状态
#[derive(Clone)]
pub struct ConsoleServices {
    pub account: Arc<AccountUseCase>,
    pub jobs: Arc<JobConsoleUseCase>,
    pub admin: Arc<UserAdminUseCase>,
    pub sessions: SessionState,
}

impl ConsoleServices {
    /// 用远端客户端和客户端存储组装全部用例
    pub fn new(client: ApiClient, store: Arc<dyn ClientStore>, cookie_name: &str) -> Self {
        let auth: Arc<dyn AuthRepository> = Arc::new(AuthRepositoryImpl::new(client.clone()));
        let users: Arc<dyn UserRepository> = Arc::new(UserRepositoryImpl::new(client.clone()));
        let jobs: Arc<dyn CrawlJobRepository> = Arc::new(CrawlJobRepositoryImpl::new(client));

        Self {
            account: Arc::new(AccountUseCase::new(auth.clone(), users.clone())),
            jobs: Arc::new(JobConsoleUseCase::new(jobs, store.clone())),
            admin: Arc::new(UserAdminUseCase::new(auth.clone(), users)),
            sessions: SessionState {
                registry: Arc::new(SessionRegistry::new(store)),
                auth,
                cookie_name: Arc::from(cookie_name),
            },
        }
    }
}

/// 创建应用路由
///
/// 所有路由都经过会话中间件，由它完成准入决策；
/// 公开路由（健康检查、版本、登录、注册、准入查询）不需要会话令牌。
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(services: ConsoleServices) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
        .route("/api/auth/login", post(auth_handler::login))
        .route("/api/auth/register", post(auth_handler::register))
        .route("/api/admission", get(auth_handler::admission));

    let session_routes = Router::new()
        .route("/api/auth/logout", post(auth_handler::logout))
        .route("/api/auth/me", get(auth_handler::me))
        .route(
            "/api/account/preferences",
            get(account_handler::get_preferences).put(account_handler::update_preferences),
        )
        .route("/api/account/password", put(account_handler::change_password));

    let job_routes = Router::new()
        .route("/api/jobs/preview", post(job_handler::preview_job))
        .route(
            "/api/jobs",
            post(job_handler::create_job).get(job_handler::list_jobs),
        )
        .route(
            "/api/jobs/{id}",
            get(job_handler::get_job).delete(job_handler::delete_job),
        )
        .route("/api/jobs/{id}/actions", get(job_handler::job_actions))
        .route("/api/jobs/{id}/run", post(job_handler::run_job))
        .route("/api/jobs/{id}/stop", post(job_handler::stop_job))
        .route("/api/files", get(job_handler::list_files))
        .route("/api/settings/last", get(job_handler::last_settings));

    let admin_routes = Router::new()
        .route("/api/admin/users", get(admin_handler::list_users))
        .route(
            "/api/admin/users/{id}",
            get(admin_handler::get_user).delete(admin_handler::delete_user),
        )
        .route("/api/admin/users/{id}/status", put(admin_handler::update_status))
        .route("/api/admin/users/{id}/role", put(admin_handler::update_role));

    Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .merge(job_routes)
        .merge(admin_routes)
        .layer(axum::middleware::from_fn_with_state(
            services.sessions.clone(),
            session_middleware,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(services.sessions))
                .layer(Extension(services.account))
                .layer(Extension(services.jobs))
                .layer(Extension(services.admin)),
        )
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
