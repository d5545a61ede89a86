// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use breachwatch_console::config::settings::RemoteApiSettings;
use breachwatch_console::domain::models::crawl_job::{ActionOutcome, JobStatus};
use breachwatch_console::domain::models::principal::Role;
use breachwatch_console::domain::repositories::auth_repository::AuthRepository;
use breachwatch_console::domain::repositories::crawl_job_repository::CrawlJobRepository;
use breachwatch_console::domain::repositories::user_repository::UserRepository;
use breachwatch_console::domain::repositories::{Page, RepositoryError};
use breachwatch_console::infrastructure::api::ApiClient;
use breachwatch_console::infrastructure::repositories::auth_repo_impl::AuthRepositoryImpl;
use breachwatch_console::infrastructure::repositories::crawl_job_repo_impl::CrawlJobRepositoryImpl;
use breachwatch_console::infrastructure::repositories::user_repo_impl::UserRepositoryImpl;
use uuid::Uuid;

use super::helpers::{job, spawn_remote, unreachable_base_url, PASSWORD, REMOTE_TOKEN};

#[tokio::test]
async fn test_login_sends_password_form() {
    let remote = spawn_remote(Role::User).await;
    let auth = AuthRepositoryImpl::new(remote.client());

    let token = auth.login("operator@example.com", PASSWORD).await.unwrap();

    assert_eq!(token.access_token, REMOTE_TOKEN);
    assert_eq!(token.token_type, "bearer");
    assert_eq!(remote.state.calls(), vec!["login:operator@example.com"]);
}

#[tokio::test]
async fn test_rejected_credentials_keep_server_reason() {
    let remote = spawn_remote(Role::User).await;
    let auth = AuthRepositoryImpl::new(remote.client());

    let result = auth.login("operator@example.com", "wrong").await;

    assert_eq!(
        result,
        Err(RepositoryError::Unauthenticated(
            "Incorrect email or password".to_string()
        ))
    );
}

#[tokio::test]
async fn test_fetch_principal_with_bearer_token() {
    let remote = spawn_remote(Role::Admin).await;
    let auth = AuthRepositoryImpl::new(remote.client());

    let principal = auth.fetch_principal(REMOTE_TOKEN).await.unwrap();
    assert_eq!(principal, remote.state.principal);

    let rejected = auth.fetch_principal("stale").await;
    assert!(matches!(rejected, Err(RepositoryError::Unauthenticated(_))));
}

#[tokio::test]
async fn test_missing_job_is_none() {
    let remote = spawn_remote(Role::User).await;
    let jobs = CrawlJobRepositoryImpl::new(remote.client());

    let found = jobs.find_by_id(REMOTE_TOKEN, Uuid::new_v4()).await.unwrap();

    assert_eq!(found, None);
}

#[tokio::test]
async fn test_stop_returns_updated_job_and_run_returns_message() {
    let remote = spawn_remote(Role::User).await;
    let running = job(JobStatus::Running);
    let id = running.id;
    remote.state.insert(running);
    let jobs = CrawlJobRepositoryImpl::new(remote.client());

    match jobs.stop(REMOTE_TOKEN, id).await.unwrap() {
        ActionOutcome::Job(updated) => assert_eq!(updated.status, JobStatus::Stopping),
        other => panic!("expected updated job, got {:?}", other),
    }

    match jobs.run_now(REMOTE_TOKEN, id).await.unwrap() {
        ActionOutcome::Message { message } => assert!(message.contains("queued")),
        other => panic!("expected message, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_missing_job_is_not_found() {
    let remote = spawn_remote(Role::User).await;
    let jobs = CrawlJobRepositoryImpl::new(remote.client());

    let result = jobs.delete(REMOTE_TOKEN, Uuid::new_v4()).await;

    assert_eq!(
        result,
        Err(RepositoryError::NotFound("Crawl job not found".to_string()))
    );
}

#[tokio::test]
async fn test_downloaded_files_filter_by_job() {
    let remote = spawn_remote(Role::User).await;
    let jobs = CrawlJobRepositoryImpl::new(remote.client());
    let job_id = Uuid::new_v4();

    let files = jobs
        .list_downloaded_files(REMOTE_TOKEN, Some(job_id), Page::default())
        .await
        .unwrap();
    jobs.list_downloaded_files(REMOTE_TOKEN, None, Page::default())
        .await
        .unwrap();

    assert!(files.is_empty());
    assert_eq!(
        remote.state.calls(),
        vec![format!("files:{}", job_id), "files:-".to_string()]
    );
}

#[tokio::test]
async fn test_server_failure_reason_passes_through() {
    let remote = spawn_remote(Role::User).await;
    let users = UserRepositoryImpl::new(remote.client());

    let result = users
        .change_password(REMOTE_TOKEN, Uuid::new_v4(), "wrong", "new-password-1")
        .await;

    assert_eq!(
        result,
        Err(RepositoryError::Server {
            status: 400,
            reason: "Incorrect current password".to_string()
        })
    );
}

#[tokio::test]
async fn test_missing_preferences_is_none() {
    let remote = spawn_remote(Role::User).await;
    let users = UserRepositoryImpl::new(remote.client());

    let preferences = users
        .find_preferences(REMOTE_TOKEN, Uuid::new_v4())
        .await
        .unwrap();

    assert_eq!(preferences, None);
}

#[tokio::test]
async fn test_unreachable_remote_is_connectivity_error() {
    let client = ApiClient::new(&RemoteApiSettings {
        base_url: unreachable_base_url().await,
        timeout_secs: 2,
    })
    .unwrap();
    let jobs = CrawlJobRepositoryImpl::new(client);

    let result = jobs.list(REMOTE_TOKEN, Page::default()).await;

    assert!(matches!(result, Err(RepositoryError::Connectivity(_))));
}
