// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use breachwatch_console::config::settings::StorageSettings;
use breachwatch_console::domain::repositories::client_store::StoreKey;
use breachwatch_console::domain::services::session_guard::SessionGuard;
use breachwatch_console::infrastructure::storage::create_client_store;
use breachwatch_console::presentation::middleware::session_middleware::SessionRegistry;
use std::sync::Arc;
use uuid::Uuid;

#[tokio::test]
async fn test_token_survives_restart_with_local_store() {
    let dir = tempfile::tempdir().unwrap();
    let settings = StorageSettings {
        storage_type: "local".to_string(),
        local_path: Some(dir.path().to_string_lossy().to_string()),
    };
    let id = Uuid::new_v4();

    {
        let store = create_client_store(&settings).unwrap();
        let session = SessionGuard::new(id, store);
        session.establish("persisted-token".to_string()).await;
    }

    let store = create_client_store(&settings).unwrap();
    let restored = SessionGuard::restore(id, store.clone()).await;
    assert!(restored.is_authenticated());
    assert_eq!(restored.token().as_deref(), Some("persisted-token"));

    restored.logout().await;
    assert_eq!(store.get(StoreKey::SessionToken(id)).await.unwrap(), None);
    assert!(!dir.path().join(StoreKey::SessionToken(id).to_string()).exists());
}

#[tokio::test]
async fn test_registry_restores_persisted_sessions_only() {
    let dir = tempfile::tempdir().unwrap();
    let settings = StorageSettings {
        storage_type: "local".to_string(),
        local_path: Some(dir.path().to_string_lossy().to_string()),
    };

    let id = {
        let registry = SessionRegistry::new(create_client_store(&settings).unwrap());
        let session = registry.issue();
        session.establish("persisted-token".to_string()).await;
        registry.register(session.clone());
        session.id()
    };

    let registry = Arc::new(SessionRegistry::new(create_client_store(&settings).unwrap()));
    let restored = registry.resolve(Some(id)).await;
    assert_eq!(restored.id(), id);
    assert!(restored.is_authenticated());
    assert!(registry.contains(id));

    let unknown = Uuid::new_v4();
    let anonymous = registry.resolve(Some(unknown)).await;
    assert_ne!(anonymous.id(), unknown);
    assert!(!anonymous.is_authenticated());
    assert_eq!(registry.len(), 1);
}
