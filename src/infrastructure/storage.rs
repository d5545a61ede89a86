// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::config::settings::StorageSettings;
use crate::domain::repositories::client_store::{ClientStore, StoreError, StoreKey};

/// 本地文件系统存储实现
///
/// 每个键对应基础目录下的一个文件，例如 `sessions/<id>.token`。
pub struct LocalStore {
    base_path: PathBuf,
}

impl LocalStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn full_path(&self, key: StoreKey) -> PathBuf {
        self.base_path.join(key.to_string())
    }
}

#[async_trait]
impl ClientStore for LocalStore {
    async fn put(&self, key: StoreKey, value: &str) -> Result<(), StoreError> {
        let full_path = self.full_path(key);

        // 确保目录存在
        if let Some(parent) = Path::new(&full_path).parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(&full_path).await?;
        file.write_all(value.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    async fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.full_path(key)).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn remove(&self, key: StoreKey) -> Result<(), StoreError> {
        match fs::remove_file(self.full_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

/// 内存存储实现，进程退出后丢失
#[derive(Default)]
pub struct MemoryStore {
    data: DashMap<StoreKey, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[async_trait]
impl ClientStore for MemoryStore {
    async fn put(&self, key: StoreKey, value: &str) -> Result<(), StoreError> {
        self.data.insert(key, value.to_string());
        Ok(())
    }

    async fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        Ok(self.data.get(&key).map(|entry| entry.value().clone()))
    }

    async fn remove(&self, key: StoreKey) -> Result<(), StoreError> {
        self.data.remove(&key);
        Ok(())
    }
}

/// 存储工厂函数
pub fn create_client_store(settings: &StorageSettings) -> Result<Arc<dyn ClientStore>, StoreError> {
    match settings.storage_type.as_str() {
        "local" => {
            let base_path = settings
                .local_path
                .clone()
                .unwrap_or_else(|| "./storage".to_string());
            Ok(Arc::new(LocalStore::new(base_path)))
        }
        "memory" => Ok(Arc::new(MemoryStore::new())),
        other => Err(StoreError::Other(format!(
            "Unsupported storage type: {}",
            other
        ))),
    }
}
