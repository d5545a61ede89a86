// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StoreError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// 存储错误
    #[error("Storage error: {0}")]
    Other(String),
}

/// 客户端状态的存储键
///
/// 只有两类持久化状态：会话令牌，以及每个用户最近一次提交的原始设置。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// 会话的认证令牌
    SessionToken(Uuid),
    /// 用户最近一次提交的表单设置
    LastSettings(Uuid),
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreKey::SessionToken(id) => write!(f, "sessions/{}.token", id),
            StoreKey::LastSettings(user_id) => write!(f, "settings/{}.json", user_id),
        }
    }
}

/// 客户端键值存储特质
///
/// 存储内容对领域逻辑是不透明的字符串；这里只约定按键读写。
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// 使用指定键保存值
    async fn put(&self, key: StoreKey, value: &str) -> Result<(), StoreError>;

    /// 根据键读取值
    async fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError>;

    /// 根据键删除值，键不存在时视为成功
    async fn remove(&self, key: StoreKey) -> Result<(), StoreError>;
}

/// 以 JSON 形式保存
pub async fn put_json<T: Serialize + Sync>(
    store: &dyn ClientStore,
    key: StoreKey,
    value: &T,
) -> Result<(), StoreError> {
    let encoded = serde_json::to_string(value)?;
    store.put(key, &encoded).await
}

/// 读取 JSON 值
pub async fn get_json<T: DeserializeOwned>(
    store: &dyn ClientStore,
    key: StoreKey,
) -> Result<Option<T>, StoreError> {
    match store.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}
