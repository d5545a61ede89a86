// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::models::principal::{Principal, Role};
use crate::domain::repositories::auth_repository::AuthRepository;
use crate::domain::repositories::client_store::{ClientStore, StoreKey};
use crate::domain::repositories::RepositoryError;

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    principal: Option<Principal>,
}

/// 会话与角色守卫
///
/// 显式持有的会话对象，由调用方通过引用传给需要它的组件。
/// 令牌只在认证成功后存在，显式登出或任何认证请求报告令牌无效时清除。
/// 令牌与缓存的身份放在同一把读写锁之后，对同一主机上的并发调用方保持原子。
pub struct SessionGuard {
    id: Uuid,
    state: RwLock<SessionState>,
    store: Arc<dyn ClientStore>,
}

impl SessionGuard {
    /// 创建一个未认证的会话
    pub fn new(id: Uuid, store: Arc<dyn ClientStore>) -> Self {
        Self {
            id,
            state: RwLock::new(SessionState::default()),
            store,
        }
    }

    /// 从存储中恢复会话令牌
    ///
    /// 存储读取失败只记录告警，会话以未认证状态继续。
    pub async fn restore(id: Uuid, store: Arc<dyn ClientStore>) -> Self {
        let token = match store.get(StoreKey::SessionToken(id)).await {
            Ok(token) => token,
            Err(e) => {
                warn!(session_id = %id, "Failed to restore session token: {}", e);
                None
            }
        };

        let guard = Self::new(id, store);
        if token.is_some() {
            debug!(session_id = %id, "Restored session token from store");
        }
        guard.state.write().token = token;
        guard
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 认证成功后保存令牌，清除旧的身份缓存
    pub async fn establish(&self, token: String) {
        {
            let mut state = self.state.write();
            state.token = Some(token.clone());
            state.principal = None;
        }

        if let Err(e) = self.store.put(StoreKey::SessionToken(self.id), &token).await {
            warn!(session_id = %self.id, "Failed to persist session token: {}", e);
        }
        info!(session_id = %self.id, "Session established");
    }

    pub fn token(&self) -> Option<String> {
        self.state.read().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().token.is_some()
    }

    /// 已缓存的身份，不触发远端解析
    pub fn cached_principal(&self) -> Option<Principal> {
        self.state.read().principal.clone()
    }

    /// 解析并缓存当前身份
    ///
    /// 没有令牌时返回 `Ok(None)`；远端拒绝令牌时清除会话并返回 `Ok(None)`；
    /// 其他传输错误原样返回给调用方。
    pub async fn current_principal(
        &self,
        auth: &dyn AuthRepository,
    ) -> Result<Option<Principal>, RepositoryError> {
        let token = {
            let state = self.state.read();
            if let Some(principal) = &state.principal {
                return Ok(Some(principal.clone()));
            }
            match &state.token {
                Some(token) => token.clone(),
                None => return Ok(None),
            }
        };

        match auth.fetch_principal(&token).await {
            Ok(principal) => {
                let mut state = self.state.write();
                // the token may have been replaced or cleared while resolving
                if state.token.as_deref() == Some(token.as_str()) {
                    state.principal = Some(principal.clone());
                    Ok(Some(principal))
                } else {
                    Ok(state.principal.clone())
                }
            }
            Err(RepositoryError::Unauthenticated(reason)) => {
                warn!(session_id = %self.id, "Stored credential rejected: {}", reason);
                self.invalidate().await;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// 角色检查，基于已缓存的身份；未激活的用户不满足任何角色
    pub fn require_role(&self, role: Role) -> bool {
        self.state
            .read()
            .principal
            .as_ref()
            .is_some_and(|principal| principal.has_role(role))
    }

    /// 显式登出
    pub async fn logout(&self) {
        self.clear().await;
        info!(session_id = %self.id, "Session logged out");
    }

    /// 令牌失效，清除会话
    pub async fn invalidate(&self) {
        self.clear().await;
        warn!(session_id = %self.id, "Session invalidated");
    }

    /// 空闲过期，清除会话
    pub async fn expire(&self) {
        self.clear().await;
        info!(session_id = %self.id, "Session expired");
    }

    /// 检查一次认证请求的结果，远端报告令牌无效时清除会话
    ///
    /// 不做任何重试，结果原样返回。
    pub async fn observe<T>(
        &self,
        result: Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        if let Err(RepositoryError::Unauthenticated(_)) = &result {
            self.invalidate().await;
        }
        result
    }

    async fn clear(&self) {
        {
            let mut state = self.state.write();
            state.token = None;
            state.principal = None;
        }

        if let Err(e) = self.store.remove(StoreKey::SessionToken(self.id)).await {
            warn!(session_id = %self.id, "Failed to remove session token: {}", e);
        }
    }
}
