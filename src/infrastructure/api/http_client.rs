// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::config::settings::RemoteApiSettings;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::metrics::REMOTE_ERRORS;

/// 远端 API 的 HTTP 客户端
///
/// 不做任何重试；每个请求的结果原样交给调用方。
#[derive(Clone)]
pub struct ApiClient {
    /// HTTP 客户端
    client: reqwest::Client,
    /// 基础地址，不带末尾斜杠
    base_url: String,
}

impl ApiClient {
    /// 根据配置创建客户端
    ///
    /// # 参数
    ///
    /// * `settings` - 远端 API 配置
    ///
    /// # 返回值
    ///
    /// * `Ok(ApiClient)` - 创建成功
    /// * `Err(RepositoryError)` - 基础地址不是合法的 http(s) URL，或客户端构建失败
    pub fn new(settings: &RemoteApiSettings) -> Result<Self, RepositoryError> {
        let parsed = Url::parse(&settings.base_url).map_err(|e| {
            RepositoryError::Connectivity(format!(
                "Invalid remote base URL '{}': {}",
                settings.base_url, e
            ))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RepositoryError::Connectivity(format!(
                "Unsupported remote URL scheme: {}",
                parsed.scheme()
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| RepositoryError::Connectivity(e.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 构建请求，`path` 以 `/` 开头，令牌存在时附加 Bearer 认证头
    pub fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// 发送请求并解码 JSON 响应体
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, RepositoryError> {
        let result = match self.execute(builder).await {
            Ok(response) => decode(response).await,
            Err(e) => Err(e),
        };
        result.map_err(record)
    }

    /// 发送请求并解码 JSON，404 视为不存在
    pub async fn send_optional<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Option<T>, RepositoryError> {
        let result = match self.execute(builder).await {
            Ok(response) => decode(response).await.map(Some),
            Err(RepositoryError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        };
        result.map_err(record)
    }

    /// 发送请求，忽略成功响应的响应体
    pub async fn send_empty(&self, builder: RequestBuilder) -> Result<(), RepositoryError> {
        self.execute(builder).await.map(|_| ()).map_err(record)
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Response, RepositoryError> {
        let response = builder.send().await.map_err(|e| {
            RepositoryError::Connectivity(e.without_url().to_string())
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Remote API responded");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &body))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RepositoryError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| RepositoryError::Connectivity(e.without_url().to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Decode(e.to_string()))
}

fn record(error: RepositoryError) -> RepositoryError {
    warn!(kind = error.kind(), "Remote API call failed: {}", error);
    metrics::counter!(REMOTE_ERRORS, "kind" => error.kind()).increment(1);
    error
}

/// 把非 2xx 响应转换为仓库错误，服务端给出的原因原样保留
pub fn status_error(status: StatusCode, body: &str) -> RepositoryError {
    let reason = error_reason(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    });

    match status {
        StatusCode::UNAUTHORIZED => RepositoryError::Unauthenticated(reason),
        StatusCode::NOT_FOUND => RepositoryError::NotFound(reason),
        _ => RepositoryError::Server {
            status: status.as_u16(),
            reason,
        },
    }
}

/// 从错误响应体中提取原因
///
/// 依次尝试 `{"detail": ..}`、`{"error": ..}`，否则使用纯文本。
pub fn error_reason(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(trimmed) {
        for field in ["detail", "error"] {
            match map.get(field) {
                Some(serde_json::Value::String(reason)) => return Some(reason.clone()),
                Some(serde_json::Value::Null) | None => {}
                // structured validation errors
                Some(other) => return Some(other.to_string()),
            }
        }
    }

    Some(trimmed.to_string())
}
