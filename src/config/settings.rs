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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含网关监听地址、远端 API、会话、客户端存储、日志和指标等配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 远端 API 配置
    pub remote_api: RemoteApiSettings,
    /// 会话配置
    pub session: SessionSettings,
    /// 存储配置
    pub storage: StorageSettings,
    /// 日志配置
    pub logging: LoggingSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 远端 BreachWatch API 配置
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteApiSettings {
    /// 基础地址，包含 `/api/v1` 前缀
    pub base_url: String,
    /// 单次请求超时（秒）
    pub timeout_secs: u64,
}

/// 会话配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// 保存会话ID的 Cookie 名称
    pub cookie_name: String,
    /// 会话空闲多久后过期（秒）
    pub idle_timeout_secs: u64,
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 存储类型 (memory, local)
    pub storage_type: String,
    /// 本地存储路径 (当 type=local 时使用)
    pub local_path: Option<String>,
}

/// 日志配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// 是否输出 JSON 格式日志
    pub json: bool,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启动 Prometheus 导出器
    pub enabled: bool,
    /// 导出器监听地址
    pub address: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加内置默认值、`config/default`、`config/{APP_ENVIRONMENT}`
    /// 和 `CONSOLE` 前缀的环境变量（层级分隔符 `__`）
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("CONSOLE").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 只使用内置默认值构建配置，不读取文件和环境变量
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("remote_api.base_url", "http://localhost:8000/api/v1")?
            .set_default("remote_api.timeout_secs", 30)?
            .set_default("session.cookie_name", "console_session")?
            .set_default("session.idle_timeout_secs", 3600)?
            .set_default("storage.storage_type", "memory")?
            .set_default("storage.local_path", "./storage")?
            .set_default("logging.json", false)?
            .set_default("metrics.enabled", false)?
            .set_default("metrics.address", "0.0.0.0:9000")
    }

    /// 网关监听地址
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
