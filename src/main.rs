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

use breachwatch_console::config::settings::Settings;
use breachwatch_console::infrastructure::api::ApiClient;
use breachwatch_console::infrastructure::metrics;
use breachwatch_console::infrastructure::storage::create_client_store;
use breachwatch_console::presentation::routes::{self, ConsoleServices};
use breachwatch_console::utils::telemetry;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

/// 空闲会话的检查间隔
const SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let settings = Settings::new()?;

    // 2. Initialize logging and metrics
    telemetry::init_telemetry(&settings.logging);
    info!("Starting breachwatch-console...");
    metrics::init_metrics(&settings.metrics);

    // 3. Client-side storage
    let store = create_client_store(&settings.storage)?;
    info!(storage_type = %settings.storage.storage_type, "Client store initialized");

    // 4. Remote API client
    let client = ApiClient::new(&settings.remote_api)?;
    info!(base_url = client.base_url(), "Remote API client initialized");

    // 5. Start HTTP server
    let services = ConsoleServices::new(client, store, &settings.session.cookie_name);
    let idle_timeout = Duration::from_secs(settings.session.idle_timeout_secs);
    services
        .sessions
        .registry
        .clone()
        .spawn_sweeper(idle_timeout, SWEEP_PERIOD.min(idle_timeout));
    info!(idle_timeout_secs = settings.session.idle_timeout_secs, "Session sweeper started");
    let app = routes::routes(services);

    let addr = settings.listen_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
