// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

use crate::config::settings::MetricsSettings;

/// 操作在发出网络请求之前被拒绝
pub const ACTIONS_REJECTED: &str = "console_actions_rejected_total";
/// 路由准入拒绝
pub const ADMISSION_DENIED: &str = "console_admission_denied_total";
/// 远端 API 调用失败
pub const REMOTE_ERRORS: &str = "console_remote_errors_total";
/// 已登记的会话数
pub const ACTIVE_SESSIONS: &str = "console_active_sessions";

pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return;
    }

    let addr: SocketAddr = match settings.address.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics address '{}': {}", settings.address, e);
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    metrics::describe_counter!(
        ACTIONS_REJECTED,
        "Job actions rejected by the lifecycle guard before any remote call"
    );
    metrics::describe_counter!(ADMISSION_DENIED, "Requests denied by route admission");
    metrics::describe_counter!(REMOTE_ERRORS, "Failed calls to the remote job API");
    metrics::describe_gauge!(ACTIVE_SESSIONS, "Authenticated sessions held by the gateway");

    info!("Metrics exporter listening on {}", addr);
}
