// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing::warn;

use crate::domain::models::crawl_job::{DomainError, JobAction, JobStatus};

/// 客户端侧操作守卫
///
/// 在发出任何网络请求之前拒绝当前状态不允许的操作。
/// 这是服务端校验的镜像，不能替代服务端校验。
pub fn ensure_action_permitted(status: JobStatus, action: JobAction) -> Result<(), DomainError> {
    if status.permits(action) {
        return Ok(());
    }

    warn!(%status, %action, "Rejecting job action not permitted in current state");
    metrics::counter!(
        "console_actions_rejected_total",
        "action" => action.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    Err(DomainError::ActionNotPermitted { status, action })
}

/// 核对服务端报告的状态变化
///
/// 状态未变或属于合法转换时返回 `Ok`。run-now 会请求一次新的执行，
/// 终态任务此时可能直接回到 Pending 或 Running。
pub fn check_reported_transition(
    previous: JobStatus,
    reported: JobStatus,
) -> Result<(), DomainError> {
    if previous == reported || previous.can_transition_to(reported) {
        Ok(())
    } else {
        Err(DomainError::InvalidStateTransition {
            from: previous,
            to: reported,
        })
    }
}
