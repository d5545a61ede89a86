// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含控制台的核心业务规则，全部为同步的纯逻辑
/// （会话守卫除外，它持有令牌缓存并通过仓库解析身份）。
///
/// 包含的服务：
/// - 设置规范化（settings_normalizer）：把自由文本拆分为规范化列表
/// - 调度构建（schedule_builder）：生成一次性或周期性调度描述符
/// - 配置翻译（config_translator）：组合以上两者得到完整的任务配置
/// - 任务生命周期（job_lifecycle）：在网络调用之前拒绝不被允许的操作
/// - 路由准入（admission）：基于身份和角色的准入决策
/// - 会话守卫（session_guard）：令牌生命周期与身份缓存
pub mod admission;
pub mod config_translator;
pub mod job_lifecycle;
pub mod schedule_builder;
pub mod session_guard;
pub mod settings_normalizer;
