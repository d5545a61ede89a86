// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了控制台的核心业务实体，包括：
/// - 原始输入（settings_input）：操作员表单的原始文本状态
/// - 配置描述符（crawl_config）：发送给远端的规范化任务配置
/// - 调度描述符（schedule）：一次性或周期性调度
/// - 爬取任务（crawl_job）：任务状态机、操作许可表和领域错误
/// - 身份（principal）：当前用户、角色与偏好
pub mod crawl_config;
pub mod crawl_job;
pub mod principal;
pub mod schedule;
pub mod settings_input;
