// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::models::principal::{Registration, Role};

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct LoginRequestDto {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct RegisterRequestDto {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(max = 255))]
    #[serde(default)]
    pub full_name: Option<String>,
}

impl From<RegisterRequestDto> for Registration {
    /// 自助注册总是普通用户，角色只能由管理员提升
    fn from(dto: RegisterRequestDto) -> Self {
        Registration {
            email: dto.email,
            password: dto.password,
            full_name: dto.full_name,
            role: Role::User,
        }
    }
}
