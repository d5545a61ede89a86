// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::models::principal::{PreferencesUpdate, Role};

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ChangePasswordDto {
    #[validate(length(min = 1, message = "Current password cannot be empty"))]
    pub current_password: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdatePreferencesDto {
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub default_items_per_page: Option<u32>,
    #[serde(default)]
    pub receive_email_notifications: Option<bool>,
}

impl From<UpdatePreferencesDto> for PreferencesUpdate {
    fn from(dto: UpdatePreferencesDto) -> Self {
        PreferencesUpdate {
            default_items_per_page: dto.default_items_per_page,
            receive_email_notifications: dto.receive_email_notifications,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct UpdateStatusDto {
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct UpdateRoleDto {
    pub role: Role,
}
