// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use breachwatch_console::domain::models::settings_input::{RawScheduleInput, RawSettingsInput};
use breachwatch_console::domain::services::config_translator::translate;
use serde_json::json;

fn form() -> RawSettingsInput {
    RawSettingsInput {
        keywords: "password\n\n NIK ,".to_string(),
        file_extensions: ".SQL, .env".to_string(),
        seed_urls: "https://example.com".to_string(),
        search_queries: "site:example.com filetype:sql".to_string(),
        proxies: Some("  ".to_string()),
        custom_user_agent: Some(" breachwatch/1.0 ".to_string()),
        ..RawSettingsInput::default()
    }
}

#[test]
fn test_descriptor_wire_shape_without_schedule() {
    let translation = translate(&form());
    let wire = serde_json::to_value(&translation.descriptor).unwrap();

    assert_eq!(wire["keywords"], json!(["password", "NIK"]));
    assert_eq!(wire["search_dorks"], json!(["site:example.com filetype:sql"]));
    assert_eq!(wire["max_results_per_dork"], 20);
    assert_eq!(wire["proxies"], json!(null));
    assert_eq!(wire["custom_user_agent"], "breachwatch/1.0");
    assert_eq!(wire["schedule"], json!(null));
}

#[test]
fn test_one_time_schedule_wire_shape() {
    let mut raw = form();
    raw.schedule = RawScheduleInput {
        enabled: true,
        schedule_type: "one-time".to_string(),
        cron_expression: String::new(),
        run_date: Some("2030-01-02".to_string()),
        run_time: Some("03:04".to_string()),
        timezone: Some("UTC".to_string()),
    };

    let translation = translate(&raw);
    let wire = serde_json::to_value(&translation.descriptor).unwrap();

    assert!(translation.warnings.is_empty());
    assert_eq!(
        wire["schedule"],
        json!({
            "type": "one-time",
            "run_at": "2030-01-02T03:04:00Z",
            "timezone": "UTC"
        })
    );
}

#[test]
fn test_disabled_schedule_is_dropped() {
    let mut raw = form();
    raw.schedule = RawScheduleInput {
        enabled: false,
        schedule_type: "recurring".to_string(),
        cron_expression: "0 3 * * *".to_string(),
        ..RawScheduleInput::default()
    };

    let translation = translate(&raw);

    assert_eq!(translation.descriptor.schedule, None);
    assert!(translation.warnings.is_empty());
}
