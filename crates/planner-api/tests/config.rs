use std::fs;

use planner_api::{ApiError, ClientSettings, PlannerClient};

#[test]
fn settings_file_fills_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner.json");
    fs::write(&path, r#"{"base_url": "https://garden.example.org", "session": "abc123"}"#).unwrap();

    let settings = ClientSettings::from_file(&path).unwrap();

    assert_eq!(settings.base_url, "https://garden.example.org");
    assert_eq!(settings.session.as_deref(), Some("abc123"));
    assert_eq!(settings.timeout_secs, 30);
    assert!(PlannerClient::new(settings).is_ok());
}

#[test]
fn unreadable_or_invalid_files_are_config_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = ClientSettings::from_file(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(missing, ApiError::Config(_)));

    let path = dir.path().join("broken.json");
    fs::write(&path, "{ base_url: ").unwrap();
    let broken = ClientSettings::from_file(&path).unwrap_err();
    assert!(matches!(broken, ApiError::Config(_)));

    let path = dir.path().join("zero.json");
    fs::write(&path, r#"{"timeout_secs": 0}"#).unwrap();
    let zero = ClientSettings::from_file(&path).unwrap_err();
    assert!(zero.to_string().contains("timeout"));
}

#[test]
fn settings_round_trip_through_json() {
    let settings = ClientSettings {
        timeout_secs: 12,
        ..ClientSettings::default()
    };
    let json = serde_json::to_value(&settings).unwrap();
    assert!(json.get("session").is_none());
    let back: ClientSettings = serde_json::from_value(json).unwrap();
    assert_eq!(back, settings);
}
