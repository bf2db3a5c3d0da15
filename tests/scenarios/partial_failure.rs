//! Scenario: one broken app among good ones.

use std::fs;

use crate::common::*;

#[test]
fn broken_app_fails_alone() {
    let env = TestEnv::new();
    write_app(&env.source(), "appA", "1.0.0");
    let broken = write_app(&env.source(), "appB", "1.0.0");
    fs::remove_dir_all(broken.join("metadata")).unwrap();
    write_app(&env.source(), "appC", "3.0.0");

    let result = env.run("deploy", &["all", "--no-restart", "--json"]);
    assert_eq!(result.exit_code, 1, "{}", result.combined_output());

    assert!(env.target_apps().join("appA").is_dir());
    assert!(env.target_apps().join("appC").is_dir());
    assert!(!env.target_apps().join("appB").exists());

    let events = result.json_lines();
    let summary = events.last().unwrap();
    assert_eq!(summary["event"], "summary");
    assert_eq!(summary["status"], "partial");

    let units = summary["units"].as_array().unwrap();
    let app_b = units.iter().find(|u| u["unit"] == "appB").unwrap();
    assert_eq!(app_b["success"], false);
    assert_eq!(app_b["error"]["kind"], "ValidationError");
    assert_eq!(app_b["error"]["stage"], "validated");

    let failed_event = events
        .iter()
        .find(|e| e["event"] == "unit_error")
        .expect("unit_error event");
    assert_eq!(failed_event["unit"], "appB");
}

#[test]
fn failed_validation_leaves_existing_deployment_untouched() {
    let env = TestEnv::new();
    let broken = write_app(&env.source(), "appB", "2.0.0");
    fs::remove_dir_all(broken.join("metadata")).unwrap();
    let deployed = write_app(&env.target_apps(), "appB", "1.0.0");
    let before = snapshot(&deployed);

    let result = env.run("deploy", &["appB", "--no-restart"]);
    assert_eq!(result.exit_code, 1, "{}", result.combined_output());

    assert_eq!(snapshot(&deployed), before);
    assert!(env.archives_for("appB").is_empty());
    assert!(result.stdout.contains("Failed Apps"));
}
