mod common;

use common::*;

#[test]
fn validate_reports_each_app() {
    let env = TestEnv::new();
    write_app(&env.source(), "good", "1.0.0");
    let bad = write_app(&env.source(), "bad", "1.0.0");
    std::fs::remove_dir_all(bad.join("metadata")).unwrap();

    let result = env.run("validate", &[]);

    assert_eq!(result.exit_code, 1, "{}", result.combined_output());
    assert!(result.stdout.contains("[OK] good"), "{}", result.stdout);
    assert!(result.stdout.contains("[FAIL] bad: missing required directory"), "{}", result.stdout);
}

#[test]
fn validate_selected_app_only() {
    let env = TestEnv::new();
    write_app(&env.source(), "good", "1.0.0");
    let bad = write_app(&env.source(), "bad", "1.0.0");
    std::fs::remove_dir_all(bad.join("metadata")).unwrap();

    let result = env.run("validate", &["good", "--json"]);

    assert!(result.is_success(), "{}", result.combined_output());
    let lines = result.json_lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["unit"], "good");
    assert_eq!(lines[0]["valid"], true);
}

#[test]
fn validate_never_touches_target() {
    let env = TestEnv::new();
    write_app(&env.source(), "good", "1.0.0");

    let result = env.run("validate", &["all"]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert!(!env.target_apps().join("good").exists());
    assert!(env.log_files().is_empty());
}
