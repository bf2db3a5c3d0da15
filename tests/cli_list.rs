mod common;

use common::*;

#[test]
fn list_shows_numbered_apps_with_versions() {
    let env = TestEnv::new();
    write_app(&env.source(), "beta", "2.0.1");
    write_app(&env.source(), "alpha", "1.0.0");
    // no descriptor, not an app
    std::fs::create_dir_all(env.source().join("notes")).unwrap();

    let result = env.run("list", &[]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert!(result.stdout.contains("1. alpha (v1.0.0)"), "{}", result.stdout);
    assert!(result.stdout.contains("2. beta (v2.0.1)"), "{}", result.stdout);
    assert!(!result.stdout.contains("notes"));
}

#[test]
fn list_json() {
    let env = TestEnv::new();
    write_app(&env.source(), "alpha", "1.0.0");

    let result = env.run("list", &["--json"]);

    assert!(result.is_success(), "{}", result.combined_output());
    let lines = result.json_lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["event"], "units");
    assert_eq!(lines[0]["units"][0]["index"], 1);
    assert_eq!(lines[0]["units"][0]["name"], "alpha");
    assert_eq!(lines[0]["units"][0]["version"], "1.0.0");
}

#[test]
fn list_empty_source() {
    let env = TestEnv::new();

    let result = env.run("list", &[]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert!(result.stdout.contains("No apps found"));
}

#[test]
fn list_missing_source_fails() {
    let env = TestEnv::new();
    std::fs::remove_dir_all(env.source()).unwrap();

    let result = env.run("list", &["--json"]);

    assert_eq!(result.exit_code, 1);
    let error = result.json_lines().pop().unwrap();
    assert_eq!(error["event"], "error");
    assert_eq!(error["kind"], "SelectionError");
}
