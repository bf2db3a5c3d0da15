//! Scenario: two apps deployed into an empty target.

use std::fs;

use crate::common::*;

#[test]
fn deploys_two_apps_into_empty_target() {
    let env = TestEnv::new();
    write_app(&env.source(), "appA", "1.0.0");
    write_app(&env.source(), "appB", "1.4.2");

    let result = env.run(
        "deploy",
        &["appA", "appB", "--app-version", "appA=2.0.0", "--no-restart"],
    );
    assert!(result.is_success(), "{}", result.combined_output());

    let deployed_a = env.target_apps().join("appA");
    let deployed_b = env.target_apps().join("appB");
    assert_eq!(launcher_value(&deployed_a, "version").as_deref(), Some("2.0.0"));
    assert_eq!(launcher_value(&deployed_b, "version").as_deref(), Some("1.4.2"));
    assert_eq!(
        launcher_value(&deployed_a, "label").as_deref(),
        Some("appA app v2.0.0")
    );

    // source descriptor carries the new version too
    assert_eq!(
        launcher_value(&env.source().join("appA"), "version").as_deref(),
        Some("2.0.0")
    );
    assert_eq!(snapshot(&env.source().join("appA")), snapshot(&deployed_a));

    // nothing was there before, so nothing to back up
    assert!(env.archives_for("appA").is_empty());
    assert!(env.archives_for("appB").is_empty());

    assert!(result.stdout.contains("Deployment Summary"));
    assert!(result.stdout.contains("appA"));
    assert_eq!(env.log_files().len(), 1);
}

#[test]
fn build_number_is_refreshed() {
    let env = TestEnv::new();
    write_app(&env.source(), "appA", "1.0.0");

    let result = env.run("deploy", &["appA", "--no-restart"]);
    assert!(result.is_success(), "{}", result.combined_output());

    let build: u64 = section_value(&env.target_apps().join("appA"), "install", "build")
        .unwrap()
        .parse()
        .unwrap();
    assert!(build > 202401010000);
}

#[test]
fn session_log_records_each_stage() {
    let env = TestEnv::new();
    write_app(&env.source(), "appA", "1.0.0");

    let result = env.run("deploy", &["appA", "--no-restart"]);
    assert!(result.is_success(), "{}", result.combined_output());

    let logs = env.log_files();
    assert_eq!(logs.len(), 1);
    let name = logs[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("deployment_") && name.ends_with(".log"));

    let content = fs::read_to_string(&logs[0]).unwrap();
    for stage in ["validated", "backed-up", "metadata-updated", "replaced", "verified"] {
        assert!(content.contains(stage), "log is missing {stage}:\n{content}");
    }
}

#[cfg(unix)]
#[test]
fn deployed_scripts_are_executable() {
    use std::os::unix::fs::PermissionsExt;

    let env = TestEnv::new();
    write_app(&env.source(), "appA", "1.0.0");

    let result = env.run("deploy", &["appA", "--no-restart"]);
    assert!(result.is_success(), "{}", result.combined_output());

    let deployed = env.target_apps().join("appA");
    let script = fs::metadata(deployed.join("bin/collect.py")).unwrap();
    let readme = fs::metadata(deployed.join("README.txt")).unwrap();
    assert_eq!(script.permissions().mode() & 0o777, 0o755);
    assert_eq!(readme.permissions().mode() & 0o777, 0o644);
}
