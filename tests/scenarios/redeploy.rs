//! Scenario: redeploying over an existing installation, then rolling back.

use crate::common::*;

#[test]
fn redeploy_backs_up_previous_copy_each_time() {
    let env = TestEnv::new();
    write_app(&env.source(), "appA", "1.0.0");
    write_app(&env.target_apps(), "appA", "0.9.0");

    let first = env.run("deploy", &["appA", "--app-version", "appA=2.0.0", "--no-restart"]);
    assert!(first.is_success(), "{}", first.combined_output());
    assert_eq!(env.archives_for("appA").len(), 1);

    let second = env.run("deploy", &["appA", "--app-version", "appA=2.0.0", "--no-restart"]);
    assert!(second.is_success(), "{}", second.combined_output());

    let archives = env.archives_for("appA");
    assert_eq!(archives.len(), 2, "archives: {archives:?}");
    assert_ne!(archives[0], archives[1]);

    let deployed = env.target_apps().join("appA");
    assert_eq!(launcher_value(&deployed, "version").as_deref(), Some("2.0.0"));
    assert_eq!(snapshot(&env.source().join("appA")), snapshot(&deployed));
}

#[test]
fn repeated_deploys_do_not_stack_label_suffixes() {
    let env = TestEnv::new();
    write_app(&env.source(), "appA", "1.0.0");

    for _ in 0..3 {
        let result = env.run("deploy", &["appA", "--app-version", "appA=2.1.0", "--no-restart"]);
        assert!(result.is_success(), "{}", result.combined_output());
    }

    assert_eq!(
        launcher_value(&env.target_apps().join("appA"), "label").as_deref(),
        Some("appA app v2.1.0")
    );
}

#[test]
fn restore_brings_back_the_previous_version() {
    let env = TestEnv::new();
    write_app(&env.source(), "appA", "1.0.0");
    write_app(&env.target_apps(), "appA", "0.9.0");

    let deploy = env.run("deploy", &["appA", "--app-version", "appA=2.0.0", "--no-restart"]);
    assert!(deploy.is_success(), "{}", deploy.combined_output());
    let archive = env.archives_for("appA").pop().expect("backup archive");

    let restore = env.run("restore", &[archive.to_str().unwrap()]);
    assert!(restore.is_success(), "{}", restore.combined_output());

    let restored = env.target_apps().join("appA");
    assert_eq!(launcher_value(&restored, "version").as_deref(), Some("0.9.0"));
    assert!(restored.join("metadata/default.meta").is_file());
}
