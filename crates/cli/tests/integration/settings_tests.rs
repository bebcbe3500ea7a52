use predicates::prelude::*;

use super::common::{fixture_cmd, json_output};

#[test]
fn settings_override_globals() {
  let mut cmd = fixture_cmd("settings");
  cmd.arg("str.o");
  let report = json_output(cmd);

  assert_eq!(report["overrides"]["CC"], serde_json::json!(["clang"]));
  assert_eq!(report["effective"]["CC"], serde_json::json!(["clang"]));
  assert_eq!(report["effective"]["CFLAGS"], serde_json::json!(["-O2"]));
  assert_eq!(report["effective"]["DEFINES"], serde_json::json!(["NDEBUG"]));
}

#[test]
fn settings_without_overrides() {
  fixture_cmd("settings")
    .arg("all")
    .assert()
    .success()
    .stdout(predicate::str::contains("has no target-specific settings"))
    .stdout(predicate::str::contains("-O2"));
}

#[test]
fn settings_unknown_target_fails() {
  fixture_cmd("settings")
    .arg("nothing.o")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Unknown target: nothing.o"));
}
