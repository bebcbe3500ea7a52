use predicates::prelude::*;

use super::common::{fixture_cmd, json_output};

#[test]
fn resolve_local_rule() {
  let mut cmd = fixture_cmd("resolve");
  cmd.args(["Library", "--module", "util."]);
  let resolution = json_output(cmd);

  assert_eq!(resolution["table"], "util.");
  assert_eq!(resolution["fallback"], false);
  assert_eq!(resolution["kind"], "procedure");
  assert_eq!(resolution["global_name"], "util.Library");
  assert_eq!(resolution["params"], serde_json::json!([["lib"], ["objects"]]));
}

#[test]
fn resolve_exported_rule_by_qualified_name() {
  let mut cmd = fixture_cmd("resolve");
  cmd.arg("util.Library");
  let resolution = json_output(cmd);

  assert_eq!(resolution["table"], "");
  assert_eq!(resolution["executes_in"], "util.");
  assert_eq!(resolution["fallback"], false);
}

#[test]
fn resolve_falls_back_to_root() {
  let mut cmd = fixture_cmd("resolve");
  cmd.args(["Cc", "--module", "app."]);
  let resolution = json_output(cmd);

  assert_eq!(resolution["table"], "");
  assert_eq!(resolution["fallback"], true);
  assert_eq!(resolution["kind"], "actions");
  assert_eq!(resolution["command"], "$(CC) $(CFLAGS) -c -o $(<) $(>)");
}

#[test]
fn resolve_text_warns_on_fallback() {
  fixture_cmd("resolve")
    .args(["Cc", "--module", "app."])
    .assert()
    .success()
    .stdout(predicate::str::contains("resolves to a actions rule"))
    .stderr(predicate::str::contains("not defined in module 'app.'"));
}

#[test]
fn resolve_undefined_rule_fails() {
  fixture_cmd("resolve")
    .args(["Helper"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown rule: Helper (in module '')"));
}

#[test]
fn resolve_unknown_module_fails() {
  fixture_cmd("resolve")
    .args(["Cc", "--module", "nowhere."])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Unknown module"));
}
