use predicates::prelude::*;

use super::common::{fixture_cmd, json_output};

#[test]
fn inspect_lists_modules_and_targets() {
  fixture_cmd("inspect")
    .assert()
    .success()
    .stdout(predicate::str::contains("3 module(s)"))
    .stdout(predicate::str::contains("(root):"))
    .stdout(predicate::str::contains("util.Library"))
    .stdout(predicate::str::contains("4 target(s)"))
    .stdout(predicate::str::contains("all [notfile]"));
}

#[test]
fn inspect_verbose_shows_edges() {
  fixture_cmd("inspect")
    .arg("--verbose")
    .assert()
    .success()
    .stdout(predicate::str::contains("depends"))
    .stdout(predicate::str::contains("libutil.a"))
    .stdout(predicate::str::contains("executes in"));
}

#[test]
fn inspect_json_reports_rule_slots() {
  let report = json_output(fixture_cmd("inspect"));

  let modules = report["modules"].as_array().unwrap();
  let names: Vec<_> = modules.iter().map(|m| m["name"].as_str().unwrap()).collect();
  assert_eq!(names, ["", "util.", "app."]);

  let root_rules: Vec<_> = modules[0]["rules"]
    .as_array()
    .unwrap()
    .iter()
    .map(|r| r["name"].as_str().unwrap())
    .collect();
  assert_eq!(root_rules, ["Cc", "util.Archive", "util.Library"]);

  let assist = &modules[2]["rules"][0];
  assert_eq!(assist["name"], "Assist");
  assert_eq!(assist["kind"], "procedure");
  assert_eq!(assist["executes_in"], "util.");
  assert_eq!(assist["rulename"], "util.Helper");
}

#[test]
fn inspect_json_reports_targets() {
  let report = json_output(fixture_cmd("inspect"));

  let targets = report["targets"].as_array().unwrap();
  assert_eq!(targets.len(), 4);

  let lib = targets.iter().find(|t| t["name"] == "libutil.a").unwrap();
  assert_eq!(lib["depends"], serde_json::json!(["str.o"]));
  assert_eq!(lib["actions"], serde_json::json!(["util.Archive"]));

  let obj = targets.iter().find(|t| t["name"] == "str.o").unwrap();
  assert_eq!(obj["settings"], 2);
  assert_eq!(obj["actions"], serde_json::json!(["Cc"]));
}
