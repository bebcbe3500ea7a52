//! Settings command implementation.
//!
//! Pushes a target's settings onto the global variables, reports the values
//! in effect, then pops them and checks the globals were restored.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::Serialize;
use tracing::debug;

use rulebind_lib::variable::Variables;

use super::load_session;
use crate::output::{OutputFormat, format_list, print_info, print_json, print_stat, print_success};

#[derive(Debug, Serialize)]
struct SettingsReport {
  target: String,
  overrides: BTreeMap<String, Vec<String>>,
  effective: BTreeMap<String, Vec<String>>,
}

fn snapshot(vars: &Variables) -> BTreeMap<String, Vec<String>> {
  vars
    .iter()
    .map(|(symbol, value)| (symbol.to_string(), value.iter().map(ToString::to_string).collect()))
    .collect()
}

pub fn cmd_settings(file: &Path, target: &str, output: OutputFormat) -> Result<()> {
  let (mut session, mut vars) = load_session(file)?;
  let id = session
    .lookup_target(target)
    .with_context(|| format!("Unknown target: {}", target))?;
  let head = session.target(id).settings;

  let overrides = session
    .settings()
    .iter(head)
    .map(|(symbol, value)| (symbol.to_string(), value.iter().map(ToString::to_string).collect()))
    .collect();

  let before = snapshot(&vars);
  let effective = {
    let scope = session.scope_settings(head, &mut vars);
    snapshot(scope.env())
  };
  ensure!(
    snapshot(&vars) == before,
    "Global variables were not restored after popping settings of {}",
    target
  );
  debug!(target_name = %target, "settings restored");

  let report = SettingsReport {
    target: target.to_string(),
    overrides,
    effective,
  };

  if output.is_json() {
    return print_json(&report);
  }

  if report.overrides.is_empty() {
    print_info(&format!("{} has no target-specific settings", target));
  } else {
    print_success(&format!("{} sets {} variable(s)", target, report.overrides.len()));
    for (name, value) in &report.overrides {
      print_stat(name, &format_list(value));
    }
  }

  println!();
  print_info("Variables in effect while updating:");
  for (name, value) in &report.effective {
    print_stat(name, &format_list(value));
  }

  Ok(())
}
