//! Resolve command implementation.
//!
//! Shows which slot a rule name binds to from a given module, whether the
//! lookup fell back to the root module, and the qualified name the rule is
//! exported under.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::{load_session, rule_kind};
use crate::output::{
  OutputFormat, format_list, format_module, print_error, print_json, print_stat, print_success, print_warning,
};

#[derive(Debug, Serialize)]
struct Resolution {
  name: String,
  from: String,
  table: String,
  executes_in: String,
  fallback: bool,
  kind: &'static str,
  global_name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  params: Option<Vec<Vec<String>>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  command: Option<String>,
}

pub fn cmd_resolve(file: &Path, name: &str, module: &str, output: OutputFormat) -> Result<()> {
  let (mut session, _) = load_session(file)?;
  let from = session
    .lookup_module(module)
    .with_context(|| format!("Unknown module: '{}'", module))?;

  let fallback = session.lookup_rule(name, from).is_none();
  let id = session.bind_rule(name, from);
  let global_name = session.global_rule_name(id);

  let rule = session.rule(id);
  let resolution = Resolution {
    name: name.to_string(),
    from: module.to_string(),
    table: session.module_name(rule.table()).to_string(),
    executes_in: session.module_name(rule.module()).to_string(),
    fallback,
    kind: rule_kind(rule),
    global_name: global_name.to_string(),
    params: rule.arguments().map(|args| {
      args
        .formals()
        .iter()
        .map(|formal| formal.iter().map(ToString::to_string).collect())
        .collect()
    }),
    command: rule.actions().map(|actions| actions.command().to_string()),
  };

  if output.is_json() {
    print_json(&resolution)?;
  } else if rule.is_defined() {
    print_success(&format!("{} resolves to a {} rule", name, resolution.kind));
    print_stat("Table", format_module(&resolution.table));
    print_stat("Executes in", format_module(&resolution.executes_in));
    print_stat("Global name", &resolution.global_name);
    if let Some(params) = &resolution.params {
      let params: Vec<_> = params.iter().map(|formal| format_list(formal)).collect();
      print_stat("Parameters", &params.join(" : "));
    }
    if let Some(command) = &resolution.command {
      print_stat("Command", command);
    }
    if fallback && !from.is_root() {
      print_warning(&format!(
        "{} is not defined in module '{}'; resolved in the root module",
        name, module
      ));
    }
  }

  if let Err(err) = session.require_defined(id) {
    if !output.is_json() {
      print_error(&err.to_string());
    }
    return Err(err.into());
  }
  Ok(())
}
