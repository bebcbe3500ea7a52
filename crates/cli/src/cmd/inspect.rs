//! Inspect command implementation.
//!
//! Lists every module with its rule slots and every target with its
//! dependencies, flags and attached actions.

use std::path::Path;

use anyhow::Result;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use rulebind_lib::Session;
use rulebind_lib::module::ModuleId;
use rulebind_lib::target::{Target, TargetId};

use super::{load_session, rule_kind};
use crate::output::{OutputFormat, format_list, format_module, print_info, print_json, print_stat, symbols};

#[derive(Debug, Serialize)]
struct InspectReport {
  modules: Vec<ModuleReport>,
  targets: Vec<TargetReport>,
}

#[derive(Debug, Serialize)]
struct ModuleReport {
  name: String,
  rules: Vec<RuleReport>,
}

#[derive(Debug, Serialize)]
struct RuleReport {
  name: String,
  kind: &'static str,
  executes_in: String,
  exported: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  rulename: Option<String>,
}

#[derive(Debug, Serialize)]
struct TargetReport {
  name: String,
  flags: Vec<String>,
  depends: Vec<String>,
  includes: Vec<String>,
  actions: Vec<String>,
  settings: usize,
}

pub fn cmd_inspect(file: &Path, verbose: bool, output: OutputFormat) -> Result<()> {
  let (session, _) = load_session(file)?;
  let report = InspectReport {
    modules: session.modules().map(|(id, _)| module_report(&session, id)).collect(),
    targets: session.targets().iter().map(|(id, _)| target_report(&session, id)).collect(),
  };

  if output.is_json() {
    return print_json(&report);
  }

  print_info(&format!("{} module(s)", report.modules.len()));
  for module in &report.modules {
    println!();
    println!("{}:", format_module(&module.name));
    for rule in &module.rules {
      let name = rule.name.if_supports_color(Stream::Stdout, |s| s.bold());
      match &rule.rulename {
        Some(global) if rule.exported => {
          println!("  {} {} ({}) {} {}", symbols::INFO, name, rule.kind, symbols::ARROW, global)
        }
        _ => println!("  {} {} ({})", symbols::INFO, name, rule.kind),
      }
      if verbose && rule.executes_in != module.name {
        print_stat("    executes in", format_module(&rule.executes_in));
      }
    }
  }

  println!();
  print_info(&format!("{} target(s)", report.targets.len()));
  for target in &report.targets {
    if target.flags.is_empty() {
      println!("  {} {}", symbols::INFO, target.name);
    } else {
      println!("  {} {} [{}]", symbols::INFO, target.name, target.flags.join(", "));
    }
    if verbose {
      if !target.depends.is_empty() {
        print_stat("    depends", &format_list(&target.depends));
      }
      if !target.includes.is_empty() {
        print_stat("    includes", &format_list(&target.includes));
      }
      if !target.actions.is_empty() {
        print_stat("    actions", &format_list(&target.actions));
      }
      if target.settings > 0 {
        print_stat("    settings", &target.settings.to_string());
      }
    }
  }

  Ok(())
}

fn module_report(session: &Session, id: ModuleId) -> ModuleReport {
  let rules = session
    .rules_in(id)
    .map(|(_, rule)| RuleReport {
      name: rule.name().to_string(),
      kind: rule_kind(rule),
      executes_in: session.module_name(rule.module()).to_string(),
      exported: rule.exported(),
      rulename: rule
        .procedure()
        .and_then(|procedure| procedure.rulename())
        .map(ToString::to_string),
    })
    .collect();

  ModuleReport {
    name: session.module_name(id).to_string(),
    rules,
  }
}

fn target_report(session: &Session, id: TargetId) -> TargetReport {
  let target: &Target = session.target(id);
  let names = |ids: &[TargetId]| -> Vec<String> { ids.iter().map(|&id| session.target(id).name.to_string()).collect() };

  TargetReport {
    name: target.name.to_string(),
    flags: target
      .flags
      .iter_names()
      .map(|(name, _)| name.to_lowercase())
      .collect(),
    depends: names(target.depends.as_slice()),
    includes: names(target.includes.as_slice()),
    actions: target
      .actions
      .iter()
      .map(|action| session.rule(action.rule).name().to_string())
      .collect(),
    settings: session.settings().iter(target.settings).count(),
  }
}
