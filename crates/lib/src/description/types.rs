use std::collections::BTreeMap;

use serde::Deserialize;

use crate::rule::ActionFlags;
use crate::session::SessionConfig;
use crate::target::TargetFlags;

/// A declarative build description.
///
/// # Example
///
/// ```json
/// {
///   "variables": { "CC": ["cc"] },
///   "statements": [
///     { "kind": "actions", "name": "Cc", "command": "$(CC) -c -o $(<) $(>)" },
///     { "kind": "rule", "module": "util.", "name": "Obj", "params": [["target"], ["source"]],
///       "body": "Cc $(target) : $(source) ;", "exported": true },
///     { "kind": "depends", "targets": ["all"], "sources": ["main.o"] },
///     { "kind": "on", "targets": ["main.o"], "variable": "CC", "value": ["clang"] },
///     { "kind": "invoke", "rule": "Cc", "targets": ["main.o"], "sources": ["main.c"] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Description {
  /// Table sizing for the session the description is loaded into.
  #[serde(default)]
  pub config: SessionConfig,

  /// Initial global variables.
  #[serde(default)]
  pub variables: BTreeMap<String, Vec<String>>,

  /// Statements, applied in order.
  #[serde(default)]
  pub statements: Vec<Statement>,
}

/// One statement of a build description.
///
/// Module names default to the root module (`""`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum Statement {
  /// `rule name ( params ) { body }`
  Rule {
    #[serde(default)]
    module: String,
    name: String,
    #[serde(default)]
    params: Vec<Vec<String>>,
    #[serde(default)]
    body: String,
    #[serde(default)]
    exported: bool,
  },

  /// `actions flags name bind vars { command }`
  Actions {
    #[serde(default)]
    module: String,
    name: String,
    command: String,
    #[serde(default)]
    bindlist: Vec<String>,
    #[serde(default)]
    flags: Vec<ActionFlag>,
  },

  /// Bind `rule` from module `from` as `alias` (default: same name) in `module`.
  Import {
    #[serde(default)]
    from: String,
    rule: String,
    #[serde(default)]
    module: String,
    #[serde(default, rename = "as")]
    alias: Option<String>,
  },

  /// `DEPENDS targets : sources ;`
  Depends { targets: Vec<String>, sources: Vec<String> },

  /// `INCLUDES targets : sources ;`
  Includes { targets: Vec<String>, sources: Vec<String> },

  /// Mark targets as touched (`jam -t`).
  Touch { targets: Vec<String> },

  /// `NOTFILE`, `NOCARE`, `TEMPORARY`, ... on targets.
  Flags { targets: Vec<String>, flags: Vec<TargetFlag> },

  /// `variable on targets = value ;` (or `+=` with `append`).
  On {
    targets: Vec<String>,
    variable: String,
    value: Vec<String>,
    #[serde(default)]
    append: bool,
  },

  /// Invoke an actions rule on targets and sources.
  Invoke {
    #[serde(default)]
    module: String,
    rule: String,
    targets: Vec<String>,
    #[serde(default)]
    sources: Vec<String>,
  },
}

/// Action modifier names as written in a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionFlag {
  Updated,
  Together,
  Ignore,
  Quietly,
  Piecemeal,
  Existing,
}

impl From<ActionFlag> for ActionFlags {
  fn from(flag: ActionFlag) -> Self {
    match flag {
      ActionFlag::Updated => ActionFlags::UPDATED,
      ActionFlag::Together => ActionFlags::TOGETHER,
      ActionFlag::Ignore => ActionFlags::IGNORE,
      ActionFlag::Quietly => ActionFlags::QUIETLY,
      ActionFlag::Piecemeal => ActionFlags::PIECEMEAL,
      ActionFlag::Existing => ActionFlags::EXISTING,
    }
  }
}

/// Target flag names as written in a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetFlag {
  Temporary,
  Nocare,
  Notfile,
  Leaves,
  Noupdate,
}

impl From<TargetFlag> for TargetFlags {
  fn from(flag: TargetFlag) -> Self {
    match flag {
      TargetFlag::Temporary => TargetFlags::TEMP,
      TargetFlag::Nocare => TargetFlags::NOCARE,
      TargetFlag::Notfile => TargetFlags::NOTFILE,
      TargetFlag::Leaves => TargetFlags::LEAVES,
      TargetFlag::Noupdate => TargetFlags::NOUPDATE,
    }
  }
}
