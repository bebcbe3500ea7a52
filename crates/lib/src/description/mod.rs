//! Declarative build descriptions.
//!
//! A build description is a JSON document that drives a [`Session`] the way a
//! parsed Jamfile would: it defines rules and actions in modules, imports
//! rules between modules, declares dependencies, sets target flags and
//! target-specific variables, and invokes actions rules on targets.
//!
//! Statements are applied in order, so later definitions replace earlier ones
//! exactly as they would in a Jamfile.

mod types;

pub use types::*;

use std::fs;
use std::io;
use std::path::Path;
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, info};

use crate::rule::{ActionFlags, ArgumentList, Procedure, RuleError};
use crate::session::Session;
use crate::target::{TargetChain, TargetFlags};
use crate::variable::{AssignMode, Variables};

/// Errors that can occur when loading or applying a build description.
#[derive(Debug, Error)]
pub enum DescriptionError {
  /// Failed to read the description file.
  #[error("failed to read build description: {0}")]
  Read(#[source] io::Error),

  /// Failed to parse the description JSON.
  #[error("failed to parse build description: {0}")]
  Parse(#[source] serde_json::Error),

  /// An import names a rule its source module does not define.
  #[error("cannot import unknown rule {name} from module '{module}'")]
  UnknownRule { module: String, name: String },

  /// An invoked rule is undefined.
  #[error(transparent)]
  Rule(#[from] RuleError),
}

impl Description {
  /// Read and parse a description file.
  pub fn load(path: &Path) -> Result<Self, DescriptionError> {
    let content = fs::read_to_string(path).map_err(DescriptionError::Read)?;
    let description = Self::parse(&content)?;
    debug!(
      path = %path.display(),
      statements = description.statements.len(),
      "loaded build description"
    );
    Ok(description)
  }

  pub fn parse(content: &str) -> Result<Self, DescriptionError> {
    serde_json::from_str(content).map_err(DescriptionError::Parse)
  }

  /// Create a session sized by this description's config and apply it.
  pub fn instantiate(&self) -> Result<(Session, Variables), DescriptionError> {
    let mut session = Session::with_config(self.config.clone());
    let mut vars = Variables::new();
    self.apply(&mut session, &mut vars)?;
    Ok((session, vars))
  }

  /// Apply the variables and statements to `session` and `vars`.
  pub fn apply(&self, session: &mut Session, vars: &mut Variables) -> Result<(), DescriptionError> {
    info!(
      variables = self.variables.len(),
      statements = self.statements.len(),
      "applying build description"
    );

    for (name, value) in &self.variables {
      let symbol = session.intern(name);
      let value = session.list(value);
      vars.set(symbol, value, AssignMode::Set);
    }

    for statement in &self.statements {
      apply_statement(session, statement)?;
    }
    Ok(())
  }
}

fn apply_statement(session: &mut Session, statement: &Statement) -> Result<(), DescriptionError> {
  match statement {
    Statement::Rule {
      module,
      name,
      params,
      body,
      exported,
    } => {
      let module = session.bind_module(module);
      let formals = params.iter().map(|param| session.list(param)).collect();
      let args = Rc::new(ArgumentList::new(formals));
      let procedure = Rc::new(Procedure::new(body.as_str()));
      session.new_rule_body(module, name, Some(args), procedure, *exported);
    }

    Statement::Actions {
      module,
      name,
      command,
      bindlist,
      flags,
    } => {
      let module = session.bind_module(module);
      let bindlist = session.list(bindlist);
      let flags = flags.iter().fold(ActionFlags::empty(), |acc, &flag| acc | ActionFlags::from(flag));
      session.new_rule_actions(module, name, command, bindlist, flags);
    }

    Statement::Import {
      from,
      rule,
      module,
      alias,
    } => {
      let source = session
        .lookup_module(from)
        .and_then(|from| session.lookup_rule(rule, from))
        .ok_or_else(|| DescriptionError::UnknownRule {
          module: from.clone(),
          name: rule.clone(),
        })?;
      let module = session.bind_module(module);
      session.import_rule(source, module, alias.as_deref().unwrap_or(rule));
    }

    Statement::Depends { targets, sources } => session.add_depends(targets, sources),

    Statement::Includes { targets, sources } => session.add_includes(targets, sources),

    Statement::Touch { targets } => {
      for name in targets {
        session.touch_target(name);
      }
    }

    Statement::Flags { targets, flags } => {
      let flags = flags.iter().fold(TargetFlags::empty(), |acc, &flag| acc | TargetFlags::from(flag));
      for name in targets {
        let id = session.bind_target(name);
        session.target_mut(id).flags |= flags;
      }
    }

    Statement::On {
      targets,
      variable,
      value,
      append,
    } => {
      for name in targets {
        let id = session.bind_target(name);
        let value = session.list(value);
        session.set_on_target(id, *append, variable, value);
      }
    }

    Statement::Invoke {
      module,
      rule,
      targets,
      sources,
    } => {
      let module = session.bind_module(module);
      let rule = session.bind_rule(rule, module);
      session.require_defined(rule)?;
      let targets = session.target_list(TargetChain::new(), targets);
      let sources = session.target_list(TargetChain::new(), sources);
      if session.rule(rule).actions().is_some() {
        session.attach_action(rule, targets, sources);
      } else {
        // Procedure bodies are run by the interpreter, not by the loader.
        debug!(rule = %session.rule(rule).name(), "invoked rule has no actions");
      }
    }
  }
  Ok(())
}
