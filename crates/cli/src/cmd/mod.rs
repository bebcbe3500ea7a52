mod inspect;
mod resolve;
mod settings;

pub use inspect::cmd_inspect;
pub use resolve::cmd_resolve;
pub use settings::cmd_settings;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use rulebind_lib::Session;
use rulebind_lib::description::Description;
use rulebind_lib::rule::Rule;
use rulebind_lib::variable::Variables;

/// Load a build description and apply it to a fresh session.
fn load_session(file: &Path) -> Result<(Session, Variables)> {
  let description =
    Description::load(file).with_context(|| format!("Failed to load build description: {}", file.display()))?;
  let (session, vars) = description
    .instantiate()
    .with_context(|| format!("Failed to apply build description: {}", file.display()))?;
  debug!(
    modules = session.modules().count(),
    targets = session.targets().len(),
    "session ready"
  );
  Ok((session, vars))
}

/// Short description of what a rule slot holds.
fn rule_kind(rule: &Rule) -> &'static str {
  match (rule.procedure().is_some(), rule.actions().is_some()) {
    (true, true) => "procedure+actions",
    (true, false) => "procedure",
    (false, true) => "actions",
    (false, false) => "undefined",
  }
}
