//! Shared helpers for library integration tests.

use std::path::PathBuf;
use std::rc::Rc;

use rulebind_lib::Session;
use rulebind_lib::description::Description;
use rulebind_lib::module::ModuleId;
use rulebind_lib::rule::{ArgumentList, Procedure, RuleId};
use rulebind_lib::variable::Variables;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("library")
    .join("fixtures")
    .join(name)
}

/// Load a fixture description into a fresh session.
pub fn load_fixture(name: &str) -> (Session, Variables) {
  let description =
    Description::load(&fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e));
  description
    .instantiate()
    .unwrap_or_else(|e| panic!("Failed to apply fixture {}: {}", name, e))
}

/// Define a one-parameter body rule.
pub fn define(session: &mut Session, module: ModuleId, name: &str, text: &str, exported: bool) -> RuleId {
  let formals = vec![session.list(["targets"])];
  let args = Rc::new(ArgumentList::new(formals));
  session.new_rule_body(module, name, Some(args), Rc::new(Procedure::new(text)), exported)
}
