//! Rules and their shared bodies.
//!
//! A rule slot is identified by its name within one module table. Defining a
//! rule installs shared handles to an argument list and a procedure, or to an
//! action template, into the slot. The same handles can be installed into
//! other slots at the same time:
//!
//! - **Export** mirrors a module rule into the root module under the
//!   qualified name `<module-name><rule-name>`. Action rules are always
//!   exported; body rules only when asked.
//! - **Import** binds an existing rule's body under a new name in another
//!   module.
//!
//! In both cases the slots share one body. Replacing the body of one slot
//! leaves the others untouched, and the body is freed when the last slot
//! holding it lets go.
//!
//! # Lookup
//!
//! [`Session::bind_rule`](crate::session::Session::bind_rule) never fails: a
//! name missing from the module resolves to a slot in the root module, which
//! is created empty if needed. An empty slot is the "undefined rule" marker;
//! the invoking layer reports it, see
//! [`Session::require_defined`](crate::session::Session::require_defined).

mod registry;
mod types;

pub use types::*;

use thiserror::Error;

/// Errors reported when invoking rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
  /// The rule has neither a procedure nor actions.
  #[error("unknown rule: {name} (in module '{module}')")]
  Undefined { name: String, module: String },
}
