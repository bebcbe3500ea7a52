//! rulebind-lib: rule and target binding for a jam-style build tool
//!
//! This crate provides the state a Jamfile interpreter builds up before the
//! scheduler runs:
//! - `Session`: context object owning modules, rules, targets and settings
//! - `Rule`: a named slot sharing a procedure or action template with its
//!   exported and imported aliases
//! - `Target`: a named build node with dependencies, actions and flags
//! - `SettingsPool`: per-target variable overrides pushed around actions
//! - `Description`: a JSON build description applied to a session

pub mod description;
pub mod module;
pub mod rule;
pub mod session;
pub mod settings;
pub mod symbol;
pub mod target;
pub mod variable;

pub use session::{Session, SessionConfig};
