//! Modules: named scopes that own a rule table.

use std::collections::HashMap;

use crate::rule::RuleId;
use crate::symbol::Symbol;

/// Handle to a module in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(pub(crate) u32);

impl ModuleId {
  /// The root (global) module, created with every session.
  pub const ROOT: ModuleId = ModuleId(0);

  pub fn index(self) -> usize {
    self.0 as usize
  }

  pub fn is_root(self) -> bool {
    self == Self::ROOT
  }
}

/// A module and its rule table.
///
/// The table maps a name to a rule slot. The root module's table also holds
/// the mirrors of exported rules, keyed by their qualified names.
#[derive(Debug)]
pub struct Module {
  name: Symbol,
  rules: HashMap<Symbol, RuleId>,
  order: Vec<RuleId>,
}

impl Module {
  pub(crate) fn new(name: Symbol) -> Self {
    Self {
      name,
      rules: HashMap::new(),
      order: Vec::new(),
    }
  }

  /// The module name, used as the qualifier of its exported rules.
  pub fn name(&self) -> &Symbol {
    &self.name
  }

  pub fn lookup(&self, name: &str) -> Option<RuleId> {
    self.rules.get(name).copied()
  }

  pub(crate) fn insert(&mut self, name: Symbol, rule: RuleId) {
    self.rules.insert(name, rule);
    self.order.push(rule);
  }

  /// Rule slots in the order they were created.
  pub fn rules(&self) -> &[RuleId] {
    &self.order
  }

  pub fn len(&self) -> usize {
    self.order.len()
  }

  pub fn is_empty(&self) -> bool {
    self.order.is_empty()
  }
}
