//! Target table and target/action chains.
//!
//! Targets are created on first mention and live until the session is torn
//! down with [`Session::done_rules`](crate::session::Session::done_rules).
//! Their names are interned, and a fresh target is bound to its own name until
//! the binding layer says otherwise.

mod types;

pub use types::*;

use std::collections::HashMap;
use std::rc::Rc;

use tracing::trace;

use crate::symbol::Symbol;

/// Session-wide table mapping target names to target records.
#[derive(Debug, Default)]
pub struct TargetTable {
  targets: Vec<Target>,
  by_name: HashMap<Symbol, TargetId>,
  epoch: u32,
}

impl TargetTable {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      targets: Vec::with_capacity(capacity),
      by_name: HashMap::with_capacity(capacity),
      epoch: 0,
    }
  }

  /// Return the target named `name`, creating it if necessary.
  pub fn bind(&mut self, name: Symbol) -> TargetId {
    if let Some(&id) = self.by_name.get(&name) {
      return id;
    }
    let id = self.id_at(self.targets.len());
    trace!(name = %name, "new target");
    self.targets.push(Target::new(name.clone()));
    self.by_name.insert(name, id);
    id
  }

  pub fn lookup(&self, name: &str) -> Option<TargetId> {
    self.by_name.get(name).copied()
  }

  /// The target behind `id`, or `None` if `id` was issued before the last
  /// [`clear`](Self::clear).
  pub fn get(&self, id: TargetId) -> Option<&Target> {
    if id.epoch != self.epoch {
      return None;
    }
    self.targets.get(id.index())
  }

  pub fn get_mut(&mut self, id: TargetId) -> Option<&mut Target> {
    if id.epoch != self.epoch {
      return None;
    }
    self.targets.get_mut(id.index())
  }

  /// Iterate over targets in creation order.
  pub fn iter(&self) -> impl Iterator<Item = (TargetId, &Target)> {
    self
      .targets
      .iter()
      .enumerate()
      .map(move |(idx, target)| (self.id_at(idx), target))
  }

  pub fn len(&self) -> usize {
    self.targets.len()
  }

  pub fn is_empty(&self) -> bool {
    self.targets.is_empty()
  }

  /// Drop every target record. Handles issued so far become stale.
  pub fn clear(&mut self) {
    self.targets.clear();
    self.by_name.clear();
    self.epoch = self.epoch.wrapping_add(1);
  }

  fn id_at(&self, index: usize) -> TargetId {
    TargetId {
      epoch: self.epoch,
      index: index as u32,
    }
  }
}

impl std::ops::Index<TargetId> for TargetTable {
  type Output = Target;

  fn index(&self, id: TargetId) -> &Target {
    match self.get(id) {
      Some(target) => target,
      None => panic!("stale or unknown target handle {id:?}"),
    }
  }
}

impl std::ops::IndexMut<TargetId> for TargetTable {
  fn index_mut(&mut self, id: TargetId) -> &mut Target {
    match self.get_mut(id) {
      Some(target) => target,
      None => panic!("stale or unknown target handle {id:?}"),
    }
  }
}

/// Append `target` to `chain`.
pub fn target_entry(mut chain: TargetChain, target: TargetId) -> TargetChain {
  chain.push(target);
  chain
}

/// Append `action` to `chain`.
pub fn action_list(mut chain: ActionChain, action: Rc<Action>) -> ActionChain {
  chain.push(action);
  chain
}
