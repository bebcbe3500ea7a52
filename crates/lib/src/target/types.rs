use std::rc::Rc;
use std::time::SystemTime;

use crate::rule::RuleId;
use crate::settings::SettingsId;
use crate::symbol::Symbol;

/// Handle to a target record in a session's target table.
///
/// Handles carry the epoch of the table that issued them, so a handle kept
/// across [`TargetTable::clear`](super::TargetTable::clear) no longer resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId {
  pub(crate) epoch: u32,
  pub(crate) index: u32,
}

impl TargetId {
  pub fn index(self) -> usize {
    self.index as usize
  }
}

bitflags::bitflags! {
  /// Per-target flags set by built-in rules and consulted by the scheduler.
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
  pub struct TargetFlags: u32 {
    /// `TEMPORARY`: may be deleted once its dependents are built.
    const TEMP = 1 << 0;
    /// `NOCARE`: missing and unbuildable is not an error.
    const NOCARE = 1 << 1;
    /// `NOTFILE`: phony target, never bound to a file.
    const NOTFILE = 1 << 2;
    /// Forced to be considered updated.
    const TOUCHED = 1 << 3;
    /// `LEAVES`: depends only on its leaf sources.
    const LEAVES = 1 << 4;
    /// `NOUPDATE`: built only if missing.
    const NOUPDATE = 1 << 5;
    /// Created internally, not named by the build description.
    const INTERNAL = 1 << 6;
  }
}

/// Filesystem binding state, owned by the binding and scanning layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Binding {
  #[default]
  Unbound,
  Missing,
  Parents,
  Exists,
}

/// A build target.
///
/// The rule layer only creates records, sets `boundname` and the flag bits,
/// and extends the chains and settings; the remaining fields belong to the
/// scanning and scheduling layers.
#[derive(Debug, Clone)]
pub struct Target {
  pub name: Symbol,
  pub boundname: Symbol,
  pub flags: TargetFlags,
  pub settings: Option<SettingsId>,
  pub depends: TargetChain,
  pub includes: TargetChain,
  pub actions: ActionChain,
  pub binding: Binding,
  pub time: Option<SystemTime>,
}

impl Target {
  pub(crate) fn new(name: Symbol) -> Self {
    Self {
      boundname: name.clone(),
      name,
      flags: TargetFlags::empty(),
      settings: None,
      depends: Chain::new(),
      includes: Chain::new(),
      actions: Chain::new(),
      binding: Binding::Unbound,
      time: None,
    }
  }

  pub fn is_touched(&self) -> bool {
    self.flags.contains(TargetFlags::TOUCHED)
  }
}

/// An append-only ordered sequence with amortized O(1) append.
///
/// Duplicates are kept; callers that need set semantics deduplicate
/// themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain<T> {
  items: Vec<T>,
}

impl<T> Chain<T> {
  pub const fn new() -> Self {
    Self { items: Vec::new() }
  }

  pub fn push(&mut self, item: T) {
    self.items.push(item);
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, T> {
    self.items.iter()
  }

  pub fn as_slice(&self) -> &[T] {
    &self.items
  }

  pub fn first(&self) -> Option<&T> {
    self.items.first()
  }

  /// The most recently appended item.
  pub fn tail(&self) -> Option<&T> {
    self.items.last()
  }
}

impl<T> Default for Chain<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> FromIterator<T> for Chain<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    Self {
      items: iter.into_iter().collect(),
    }
  }
}

impl<'a, T> IntoIterator for &'a Chain<T> {
  type Item = &'a T;
  type IntoIter = std::slice::Iter<'a, T>;

  fn into_iter(self) -> Self::IntoIter {
    self.items.iter()
  }
}

impl<T> IntoIterator for Chain<T> {
  type Item = T;
  type IntoIter = std::vec::IntoIter<T>;

  fn into_iter(self) -> Self::IntoIter {
    self.items.into_iter()
  }
}

pub type TargetChain = Chain<TargetId>;

pub type ActionChain = Chain<Rc<Action>>;

/// One invocation of an actions rule on a set of targets and sources.
///
/// The same action is shared by the action chain of every target it updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
  pub rule: RuleId,
  pub targets: TargetChain,
  pub sources: TargetChain,
}
