//! Target-specific variable settings.
//!
//! A settings list is a singly linked chain of `(symbol, value)` overrides
//! attached to a target. Before an action runs, the list is pushed onto the
//! variable environment; afterwards it is popped. Both directions are the same
//! operation: each node swaps its stored value with the variable's current
//! value, so applying the swap twice restores the environment exactly.
//!
//! Nodes live in a [`Slab`] and are addressed by [`SettingsId`]. Freed nodes
//! vacate their slot, and the next allocation reuses the most recently vacated
//! slot, so settings churn across a run stays inside a bounded pool. Every
//! allocation also gets a fresh generation, and a handle whose generation no
//! longer matches its slot is treated as an empty list.
//!
//! # Nesting
//!
//! Push and pop must nest: a list has to be popped before any variable it
//! touches is pushed again by another list, and nothing else may write those
//! variables in between. [`SettingsScope`] enforces the pairing by popping on
//! drop.

mod scope;

pub use scope::SettingsScope;

use slab::Slab;
use tracing::trace;

use crate::symbol::{List, Symbol};
use crate::variable::VarEnv;

/// Handle to one node of a settings list; the head handle identifies the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettingsId {
  key: usize,
  generation: u32,
}

#[derive(Debug)]
struct SettingsNode {
  generation: u32,
  symbol: Symbol,
  value: List,
  next: Option<SettingsId>,
}

/// Arena holding every settings node of a session.
#[derive(Debug, Default)]
pub struct SettingsPool {
  nodes: Slab<SettingsNode>,
  generation: u32,
}

impl SettingsPool {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      nodes: Slab::with_capacity(capacity),
      generation: 0,
    }
  }

  /// Add a deferred `symbol = value` to the list starting at `head`.
  ///
  /// If the symbol is already present, `append` concatenates the new values
  /// after the existing ones; otherwise the old value is dropped and replaced.
  /// A new symbol is linked in as the new head. Returns the head of the list,
  /// which the caller must use from now on. A freed `head` starts a new list.
  pub fn add(&mut self, head: Option<SettingsId>, append: bool, symbol: Symbol, value: List) -> SettingsId {
    let head = head.filter(|&head| self.is_live(head));
    if let Some(head) = head
      && let Some(id) = self.find(Some(head), &symbol)
      && let Some(node) = self.node_mut(id)
    {
      if append {
        node.value.extend(value);
      } else {
        node.value = value;
      }
      return head;
    }

    self.generation = self.generation.wrapping_add(1);
    let generation = self.generation;
    let key = self.nodes.insert(SettingsNode {
      generation,
      symbol,
      value,
      next: head,
    });
    trace!(slot = key, generation, "allocated settings node");
    SettingsId { key, generation }
  }

  /// Swap every setting in the list with the environment's current value.
  pub fn push<E: VarEnv + ?Sized>(&mut self, head: Option<SettingsId>, env: &mut E) {
    let mut cursor = head;
    while let Some(id) = cursor {
      let Some(node) = self.node_mut(id) else {
        break;
      };
      let value = std::mem::take(&mut node.value);
      node.value = env.swap(&node.symbol, value);
      trace!(symbol = %node.symbol, "swapped target setting");
      cursor = node.next;
    }
  }

  /// Restore the values replaced by [`push`](Self::push).
  ///
  /// Swapping is its own inverse, so this is the same operation.
  pub fn pop<E: VarEnv + ?Sized>(&mut self, head: Option<SettingsId>, env: &mut E) {
    self.push(head, env);
  }

  /// Release every node of the list back to the pool.
  ///
  /// `head` and every handle reachable from it are stale afterwards: they
  /// read as an empty list even once their slots are reused.
  pub fn free(&mut self, head: Option<SettingsId>) {
    let mut cursor = head;
    while let Some(id) = cursor {
      if !self.is_live(id) {
        break;
      }
      let node = self.nodes.remove(id.key);
      cursor = node.next;
    }
  }

  /// Returns true if `id` still refers to the node it was created for.
  pub fn is_live(&self, id: SettingsId) -> bool {
    self.node(id).is_some()
  }

  /// Value of `symbol` in the list, if it is set there.
  pub fn get(&self, head: Option<SettingsId>, symbol: &str) -> Option<&List> {
    let node = self.node(self.find(head, symbol)?)?;
    Some(&node.value)
  }

  /// Iterate over the list from its head.
  pub fn iter(&self, head: Option<SettingsId>) -> Iter<'_> {
    Iter { pool: self, cursor: head }
  }

  /// Number of live nodes across all lists.
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Number of node slots available without growing the pool.
  pub fn vacant(&self) -> usize {
    self.nodes.capacity() - self.nodes.len()
  }

  /// Drop every node and return the pool's storage to the allocator.
  ///
  /// Generations keep counting, so handles from before the drain stay stale.
  pub fn drain(&mut self) {
    self.nodes.clear();
    self.nodes.shrink_to_fit();
  }

  fn find(&self, head: Option<SettingsId>, symbol: &str) -> Option<SettingsId> {
    let mut cursor = head;
    while let Some(id) = cursor {
      let node = self.node(id)?;
      if node.symbol.as_str() == symbol {
        return Some(id);
      }
      cursor = node.next;
    }
    None
  }

  fn node(&self, id: SettingsId) -> Option<&SettingsNode> {
    self.nodes.get(id.key).filter(|node| node.generation == id.generation)
  }

  fn node_mut(&mut self, id: SettingsId) -> Option<&mut SettingsNode> {
    self.nodes.get_mut(id.key).filter(|node| node.generation == id.generation)
  }
}

/// Iterator over one settings list.
pub struct Iter<'a> {
  pool: &'a SettingsPool,
  cursor: Option<SettingsId>,
}

impl<'a> Iterator for Iter<'a> {
  type Item = (&'a Symbol, &'a List);

  fn next(&mut self) -> Option<Self::Item> {
    let node = self.pool.node(self.cursor?)?;
    self.cursor = node.next;
    Some((&node.symbol, &node.value))
  }
}
