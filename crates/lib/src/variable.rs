//! Variable environment consulted by the settings stack.
//!
//! The settings stack only needs one primitive from the environment: install a
//! value for a variable and hand back whatever was there before. [`VarEnv`]
//! captures that, and [`Variables`] is the map-backed environment used by the
//! build description loader and the CLI.

use std::collections::HashMap;

use crate::symbol::{List, Symbol};

/// An environment of list-valued variables.
pub trait VarEnv {
  /// Install `value` for `symbol` and return the value it replaces.
  ///
  /// An unset variable swaps out as an empty list.
  fn swap(&mut self, symbol: &Symbol, value: List) -> List;
}

/// How [`Variables::set`] combines a new value with the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignMode {
  /// `X = v` replaces the value.
  #[default]
  Set,
  /// `X += v` appends to the value.
  Append,
  /// `X ?= v` assigns only when the variable is unset or empty.
  Default,
}

/// Map-backed variable environment.
#[derive(Debug, Clone, Default)]
pub struct Variables {
  vars: HashMap<Symbol, List>,
}

impl Variables {
  pub fn new() -> Self {
    Self::default()
  }

  /// Current value of `name`, empty when unset.
  pub fn get(&self, name: &str) -> &[Symbol] {
    self.vars.get(name).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn is_set(&self, name: &str) -> bool {
    self.vars.contains_key(name)
  }

  pub fn set(&mut self, symbol: Symbol, value: List, mode: AssignMode) {
    match mode {
      AssignMode::Set => {
        self.swap(&symbol, value);
      }
      AssignMode::Append => {
        if !value.is_empty() {
          self.vars.entry(symbol).or_default().extend(value);
        }
      }
      AssignMode::Default => {
        if self.get(&symbol).is_empty() {
          self.swap(&symbol, value);
        }
      }
    }
  }

  /// Iterate over every set variable, in no particular order.
  pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &List)> {
    self.vars.iter()
  }

  pub fn len(&self) -> usize {
    self.vars.len()
  }

  pub fn is_empty(&self) -> bool {
    self.vars.is_empty()
  }
}

impl VarEnv for Variables {
  fn swap(&mut self, symbol: &Symbol, value: List) -> List {
    // An empty value unsets the variable so that restoring an unset variable
    // leaves no entry behind.
    let previous = if value.is_empty() {
      self.vars.remove(symbol)
    } else {
      self.vars.insert(symbol.clone(), value)
    };
    previous.unwrap_or_default()
  }
}
