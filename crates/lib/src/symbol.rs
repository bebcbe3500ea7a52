//! Interned strings.
//!
//! Every name that passes through a [`Session`](crate::session::Session) (rule
//! names, module names, target names, variable names, list items) is interned
//! once and shared afterwards. Interned strings are never released before the
//! session itself is dropped.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// An interned, cheaply clonable string.
///
/// Two symbols compare equal when their text is equal, so a `Symbol` produced
/// by one interner can still be used to look up a key created by another.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Rc<str>);

impl Symbol {
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Returns true if both symbols point at the same interned allocation.
  pub fn ptr_eq(&self, other: &Symbol) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }
}

impl Deref for Symbol {
  type Target = str;

  fn deref(&self) -> &str {
    &self.0
  }
}

impl Borrow<str> for Symbol {
  fn borrow(&self) -> &str {
    &self.0
  }
}

impl AsRef<str> for Symbol {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for Symbol {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl fmt::Debug for Symbol {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:?}", &*self.0)
  }
}

impl PartialEq<str> for Symbol {
  fn eq(&self, other: &str) -> bool {
    &*self.0 == other
  }
}

impl PartialEq<&str> for Symbol {
  fn eq(&self, other: &&str) -> bool {
    &*self.0 == *other
  }
}

/// An ordered sequence of interned strings, the value type of every variable.
pub type List = Vec<Symbol>;

/// Get-or-create table of interned strings.
#[derive(Debug, Default)]
pub struct Interner {
  strings: HashSet<Rc<str>>,
}

impl Interner {
  pub fn new() -> Self {
    Self::default()
  }

  /// Intern `name`, returning the shared symbol.
  ///
  /// Uses `Rc::from()` for a single allocation shared between the table and
  /// every symbol handed out.
  pub fn intern(&mut self, name: &str) -> Symbol {
    if let Some(existing) = self.strings.get(name) {
      return Symbol(existing.clone());
    }
    let shared: Rc<str> = Rc::from(name);
    self.strings.insert(shared.clone());
    Symbol(shared)
  }

  /// Intern every item of `items` into a [`List`], preserving order.
  pub fn list<I, S>(&mut self, items: I) -> List
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    items.into_iter().map(|s| self.intern(s.as_ref())).collect()
  }

  pub fn len(&self) -> usize {
    self.strings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.strings.is_empty()
  }
}
