use std::cell::OnceCell;
use std::rc::Rc;

use crate::module::ModuleId;
use crate::symbol::{List, Symbol};

/// Handle to a rule slot in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(pub(crate) u32);

impl RuleId {
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

/// Formal parameters of a rule, one list per colon-separated argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentList {
  formals: Vec<List>,
}

impl ArgumentList {
  pub fn new(formals: Vec<List>) -> Self {
    Self { formals }
  }

  pub fn formals(&self) -> &[List] {
    &self.formals
  }

  pub fn len(&self) -> usize {
    self.formals.len()
  }

  pub fn is_empty(&self) -> bool {
    self.formals.is_empty()
  }
}

/// A rule's procedure body.
///
/// The body itself belongs to the parser and is opaque here. The procedure
/// additionally carries the global name of the first rule it was installed
/// in, for diagnostics and profiling.
#[derive(Debug, Default)]
pub struct Procedure {
  body: String,
  rulename: OnceCell<Symbol>,
}

impl Procedure {
  pub fn new(body: impl Into<String>) -> Self {
    Self {
      body: body.into(),
      rulename: OnceCell::new(),
    }
  }

  pub fn body(&self) -> &str {
    &self.body
  }

  /// Global name of the rule this procedure was first defined as.
  pub fn rulename(&self) -> Option<&Symbol> {
    self.rulename.get()
  }

  /// Record `name` unless a name was already recorded.
  pub(crate) fn stamp(&self, name: Symbol) {
    let _ = self.rulename.set(name);
  }
}

bitflags::bitflags! {
  /// Modifiers of an `actions` definition.
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
  pub struct ActionFlags: u32 {
    /// `updated`: pass only the sources that need updating.
    const UPDATED = 1 << 0;
    /// `together`: merge invocations on the same target into one.
    const TOGETHER = 1 << 1;
    /// `ignore`: ignore the command's exit status.
    const IGNORE = 1 << 2;
    /// `quietly`: do not echo the action.
    const QUIETLY = 1 << 3;
    /// `piecemeal`: split the sources to fit the command line limit.
    const PIECEMEAL = 1 << 4;
    /// `existing`: pass only the sources that exist.
    const EXISTING = 1 << 5;
  }
}

/// Shell-action template of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleActions {
  command: String,
  bindlist: List,
  flags: ActionFlags,
}

impl RuleActions {
  pub fn new(command: &str, bindlist: List, flags: ActionFlags) -> Self {
    Self {
      command: command.to_owned(),
      bindlist,
      flags,
    }
  }

  pub fn command(&self) -> &str {
    &self.command
  }

  /// Variables whose values are bound to files before the command runs.
  pub fn bindlist(&self) -> &[Symbol] {
    &self.bindlist
  }

  pub fn flags(&self) -> ActionFlags {
    self.flags
  }
}

/// A rule slot.
///
/// A slot lives in exactly one module table, but the body it holds runs in
/// its *execution module*, which differs from the owning table for global
/// mirrors and imported rules. Body, arguments and actions are shared
/// handles: the same objects may be installed in many slots at once.
#[derive(Debug, Clone)]
pub struct Rule {
  pub(crate) name: Symbol,
  pub(crate) table: ModuleId,
  pub(crate) module: ModuleId,
  pub(crate) procedure: Option<Rc<Procedure>>,
  pub(crate) arguments: Option<Rc<ArgumentList>>,
  pub(crate) actions: Option<Rc<RuleActions>>,
  pub(crate) exported: bool,
}

impl Rule {
  pub(crate) fn new(name: Symbol, table: ModuleId) -> Self {
    Self {
      name,
      table,
      module: table,
      procedure: None,
      arguments: None,
      actions: None,
      exported: false,
    }
  }

  /// Name of the slot in its table.
  pub fn name(&self) -> &Symbol {
    &self.name
  }

  /// The module whose table holds this slot.
  pub fn table(&self) -> ModuleId {
    self.table
  }

  /// The module the rule body executes in.
  pub fn module(&self) -> ModuleId {
    self.module
  }

  pub fn procedure(&self) -> Option<&Rc<Procedure>> {
    self.procedure.as_ref()
  }

  pub fn arguments(&self) -> Option<&Rc<ArgumentList>> {
    self.arguments.as_ref()
  }

  pub fn actions(&self) -> Option<&Rc<RuleActions>> {
    self.actions.as_ref()
  }

  pub fn exported(&self) -> bool {
    self.exported
  }

  /// True if invoking the rule would do something.
  pub fn is_defined(&self) -> bool {
    self.procedure.is_some() || self.actions.is_some()
  }
}
