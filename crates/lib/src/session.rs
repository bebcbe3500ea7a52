//! The build session.
//!
//! A [`Session`] owns every table the rule layer works with for one run: the
//! interner, the modules and their rule tables, the target table and the
//! settings pool. It is created before parsing starts, consulted by the
//! scheduler while actions run, and torn down with [`Session::done_rules`].
//!
//! Sessions are single-threaded (`!Send`): definitions, imports and exports
//! happen during setup, and action execution only reads rules and swaps
//! settings.

use std::collections::HashMap;
use std::rc::Rc;

use serde::Deserialize;
use tracing::{debug, info};

use crate::module::{Module, ModuleId};
use crate::rule::{Rule, RuleId};
use crate::settings::{SettingsId, SettingsPool, SettingsScope};
use crate::symbol::{Interner, List, Symbol};
use crate::target::{Action, Target, TargetChain, TargetFlags, TargetId, TargetTable, action_list, target_entry};
use crate::variable::VarEnv;

/// Sizing knobs for a session's tables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
  /// Initial capacity of the target table.
  pub target_capacity: usize,

  /// Initial number of settings node slots.
  pub settings_capacity: usize,
}

impl Default for SessionConfig {
  fn default() -> Self {
    Self {
      target_capacity: 256,
      settings_capacity: 64,
    }
  }
}

/// Context object owning all rule, target and settings state of one run.
#[derive(Debug)]
pub struct Session {
  config: SessionConfig,
  pub(crate) interner: Interner,
  pub(crate) modules: Vec<Module>,
  pub(crate) module_names: HashMap<Symbol, ModuleId>,
  pub(crate) rules: Vec<Rule>,
  targets: TargetTable,
  settings: SettingsPool,
}

impl Default for Session {
  fn default() -> Self {
    Self::new()
  }
}

impl Session {
  pub fn new() -> Self {
    Self::with_config(SessionConfig::default())
  }

  pub fn with_config(config: SessionConfig) -> Self {
    let mut interner = Interner::new();
    let root_name = interner.intern("");
    let mut module_names = HashMap::new();
    module_names.insert(root_name.clone(), ModuleId::ROOT);

    Self {
      targets: TargetTable::with_capacity(config.target_capacity),
      settings: SettingsPool::with_capacity(config.settings_capacity),
      config,
      interner,
      modules: vec![Module::new(root_name)],
      module_names,
      rules: Vec::new(),
    }
  }

  pub fn config(&self) -> &SessionConfig {
    &self.config
  }

  pub fn intern(&mut self, name: &str) -> Symbol {
    self.interner.intern(name)
  }

  /// Intern every item into a [`List`].
  pub fn list<I, S>(&mut self, items: I) -> List
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    self.interner.list(items)
  }

  // ===========================================================================
  // Modules
  // ===========================================================================

  pub fn root_module(&self) -> ModuleId {
    ModuleId::ROOT
  }

  /// Return the module named `name`, creating it if necessary.
  ///
  /// The empty name is the root module. The name is used verbatim as the
  /// qualifier of exported rules, so modules conventionally end in a dot
  /// (`"util."`).
  pub fn bind_module(&mut self, name: &str) -> ModuleId {
    if let Some(&id) = self.module_names.get(name) {
      return id;
    }
    let name = self.interner.intern(name);
    let id = ModuleId(self.modules.len() as u32);
    debug!(module = %name, "new module");
    self.modules.push(Module::new(name.clone()));
    self.module_names.insert(name, id);
    id
  }

  pub fn lookup_module(&self, name: &str) -> Option<ModuleId> {
    self.module_names.get(name).copied()
  }

  pub fn module(&self, id: ModuleId) -> &Module {
    &self.modules[id.index()]
  }

  pub fn module_name(&self, id: ModuleId) -> &Symbol {
    self.module(id).name()
  }

  /// Iterate over modules in creation order, root first.
  pub fn modules(&self) -> impl Iterator<Item = (ModuleId, &Module)> {
    self
      .modules
      .iter()
      .enumerate()
      .map(|(idx, module)| (ModuleId(idx as u32), module))
  }

  // ===========================================================================
  // Targets
  // ===========================================================================

  /// Return the target named `name`, creating it if necessary.
  pub fn bind_target(&mut self, name: &str) -> TargetId {
    if let Some(id) = self.targets.lookup(name) {
      return id;
    }
    let name = self.interner.intern(name);
    self.targets.bind(name)
  }

  pub fn lookup_target(&self, name: &str) -> Option<TargetId> {
    self.targets.lookup(name)
  }

  pub fn target(&self, id: TargetId) -> &Target {
    &self.targets[id]
  }

  pub fn target_mut(&mut self, id: TargetId) -> &mut Target {
    &mut self.targets[id]
  }

  pub fn targets(&self) -> &TargetTable {
    &self.targets
  }

  /// Mark a target to simulate being new.
  pub fn touch_target(&mut self, name: &str) -> TargetId {
    let id = self.bind_target(name);
    self.targets[id].flags |= TargetFlags::TOUCHED;
    id
  }

  /// Bind every name in `names` and append the targets to `chain`.
  pub fn target_list<I, S>(&mut self, mut chain: TargetChain, names: I) -> TargetChain
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    for name in names {
      chain = target_entry(chain, self.bind_target(name.as_ref()));
    }
    chain
  }

  /// Make every target in `targets` depend on every target in `sources`.
  pub fn add_depends<S: AsRef<str>>(&mut self, targets: &[S], sources: &[S]) {
    let sources = self.target_list(TargetChain::new(), sources);
    for name in targets {
      let id = self.bind_target(name.as_ref());
      let depends = std::mem::take(&mut self.targets[id].depends);
      self.targets[id].depends = sources.iter().fold(depends, |chain, &src| target_entry(chain, src));
    }
  }

  /// Record `sources` as includes of every target in `targets`.
  pub fn add_includes<S: AsRef<str>>(&mut self, targets: &[S], sources: &[S]) {
    let sources = self.target_list(TargetChain::new(), sources);
    for name in targets {
      let id = self.bind_target(name.as_ref());
      let includes = std::mem::take(&mut self.targets[id].includes);
      self.targets[id].includes = sources.iter().fold(includes, |chain, &src| target_entry(chain, src));
    }
  }

  /// Create an action invoking `rule` and append it to each target's actions.
  pub fn attach_action(&mut self, rule: RuleId, targets: TargetChain, sources: TargetChain) -> Rc<Action> {
    let action = Rc::new(Action { rule, targets, sources });
    for &id in &action.targets {
      let chain = std::mem::take(&mut self.targets[id].actions);
      self.targets[id].actions = action_list(chain, action.clone());
    }
    debug!(
      rule = %self.rule(rule).name(),
      targets = action.targets.len(),
      sources = action.sources.len(),
      "attached action"
    );
    action
  }

  // ===========================================================================
  // Settings
  // ===========================================================================

  pub fn settings(&self) -> &SettingsPool {
    &self.settings
  }

  /// Add a deferred `symbol = value` to a settings list; see [`SettingsPool::add`].
  pub fn add_settings(&mut self, head: Option<SettingsId>, append: bool, symbol: &str, value: List) -> SettingsId {
    let symbol = self.interner.intern(symbol);
    self.settings.add(head, append, symbol, value)
  }

  /// Add a setting to the target's own settings list.
  pub fn set_on_target(&mut self, target: TargetId, append: bool, symbol: &str, value: List) {
    let head = self.targets[target].settings;
    let head = self.add_settings(head, append, symbol, value);
    self.targets[target].settings = Some(head);
  }

  pub fn push_settings<E: VarEnv + ?Sized>(&mut self, head: Option<SettingsId>, env: &mut E) {
    self.settings.push(head, env);
  }

  pub fn pop_settings<E: VarEnv + ?Sized>(&mut self, head: Option<SettingsId>, env: &mut E) {
    self.settings.pop(head, env);
  }

  /// Push a settings list for the lifetime of the returned guard.
  pub fn scope_settings<'a, E: VarEnv + ?Sized>(
    &'a mut self,
    head: Option<SettingsId>,
    env: &'a mut E,
  ) -> SettingsScope<'a, E> {
    SettingsScope::enter(&mut self.settings, env, head)
  }

  /// Release a settings list. Handles into it read as empty afterwards.
  pub fn free_settings(&mut self, head: Option<SettingsId>) {
    self.settings.free(head);
  }

  /// Release a target's own settings list and detach it from the target.
  pub fn free_target_settings(&mut self, target: TargetId) {
    let head = self.targets[target].settings.take();
    self.settings.free(head);
  }

  // ===========================================================================
  // Teardown
  // ===========================================================================

  /// Free the target table and drain the settings pool.
  ///
  /// Target and settings handles are stale afterwards and never resolve to
  /// records created later. Modules and rules remain until the session is
  /// dropped.
  pub fn done_rules(&mut self) {
    info!(
      targets = self.targets.len(),
      settings = self.settings.len(),
      "releasing target table"
    );
    self.targets.clear();
    self.settings.drain();
  }
}
