//! Rule definition, lookup, export and import.

use std::rc::Rc;

use tracing::debug;

use super::{ActionFlags, ArgumentList, Procedure, Rule, RuleActions, RuleError, RuleId};
use crate::module::ModuleId;
use crate::session::Session;
use crate::symbol::{List, Symbol};

impl Session {
  pub fn rule(&self, id: RuleId) -> &Rule {
    &self.rules[id.index()]
  }

  fn rule_mut(&mut self, id: RuleId) -> &mut Rule {
    &mut self.rules[id.index()]
  }

  /// Iterate over the rule slots of `module` in creation order.
  pub fn rules_in(&self, module: ModuleId) -> impl Iterator<Item = (RuleId, &Rule)> {
    self.module(module).rules().iter().map(|&id| (id, self.rule(id)))
  }

  /// Look `name` up in `module` without creating anything.
  pub fn lookup_rule(&self, name: &str, module: ModuleId) -> Option<RuleId> {
    self.module(module).lookup(name)
  }

  /// Return the slot for `name` in `module`, creating an empty one if needed.
  pub fn enter_rule(&mut self, name: &str, module: ModuleId) -> RuleId {
    if let Some(id) = self.lookup_rule(name, module) {
      return id;
    }
    let name = self.interner.intern(name);
    let id = RuleId(self.rules.len() as u32);
    self.rules.push(Rule::new(name.clone(), module));
    self.modules[module.index()].insert(name, id);
    id
  }

  /// Return the slot for `name` in `target_module`, ready to receive a body
  /// or actions originating in `src_module`.
  ///
  /// A slot that currently executes in another module was imported or
  /// mirrored from there; its body and actions are dropped and it is
  /// reassigned to `src_module`.
  pub fn define_rule(&mut self, src_module: ModuleId, name: &str, target_module: ModuleId) -> RuleId {
    let id = self.enter_rule(name, target_module);
    if self.rule(id).module != src_module {
      if self.rule(id).is_defined() {
        debug!(
          rule = %name,
          from = %self.module_name(self.rule(id).module),
          to = %self.module_name(src_module),
          "dropping body of rule defined in another module"
        );
      }
      self.set_rule_body(id, None, None);
      self.set_rule_actions(id, None);
      self.rule_mut(id).module = src_module;
    }
    id
  }

  /// Resolve `name` as seen from `module`.
  ///
  /// Falls back to the root module's slot of the same, unqualified name,
  /// creating it empty if it does not exist. The result may therefore be an
  /// undefined rule.
  pub fn bind_rule(&mut self, name: &str, module: ModuleId) -> RuleId {
    match self.lookup_rule(name, module) {
      Some(id) => id,
      None => self.enter_rule(name, ModuleId::ROOT),
    }
  }

  /// Fail with [`RuleError::Undefined`] if `id` has neither procedure nor actions.
  pub fn require_defined(&self, id: RuleId) -> Result<&Rule, RuleError> {
    let rule = self.rule(id);
    if rule.is_defined() {
      Ok(rule)
    } else {
      Err(RuleError::Undefined {
        name: rule.name.to_string(),
        module: self.module_name(rule.table).to_string(),
      })
    }
  }

  /// Install an argument list and procedure into a rule slot.
  ///
  /// The previous handles are released after the new ones are installed, so
  /// reinstalling the same body is harmless.
  pub fn set_rule_body(&mut self, id: RuleId, args: Option<Rc<ArgumentList>>, procedure: Option<Rc<Procedure>>) {
    let rule = self.rule_mut(id);
    rule.arguments = args;
    rule.procedure = procedure;
  }

  pub(crate) fn set_rule_actions(&mut self, id: RuleId, actions: Option<Rc<RuleActions>>) {
    self.rule_mut(id).actions = actions;
  }

  /// Name of the root-module counterpart of a rule.
  ///
  /// Rules executing in the root module keep their own name; others are
  /// qualified as `<module-name><rule-name>`. Distinct modules whose names
  /// concatenate to the same string share a global name.
  pub fn global_rule_name(&mut self, id: RuleId) -> Symbol {
    let rule = &self.rules[id.index()];
    if rule.module.is_root() {
      return rule.name.clone();
    }
    let module_name = self.modules[rule.module.index()].name();
    let mut qualified = String::with_capacity(module_name.len() + rule.name.len());
    qualified.push_str(module_name);
    qualified.push_str(&rule.name);
    self.interner.intern(&qualified)
  }

  /// The root-module counterpart of a rule, created if necessary.
  pub fn global_rule(&mut self, id: RuleId) -> RuleId {
    let module = self.rule(id).module;
    if module.is_root() {
      return id;
    }
    let name = self.global_rule_name(id);
    self.define_rule(module, &name, ModuleId::ROOT)
  }

  /// Define `name` in `module` with the given arguments and procedure.
  ///
  /// The procedure is stamped with the rule's global name the first time it
  /// is installed anywhere. When `exported`, the same body is also installed
  /// into the rule's root-module counterpart.
  pub fn new_rule_body(
    &mut self,
    module: ModuleId,
    name: &str,
    args: Option<Rc<ArgumentList>>,
    procedure: Rc<Procedure>,
    exported: bool,
  ) -> RuleId {
    let local = self.define_rule(module, name, module);
    self.rule_mut(local).exported = exported;
    self.set_rule_body(local, args.clone(), Some(procedure.clone()));

    if procedure.rulename().is_none() {
      let global_name = self.global_rule_name(local);
      procedure.stamp(global_name);
    }

    if exported {
      let global = self.global_rule(local);
      self.set_rule_body(global, args, Some(procedure));
      debug!(
        rule = %name,
        module = %self.module_name(module),
        global = %self.rule(global).name,
        "exported rule"
      );
    } else {
      debug!(rule = %name, module = %self.module_name(module), "defined rule");
    }

    local
  }

  /// Define `name` in `module` as an actions rule.
  ///
  /// Actions are always mirrored into the root module; the local slot and
  /// its mirror share one template.
  pub fn new_rule_actions(
    &mut self,
    module: ModuleId,
    name: &str,
    command: &str,
    bindlist: List,
    flags: ActionFlags,
  ) -> RuleId {
    let local = self.define_rule(module, name, module);
    let global = self.global_rule(local);
    let actions = Rc::new(RuleActions::new(command, bindlist, flags));
    self.set_rule_actions(local, Some(actions.clone()));
    self.set_rule_actions(global, Some(actions));
    debug!(
      rule = %name,
      module = %self.module_name(module),
      global = %self.rule(global).name,
      flags = ?flags,
      "defined actions"
    );
    local
  }

  /// Bind `name` in `module` to the body and actions of `source`.
  ///
  /// The new slot shares the source's objects and executes in the source's
  /// module.
  pub fn import_rule(&mut self, source: RuleId, module: ModuleId, name: &str) -> RuleId {
    let src = self.rule(source);
    let src_module = src.module;
    let args = src.arguments.clone();
    let procedure = src.procedure.clone();
    let actions = src.actions.clone();

    let dest = self.define_rule(src_module, name, module);
    self.set_rule_body(dest, args, procedure);
    self.set_rule_actions(dest, actions);
    debug!(
      rule = %self.rule(source).name,
      into = %self.module_name(module),
      name = %name,
      "imported rule"
    );
    dest
  }
}
