use std::rc::Rc;

use rulebind_lib::Session;
use rulebind_lib::module::ModuleId;
use rulebind_lib::rule::{ActionFlags, RuleError};
use rulebind_lib::target::{TargetChain, TargetFlags};

use super::common::define;

#[test]
fn unexported_rule_is_local_to_its_module() {
  let mut session = Session::new();
  let m = session.bind_module("M");
  let local = define(&mut session, m, "R", "Echo $(targets) ;", false);

  assert_eq!(session.bind_rule("R", m), local);

  let fallback = session.bind_rule("R", ModuleId::ROOT);
  assert_ne!(fallback, local);
  assert_eq!(session.rule(fallback).name(), "R");
  assert_eq!(session.rule(fallback).table(), ModuleId::ROOT);
  assert!(!session.rule(fallback).is_defined());
  assert!(session.lookup_rule("MR", ModuleId::ROOT).is_none());
}

#[test]
fn exported_rule_is_reachable_by_qualified_name() {
  let mut session = Session::new();
  let m = session.bind_module("M");
  let local = define(&mut session, m, "R", "Echo $(targets) ;", true);

  let global = session.bind_rule("MR", ModuleId::ROOT);
  assert_ne!(global, local);
  assert_eq!(session.rule(global).module(), m);
  assert!(Rc::ptr_eq(
    session.rule(local).procedure().unwrap(),
    session.rule(global).procedure().unwrap()
  ));
  assert_eq!(session.rule(global).procedure().unwrap().rulename().unwrap(), "MR");
}

#[test]
fn redefining_local_keeps_exported_body_alive() {
  let mut session = Session::new();
  let m = session.bind_module("M");
  let local = define(&mut session, m, "R", "first", true);
  let global = session.bind_rule("MR", ModuleId::ROOT);

  define(&mut session, m, "R", "second", false);

  assert_eq!(session.rule(local).procedure().unwrap().body(), "second");
  let exported = session.rule(global).procedure().unwrap();
  assert_eq!(exported.body(), "first");
  assert_eq!(Rc::strong_count(exported), 1);
}

#[test]
fn unknown_rule_binds_to_undefined_marker() {
  let mut session = Session::new();
  let m = session.bind_module("pkg.");
  let id = session.bind_rule("Nowhere", m);

  assert!(session.rule(id).procedure().is_none());
  assert_eq!(session.bind_rule("Nowhere", ModuleId::ROOT), id);
  assert_eq!(
    session.require_defined(id).unwrap_err(),
    RuleError::Undefined {
      name: "Nowhere".to_string(),
      module: String::new(),
    }
  );
}

#[test]
fn import_runs_in_source_module() {
  let mut session = Session::new();
  let util = session.bind_module("util.");
  let app = session.bind_module("app.");
  let source = define(&mut session, util, "Copy", "cp $(targets) ;", false);

  let imported = session.import_rule(source, app, "Duplicate");
  assert_eq!(session.rule(imported).table(), app);
  assert_eq!(session.rule(imported).module(), util);
  assert_eq!(session.bind_rule("Duplicate", app), imported);
  assert!(Rc::ptr_eq(
    session.rule(source).procedure().unwrap(),
    session.rule(imported).procedure().unwrap()
  ));

  // A local definition in the importing module replaces the import.
  define(&mut session, app, "Duplicate", "echo ;", false);
  assert_eq!(session.rule(imported).module(), app);
  assert_eq!(session.rule(source).procedure().unwrap().body(), "cp $(targets) ;");
}

#[test]
fn actions_are_attached_in_order() {
  let mut session = Session::new();
  let bindlist = session.list(["NEEDLIBS"]);
  let link = session.new_rule_actions(ModuleId::ROOT, "Link", "ld -o $(<) $(>)", bindlist, ActionFlags::TOGETHER);

  let targets = session.target_list(TargetChain::new(), ["prog"]);
  let sources = session.target_list(TargetChain::new(), ["a.o", "b.o", "a.o"]);
  let first = session.attach_action(link, targets.clone(), sources);
  let sources = session.target_list(TargetChain::new(), ["c.o"]);
  let second = session.attach_action(link, targets, sources);

  let prog = session.lookup_target("prog").unwrap();
  let actions = &session.target(prog).actions;
  assert_eq!(actions.len(), 2);
  assert!(Rc::ptr_eq(actions.first().unwrap(), &first));
  assert!(Rc::ptr_eq(actions.tail().unwrap(), &second));
  assert_eq!(first.sources.len(), 3);
}

#[test]
fn target_flags_accumulate() {
  let mut session = Session::new();
  let id = session.bind_target("all");
  session.target_mut(id).flags |= TargetFlags::NOTFILE;
  session.touch_target("all");

  let flags = session.target(id).flags;
  assert!(flags.contains(TargetFlags::NOTFILE | TargetFlags::TOUCHED));
  assert!(!flags.contains(TargetFlags::TEMP));
}
