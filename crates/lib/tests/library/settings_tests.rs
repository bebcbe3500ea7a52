use rulebind_lib::Session;
use rulebind_lib::variable::{AssignMode, Variables};

#[test]
fn append_extends_existing_node() {
  let mut session = Session::new();
  let one = session.list(["1"]);
  let two = session.list(["2"]);
  let head = session.add_settings(None, false, "X", one);
  let head = session.add_settings(Some(head), true, "X", two);

  let nodes: Vec<_> = session.settings().iter(Some(head)).collect();
  assert_eq!(nodes.len(), 1);
  assert_eq!(nodes[0].0, "X");
  assert_eq!(nodes[0].1, &vec!["1", "2"]);
}

#[test]
fn replace_discards_old_value() {
  let mut session = Session::new();
  let old = session.list(["a", "b"]);
  let new = session.list(["c"]);
  let head = session.add_settings(None, false, "X", old);
  let head = session.add_settings(Some(head), false, "X", new);

  assert_eq!(session.settings().get(Some(head), "X").unwrap(), &vec!["c"]);
}

#[test]
fn push_pop_is_idempotent() {
  let mut session = Session::new();
  let mut vars = Variables::new();
  let cc = session.intern("CC");
  let cflags = session.intern("CFLAGS");
  let value = session.list(["cc"]);
  vars.set(cc, value, AssignMode::Set);
  let value = session.list(["-O2"]);
  vars.set(cflags, value, AssignMode::Set);

  let t = session.bind_target("main.o");
  let value = session.list(["clang"]);
  session.set_on_target(t, false, "CC", value);
  let value = session.list(["1"]);
  session.set_on_target(t, false, "DEBUG", value);
  let head = session.target(t).settings;

  for _ in 0..2 {
    session.push_settings(head, &mut vars);
    assert_eq!(vars.get("CC"), ["clang"]);
    assert_eq!(vars.get("CFLAGS"), ["-O2"]);
    assert_eq!(vars.get("DEBUG"), ["1"]);
    session.pop_settings(head, &mut vars);
    assert_eq!(vars.get("CC"), ["cc"]);
    assert!(!vars.is_set("DEBUG"));
  }

  assert_eq!(session.settings().get(head, "CC").unwrap(), &vec!["clang"]);
}

#[test]
fn nested_scopes_restore_in_order() {
  let mut session = Session::new();
  let mut vars = Variables::new();

  let outer = session.bind_target("lib.a");
  let value = session.list(["outer"]);
  session.set_on_target(outer, false, "MODE", value);
  let inner = session.bind_target("lib.o");
  let value = session.list(["inner"]);
  session.set_on_target(inner, false, "MODE", value);

  let outer = session.target(outer).settings;
  let inner = session.target(inner).settings;

  session.push_settings(outer, &mut vars);
  {
    let scope = session.scope_settings(inner, &mut vars);
    assert_eq!(scope.env().get("MODE"), ["inner"]);
  }
  assert_eq!(vars.get("MODE"), ["outer"]);
  session.pop_settings(outer, &mut vars);
  assert!(vars.get("MODE").is_empty());
}

#[test]
fn freed_nodes_are_reused() {
  let mut session = Session::new();
  let value = session.list(["1"]);
  let head = session.add_settings(None, false, "A", value);
  let value = session.list(["2"]);
  let head = session.add_settings(Some(head), false, "B", value);
  assert_eq!(session.settings().len(), 2);

  session.free_settings(Some(head));
  assert!(session.settings().is_empty());
  let capacity = session.settings().vacant();

  let value = session.list(["3"]);
  session.add_settings(None, false, "C", value);
  assert_eq!(session.settings().len(), 1);
  assert_eq!(session.settings().vacant(), capacity - 1);

  session.done_rules();
  assert_eq!(session.settings().vacant(), 0);
}

#[test]
fn freed_target_settings_do_not_leak_into_other_targets() {
  let mut session = Session::new();
  let one = session.bind_target("one");
  let two = session.bind_target("two");

  let value = session.list(["1"]);
  session.set_on_target(one, false, "X", value);
  let head = session.target(one).settings;
  session.free_settings(head);

  // The freed slot is handed to target two.
  let value = session.list(["2"]);
  session.set_on_target(two, false, "Y", value);
  let one_head = session.target(one).settings;
  assert_eq!(session.settings().iter(one_head).count(), 0);

  // Target one starts a list of its own instead of linking into two's.
  let value = session.list(["3"]);
  session.set_on_target(one, false, "Z", value);
  let one_head = session.target(one).settings;
  let one_names: Vec<_> = session.settings().iter(one_head).map(|(s, _)| s.to_string()).collect();
  assert_eq!(one_names, ["Z"]);

  session.free_settings(one_head);
  let two_head = session.target(two).settings;
  assert_eq!(session.settings().get(two_head, "Y").unwrap(), &vec!["2"]);
  assert_eq!(session.settings().len(), 1);
}

#[test]
fn free_target_settings_allows_fresh_settings() {
  let mut session = Session::new();
  let mut vars = Variables::new();
  let t = session.bind_target("prog");
  let value = session.list(["old"]);
  session.set_on_target(t, false, "MODE", value);

  session.free_target_settings(t);
  let value = session.list(["new"]);
  session.set_on_target(t, true, "MODE", value);

  let head = session.target(t).settings;
  let scope = session.scope_settings(head, &mut vars);
  assert_eq!(scope.env().get("MODE"), ["new"]);
}
