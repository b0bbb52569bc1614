use std::collections::HashSet;

use varcode::{compile, CompileError, ListMode, Namespace, Rule};

fn namespace() -> Namespace {
    let mut ns = Namespace::new();
    for (abbr, role) in [("a", "RoleA"), ("b", "RoleB"), ("c", "RoleC")] {
        ns.define_role(abbr, role);
    }
    ns
}

fn genome(roles: &[&'static str]) -> HashSet<&'static str> {
    roles.iter().copied().collect()
}

#[test]
fn empty_and_list_holds() {
    let rule = Rule::all(vec![]);
    assert_eq!(rule.required_count(), Some(0));
    assert!(rule.check(&genome(&[])));
}

#[test]
fn and_required_count_tracks_children() {
    let rule = compile("a and b and c", &namespace()).unwrap();
    assert_eq!(rule.required_count(), Some(3));
    match &rule {
        Rule::List { mode, children } => {
            assert_eq!(*mode, ListMode::All);
            assert_eq!(children.len(), 3);
        }
        other => panic!("expected list, got {other:?}"),
    }
}

#[test]
fn threshold_larger_than_children_never_holds() {
    let rule = compile("3 of {a, b}", &namespace()).unwrap();
    assert!(!rule.check(&genome(&["RoleA", "RoleB"])));
}

#[test]
fn zero_threshold_always_holds() {
    let rule = compile("0 of {a}", &namespace()).unwrap();
    assert!(rule.check(&genome(&[])));
}

#[test]
fn duplicate_operands_are_kept() {
    let rule = compile("2 of {a, a}", &namespace()).unwrap();
    assert!(rule.check(&genome(&["RoleA"])));
}

#[test]
fn deeply_nested_groups() {
    let mut text = String::new();
    for _ in 0..50 {
        text.push_str("not (");
    }
    text.push('a');
    for _ in 0..50 {
        text.push(')');
    }
    let rule = compile(&text, &namespace()).unwrap();
    assert_eq!(rule.depth(), 51);
    assert!(rule.check(&genome(&["RoleA"])));
}

#[test]
fn keywords_are_case_sensitive() {
    let err = compile("a AND b", &namespace()).unwrap_err();
    assert_eq!(err, CompileError::UnresolvedIdentifier { name: "AND".into() });
}

#[test]
fn namespace_may_hold_keyword_lookalikes() {
    let mut ns = namespace();
    ns.define_role("AND", "RoleAnd");
    let rule = compile("AND and a", &ns).unwrap();
    assert!(rule.check(&genome(&["RoleAnd", "RoleA"])));
}

#[test]
fn fail_rule_can_be_referenced() {
    let mut ns = namespace();
    ns.insert("never", Rule::Fail);
    let rule = compile("never or a", &ns).unwrap();
    assert!(rule.check(&genome(&["RoleA"])));
    assert!(!compile("never", &ns).unwrap().check(&genome(&["RoleA"])));
}

#[test]
fn bad_rule_does_not_poison_namespace() {
    let mut ns = namespace();
    assert!(ns.define("broken", "a and (b").is_err());
    ns.define("fine", "a and b").unwrap();
    let rule = compile("fine or c", &ns).unwrap();
    assert!(rule.check(&genome(&["RoleC"])));
}

#[test]
fn commas_separate_outside_thresholds() {
    let rule = compile("a, and, b", &namespace()).unwrap();
    assert_eq!(rule, compile("a and b", &namespace()).unwrap());
}
