use crate::{Observations, Rule, RoleSet};

/// Sink for tracked role tests. `()` drops them.
pub(crate) trait Observer {
    fn observe(&mut self, tag: &str, result: bool);
}

impl Observer for () {
    fn observe(&mut self, _tag: &str, _result: bool) {}
}

impl Observer for Observations {
    fn observe(&mut self, tag: &str, result: bool) {
        self.record(tag, result);
    }
}

impl Rule {
    /// Whether `roles` satisfies this rule.
    ///
    /// Lists evaluate children left to right and stop as soon as enough of
    /// them hold.
    #[must_use]
    pub fn check<R: RoleSet + ?Sized>(&self, roles: &R) -> bool {
        eval(self, roles, &mut ())
    }

    /// Like [`check`](Self::check), also logging every tracked role test
    /// that was actually evaluated into `log`.
    pub fn check_observed<R: RoleSet + ?Sized>(&self, roles: &R, log: &mut Observations) -> bool {
        eval(self, roles, log)
    }
}

pub(crate) fn eval<R, O>(rule: &Rule, roles: &R, observer: &mut O) -> bool
where
    R: RoleSet + ?Sized,
    O: Observer,
{
    match rule {
        Rule::Primitive { role, tag } => {
            let result = roles.contains_role(role);
            if let Some(tag) = tag {
                observer.observe(tag, result);
            }
            result
        }
        Rule::Not(child) => !eval(child, roles, observer),
        Rule::List { children, .. } => {
            let required = rule.required_count().unwrap_or(0);
            if required == 0 {
                return true;
            }
            let mut found = 0;
            for child in children {
                if eval(child, roles, observer) {
                    found += 1;
                    if found >= required {
                        return true;
                    }
                }
            }
            false
        }
        Rule::Fail => false,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn roles(ids: &[&'static str]) -> HashSet<&'static str> {
        ids.iter().copied().collect()
    }

    fn leaf(tag: &str) -> Rule {
        Rule::tracked_role(format!("Role{tag}"), tag)
    }

    #[test]
    fn primitive_membership() {
        assert!(leaf("a").check(&roles(&["Rolea"])));
        assert!(!leaf("a").check(&roles(&["Roleb"])));
    }

    #[test]
    fn negation() {
        assert!(!(!leaf("a")).check(&roles(&["Rolea"])));
        assert!((!leaf("a")).check(&roles(&[])));
    }

    #[test]
    fn and_requires_all() {
        let r = Rule::all(vec![leaf("a"), leaf("b")]);
        assert!(r.check(&roles(&["Rolea", "Roleb"])));
        assert!(!r.check(&roles(&["Rolea"])));
    }

    #[test]
    fn empty_and_is_vacuously_true() {
        assert!(Rule::all(vec![]).check(&roles(&[])));
    }

    #[test]
    fn empty_or_is_false() {
        assert!(!Rule::any(vec![]).check(&roles(&["Rolea"])));
    }

    #[test]
    fn threshold_counts() {
        let r = Rule::at_least(2, vec![leaf("a"), leaf("b"), leaf("c")]);
        assert!(r.check(&roles(&["Rolea", "Rolec"])));
        assert!(!r.check(&roles(&["Roleb"])));
        assert!(Rule::at_least(0, vec![]).check(&roles(&[])));
        assert!(!Rule::at_least(4, vec![leaf("a")]).check(&roles(&["Rolea"])));
    }

    #[test]
    fn fail_never_holds() {
        assert!(!Rule::Fail.check(&roles(&["Rolea"])));
    }

    #[test]
    fn or_short_circuit_skips_observations() {
        let r = Rule::any(vec![leaf("a"), leaf("b")]);
        let mut log = Observations::new();
        assert!(r.check_observed(&roles(&["Rolea", "Roleb"]), &mut log));
        assert_eq!(log.entries(), &[("a".to_owned(), true)]);
    }

    #[test]
    fn and_records_each_child_until_satisfied() {
        let r = Rule::all(vec![leaf("a"), leaf("b"), leaf("c")]);
        let mut log = Observations::new();
        assert!(!r.check_observed(&roles(&["Roleb"]), &mut log));
        assert_eq!(
            log.entries(),
            &[
                ("a".to_owned(), false),
                ("b".to_owned(), true),
                ("c".to_owned(), false)
            ]
        );
    }

    #[test]
    fn threshold_stops_at_required_count() {
        let r = Rule::at_least(2, vec![leaf("a"), leaf("b"), leaf("c")]);
        let mut log = Observations::new();
        assert!(r.check_observed(&roles(&["Rolea", "Roleb", "Rolec"]), &mut log));
        assert_eq!(log.len(), 2);
        assert_eq!(log.get("c"), None);
    }

    #[test]
    fn untracked_roles_are_not_observed() {
        let mut log = Observations::new();
        assert!(Rule::role("RoleX").check_observed(&roles(&["RoleX"]), &mut log));
        assert!(log.is_empty());
    }
}
