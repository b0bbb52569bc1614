
use proptest::prelude::*;
use strategies::{arb_children, arb_genome, arb_rule};
use varcode::{Observations, Rule};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// An AND-list holds iff every child holds; the empty list holds.
    #[test]
    fn and_list_is_conjunction(children in arb_children(), genome in arb_genome()) {
        let expected = children.iter().all(|c| c.check(&genome));
        prop_assert_eq!(Rule::all(children).check(&genome), expected);
    }

    /// An OR-list holds iff some child holds.
    #[test]
    fn or_list_is_disjunction(children in arb_children(), genome in arb_genome()) {
        let expected = children.iter().any(|c| c.check(&genome));
        prop_assert_eq!(Rule::any(children).check(&genome), expected);
    }

    /// A threshold group holds iff at least `n` children hold.
    #[test]
    fn threshold_counts_true_children(
        n in 0_usize..=6,
        children in arb_children(),
        genome in arb_genome(),
    ) {
        let hits = children.iter().filter(|c| c.check(&genome)).count();
        prop_assert_eq!(Rule::at_least(n, children).check(&genome), hits >= n);
    }

    #[test]
    fn negation_complements(rule in arb_rule(3), genome in arb_genome()) {
        prop_assert_eq!((!rule.clone()).check(&genome), !rule.check(&genome));
    }

    /// Observing a rule never changes its result, and every observation
    /// agrees with the genome.
    #[test]
    fn observation_is_faithful(rule in arb_rule(3), genome in arb_genome()) {
        let mut log = Observations::new();
        prop_assert_eq!(rule.check_observed(&genome, &mut log), rule.check(&genome));

        let ns = strategies::namespace();
        for (tag, result) in log.entries() {
            let role = match ns.get(tag) {
                Some(Rule::Primitive { role, .. }) => role,
                other => panic!("observed tag {tag} is not a role: {other:?}"),
            };
            prop_assert_eq!(*result, genome.contains(role));
        }
    }

    /// Short circuiting: an OR-list led by a true child observes nothing
    /// from the rest.
    #[test]
    fn or_stops_at_first_true(rest in arb_children(), genome in arb_genome()) {
        prop_assume!(genome.contains("MethCoaMuta"));
        let mut children = vec![Rule::tracked_role("MethCoaMuta", "1.3")];
        children.extend(rest);
        let mut log = Observations::new();
        prop_assert!(Rule::any(children).check_observed(&genome, &mut log));
        prop_assert_eq!(log.entries(), &[("1.3".to_owned(), true)]);
    }
}
