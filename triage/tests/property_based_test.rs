use proptest::prelude::*;
use triage::{Engine, Evaluator, Fact, FactStore, Pattern, ResourceLimits, Rule, RuleBase};

const NAMES: [&str; 6] = [
    "fever",
    "cough",
    "loss_of_taste",
    "difficulty_breathing",
    "fatigue",
    "headache",
];

fn symptom_fact() -> impl Strategy<Value = Fact> {
    prop::sample::select(NAMES.to_vec()).prop_map(Fact::symptom)
}

fn symptom_facts() -> impl Strategy<Value = Vec<Fact>> {
    prop::collection::vec(symptom_fact(), 0..8)
}

/// Random rule bases over symptoms and a handful of intermediate facts,
/// so conclusions can feed back into conditions
fn rule_base() -> impl Strategy<Value = RuleBase> {
    let pattern = prop_oneof![
        prop::sample::select(NAMES.to_vec()).prop_map(Pattern::symptom),
        (0..4u8).prop_map(|n| Pattern::exact(&stage(n))),
    ];
    let conclusion = prop_oneof![
        (0..4u8).prop_map(stage),
        (0..3u8).prop_map(|n| Fact::diagnosis(format!("diagnosis {}", n))),
    ];
    let rule = (prop::collection::vec(pattern, 1..4), conclusion, -2..3i32);

    prop::collection::vec(rule, 0..10).prop_map(|rules| {
        let rules = rules
            .into_iter()
            .enumerate()
            .map(|(i, (conditions, conclusion, salience))| {
                Rule::new(format!("rule-{}", i), conditions, conclusion).with_salience(salience)
            })
            .collect();
        RuleBase::new(rules, &ResourceLimits::default()).unwrap()
    })
}

fn stage(n: u8) -> Fact {
    Fact::new("stage", [("n", n.to_string())]).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_assert_is_idempotent(facts in symptom_facts(), fact in symptom_fact()) {
        let mut store: FactStore = facts.into_iter().collect();
        store.assert(fact.clone());
        let snapshot = store.snapshot();

        prop_assert!(!store.assert(fact));
        prop_assert_eq!(store.snapshot(), snapshot);
    }

    #[test]
    fn prop_store_has_no_duplicates(facts in symptom_facts()) {
        let store: FactStore = facts.iter().cloned().collect();
        let snapshot = store.snapshot();
        let unique: std::collections::HashSet<_> = snapshot.iter().collect();
        prop_assert_eq!(unique.len(), snapshot.len());
    }

    #[test]
    fn prop_run_is_deterministic(rules in rule_base(), facts in symptom_facts()) {
        let mut first: FactStore = facts.iter().cloned().collect();
        let mut second: FactStore = facts.into_iter().collect();

        let first_report = Evaluator.run(&rules, &mut first);
        let second_report = Evaluator.run(&rules, &mut second);

        prop_assert_eq!(first_report, second_report);
        prop_assert_eq!(first.snapshot(), second.snapshot());
    }

    #[test]
    fn prop_run_only_adds_facts(rules in rule_base(), facts in symptom_facts()) {
        let mut store: FactStore = facts.into_iter().collect();
        let before = store.snapshot();

        let report = Evaluator.run(&rules, &mut store);
        let after = store.snapshot();

        prop_assert_eq!(after.len(), before.len() + report.fired.len());
        prop_assert_eq!(&after[..before.len()], &before[..]);
    }

    #[test]
    fn prop_second_run_fires_nothing(rules in rule_base(), facts in symptom_facts()) {
        let mut store: FactStore = facts.into_iter().collect();
        Evaluator.run(&rules, &mut store);

        let report = Evaluator.run(&rules, &mut store);
        prop_assert!(report.fired.is_empty());
        prop_assert_eq!(report.passes, 1);
    }

    #[test]
    fn prop_run_terminates_within_bound(rules in rule_base(), facts in symptom_facts()) {
        let mut store: FactStore = facts.into_iter().collect();
        let report = Evaluator.run(&rules, &mut store);

        prop_assert!(report.passes <= rules.len() + 1);
        prop_assert!(report.fired.len() <= rules.len());
    }

    #[test]
    fn prop_every_fired_rule_was_satisfied(rules in rule_base(), facts in symptom_facts()) {
        let mut store: FactStore = facts.into_iter().collect();
        let report = Evaluator.run(&rules, &mut store);

        for fired in &report.fired {
            let rule = rules.get(&fired.rule).unwrap();
            prop_assert!(rule.conditions.iter().all(|c| store.contains(c)));
            prop_assert!(store.contains_fact(&rule.conclusion));
        }
    }

    #[test]
    fn prop_builtin_diagnosis_order_is_stable(picks in prop::collection::vec(0..4usize, 0..6)) {
        let engine = Engine::new();
        let selection: triage::SymptomSelection =
            picks.iter().map(|i| triage::Symptom::ALL[*i]).collect();

        let response = engine.diagnose(&selection);
        let expected: Vec<&str> = engine
            .rule_base()
            .rules()
            .iter()
            .map(|r| r.name.as_str())
            .filter(|name| response.fired_rules.iter().any(|f| f == name))
            .collect();
        prop_assert_eq!(&response.fired_rules, &expected);
    }
}
