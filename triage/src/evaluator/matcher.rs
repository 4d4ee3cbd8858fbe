//! Match phase: which rules are fully satisfied by the current facts

use crate::{FactStore, Rule, RuleBase};

/// A rule whose every condition is satisfied by the fact store
#[derive(Debug, Clone, Copy)]
pub struct Activation<'a> {
    pub rule: &'a Rule,
    /// Position of the rule in the rule base
    pub index: usize,
}

pub(crate) fn is_satisfied(rule: &Rule, facts: &FactStore) -> bool {
    rule.conditions
        .iter()
        .all(|condition| facts.contains(condition))
}

/// Activation set for one pass, in rule base order
pub fn activations<'a>(rules: &'a RuleBase, facts: &FactStore) -> Vec<Activation<'a>> {
    rules
        .rules()
        .iter()
        .enumerate()
        .filter(|(_, rule)| is_satisfied(rule, facts))
        .map(|(index, rule)| Activation { rule, index })
        .collect()
}
