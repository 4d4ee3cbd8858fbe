//! Forward-chaining inference
//!
//! Runs the match / select / fire cycle against a fact store:
//! 1. Match: collect every rule whose conditions are all present
//! 2. Select: order the activations on an agenda (salience, then declaration order)
//! 3. Fire: assert each activation's conclusion unless it is already known
//! 4. Stop once a pass asserts nothing new
//!
//! Each rule's conclusion is a single fixed fact, so a run derives at most one
//! new fact per rule and finishes in at most `rules + 1` passes whatever the
//! rule base looks like.

pub mod agenda;
pub mod matcher;

use crate::{Fact, FactStore, RuleBase};
use agenda::Agenda;
use serde::Serialize;

/// One rule firing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FiredRule {
    pub rule: String,
    pub conclusion: Fact,
    /// 1-based pass in which the rule fired
    pub pass: usize,
}

/// Outcome of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Firings in the order they happened
    pub fired: Vec<FiredRule>,
    /// Number of passes, including the final pass that found nothing new
    pub passes: usize,
}

impl RunReport {
    pub fn fired_rule_names(&self) -> Vec<String> {
        self.fired.iter().map(|f| f.rule.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fired.is_empty()
    }
}

/// Stateless inference engine; the rule base and the fact store are passed in
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Fire rules against `facts` until quiescence.
    ///
    /// Facts are only ever added. Calling `run` again on the resulting store
    /// fires nothing.
    pub fn run(&self, rules: &RuleBase, facts: &mut FactStore) -> RunReport {
        let mut report = RunReport::default();

        loop {
            report.passes += 1;
            let pass = report.passes;

            let mut agenda = Agenda::new(matcher::activations(rules, facts));
            tracing::trace!(pass, activations = agenda.len(), "match complete");

            let mut asserted = 0;
            while let Some(activation) = agenda.next_eligible(facts) {
                let rule = activation.rule;
                if facts.assert(rule.conclusion.clone()) {
                    asserted += 1;
                    tracing::debug!(rule = %rule.name, conclusion = %rule.conclusion, pass, "rule fired");
                    report.fired.push(FiredRule {
                        rule: rule.name.clone(),
                        conclusion: rule.conclusion.clone(),
                        pass,
                    });
                }
            }

            if asserted == 0 {
                tracing::trace!(pass, "quiescent");
                break;
            }
        }

        report
    }
}
