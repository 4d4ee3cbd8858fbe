use crate::evaluator::{Evaluator, RunReport};
use crate::{
    Fact, FactStore, ResourceLimits, Response, Rule, RuleBase, SymptomSelection, TriageResult,
};
use std::sync::Arc;

/// The triage engine.
///
/// Owns a shared, read-only rule base. Every diagnosis request gets its own
/// [`FactStore`], so one engine can serve any number of callers.
pub struct Engine {
    rules: Arc<RuleBase>,
    evaluator: Evaluator,
    limits: ResourceLimits,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_rules(RuleBase::covid())
    }
}

impl Engine {
    /// Engine loaded with the built-in COVID-19 rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with no rules; load some with [`Engine::add_rules_code`]
    pub fn empty() -> Self {
        Self::with_rules(RuleBase::empty())
    }

    pub fn with_rules(rules: RuleBase) -> Self {
        Self {
            rules: rules.into_shared(),
            evaluator: Evaluator::new(),
            limits: ResourceLimits::default(),
        }
    }

    /// Create an engine with custom resource limits
    pub fn with_limits(mut self, limits: ResourceLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Get the current resource limits
    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    /// Parse rule file text and append its rules to the rule base.
    ///
    /// The combined rule base is revalidated; on error nothing changes.
    pub fn add_rules_code(&mut self, code: &str, source: &str) -> TriageResult<()> {
        let new_rules = RuleBase::parse(code, source, &self.limits)?;
        let merged = self.rules.merge(&new_rules, &self.limits)?;

        tracing::info!(
            source,
            added = new_rules.len(),
            total = merged.len(),
            "loaded rules"
        );
        self.rules = merged.into_shared();
        Ok(())
    }

    pub fn rule_base(&self) -> &RuleBase {
        &self.rules
    }

    /// Handle on the rule base for engines or threads that share it
    pub fn shared_rules(&self) -> Arc<RuleBase> {
        Arc::clone(&self.rules)
    }

    pub fn list_rules(&self) -> Vec<String> {
        self.rules.names()
    }

    pub fn get_rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Run the rules against a caller-owned fact store until quiescence
    pub fn run(&self, facts: &mut FactStore) -> RunReport {
        self.evaluator.run(&self.rules, facts)
    }

    /// Diagnose a symptom selection.
    ///
    /// Asserts one symptom fact per present symptom into a fresh fact store,
    /// runs the rules and reads back the diagnoses.
    pub fn diagnose(&self, selection: &SymptomSelection) -> Response {
        let symptoms = selection.present();
        let mut facts = FactStore::new();
        for symptom in &symptoms {
            facts.assert(symptom.to_fact());
        }

        let report = self.run(&mut facts);
        Response::new(symptoms, facts.snapshot(), &report)
    }

    /// Like [`Engine::diagnose`], for arbitrary starting facts
    pub fn diagnose_facts(&self, initial: impl IntoIterator<Item = Fact>) -> Response {
        let mut facts: FactStore = initial.into_iter().collect();
        let report = self.run(&mut facts);
        let symptoms = facts
            .iter()
            .filter_map(|fact| match fact {
                Fact::Symptom { name } => name.parse().ok(),
                _ => None,
            })
            .collect();
        Response::new(symptoms, facts.snapshot(), &report)
    }
}
