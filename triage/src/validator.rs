//! Construction-time validation of a rule base
//!
//! A malformed rule base can never be evaluated correctly, so every problem
//! is reported before the engine is allowed to run. All problems found are
//! returned together.

use crate::fact::is_identifier;
use crate::{Fact, ResourceLimits, Rule, TriageError, TriageResult};
use std::collections::HashSet;

/// Stateless rule base validator
#[derive(Debug, Default, Clone, Copy)]
pub struct Validator;

impl Validator {
    pub fn validate(&self, rules: &[Rule], limits: &ResourceLimits) -> TriageResult<()> {
        if rules.len() > limits.max_rules {
            return Err(TriageError::ResourceLimitExceeded {
                limit_name: "max_rules".to_string(),
                limit_value: limits.max_rules.to_string(),
                actual_value: rules.len().to_string(),
                suggestion: "Split the knowledge base or raise max_rules".to_string(),
            });
        }

        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for rule in rules {
            if rule.name.trim().is_empty() {
                errors.push(TriageError::invalid_rule(
                    rule.name.clone(),
                    "rule name must not be empty",
                ));
            } else if !is_identifier(&rule.name) {
                errors.push(TriageError::invalid_rule(
                    rule.name.clone(),
                    "rule name may only contain letters, digits, '_' and '-'",
                ));
            } else if !seen.insert(rule.name.as_str()) {
                errors.push(TriageError::invalid_rule(
                    rule.name.clone(),
                    "rule is defined more than once",
                ));
            }

            if rule.conditions.is_empty() {
                errors.push(TriageError::invalid_rule(
                    rule.name.clone(),
                    "rule needs at least one condition",
                ));
            }

            if let Err(message) = check_conclusion(&rule.conclusion) {
                errors.push(TriageError::invalid_rule(rule.name.clone(), message));
            }

            if rule.conditions.len() > limits.max_conditions_per_rule {
                errors.push(TriageError::ResourceLimitExceeded {
                    limit_name: "max_conditions_per_rule".to_string(),
                    limit_value: limits.max_conditions_per_rule.to_string(),
                    actual_value: rule.conditions.len().to_string(),
                    suggestion: format!(
                        "Split rule '{}' into smaller rules chained through an intermediate fact",
                        rule.name
                    ),
                });
            }
        }

        match TriageError::collect(errors) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// A conclusion must be exactly what `Fact::new` builds from its own kind and attributes
fn check_conclusion(conclusion: &Fact) -> Result<(), String> {
    match Fact::new(conclusion.kind_str(), conclusion.attributes()) {
        Ok(canonical) if &canonical == conclusion => Ok(()),
        Ok(canonical) => Err(format!(
            "conclusion {} is not in canonical form (expected {})",
            conclusion, canonical
        )),
        Err(TriageError::InvalidFact(message)) => Err(format!("invalid conclusion: {}", message)),
        Err(other) => Err(format!("invalid conclusion: {}", other)),
    }
}
