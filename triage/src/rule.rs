//! Rules and the rule base
//!
//! A rule is a pure conjunction of condition patterns paired with a single
//! conclusion fact. The rule base is an ordered, immutable list of rules;
//! declaration order is the tie-break when several rules are eligible.

use crate::fact::{Fact, Pattern};
use crate::{ResourceLimits, TriageResult, Validator};
use crate::span::Span;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    /// Higher fires first within a pass. Equal salience falls back to declaration order.
    pub salience: i32,
    pub conditions: Vec<Pattern>,
    pub conclusion: Fact,
    pub span: Option<Span>,
}

impl Rule {
    pub fn new(name: impl Into<String>, conditions: Vec<Pattern>, conclusion: Fact) -> Self {
        Self {
            name: name.into(),
            salience: 0,
            conditions,
            conclusion,
            span: None,
        }
    }

    pub fn with_salience(mut self, salience: i32) -> Self {
        self.salience = salience;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {}", self.name)?;
        if self.salience != 0 {
            write!(f, " salience {}", self.salience)?;
        }
        writeln!(f)?;
        for (i, condition) in self.conditions.iter().enumerate() {
            let keyword = if i == 0 { "  when" } else { "   and" };
            writeln!(f, "{} {}", keyword, condition)?;
        }
        write!(f, "  then {}", self.conclusion)
    }
}

/// Ordered, validated collection of rules.
///
/// Immutable after construction; share it between engines with an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleBase {
    rules: Vec<Rule>,
}

impl RuleBase {
    /// Validate `rules` and build a rule base from them
    pub fn new(rules: Vec<Rule>, limits: &ResourceLimits) -> TriageResult<Self> {
        Validator.validate(&rules, limits)?;
        Ok(Self { rules })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The two COVID-19 triage rules the tool ships with
    pub fn covid() -> Self {
        Self {
            rules: vec![
                Rule::new(
                    "covid-likely",
                    vec![
                        Pattern::symptom("fever"),
                        Pattern::symptom("cough"),
                        Pattern::symptom("loss_of_taste"),
                    ],
                    Fact::diagnosis("Likely COVID-19"),
                ),
                Rule::new(
                    "covid-severe",
                    vec![
                        Pattern::symptom("fever"),
                        Pattern::symptom("difficulty_breathing"),
                    ],
                    Fact::diagnosis("Possible severe COVID-19 - seek medical attention"),
                ),
            ],
        }
    }

    /// Parse rule file text into a validated rule base
    pub fn parse(code: &str, source: &str, limits: &ResourceLimits) -> TriageResult<Self> {
        let rules = crate::parser::parse(code, Some(source.to_string()), limits)?;
        Self::new(rules, limits)
    }

    /// Rules of `self` followed by rules of `other`, revalidated as a whole
    pub fn merge(&self, other: &RuleBase, limits: &ResourceLimits) -> TriageResult<Self> {
        let mut rules = self.rules.clone();
        rules.extend(other.rules.iter().cloned());
        Self::new(rules, limits)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.rules.iter().map(|rule| rule.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl fmt::Display for RuleBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
                writeln!(f)?;
            }
            write!(f, "{}", rule)?;
        }
        Ok(())
    }
}
