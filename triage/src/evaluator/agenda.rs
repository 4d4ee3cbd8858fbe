//! Conflict resolution
//!
//! Every activation is eligible to fire in the pass that found it. They are
//! ordered by salience (highest first) and then by declaration order. An
//! activation whose conclusion is already in working memory is skipped when
//! its turn comes, so a fact is derived at most once.

use crate::evaluator::matcher::Activation;
use crate::FactStore;
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct Agenda<'a> {
    queue: VecDeque<Activation<'a>>,
}

impl<'a> Agenda<'a> {
    pub fn new(mut activations: Vec<Activation<'a>>) -> Self {
        activations.sort_by(|a, b| {
            b.rule
                .salience
                .cmp(&a.rule.salience)
                .then(a.index.cmp(&b.index))
        });
        Self {
            queue: activations.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Rule names in firing order, without consulting working memory
    pub fn rule_names(&self) -> Vec<&'a str> {
        self.queue.iter().map(|a| a.rule.name.as_str()).collect()
    }

    /// Take the next activation whose conclusion isn't already known
    pub fn next_eligible(&mut self, facts: &FactStore) -> Option<Activation<'a>> {
        while let Some(activation) = self.queue.pop_front() {
            if !facts.contains_fact(&activation.rule.conclusion) {
                return Some(activation);
            }
            tracing::trace!(
                rule = %activation.rule.name,
                "skipped: conclusion already present"
            );
        }
        None
    }
}
