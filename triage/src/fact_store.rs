//! Working memory for one inference session

use crate::fact::{Fact, FactKind, Pattern};
use std::collections::HashSet;

/// The set of facts currently held for one diagnosis request.
///
/// Set semantics: asserting a fact that is already present is a no-op.
/// Enumeration follows insertion order, so repeated runs over the same input
/// produce identical snapshots.
#[derive(Debug, Clone, Default)]
pub struct FactStore {
    facts: Vec<Fact>,
    index: HashSet<Fact>,
}

impl FactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `fact` if absent. Returns whether it was newly added.
    pub fn assert(&mut self, fact: Fact) -> bool {
        if self.index.contains(&fact) {
            return false;
        }
        self.index.insert(fact.clone());
        self.facts.push(fact);
        true
    }

    /// Remove `fact` if present. Returns whether anything was removed.
    pub fn retract(&mut self, fact: &Fact) -> bool {
        if !self.index.remove(fact) {
            return false;
        }
        self.facts.retain(|f| f != fact);
        true
    }

    /// True iff at least one fact satisfies `pattern`
    pub fn contains(&self, pattern: &Pattern) -> bool {
        self.facts.iter().any(|fact| pattern.matches(fact))
    }

    pub fn contains_fact(&self, fact: &Fact) -> bool {
        self.index.contains(fact)
    }

    pub fn clear(&mut self) {
        self.facts.clear();
        self.index.clear();
    }

    /// Current facts in insertion order
    pub fn snapshot(&self) -> Vec<Fact> {
        self.facts.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fact> {
        self.facts.iter()
    }

    pub fn facts_of_kind<'a>(&'a self, kind: &'a FactKind) -> impl Iterator<Item = &'a Fact> {
        self.facts.iter().filter(move |fact| fact.kind_str() == kind.as_str())
    }

    /// `result` strings of every diagnosis fact, in insertion order
    pub fn diagnoses(&self) -> Vec<String> {
        self.facts
            .iter()
            .filter_map(|fact| match fact {
                Fact::Diagnosis { result } => Some(result.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl Extend<Fact> for FactStore {
    fn extend<I: IntoIterator<Item = Fact>>(&mut self, iter: I) {
        for fact in iter {
            self.assert(fact);
        }
    }
}

impl FromIterator<Fact> for FactStore {
    fn from_iter<I: IntoIterator<Item = Fact>>(iter: I) -> Self {
        let mut store = FactStore::new();
        store.extend(iter);
        store
    }
}
