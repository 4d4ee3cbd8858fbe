//! The symptom catalogue and the caller's selection over it

use crate::{Fact, TriageError, TriageResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Symptoms a caller can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symptom {
    Fever,
    Cough,
    LossOfTaste,
    DifficultyBreathing,
}

impl Symptom {
    pub const ALL: [Symptom; 4] = [
        Symptom::Fever,
        Symptom::Cough,
        Symptom::LossOfTaste,
        Symptom::DifficultyBreathing,
    ];

    /// Identifier used in facts and rule files
    pub fn as_str(&self) -> &'static str {
        match self {
            Symptom::Fever => "fever",
            Symptom::Cough => "cough",
            Symptom::LossOfTaste => "loss_of_taste",
            Symptom::DifficultyBreathing => "difficulty_breathing",
        }
    }

    /// Human-readable label, e.g. "Loss of taste"
    pub fn label(&self) -> &'static str {
        match self {
            Symptom::Fever => "Fever",
            Symptom::Cough => "Cough",
            Symptom::LossOfTaste => "Loss of taste",
            Symptom::DifficultyBreathing => "Difficulty breathing",
        }
    }

    pub fn to_fact(&self) -> Fact {
        Fact::symptom(self.as_str())
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Symptom {
    type Err = TriageError;

    /// Accepts the identifier, case-insensitively, with `-` or space in place of `_`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Symptom::ALL
            .into_iter()
            .find(|symptom| symptom.as_str() == normalized)
            .ok_or_else(|| TriageError::UnknownSymptom {
                name: s.to_string(),
                suggestion: Symptom::ALL
                    .iter()
                    .map(Symptom::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Which symptoms are present for one diagnosis request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomSelection {
    flags: BTreeMap<Symptom, bool>,
}

impl Default for SymptomSelection {
    fn default() -> Self {
        Self {
            flags: Symptom::ALL.into_iter().map(|s| (s, false)).collect(),
        }
    }
}

impl SymptomSelection {
    /// Every symptom absent
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names(names: &[&str]) -> TriageResult<Self> {
        let mut selection = Self::new();
        for name in names {
            selection.set(name.parse()?, true);
        }
        Ok(selection)
    }

    pub fn set(&mut self, symptom: Symptom, present: bool) {
        self.flags.insert(symptom, present);
    }

    pub fn with(mut self, symptom: Symptom) -> Self {
        self.set(symptom, true);
        self
    }

    pub fn is_present(&self, symptom: Symptom) -> bool {
        self.flags.get(&symptom).copied().unwrap_or(false)
    }

    /// Present symptoms in catalogue order
    pub fn present(&self) -> Vec<Symptom> {
        Symptom::ALL
            .into_iter()
            .filter(|s| self.is_present(*s))
            .collect()
    }

    pub fn clear(&mut self) {
        for present in self.flags.values_mut() {
            *present = false;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.present().is_empty()
    }

    /// One `symptom(name = ...)` fact per present symptom
    pub fn to_facts(&self) -> Vec<Fact> {
        self.present().iter().map(Symptom::to_fact).collect()
    }
}

impl FromIterator<Symptom> for SymptomSelection {
    fn from_iter<I: IntoIterator<Item = Symptom>>(iter: I) -> Self {
        let mut selection = Self::new();
        for symptom in iter {
            selection.set(symptom, true);
        }
        selection
    }
}
