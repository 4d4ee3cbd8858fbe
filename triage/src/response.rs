use crate::{Fact, RunReport, Symptom};
use serde::Serialize;

/// Response from one diagnosis request
///
/// `diagnoses` being empty means no rule's conditions were satisfied.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub symptoms: Vec<Symptom>,
    pub diagnoses: Vec<String>,
    pub fired_rules: Vec<String>,
    pub facts: Vec<Fact>,
}

impl Response {
    pub(crate) fn new(symptoms: Vec<Symptom>, facts: Vec<Fact>, report: &RunReport) -> Self {
        let diagnoses = facts
            .iter()
            .filter_map(|fact| match fact {
                Fact::Diagnosis { result } => Some(result.clone()),
                _ => None,
            })
            .collect();

        Self {
            symptoms,
            diagnoses,
            fired_rules: report.fired_rule_names(),
            facts,
        }
    }

    pub fn has_diagnosis(&self) -> bool {
        !self.diagnoses.is_empty()
    }
}
