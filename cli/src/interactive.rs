use anyhow::{Context, Result};
use inquire::MultiSelect;
use triage::{Symptom, SymptomSelection};

/// Let the user tick the symptoms that are present.
///
/// Symptoms already present in `current` start out ticked.
pub fn select_symptoms(current: &SymptomSelection) -> Result<SymptomSelection> {
    let labels: Vec<&str> = Symptom::ALL.iter().map(Symptom::label).collect();
    let defaults: Vec<usize> = Symptom::ALL
        .iter()
        .enumerate()
        .filter(|(_, symptom)| current.is_present(**symptom))
        .map(|(i, _)| i)
        .collect();

    let selected = MultiSelect::new("Which symptoms are present?", labels)
        .with_default(&defaults)
        .with_help_message("Space to toggle, Enter to confirm")
        .prompt()
        .context("Failed to get symptom selection")?;

    Ok(Symptom::ALL
        .into_iter()
        .filter(|symptom| selected.contains(&symptom.label()))
        .collect())
}
