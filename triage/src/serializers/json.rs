use crate::{Symptom, SymptomSelection, TriageError, TriageResult};
use serde_json::Value;

/// Convert a JSON symptom mapping into a selection
///
/// Expected format, every key optional:
/// ```json
/// {
///   "fever": true,
///   "cough": false,
///   "loss_of_taste": true,
///   "difficulty_breathing": false
/// }
/// ```
/// Unknown symptom names and non-boolean values are rejected.
pub fn to_selection(json: &[u8]) -> TriageResult<SymptomSelection> {
    let value: Value = serde_json::from_slice(json)
        .map_err(|e| TriageError::InvalidInput(format!("JSON parse error: {}", e)))?;

    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(TriageError::InvalidInput(format!(
                "Expected a JSON object of symptom flags, got {}",
                json_type(&other)
            )))
        }
    };

    let mut selection = SymptomSelection::new();
    for (name, flag) in map {
        let symptom: Symptom = name.parse()?;
        match flag {
            Value::Bool(present) => selection.set(symptom, present),
            other => {
                return Err(TriageError::InvalidInput(format!(
                    "Expected boolean for '{}', got {}",
                    name,
                    json_type(&other)
                )))
            }
        }
    }

    Ok(selection)
}

/// The selection as a JSON object covering the whole catalogue
pub fn from_selection(selection: &SymptomSelection) -> Value {
    let map = Symptom::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), Value::Bool(selection.is_present(*s))))
        .collect();
    Value::Object(map)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
