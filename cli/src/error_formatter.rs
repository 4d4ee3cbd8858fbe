use ariadne::{Color, Label, Report, ReportKind, Source};
use triage::{ErrorDetails, TriageError};

/// Format a TriageError for the terminal, with source snippets where the error has a location
pub fn format_error(error: &TriageError) -> String {
    match error {
        TriageError::Parse(details) => format_located("Parse error", details, error),
        TriageError::Semantic(details) => format_located("Semantic error", details, error),
        TriageError::InvalidRule { rule, message } => {
            format!("Invalid rule '{}': {}", rule, message)
        }
        TriageError::InvalidFact(msg) => format!("Invalid fact: {}", msg),
        TriageError::InvalidPattern(msg) => format!("Invalid pattern: {}", msg),
        TriageError::UnknownSymptom { name, suggestion } => {
            format!("Unknown symptom '{}'\n  Expected one of: {}", name, suggestion)
        }
        TriageError::InvalidInput(msg) => format!("Invalid input: {}", msg),
        TriageError::ResourceLimitExceeded {
            limit_name,
            limit_value,
            actual_value,
            suggestion,
        } => {
            format!(
                "Resource limit exceeded: {}\n  Limit: {}\n  Actual: {}\n  {}",
                limit_name, limit_value, actual_value, suggestion
            )
        }
        TriageError::MultipleErrors(errors) => {
            let mut result = String::from("Multiple errors occurred:\n\n");
            for error in errors {
                result.push_str(&format_error(error));
                result.push_str("\n\n");
            }
            result
        }
    }
}

fn format_located(error_type: &str, details: &ErrorDetails, error: &TriageError) -> String {
    let mut output = Vec::new();

    let enhanced_message = format!(
        "{}: {} (at {}:{})",
        error_type, details.message, details.source_id, details.span
    );

    let end = details.span.end.max(details.span.start);
    let mut report = Report::build(ReportKind::Error, &details.source_id, details.span.start)
        .with_message(enhanced_message)
        .with_label(
            Label::new((&details.source_id, details.span.start..end))
                .with_message("")
                .with_color(Color::Red),
        );

    if let Some(suggestion) = &details.suggestion {
        report = report.with_help(suggestion);
    }

    match report.finish().write(
        (
            &details.source_id,
            Source::from(details.source_text.as_ref()),
        ),
        &mut output,
    ) {
        Ok(_) => String::from_utf8_lossy(&output).to_string(),
        Err(_) => format!("{}", error),
    }
}
