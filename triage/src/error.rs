use crate::span::Span;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Detailed error information with source location
#[derive(Debug, Clone)]
pub struct ErrorDetails {
    pub message: String,
    pub span: Span,
    pub source_id: String,
    pub source_text: Arc<str>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        write!(f, " at {}:{}", self.source_id, self.span)
    }
}

/// Error types for the triage engine
///
/// Every variant describes a problem found while building a rule base or
/// adapting caller input. Running the engine itself never fails.
#[derive(Debug, Clone, Error)]
pub enum TriageError {
    /// Rule file syntax error with source location
    #[error("Parse error: {0}")]
    Parse(Box<ErrorDetails>),

    /// Well-formed rule file describing an impossible rule (wrong attribute shape, etc.)
    #[error("Semantic error: {0}")]
    Semantic(Box<ErrorDetails>),

    /// Rule rejected while building a rule base
    #[error("Invalid rule '{rule}': {message}")]
    InvalidRule { rule: String, message: String },

    /// Fact whose attributes don't fit its kind
    #[error("Invalid fact: {0}")]
    InvalidFact(String),

    /// Condition pattern constraining attributes its kind doesn't have
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// Symptom identifier outside the catalogue
    #[error("Unknown symptom '{name}' (expected one of: {suggestion})")]
    UnknownSymptom { name: String, suggestion: String },

    /// Malformed caller input (JSON selections and the like)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value}). {suggestion}")]
    ResourceLimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
        suggestion: String,
    },

    /// Multiple errors collected together
    #[error("{}", format_multiple(.0))]
    MultipleErrors(Vec<TriageError>),
}

impl TriageError {
    /// Create a parse error with source information
    pub fn parse(
        message: impl Into<String>,
        span: Span,
        source_id: impl Into<String>,
        source_text: Arc<str>,
    ) -> Self {
        Self::Parse(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_id: source_id.into(),
            source_text,
            suggestion: None,
        }))
    }

    /// Create a semantic error with source information
    pub fn semantic(
        message: impl Into<String>,
        span: Span,
        source_id: impl Into<String>,
        source_text: Arc<str>,
    ) -> Self {
        Self::Semantic(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_id: source_id.into(),
            source_text,
            suggestion: None,
        }))
    }

    /// Create a semantic error with suggestion
    pub fn semantic_with_suggestion(
        message: impl Into<String>,
        span: Span,
        source_id: impl Into<String>,
        source_text: Arc<str>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Semantic(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_id: source_id.into(),
            source_text,
            suggestion: Some(suggestion.into()),
        }))
    }

    pub fn invalid_rule(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRule {
            rule: rule.into(),
            message: message.into(),
        }
    }

    /// Collapse a list of errors: none is `None`, one is itself, more is `MultipleErrors`
    pub fn collect(mut errors: Vec<TriageError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Self::MultipleErrors(errors)),
        }
    }
}

fn format_multiple(errors: &[TriageError]) -> String {
    let mut out = String::from("Multiple errors:");
    for (i, error) in errors.iter().enumerate() {
        out.push_str(&format!("\n  {}. {}", i + 1, error));
    }
    out
}
