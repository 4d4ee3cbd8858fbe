use crate::error::TriageError;
use crate::resource_limits::ResourceLimits;
use crate::Rule as TriageRule;
use crate::span::Span;
use pest::Parser;
use pest_derive::Parser;
use std::sync::Arc;

pub mod facts;
pub mod rules;

#[derive(Parser)]
#[grammar = "src/parser/triage.pest"]
pub struct TriageParser;

/// Where the text being parsed came from, carried into error reports
pub(crate) struct SourceContext<'a> {
    pub source_id: &'a str,
    pub source_text: Arc<str>,
}

impl SourceContext<'_> {
    pub(crate) fn semantic_error(&self, message: impl Into<String>, span: Span) -> TriageError {
        TriageError::semantic(
            message,
            span,
            self.source_id,
            Arc::clone(&self.source_text),
        )
    }

    pub(crate) fn semantic_error_with_suggestion(
        &self,
        message: impl Into<String>,
        span: Span,
        suggestion: impl Into<String>,
    ) -> TriageError {
        TriageError::semantic_with_suggestion(
            message,
            span,
            self.source_id,
            Arc::clone(&self.source_text),
            suggestion,
        )
    }
}

/// Parse rule file text into rules, in declaration order.
///
/// Only syntax and per-rule shape are checked here; cross-rule checks
/// (duplicate names, limits) belong to the [`Validator`](crate::Validator).
pub fn parse(
    content: &str,
    filename: Option<String>,
    limits: &ResourceLimits,
) -> Result<Vec<TriageRule>, TriageError> {
    if content.len() > limits.max_rule_file_bytes {
        return Err(TriageError::ResourceLimitExceeded {
            limit_name: "max_rule_file_bytes".to_string(),
            limit_value: format!("{} bytes", limits.max_rule_file_bytes),
            actual_value: format!("{} bytes", content.len()),
            suggestion: "Reduce file size or split the rules into multiple files".to_string(),
        });
    }

    let filename = filename.unwrap_or_else(|| "<input>".to_string());
    let context = SourceContext {
        source_id: &filename,
        source_text: Arc::from(content),
    };

    let pairs = TriageParser::parse(Rule::rule_file, content).map_err(|e| {
        let (start, end) = match e.location {
            pest::error::InputLocation::Pos(pos) => (pos, pos),
            pest::error::InputLocation::Span((start, end)) => (start, end),
        };
        let (line, col) = match e.line_col {
            pest::error::LineColLocation::Pos((line, col)) => (line, col),
            pest::error::LineColLocation::Span((line, col), _) => (line, col),
        };
        TriageError::parse(
            format!("{}", e.variant.message()),
            Span {
                start,
                end,
                line,
                col,
            },
            filename.clone(),
            Arc::clone(&context.source_text),
        )
    })?;

    let mut parsed = Vec::new();
    for pair in pairs {
        if pair.as_rule() == Rule::rule_file {
            for inner_pair in pair.into_inner() {
                if inner_pair.as_rule() == Rule::rule_definition {
                    parsed.push(rules::parse_rule_definition(inner_pair, &context)?);
                }
            }
        }
    }

    tracing::debug!(source = %filename, rules = parsed.len(), "parsed rule file");
    Ok(parsed)
}
