use crate::error::TriageError;
use crate::fact::{Fact, FactKind, Pattern};
use crate::parser::{Rule, SourceContext};
use crate::span::Span;
use pest::iterators::Pair;

/// `kind(attr = value, ...)` before it is turned into a fact or a pattern
pub(crate) struct FactExpr {
    pub kind: String,
    pub attributes: Vec<(String, String)>,
    pub span: Span,
}

pub(crate) fn parse_fact_expr(pair: Pair<Rule>) -> Result<FactExpr, TriageError> {
    let span = Span::from_pest_span(pair.as_span());
    let mut kind = None;
    let mut attributes = Vec::new();

    for inner_pair in pair.into_inner() {
        match inner_pair.as_rule() {
            Rule::fact_kind => kind = Some(inner_pair.as_str().to_string()),
            Rule::attribute => attributes.push(parse_attribute(inner_pair)?),
            _ => {}
        }
    }

    let kind = kind.ok_or_else(|| {
        TriageError::InvalidInput("Grammar error: fact_expr missing fact_kind".to_string())
    })?;

    Ok(FactExpr {
        kind,
        attributes,
        span,
    })
}

fn parse_attribute(pair: Pair<Rule>) -> Result<(String, String), TriageError> {
    let mut name = None;
    let mut value = None;

    for inner_pair in pair.into_inner() {
        match inner_pair.as_rule() {
            Rule::attribute_name => name = Some(inner_pair.as_str().to_string()),
            Rule::identifier => value = Some(inner_pair.as_str().to_string()),
            Rule::string_literal => {
                let content = inner_pair
                    .into_inner()
                    .find(|p| p.as_rule() == Rule::string_content)
                    .map(|p| unescape(p.as_str()))
                    .unwrap_or_default();
                value = Some(content);
            }
            _ => {}
        }
    }

    match (name, value) {
        (Some(name), Some(value)) => Ok((name, value)),
        _ => Err(TriageError::InvalidInput(
            "Grammar error: attribute missing name or value".to_string(),
        )),
    }
}

pub(crate) fn to_pattern(expr: FactExpr, context: &SourceContext) -> Result<Pattern, TriageError> {
    Pattern::new(&expr.kind, expr.attributes)
        .map_err(|e| shape_error(e, &expr.kind, expr.span, context))
}

pub(crate) fn to_fact(expr: FactExpr, context: &SourceContext) -> Result<Fact, TriageError> {
    Fact::new(&expr.kind, expr.attributes)
        .map_err(|e| shape_error(e, &expr.kind, expr.span, context))
}

/// Re-raise a shape error at the fact expression, listing the attributes a known kind takes
fn shape_error(
    error: TriageError,
    kind: &str,
    span: Span,
    context: &SourceContext,
) -> TriageError {
    let message = match error {
        TriageError::InvalidFact(msg) | TriageError::InvalidPattern(msg) => msg,
        other => other.to_string(),
    };
    match FactKind::parse(kind).shape() {
        Some(shape) => context.semantic_error_with_suggestion(
            message,
            span,
            format!("{} facts take: {}", kind, shape.join(", ")),
        ),
        None => context.semantic_error(message, span),
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}
