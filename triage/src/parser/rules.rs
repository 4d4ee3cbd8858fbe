use crate::error::TriageError;
use crate::parser::facts::{parse_fact_expr, to_fact, to_pattern};
use crate::parser::{Rule, SourceContext};
use crate::Rule as TriageRule;
use crate::span::Span;
use pest::iterators::Pair;

pub(crate) fn parse_rule_definition(
    pair: Pair<Rule>,
    context: &SourceContext,
) -> Result<TriageRule, TriageError> {
    let span = Span::from_pest_span(pair.as_span());
    let mut rule_name = None;
    let mut salience = 0;
    let mut conditions = Vec::new();
    let mut conclusion = None;

    for inner_pair in pair.into_inner() {
        match inner_pair.as_rule() {
            Rule::rule_name => rule_name = Some(inner_pair.as_str().to_string()),
            Rule::salience => salience = parse_salience(inner_pair, context)?,
            Rule::condition => {
                let expr = parse_fact_expr(single_child(inner_pair)?)?;
                conditions.push(to_pattern(expr, context)?);
            }
            Rule::conclusion => {
                let expr = parse_fact_expr(single_child(inner_pair)?)?;
                conclusion = Some(to_fact(expr, context)?);
            }
            _ => {}
        }
    }

    let name = rule_name.ok_or_else(|| {
        TriageError::InvalidInput("Grammar error: rule_definition missing rule_name".to_string())
    })?;
    let conclusion = conclusion.ok_or_else(|| {
        TriageError::InvalidInput("Grammar error: rule_definition missing conclusion".to_string())
    })?;

    Ok(TriageRule::new(name, conditions, conclusion)
        .with_salience(salience)
        .with_span(span))
}

fn parse_salience(pair: Pair<Rule>, context: &SourceContext) -> Result<i32, TriageError> {
    let integer = pair
        .into_inner()
        .find(|p| p.as_rule() == Rule::integer)
        .ok_or_else(|| {
            TriageError::InvalidInput("Grammar error: salience missing integer".to_string())
        })?;

    integer.as_str().parse::<i32>().map_err(|_| {
        context.semantic_error(
            format!("salience '{}' is out of range", integer.as_str()),
            Span::from_pest_span(integer.as_span()),
        )
    })
}

fn single_child(pair: Pair<Rule>) -> Result<Pair<Rule>, TriageError> {
    pair.into_inner().next().ok_or_else(|| {
        TriageError::InvalidInput("Grammar error: expected fact expression".to_string())
    })
}
