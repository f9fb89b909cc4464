use crate::catalog::{ColumnType, Operator, TypeFamily, ValueShape};
use crate::columns::ColumnRegistry;
use crate::errors::ParseError;
use crate::rule::{Rule, RuleValue};
use crate::value::{normalize_bool, Scalar};
use regex::Regex;
use std::sync::OnceLock;
use strsim::jaro_winkler;

const SUGGESTION_THRESHOLD: f64 = 0.8;

fn rule_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([\w.\-]+)\s*:\s*([A-Za-z]+)\s*(?::(.*))?$").expect("rule pattern is valid")
    })
}

/// Parses `column:operator[:value]` against a column registry and validates
/// the result, e.g. `ftd:gt:1000`, `createdAt:between:2024-01-01..2024-03-31`
/// or `lastContactAt:isEmpty`.
pub fn parse_rule<R>(input: &str, columns: &ColumnRegistry<R>) -> Result<Rule, ParseError> {
    let input = input.trim();
    let captures = rule_pattern()
        .captures(input)
        .ok_or_else(|| ParseError::Syntax(input.to_string()))?;

    let column_id = &captures[1];
    let operator_text = &captures[2];
    let raw_value = captures.get(3).map(|m| m.as_str().trim());

    let column = columns
        .get(column_id)
        .ok_or_else(|| ParseError::UnknownColumn {
            column: column_id.to_string(),
            suggestion: closest(column_id, columns.ids()),
        })?;

    let operator = operator_text
        .parse::<Operator>()
        .map_err(|_| ParseError::UnknownOperator {
            operator: operator_text.to_string(),
            suggestion: closest(
                operator_text,
                column.operators().iter().map(|op| op.as_str()),
            ),
        })?;

    let column_type = column.column_type();
    let value = match raw_value {
        None | Some("") => None,
        Some(raw) => Some(parse_value(raw, operator, column_type)),
    };

    Ok(Rule::validated(column_id, column_type, operator, value)?)
}

pub fn parse_rules<R, S: AsRef<str>>(
    inputs: &[S],
    columns: &ColumnRegistry<R>,
) -> Result<Vec<Rule>, ParseError> {
    inputs
        .iter()
        .map(|input| parse_rule(input.as_ref(), columns))
        .collect()
}

fn parse_value(raw: &str, operator: Operator, column_type: ColumnType) -> RuleValue {
    if operator.value_shape() == ValueShape::Range {
        if let Some((from, to)) = raw.split_once("..") {
            return RuleValue::Range {
                from: parse_bound(from, column_type),
                to: parse_bound(to, column_type),
            };
        }
    }
    RuleValue::Scalar(parse_scalar(raw, column_type))
}

fn parse_bound(raw: &str, column_type: ColumnType) -> Option<Scalar> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| parse_scalar(raw, column_type))
}

fn parse_scalar(raw: &str, column_type: ColumnType) -> Scalar {
    let raw = raw.trim().trim_matches(|c| c == '"' || c == '\'');
    match column_type.family() {
        TypeFamily::Numeric => raw
            .parse::<f64>()
            .map_or_else(|_| Scalar::from(raw), Scalar::Number),
        TypeFamily::Boolean => normalize_bool(raw).map_or_else(|| Scalar::from(raw), Scalar::Bool),
        TypeFamily::Text | TypeFamily::Temporal => Scalar::from(raw),
    }
}

fn closest<'a>(needle: &str, candidates: impl Iterator<Item = &'a str>) -> Option<String> {
    let needle = needle.to_lowercase();
    candidates
        .map(|candidate| (jaro_winkler(&needle, &candidate.to_lowercase()), candidate))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, candidate)| candidate.to_string())
}
