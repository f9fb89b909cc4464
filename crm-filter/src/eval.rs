use crate::catalog::{ColumnType, Operator, TypeFamily};
use crate::rule::{Rule, RuleValue};
use crate::value::CellValue;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::trace;

/// A cell or rule value brought into the comparison domain of a column type.
/// Both sides of a comparison are always coerced with the same column type,
/// so they share a variant.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub(crate) enum Operand {
    Text(String),
    Number(f64),
    Day(NaiveDate),
    Instant(DateTime<Utc>),
    Bool(bool),
}

pub(crate) fn coerce(cell: &CellValue, column_type: ColumnType) -> Option<Operand> {
    match column_type.family() {
        TypeFamily::Text => cell.as_text().map(|s| Operand::Text(s.to_lowercase())),
        TypeFamily::Numeric => cell.as_number().map(Operand::Number),
        TypeFamily::Temporal if column_type == ColumnType::Datetime => {
            cell.as_datetime().map(Operand::Instant)
        }
        TypeFamily::Temporal => cell.as_date().map(Operand::Day),
        TypeFamily::Boolean => cell.as_bool().map(Operand::Bool),
    }
}

/// Decides whether a single cell satisfies a rule.
///
/// Malformed input never fails: an operator that is illegal for the column,
/// a missing or uncoercible rule value, or a cell of the wrong kind all
/// evaluate to `false`.
pub fn evaluate(rule: &Rule, column_type: ColumnType, cell: &CellValue) -> bool {
    if !column_type.allows(rule.operator) {
        trace!(
            "{} does not apply to {} column {}",
            rule.operator,
            column_type,
            rule.column_id
        );
        return false;
    }

    match rule.operator {
        Operator::IsEmpty => return cell.is_empty(),
        Operator::IsNotEmpty => return !cell.is_empty(),
        _ => {}
    }

    let Some(field) = coerce(cell, column_type) else {
        trace!("{} cell {:?} is not a {}", rule.column_id, cell, column_type);
        return false;
    };

    match (rule.operator, &rule.value) {
        (
            Operator::Between,
            Some(RuleValue::Range {
                from: Some(from),
                to: Some(to),
            }),
        ) => match (
            coerce(&from.to_cell(), column_type),
            coerce(&to.to_cell(), column_type),
        ) {
            (Some(low), Some(high)) => low <= field && field <= high,
            _ => false,
        },
        (operator, Some(RuleValue::Scalar(target))) => coerce(&target.to_cell(), column_type)
            .is_some_and(|target| compare(operator, &field, &target)),
        _ => false,
    }
}

fn compare(operator: Operator, field: &Operand, target: &Operand) -> bool {
    match (operator, field, target) {
        (Operator::Contains, Operand::Text(f), Operand::Text(t)) => f.contains(t.as_str()),
        (Operator::StartsWith, Operand::Text(f), Operand::Text(t)) => f.starts_with(t.as_str()),
        (Operator::EndsWith, Operand::Text(f), Operand::Text(t)) => f.ends_with(t.as_str()),
        (Operator::Equals | Operator::Eq | Operator::On | Operator::Is, f, t) => f == t,
        (Operator::Ne, f, t) => f != t,
        (Operator::Gt | Operator::After, f, t) => f > t,
        (Operator::Lt | Operator::Before, f, t) => f < t,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Scalar;

    fn rule(operator: Operator, value: Option<RuleValue>) -> Rule {
        Rule::new("field", operator, value)
    }

    fn scalar(value: impl Into<Scalar>) -> Option<RuleValue> {
        Some(RuleValue::scalar(value))
    }

    #[test]
    fn test_text_operators_ignore_case() {
        let cell = CellValue::from("John.Smith@Example.com");
        let ty = ColumnType::Email;
        assert!(evaluate(&rule(Operator::Contains, scalar("SMITH")), ty, &cell));
        assert!(evaluate(&rule(Operator::StartsWith, scalar("john")), ty, &cell));
        assert!(evaluate(&rule(Operator::EndsWith, scalar(".COM")), ty, &cell));
        assert!(evaluate(
            &rule(Operator::Equals, scalar("john.smith@example.com")),
            ty,
            &cell
        ));
        assert!(!evaluate(&rule(Operator::Equals, scalar("john")), ty, &cell));
    }

    #[test]
    fn test_text_operators_stringify_numbers() {
        let cell = CellValue::from(4420.0);
        assert!(evaluate(
            &rule(Operator::StartsWith, scalar("44")),
            ColumnType::Phone,
            &cell
        ));
    }

    #[test]
    fn test_empty_checks() {
        let is_empty = rule(Operator::IsEmpty, None);
        let is_not_empty = rule(Operator::IsNotEmpty, None);
        let cells = [
            (CellValue::Null, true),
            (CellValue::from(""), true),
            (CellValue::from("x"), false),
            (CellValue::from(0.0), false),
        ];
        for (cell, empty) in cells {
            assert_eq!(evaluate(&is_empty, ColumnType::Text, &cell), empty);
            assert_eq!(evaluate(&is_not_empty, ColumnType::Text, &cell), !empty);
        }
    }

    #[test]
    fn test_numeric_comparisons() {
        let ty = ColumnType::Money;
        let cell = CellValue::from(1500.0);
        assert!(evaluate(&rule(Operator::Gt, scalar(1000)), ty, &cell));
        assert!(!evaluate(&rule(Operator::Lt, scalar(1000)), ty, &cell));
        assert!(evaluate(&rule(Operator::Eq, scalar(1500)), ty, &cell));
        assert!(evaluate(&rule(Operator::Ne, scalar(1499.99)), ty, &cell));
        assert!(evaluate(&rule(Operator::Gt, scalar("999")), ty, &cell));
    }

    #[test]
    fn test_between_is_inclusive() {
        let ty = ColumnType::Number;
        let between = rule(Operator::Between, Some(RuleValue::range(10, 20)));
        assert!(evaluate(&between, ty, &CellValue::from(10.0)));
        assert!(evaluate(&between, ty, &CellValue::from(20.0)));
        assert!(evaluate(&between, ty, &CellValue::from(15.0)));
        assert!(!evaluate(&between, ty, &CellValue::from(9.99)));
        assert!(!evaluate(&between, ty, &CellValue::from(20.01)));
    }

    #[test]
    fn test_non_numeric_cells_never_match() {
        let ty = ColumnType::Number;
        for cell in [
            CellValue::from("abc"),
            CellValue::from(true),
            CellValue::Null,
        ] {
            assert!(!evaluate(&rule(Operator::Ne, scalar(1)), ty, &cell));
            assert!(!evaluate(&rule(Operator::Gt, scalar(-1)), ty, &cell));
        }
    }

    #[test]
    fn test_date_comparison_uses_days() {
        let ty = ColumnType::Date;
        let cell = CellValue::from("2024-03-01T18:30:00Z");
        assert!(evaluate(&rule(Operator::On, scalar("2024-03-01")), ty, &cell));
        assert!(evaluate(&rule(Operator::Before, scalar("2024-03-02")), ty, &cell));
        assert!(!evaluate(&rule(Operator::After, scalar("2024-03-01")), ty, &cell));
        let between = rule(
            Operator::Between,
            Some(RuleValue::range("2024-03-01", "2024-03-01")),
        );
        assert!(evaluate(&between, ty, &cell));
    }

    #[test]
    fn test_datetime_comparison_uses_full_precision() {
        let ty = ColumnType::Datetime;
        let cell = CellValue::from("2024-03-01T18:30:00Z");
        assert!(!evaluate(&rule(Operator::On, scalar("2024-03-01")), ty, &cell));
        assert!(evaluate(
            &rule(Operator::On, scalar("2024-03-01T18:30:00Z")),
            ty,
            &cell
        ));
        assert!(evaluate(
            &rule(Operator::After, scalar("2024-03-01T18:29:59Z")),
            ty,
            &cell
        ));
        assert!(!evaluate(
            &rule(Operator::After, scalar("2024-03-01T18:30:00Z")),
            ty,
            &cell
        ));
    }

    #[test]
    fn test_boolean_is_normalizes_both_sides() {
        let ty = ColumnType::Boolean;
        assert!(evaluate(&rule(Operator::Is, scalar(true)), ty, &CellValue::from("Y")));
        assert!(evaluate(&rule(Operator::Is, scalar("no")), ty, &CellValue::from(false)));
        assert!(!evaluate(&rule(Operator::Is, scalar(true)), ty, &CellValue::from("maybe")));
        assert!(!evaluate(&rule(Operator::Is, scalar(true)), ty, &CellValue::Null));
    }

    #[test]
    fn test_illegal_operator_never_matches() {
        assert!(!evaluate(
            &rule(Operator::IsEmpty, None),
            ColumnType::Boolean,
            &CellValue::Null
        ));
        assert!(!evaluate(
            &rule(Operator::Gt, scalar(1)),
            ColumnType::Text,
            &CellValue::from(5.0)
        ));
    }

    #[test]
    fn test_malformed_rule_values_never_match() {
        let ty = ColumnType::Number;
        let cell = CellValue::from(5.0);
        assert!(!evaluate(&rule(Operator::Gt, None), ty, &cell));
        assert!(!evaluate(&rule(Operator::Gt, scalar("five")), ty, &cell));
        assert!(!evaluate(
            &rule(
                Operator::Between,
                Some(RuleValue::Range {
                    from: Some(Scalar::from(1)),
                    to: None
                })
            ),
            ty,
            &cell
        ));
        assert!(!evaluate(&rule(Operator::Between, scalar(5)), ty, &cell));
    }
}
