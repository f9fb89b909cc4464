use crate::catalog::{ColumnType, Operator, TypeFamily, ValueShape};
use crate::errors::ValidationError;
use crate::eval::{coerce, Operand};
use crate::value::Scalar;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The value side of a rule. `between` takes a range, every other operator
/// that takes a value takes a scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Range {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<Scalar>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to: Option<Scalar>,
    },
    Scalar(Scalar),
}

impl RuleValue {
    pub fn scalar(value: impl Into<Scalar>) -> Self {
        RuleValue::Scalar(value.into())
    }

    pub fn range(from: impl Into<Scalar>, to: impl Into<Scalar>) -> Self {
        RuleValue::Range {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleValue::Scalar(value) => write!(f, "{}", value),
            RuleValue::Range { from, to } => {
                if let Some(from) = from {
                    write!(f, "{}", from)?;
                }
                write!(f, "..")?;
                if let Some(to) = to {
                    write!(f, "{}", to)?;
                }
                Ok(())
            }
        }
    }
}

/// A single filter condition on one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub column_id: String,
    pub operator: Operator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<RuleValue>,
}

impl Rule {
    /// Builds a rule without checking it against a column. Rules loaded from
    /// storage arrive this way too; see [`Rule::validate`].
    pub fn new(column_id: impl Into<String>, operator: Operator, value: Option<RuleValue>) -> Self {
        Self {
            column_id: column_id.into(),
            operator,
            value,
        }
    }

    /// Builds a rule for a column of the given type, rejecting operator/value
    /// combinations the column can't evaluate.
    pub fn validated(
        column_id: impl Into<String>,
        column_type: ColumnType,
        operator: Operator,
        value: Option<RuleValue>,
    ) -> Result<Self, ValidationError> {
        let rule = Self::new(column_id, operator, value);
        rule.validate(column_type)?;
        Ok(rule)
    }

    pub fn validate(&self, column_type: ColumnType) -> Result<(), ValidationError> {
        if !column_type.allows(self.operator) {
            return Err(ValidationError::OperatorNotAllowed {
                column_id: self.column_id.clone(),
                column_type,
                operator: self.operator,
            });
        }

        match (self.operator.value_shape(), &self.value) {
            (ValueShape::None, None) => Ok(()),
            (ValueShape::None, Some(_)) => Err(ValidationError::UnexpectedValue {
                column_id: self.column_id.clone(),
                operator: self.operator,
            }),
            (_, None) => Err(ValidationError::MissingValue {
                column_id: self.column_id.clone(),
                operator: self.operator,
            }),
            (ValueShape::Scalar, Some(RuleValue::Range { .. })) => {
                Err(ValidationError::UnexpectedRange {
                    column_id: self.column_id.clone(),
                    operator: self.operator,
                })
            }
            (ValueShape::Scalar, Some(RuleValue::Scalar(value))) => {
                self.check_operand(column_type, value).map(|_| ())
            }
            (ValueShape::Range, Some(RuleValue::Scalar(_))) => {
                Err(ValidationError::ExpectedRange {
                    column_id: self.column_id.clone(),
                    operator: self.operator,
                })
            }
            (ValueShape::Range, Some(RuleValue::Range { from, to })) => {
                let from = from.as_ref().ok_or_else(|| self.missing_bound("from"))?;
                let to = to.as_ref().ok_or_else(|| self.missing_bound("to"))?;
                let low = self.check_operand(column_type, from)?;
                let high = self.check_operand(column_type, to)?;
                if low > high {
                    return Err(ValidationError::InvertedRange {
                        column_id: self.column_id.clone(),
                    });
                }
                Ok(())
            }
        }
    }

    fn check_operand(
        &self,
        column_type: ColumnType,
        value: &Scalar,
    ) -> Result<Operand, ValidationError> {
        let empty_text = matches!(value, Scalar::Text(s) if s.is_empty());
        if empty_text && column_type.family() == TypeFamily::Text {
            return Err(ValidationError::MissingValue {
                column_id: self.column_id.clone(),
                operator: self.operator,
            });
        }
        coerce(&value.to_cell(), column_type).ok_or_else(|| ValidationError::InvalidValue {
            column_id: self.column_id.clone(),
            column_type,
            value: value.to_string(),
        })
    }

    fn missing_bound(&self, bound: &'static str) -> ValidationError {
        ValidationError::MissingBound {
            column_id: self.column_id.clone(),
            bound,
        }
    }
}

/// Renders the `column:operator[:value]` text form accepted by
/// [`crate::parser::parse_rule`].
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.column_id, self.operator)?;
        if let Some(value) = &self.value {
            write!(f, ":{}", value)?;
        }
        Ok(())
    }
}
