use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Semantic type of a table column, as declared by the column registry.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ColumnType {
    Text,
    Email,
    Phone,
    Number,
    Money,
    Date,
    Datetime,
    Boolean,
    Select,
    Rating,
    Calculated,
}

/// Comparison semantics shared by several column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFamily {
    Text,
    Numeric,
    Temporal,
    Boolean,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum Operator {
    Contains,
    Equals,
    StartsWith,
    EndsWith,
    IsEmpty,
    IsNotEmpty,
    Eq,
    Ne,
    Gt,
    Lt,
    Between,
    On,
    Before,
    After,
    Is,
}

/// What kind of value an operator expects next to it in a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    None,
    Scalar,
    Range,
}

const TEXT_OPERATORS: &[Operator] = &[
    Operator::Contains,
    Operator::Equals,
    Operator::StartsWith,
    Operator::EndsWith,
    Operator::IsEmpty,
    Operator::IsNotEmpty,
];

const NUMERIC_OPERATORS: &[Operator] = &[
    Operator::Eq,
    Operator::Ne,
    Operator::Gt,
    Operator::Lt,
    Operator::Between,
    Operator::IsEmpty,
    Operator::IsNotEmpty,
];

const DATE_OPERATORS: &[Operator] = &[
    Operator::On,
    Operator::Before,
    Operator::After,
    Operator::Between,
    Operator::IsEmpty,
    Operator::IsNotEmpty,
];

const BOOLEAN_OPERATORS: &[Operator] = &[Operator::Is];

const SELECT_OPERATORS: &[Operator] = &[Operator::Equals, Operator::IsEmpty, Operator::IsNotEmpty];

impl ColumnType {
    /// Ordered list of operators a filter control may offer for this type.
    pub fn operators(self) -> &'static [Operator] {
        match self {
            ColumnType::Text | ColumnType::Email | ColumnType::Phone => TEXT_OPERATORS,
            ColumnType::Number
            | ColumnType::Money
            | ColumnType::Rating
            | ColumnType::Calculated => NUMERIC_OPERATORS,
            ColumnType::Date | ColumnType::Datetime => DATE_OPERATORS,
            ColumnType::Boolean => BOOLEAN_OPERATORS,
            ColumnType::Select => SELECT_OPERATORS,
        }
    }

    pub fn allows(self, operator: Operator) -> bool {
        self.operators().contains(&operator)
    }

    pub fn family(self) -> TypeFamily {
        match self {
            ColumnType::Text | ColumnType::Email | ColumnType::Phone | ColumnType::Select => {
                TypeFamily::Text
            }
            ColumnType::Number
            | ColumnType::Money
            | ColumnType::Rating
            | ColumnType::Calculated => TypeFamily::Numeric,
            ColumnType::Date | ColumnType::Datetime => TypeFamily::Temporal,
            ColumnType::Boolean => TypeFamily::Boolean,
        }
    }
}

impl Operator {
    /// Name used in the rule syntax and in persisted rules, e.g. `startsWith`.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn label(self) -> &'static str {
        match self {
            Operator::Contains => "Contains",
            Operator::Equals => "Equals",
            Operator::StartsWith => "Starts with",
            Operator::EndsWith => "Ends with",
            Operator::IsEmpty => "Is empty",
            Operator::IsNotEmpty => "Is not empty",
            Operator::Eq => "Equal to",
            Operator::Ne => "Not equal to",
            Operator::Gt => "Greater than",
            Operator::Lt => "Less than",
            Operator::Between => "Between",
            Operator::On => "On",
            Operator::Before => "Before",
            Operator::After => "After",
            Operator::Is => "Is",
        }
    }

    pub fn value_shape(self) -> ValueShape {
        match self {
            Operator::IsEmpty | Operator::IsNotEmpty => ValueShape::None,
            Operator::Between => ValueShape::Range,
            _ => ValueShape::Scalar,
        }
    }
}

/// Operators for a raw column-type tag. Unknown tags have no operators, so
/// no filter can be built for them.
pub fn operators_for_tag(tag: &str) -> &'static [Operator] {
    tag.parse::<ColumnType>()
        .map(ColumnType::operators)
        .unwrap_or(&[])
}

pub fn operator_label(operator: Operator) -> &'static str {
    operator.label()
}
