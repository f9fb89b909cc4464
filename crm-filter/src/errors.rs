use crate::catalog::{ColumnType, Operator};

/// Raised when a rule can't be applied to its column as written.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    UnknownColumn(String),
    OperatorNotAllowed {
        column_id: String,
        column_type: ColumnType,
        operator: Operator,
    },
    MissingValue {
        column_id: String,
        operator: Operator,
    },
    UnexpectedValue {
        column_id: String,
        operator: Operator,
    },
    ExpectedRange {
        column_id: String,
        operator: Operator,
    },
    UnexpectedRange {
        column_id: String,
        operator: Operator,
    },
    MissingBound {
        column_id: String,
        bound: &'static str,
    },
    InvalidValue {
        column_id: String,
        column_type: ColumnType,
        value: String,
    },
    InvertedRange {
        column_id: String,
    },
}

impl ValidationError {
    pub fn column_id(&self) -> &str {
        match self {
            ValidationError::UnknownColumn(column_id)
            | ValidationError::OperatorNotAllowed { column_id, .. }
            | ValidationError::MissingValue { column_id, .. }
            | ValidationError::UnexpectedValue { column_id, .. }
            | ValidationError::ExpectedRange { column_id, .. }
            | ValidationError::UnexpectedRange { column_id, .. }
            | ValidationError::MissingBound { column_id, .. }
            | ValidationError::InvalidValue { column_id, .. }
            | ValidationError::InvertedRange { column_id } => column_id,
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::UnknownColumn(column_id) => write!(f, "Unknown column: {}", column_id),
            ValidationError::OperatorNotAllowed {
                column_id,
                column_type,
                operator,
            } => write!(
                f,
                "Operator '{}' is not allowed for {} column '{}'",
                operator, column_type, column_id
            ),
            ValidationError::MissingValue {
                column_id,
                operator,
            } => write!(f, "'{}' on '{}' requires a value", operator, column_id),
            ValidationError::UnexpectedValue {
                column_id,
                operator,
            } => write!(f, "'{}' on '{}' takes no value", operator, column_id),
            ValidationError::ExpectedRange {
                column_id,
                operator,
            } => write!(
                f,
                "'{}' on '{}' requires a from/to range",
                operator, column_id
            ),
            ValidationError::UnexpectedRange {
                column_id,
                operator,
            } => write!(
                f,
                "'{}' on '{}' takes a single value, not a range",
                operator, column_id
            ),
            ValidationError::MissingBound { column_id, bound } => {
                write!(f, "Range on '{}' is missing its '{}' bound", column_id, bound)
            }
            ValidationError::InvalidValue {
                column_id,
                column_type,
                value,
            } => write!(
                f,
                "Value '{}' is not a valid {} for column '{}'",
                value, column_type, column_id
            ),
            ValidationError::InvertedRange { column_id } => {
                write!(f, "Range on '{}' has 'from' after 'to'", column_id)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors from the `column:operator[:value]` rule syntax
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    Syntax(String),
    UnknownColumn {
        column: String,
        suggestion: Option<String>,
    },
    UnknownOperator {
        operator: String,
        suggestion: Option<String>,
    },
    Validation(ValidationError),
}

impl From<ValidationError> for ParseError {
    fn from(err: ValidationError) -> Self {
        ParseError::Validation(err)
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Syntax(input) => write!(
                f,
                "Expected format `column:operator[:value]`, found `{}`",
                input
            ),
            ParseError::UnknownColumn { column, suggestion } => {
                write!(f, "Unknown column: {}", column)?;
                if let Some(suggestion) = suggestion {
                    write!(f, " (did you mean '{}'?)", suggestion)?;
                }
                Ok(())
            }
            ParseError::UnknownOperator {
                operator,
                suggestion,
            } => {
                write!(f, "Unknown operator: {}", operator)?;
                if let Some(suggestion) = suggestion {
                    write!(f, " (did you mean '{}'?)", suggestion)?;
                }
                Ok(())
            }
            ParseError::Validation(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Error types for saved-view persistence
#[derive(Debug)]
pub enum StoreError {
    IoError(std::io::Error),
    SerdeJsonError(serde_json::Error),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::IoError(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::SerdeJsonError(err)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::IoError(err) => write!(f, "IO error: {}", err),
            StoreError::SerdeJsonError(err) => write!(f, "Serde JSON error: {}", err),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::IoError(err) => Some(err),
            StoreError::SerdeJsonError(err) => Some(err),
        }
    }
}
