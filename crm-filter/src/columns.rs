use crate::catalog::{ColumnType, Operator};
use crate::value::CellValue;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;

/// Extracts and normalizes one column's value from a row.
pub type Accessor<R> = Arc<dyn Fn(&R) -> CellValue + Send + Sync>;

pub struct ColumnDef<R> {
    id: String,
    label: String,
    column_type: ColumnType,
    accessor: Accessor<R>,
}

impl<R> ColumnDef<R> {
    pub fn new<F>(
        id: impl Into<String>,
        label: impl Into<String>,
        column_type: ColumnType,
        accessor: F,
    ) -> Self
    where
        F: Fn(&R) -> CellValue + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            label: label.into(),
            column_type,
            accessor: Arc::new(accessor),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn operators(&self) -> &'static [Operator] {
        self.column_type.operators()
    }

    pub fn read(&self, row: &R) -> CellValue {
        (self.accessor)(row)
    }
}

impl ColumnDef<JsonValue> {
    /// Column backed by the top-level JSON key of the same name.
    pub fn json_field(
        id: impl Into<String>,
        label: impl Into<String>,
        column_type: ColumnType,
    ) -> Self {
        let id = id.into();
        let key = id.clone();
        Self::json_key(id, label, column_type, key)
    }

    /// Column backed by a top-level JSON key that differs from its id.
    /// Missing keys read as null.
    pub fn json_key(
        id: impl Into<String>,
        label: impl Into<String>,
        column_type: ColumnType,
        key: impl Into<String>,
    ) -> Self {
        let key = key.into();
        Self::new(id, label, column_type, move |row: &JsonValue| {
            row.get(&key)
                .map_or(CellValue::Null, |value| CellValue::from_json(value, column_type))
        })
    }
}

impl<R> Clone for ColumnDef<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            column_type: self.column_type,
            accessor: Arc::clone(&self.accessor),
        }
    }
}

impl<R> fmt::Debug for ColumnDef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("column_type", &self.column_type)
            .finish_non_exhaustive()
    }
}

/// Column definitions keyed by id, in registration order.
pub struct ColumnRegistry<R> {
    columns: IndexMap<String, ColumnDef<R>>,
}

impl<R> Default for ColumnRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ColumnRegistry<R> {
    pub fn new() -> Self {
        Self {
            columns: IndexMap::new(),
        }
    }

    /// Adds a column, returning the definition it replaced, if any. A
    /// replaced column keeps its original position.
    pub fn register(&mut self, column: ColumnDef<R>) -> Option<ColumnDef<R>> {
        self.columns.insert(column.id.clone(), column)
    }

    pub fn with_column(mut self, column: ColumnDef<R>) -> Self {
        self.register(column);
        self
    }

    pub fn get(&self, column_id: &str) -> Option<&ColumnDef<R>> {
        self.columns.get(column_id)
    }

    pub fn column_type(&self, column_id: &str) -> Option<ColumnType> {
        self.get(column_id).map(ColumnDef::column_type)
    }

    /// Unknown columns have no operators.
    pub fn operators_for(&self, column_id: &str) -> &'static [Operator] {
        match self.get(column_id) {
            Some(column) => column.operators(),
            None => &[],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnDef<R>> {
        self.columns.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<R> Clone for ColumnRegistry<R> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<R> fmt::Debug for ColumnRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.columns.values()).finish()
    }
}

/// The client/lead columns of the CRM tables, read from JSON rows.
pub fn standard_columns() -> ColumnRegistry<JsonValue> {
    let columns = [
        ("id", "Client ID", ColumnType::Text),
        ("firstName", "First name", ColumnType::Text),
        ("lastName", "Last name", ColumnType::Text),
        ("email", "Email", ColumnType::Email),
        ("phone", "Phone", ColumnType::Phone),
        ("country", "Country", ColumnType::Select),
        ("leadStatus", "Lead status", ColumnType::Select),
        ("accountType", "Account type", ColumnType::Select),
        ("kycVerified", "KYC verified", ColumnType::Boolean),
        ("ftd", "First deposit", ColumnType::Money),
        ("balance", "Balance", ColumnType::Money),
        ("equity", "Equity", ColumnType::Money),
        ("openPositions", "Open positions", ColumnType::Number),
        ("pnl", "Net PnL", ColumnType::Calculated),
        ("rating", "Rating", ColumnType::Rating),
        ("createdAt", "Created", ColumnType::Date),
        ("lastContactAt", "Last contact", ColumnType::Datetime),
        ("lastLoginAt", "Last login", ColumnType::Datetime),
    ];

    columns
        .into_iter()
        .fold(ColumnRegistry::new(), |registry, (id, label, column_type)| {
            registry.with_column(ColumnDef::json_field(id, label, column_type))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct Position {
        symbol: String,
        volume: f64,
    }

    #[test]
    fn test_typed_accessors() {
        let registry = ColumnRegistry::new()
            .with_column(ColumnDef::new(
                "symbol",
                "Symbol",
                ColumnType::Text,
                |p: &Position| CellValue::from(p.symbol.as_str()),
            ))
            .with_column(ColumnDef::new(
                "volume",
                "Volume",
                ColumnType::Number,
                |p: &Position| CellValue::from(p.volume),
            ));
        let position = Position {
            symbol: "EURUSD".to_string(),
            volume: 1.5,
        };
        assert_eq!(registry.get("symbol").unwrap().read(&position), CellValue::from("EURUSD"));
        assert_eq!(registry.get("volume").unwrap().read(&position), CellValue::from(1.5));
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["symbol", "volume"]);
    }

    #[test]
    fn test_json_field_reads_missing_as_null() {
        let column = ColumnDef::json_field("lastContactAt", "Last contact", ColumnType::Datetime);
        assert_eq!(column.read(&json!({})), CellValue::Null);
        assert_eq!(column.read(&json!({"lastContactAt": null})), CellValue::Null);
        assert!(matches!(
            column.read(&json!({"lastContactAt": "2024-01-01T09:00:00Z"})),
            CellValue::DateTime(_)
        ));
    }

    #[test]
    fn test_json_key_maps_to_other_field() {
        let column = ColumnDef::json_key("verified", "Verified", ColumnType::Boolean, "kyc_ok");
        assert_eq!(column.read(&json!({"kyc_ok": "Y"})), CellValue::Bool(true));
    }

    #[test]
    fn test_unknown_column_has_no_operators() {
        let registry = standard_columns();
        assert!(registry.operators_for("nope").is_empty());
        assert_eq!(registry.operators_for("kycVerified"), &[Operator::Is]);
        assert_eq!(registry.column_type("ftd"), Some(ColumnType::Money));
    }

    #[test]
    fn test_register_replaces_in_place() {
        let mut registry = standard_columns();
        let before = registry.len();
        let replaced =
            registry.register(ColumnDef::json_field("email", "E-mail", ColumnType::Text));
        assert_eq!(replaced.unwrap().column_type(), ColumnType::Email);
        assert_eq!(registry.len(), before);
        assert_eq!(registry.ids().nth(3), Some("email"));
        assert_eq!(registry.get("email").unwrap().label(), "E-mail");
    }
}
