//! Column filters for the CRM client and lead tables: the operator catalog,
//! rule validation and evaluation, filter presets and saved views.

pub mod catalog;
pub mod columns;
pub mod engine;
pub mod errors;
pub mod eval;
pub mod parser;
pub mod presets;
pub mod rule;
pub mod store;
pub mod value;
pub mod view;

pub use catalog::{operator_label, operators_for_tag, ColumnType, Operator, TypeFamily, ValueShape};
pub use columns::{standard_columns, Accessor, ColumnDef, ColumnRegistry};
pub use engine::{EngineConfig, FeatureFlags, FilterEngine};
pub use errors::{ParseError, StoreError, ValidationError};
pub use eval::evaluate;
pub use parser::{parse_rule, parse_rules};
pub use presets::{filter_presets, find_preset, FilterPreset};
pub use rule::{Rule, RuleValue};
pub use store::{JsonFileViewStore, MemoryViewStore, ViewStore};
pub use value::{normalize_bool, parse_date, parse_datetime, CellValue, Scalar};
pub use view::SavedView;
