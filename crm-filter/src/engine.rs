use crate::catalog::Operator;
use crate::columns::ColumnRegistry;
use crate::errors::{ParseError, ValidationError};
use crate::eval::evaluate;
use crate::parser::parse_rule;
use crate::presets::{filter_presets, FilterPreset};
use crate::rule::{Rule, RuleValue};
use crate::view::SavedView;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Switches for optional features, handed to the engine when it is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    #[serde(default = "default_enabled")]
    pub presets: bool,
    #[serde(default = "default_enabled")]
    pub saved_views: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            presets: true,
            saved_views: true,
        }
    }
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub features: FeatureFlags,
}

/// Evaluates rules against rows of type `R` using the columns registered for
/// them. Holds no mutable state, so one engine can serve many tables.
#[derive(Debug, Clone)]
pub struct FilterEngine<R> {
    columns: ColumnRegistry<R>,
    config: EngineConfig,
}

impl<R> FilterEngine<R> {
    pub fn new(columns: ColumnRegistry<R>, config: EngineConfig) -> Self {
        Self { columns, config }
    }

    pub fn columns(&self) -> &ColumnRegistry<R> {
        &self.columns
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn operators_for(&self, column_id: &str) -> &'static [Operator] {
        self.columns.operators_for(column_id)
    }

    /// Builds a validated rule for a registered column.
    pub fn build_rule(
        &self,
        column_id: &str,
        operator: Operator,
        value: Option<RuleValue>,
    ) -> Result<Rule, ValidationError> {
        let column_type = self
            .columns
            .column_type(column_id)
            .ok_or_else(|| ValidationError::UnknownColumn(column_id.to_string()))?;
        Rule::validated(column_id, column_type, operator, value).inspect_err(|e| {
            debug!("Rejected rule on {}: {}", column_id, e);
        })
    }

    pub fn parse_rule(&self, input: &str) -> Result<Rule, ParseError> {
        parse_rule(input, &self.columns)
    }

    /// Re-checks rules that came from storage, where the column set may have
    /// changed since they were saved.
    pub fn validate_rules(&self, rules: &[Rule]) -> Result<(), ValidationError> {
        for rule in rules {
            let column_type = self
                .columns
                .column_type(&rule.column_id)
                .ok_or_else(|| ValidationError::UnknownColumn(rule.column_id.clone()))?;
            rule.validate(column_type)?;
        }
        Ok(())
    }

    /// Rules on unregistered columns never match.
    pub fn matches(&self, rule: &Rule, row: &R) -> bool {
        match self.columns.get(&rule.column_id) {
            Some(column) => evaluate(rule, column.column_type(), &column.read(row)),
            None => {
                trace!("No column registered for rule {}", rule);
                false
            }
        }
    }

    /// Logical AND over all rules; an empty rule set matches every row.
    pub fn matches_all(&self, rules: &[Rule], row: &R) -> bool {
        rules.iter().all(|rule| self.matches(rule, row))
    }

    pub fn filter<'a>(&self, rules: &[Rule], rows: &'a [R]) -> Vec<&'a R> {
        let matched: Vec<&R> = rows
            .iter()
            .filter(|row| self.matches_all(rules, row))
            .collect();
        debug!(
            "{} of {} rows matched {} rules",
            matched.len(),
            rows.len(),
            rules.len()
        );
        matched
    }

    pub fn apply_view<'a>(&self, view: &SavedView, rows: &'a [R]) -> Vec<&'a R> {
        self.filter(&view.filters, rows)
    }

    /// Built-in presets, or none when the presets feature is switched off.
    pub fn presets(&self) -> &'static [FilterPreset] {
        if self.config.features.presets {
            filter_presets()
        } else {
            &[]
        }
    }

    pub fn preset(&self, label: &str) -> Option<&'static FilterPreset> {
        self.presets()
            .iter()
            .find(|preset| preset.matches_label(label))
    }
}
