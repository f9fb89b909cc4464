use crate::presets::FilterPreset;
use crate::rule::Rule;
use serde::{Deserialize, Serialize};

/// A named set of rules plus the columns to show, owned by whoever created it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedView {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub filters: Vec<Rule>,
    #[serde(default)]
    pub visible_columns: Vec<String>,
}

impl SavedView {
    pub fn new(name: impl Into<String>, filters: Vec<Rule>, visible_columns: Vec<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            filters,
            visible_columns,
        }
    }

    pub fn from_preset(preset: &FilterPreset, visible_columns: Vec<String>) -> Self {
        Self::new(preset.label, preset.apply(), visible_columns)
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn add_rule(&mut self, rule: Rule) {
        self.filters.push(rule);
    }

    pub fn remove_rule(&mut self, index: usize) -> Option<Rule> {
        (index < self.filters.len()).then(|| self.filters.remove(index))
    }

    pub fn set_visible_columns(&mut self, columns: Vec<String>) {
        self.visible_columns = columns;
    }

    /// An empty column selection means every column is shown.
    pub fn shows_column(&self, column_id: &str) -> bool {
        self.visible_columns.is_empty() || self.visible_columns.iter().any(|c| c == column_id)
    }
}
