use crate::catalog::Operator;
use crate::rule::{Rule, RuleValue};
use std::sync::OnceLock;

/// A built-in, read-only rule template.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPreset {
    pub label: &'static str,
    pub description: &'static str,
    pub rules: Vec<Rule>,
}

impl FilterPreset {
    /// A fresh copy of the preset's rules, editable like any user-built set.
    pub fn apply(&self) -> Vec<Rule> {
        self.rules.clone()
    }

    /// Labels compare case-insensitively, ignoring surrounding whitespace.
    pub fn matches_label(&self, label: &str) -> bool {
        self.label.eq_ignore_ascii_case(label.trim())
    }
}

fn preset(label: &'static str, description: &'static str, rules: Vec<Rule>) -> FilterPreset {
    FilterPreset {
        label,
        description,
        rules,
    }
}

fn build_presets() -> Vec<FilterPreset> {
    vec![
        preset(
            "Hot Leads",
            "Leads marked as hot by the sales desk",
            vec![Rule::new(
                "leadStatus",
                Operator::Equals,
                Some(RuleValue::scalar("Hot")),
            )],
        ),
        preset(
            "Never Contacted",
            "Records nobody has reached out to yet",
            vec![Rule::new("lastContactAt", Operator::IsEmpty, None)],
        ),
        preset(
            "Funded Clients",
            "Clients that made a first deposit",
            vec![Rule::new("ftd", Operator::Gt, Some(RuleValue::scalar(0)))],
        ),
        preset(
            "Pending KYC",
            "Funded clients whose documents are not verified",
            vec![
                Rule::new("ftd", Operator::Gt, Some(RuleValue::scalar(0))),
                Rule::new("kycVerified", Operator::Is, Some(RuleValue::scalar(false))),
            ],
        ),
        preset(
            "High Value",
            "Verified clients with a balance of at least 50,000",
            vec![
                Rule::new(
                    "balance",
                    Operator::Between,
                    Some(RuleValue::range(50_000, 1_000_000_000)),
                ),
                Rule::new("kycVerified", Operator::Is, Some(RuleValue::scalar(true))),
            ],
        ),
        preset(
            "Top Rated",
            "Records rated 4 or 5",
            vec![Rule::new(
                "rating",
                Operator::Between,
                Some(RuleValue::range(4, 5)),
            )],
        ),
        preset(
            "No Contact Details",
            "Records without an email address or phone number",
            vec![
                Rule::new("email", Operator::IsEmpty, None),
                Rule::new("phone", Operator::IsEmpty, None),
            ],
        ),
    ]
}

/// All presets, in display order.
pub fn filter_presets() -> &'static [FilterPreset] {
    static PRESETS: OnceLock<Vec<FilterPreset>> = OnceLock::new();
    PRESETS.get_or_init(build_presets)
}

/// Looks a preset up by label, ignoring case. Does not consult any feature
/// flag; use [`crate::FilterEngine::preset`] for a lookup that honors
/// `FeatureFlags::presets`.
pub fn find_preset(label: &str) -> Option<&'static FilterPreset> {
    filter_presets()
        .iter()
        .find(|preset| preset.matches_label(label))
}
