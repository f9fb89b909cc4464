use super::{ensure_enabled, lookup_preset};
use crate::argparse::FilterArgs;
use crate::rows::{load_rows, project};
use anyhow::{Context, Result};
use crm_filter::{FilterEngine, Rule, SavedView, ViewStore};
use serde_json::Value;
use std::io::Write;
use tracing::{info, warn};

pub fn handle_filter_command(
    args: FilterArgs,
    engine: &FilterEngine<Value>,
    store: &impl ViewStore,
    out: &mut impl Write,
) -> Result<()> {
    let (rules, view) = collect_rules(&args, engine, store)?;
    let rows = load_rows(&args.rows)?;
    let matched = engine.filter(&rules, &rows);
    info!(
        "{} of {} rows in {} matched",
        matched.len(),
        rows.len(),
        args.rows.display()
    );

    if args.count {
        writeln!(out, "{}", matched.len())?;
        return Ok(());
    }

    let output: Vec<Value> = match &view {
        Some(view) => matched.iter().map(|row| project(row, view)).collect(),
        None => matched.into_iter().cloned().collect(),
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

/// Preset rules first, then the saved view's, then the ad hoc ones. All of
/// them are ANDed together.
fn collect_rules(
    args: &FilterArgs,
    engine: &FilterEngine<Value>,
    store: &impl ViewStore,
) -> Result<(Vec<Rule>, Option<SavedView>)> {
    let mut rules = Vec::new();

    if let Some(label) = &args.preset {
        rules.extend(lookup_preset(engine, label)?.apply());
    }

    let view = match &args.view {
        Some(name) => {
            ensure_enabled(engine.config().features.saved_views, "saved_views")?;
            let view = store
                .get(name)?
                .with_context(|| format!("No saved view named '{}'", name))?;
            if let Err(e) = engine.validate_rules(&view.filters) {
                warn!("Saved view '{}' has a rule that can no longer match: {}", name, e);
            }
            rules.extend(view.filters.iter().cloned());
            Some(view)
        }
        None => None,
    };

    for text in &args.rules {
        let rule = engine
            .parse_rule(text)
            .with_context(|| format!("Invalid rule '{}'", text))?;
        rules.push(rule);
    }

    Ok((rules, view))
}
