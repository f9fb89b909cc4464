use super::{ensure_enabled, lookup_preset};
use crate::argparse::ViewCommands;
use anyhow::{bail, Context, Result};
use crm_filter::{FilterEngine, SavedView, ViewStore};
use serde_json::Value;
use std::io::Write;
use tabular::{Row, Table};

pub fn handle_view_command(
    cmd: ViewCommands,
    engine: &FilterEngine<Value>,
    store: &mut impl ViewStore,
    out: &mut impl Write,
) -> Result<()> {
    ensure_enabled(engine.config().features.saved_views, "saved_views")?;

    match cmd {
        ViewCommands::Save {
            name,
            rules,
            preset,
            columns,
        } => {
            let mut filters = match &preset {
                Some(label) => lookup_preset(engine, label)?.apply(),
                None => Vec::new(),
            };
            for text in &rules {
                let rule = engine
                    .parse_rule(text)
                    .with_context(|| format!("Invalid rule '{}'", text))?;
                filters.push(rule);
            }
            for column in &columns {
                if engine.columns().get(column).is_none() {
                    bail!("Unknown column: {}", column);
                }
            }

            let mut view = SavedView::new(name.as_str(), filters, columns);
            if let Some(existing) = store.get(&name)? {
                view.id = existing.id;
            }
            let rule_count = view.filters.len();
            let replaced = store.save(view)?;
            let verb = if replaced.is_some() { "Updated" } else { "Saved" };
            writeln!(out, "{} view '{}' with {} rules", verb, name, rule_count)?;
        }
        ViewCommands::List => {
            let views = store.list()?;
            if views.is_empty() {
                writeln!(out, "No saved views")?;
                return Ok(());
            }
            let mut table = Table::new("{:<}  {:>}  {:<}").with_row(Row::from_cells(
                ["View", "Rules", "Columns"].iter().cloned(),
            ));
            for view in views {
                let columns = if view.visible_columns.is_empty() {
                    "all".to_string()
                } else {
                    view.visible_columns.join(", ")
                };
                table.add_row(
                    Row::new()
                        .with_cell(view.name)
                        .with_cell(view.filters.len())
                        .with_cell(columns),
                );
            }
            write!(out, "{}", table)?;
        }
        ViewCommands::Show { name } => {
            let view = store
                .get(&name)?
                .with_context(|| format!("No saved view named '{}'", name))?;
            writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
        }
        ViewCommands::Delete { name } => {
            if store.delete(&name)?.is_none() {
                bail!("No saved view named '{}'", name);
            }
            writeln!(out, "Deleted view '{}'", name)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_filter::{standard_columns, EngineConfig, JsonFileViewStore, MemoryViewStore};
    use tempfile::TempDir;

    fn engine() -> FilterEngine<Value> {
        FilterEngine::new(standard_columns(), EngineConfig::default())
    }

    fn run(cmd: ViewCommands, store: &mut impl ViewStore) -> Result<String> {
        let mut out = Vec::new();
        handle_view_command(cmd, &engine(), store, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn save(name: &str, rules: &[&str], preset: Option<&str>, columns: &[&str]) -> ViewCommands {
        ViewCommands::Save {
            name: name.to_string(),
            rules: rules.iter().map(|s| s.to_string()).collect(),
            preset: preset.map(String::from),
            columns: columns.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_save_show_list_delete() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileViewStore::new(dir.path().join("views.json"));

        let output = run(
            save("Hot and funded", &["ftd:gt:0"], Some("Hot Leads"), &["id", "ftd"]),
            &mut store,
        )
        .unwrap();
        assert_eq!(output.trim(), "Saved view 'Hot and funded' with 2 rules");

        let name = "Hot and funded".to_string();
        let shown = run(ViewCommands::Show { name: name.clone() }, &mut store).unwrap();
        let view: SavedView = serde_json::from_str(&shown).unwrap();
        assert_eq!(view.filters[0].column_id, "leadStatus");
        assert_eq!(view.visible_columns, vec!["id", "ftd"]);

        let listed = run(ViewCommands::List, &mut store).unwrap();
        assert!(listed.contains("Hot and funded"));
        assert!(listed.contains("id, ftd"));

        let deleted = run(ViewCommands::Delete { name }, &mut store).unwrap();
        assert_eq!(deleted.trim(), "Deleted view 'Hot and funded'");
        assert_eq!(run(ViewCommands::List, &mut store).unwrap().trim(), "No saved views");
    }

    #[test]
    fn test_resave_keeps_id() {
        let mut store = MemoryViewStore::new();
        run(save("Mine", &["email:isEmpty"], None, &[]), &mut store).unwrap();
        let first_id = store.get("Mine").unwrap().unwrap().id;

        let output = run(save("Mine", &["phone:isEmpty"], None, &[]), &mut store).unwrap();
        assert!(output.starts_with("Updated"));
        let view = store.get("Mine").unwrap().unwrap();
        assert_eq!(view.id, first_id);
        assert_eq!(view.filters[0].column_id, "phone");
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let mut store = MemoryViewStore::new();
        assert!(run(save("Bad", &["kycVerified:gt:1"], None, &[]), &mut store).is_err());
        assert!(run(save("Bad", &[], None, &["accountTier"]), &mut store).is_err());
        assert!(run(ViewCommands::Delete { name: "Bad".to_string() }, &mut store).is_err());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_disabled_feature() {
        let mut config = EngineConfig::default();
        config.features.saved_views = false;
        let engine = FilterEngine::new(standard_columns(), config);
        let mut store = MemoryViewStore::new();
        let mut out = Vec::new();
        let err =
            handle_view_command(ViewCommands::List, &engine, &mut store, &mut out).unwrap_err();
        assert!(err.to_string().contains("saved_views"));
    }
}
