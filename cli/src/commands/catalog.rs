use super::ensure_enabled;
use anyhow::Result;
use crm_filter::{operators_for_tag, FilterEngine};
use serde_json::Value;
use std::io::Write;
use tabular::{Row, Table};

pub fn handle_operators_command(column_type: &str, out: &mut impl Write) -> Result<()> {
    let operators = operators_for_tag(column_type);
    if operators.is_empty() {
        writeln!(out, "No operators for column type '{}'", column_type)?;
        return Ok(());
    }

    let mut table =
        Table::new("{:<}  {:<}").with_row(Row::from_cells(["Operator", "Label"].iter().cloned()));
    for operator in operators {
        table.add_row(Row::new().with_cell(operator).with_cell(operator.label()));
    }
    write!(out, "{}", table)?;
    Ok(())
}

pub fn handle_columns_command(engine: &FilterEngine<Value>, out: &mut impl Write) -> Result<()> {
    let mut table = Table::new("{:<}  {:<}  {:<}")
        .with_row(Row::from_cells(["Column", "Label", "Type"].iter().cloned()));
    for column in engine.columns().iter() {
        table.add_row(
            Row::new()
                .with_cell(column.id())
                .with_cell(column.label())
                .with_cell(column.column_type()),
        );
    }
    write!(out, "{}", table)?;
    Ok(())
}

pub fn handle_presets_command(engine: &FilterEngine<Value>, out: &mut impl Write) -> Result<()> {
    ensure_enabled(engine.config().features.presets, "presets")?;

    let mut table = Table::new("{:<}  {:<}  {:<}")
        .with_row(Row::from_cells(["Preset", "Rules", "Description"].iter().cloned()));
    for preset in engine.presets() {
        let rules = preset
            .rules
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" AND ");
        table.add_row(
            Row::new()
                .with_cell(preset.label)
                .with_cell(rules)
                .with_cell(preset.description),
        );
    }
    write!(out, "{}", table)?;
    Ok(())
}
