mod catalog;
mod filter;
mod view;

use crate::argparse::Commands;
use crate::config::Config;
use anyhow::{bail, Result};
use crm_filter::{standard_columns, FilterEngine, FilterPreset, JsonFileViewStore};
use serde_json::Value;
use std::io::Write;

use catalog::{handle_columns_command, handle_operators_command, handle_presets_command};
use filter::handle_filter_command;
use view::handle_view_command;

pub fn handle_command(command: Commands, config: &Config, out: &mut impl Write) -> Result<()> {
    let engine = FilterEngine::new(standard_columns(), config.engine_config());
    let mut store = JsonFileViewStore::new(config.views_path());

    match command {
        Commands::Operators { column_type } => handle_operators_command(&column_type, out),
        Commands::Columns => handle_columns_command(&engine, out),
        Commands::Presets => handle_presets_command(&engine, out),
        Commands::Filter(args) => handle_filter_command(args, &engine, &store, out),
        Commands::View(cmd) => handle_view_command(cmd, &engine, &mut store, out),
    }
}

fn ensure_enabled(enabled: bool, feature: &str) -> Result<()> {
    if !enabled {
        bail!("The '{}' feature is disabled in the configuration", feature);
    }
    Ok(())
}

fn lookup_preset(engine: &FilterEngine<Value>, label: &str) -> Result<&'static FilterPreset> {
    ensure_enabled(engine.config().features.presets, "presets")?;
    match engine.preset(label) {
        Some(preset) => Ok(preset),
        None => bail!("Unknown preset: {}", label),
    }
}
