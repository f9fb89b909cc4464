mod argparse;
mod commands;
mod config;
mod rows;
mod utils;

use anyhow::Result;
use argparse::parse_args;
use config::Config;

fn main() -> Result<()> {
    let cli = parse_args();
    utils::init_logger(cli.verbose);

    let config = Config::load_or_default(cli.config.as_deref())?;
    commands::handle_command(cli.command, &config, &mut std::io::stdout().lock())
}
