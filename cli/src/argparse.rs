use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "crmf",
    about = "Filter CRM client and lead records",
    version,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Path to the configuration file [default: ~/.crmf/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the operators available for a column type
    Operators {
        /// Column type, e.g. text, money, datetime
        column_type: String,
    },
    /// List the standard client columns
    Columns,
    /// List the built-in filter presets
    Presets,
    /// Print the rows of a JSON, JSON Lines or YAML file that match the filters
    Filter(FilterArgs),
    /// Saved view management commands
    #[command(subcommand)]
    View(ViewCommands),
}

#[derive(Args)]
pub struct FilterArgs {
    /// File with the rows to filter
    #[arg(long)]
    pub rows: PathBuf,

    /// Filter rule as `column:operator[:value]`, may be repeated
    #[arg(long = "rule", short = 'r')]
    pub rules: Vec<String>,

    /// Start from the rules of a built-in preset
    #[arg(long)]
    pub preset: Option<String>,

    /// Start from the rules of a saved view and show only its columns
    #[arg(long)]
    pub view: Option<String>,

    /// Print only the number of matching rows
    #[arg(long)]
    pub count: bool,
}

#[derive(Subcommand)]
pub enum ViewCommands {
    /// Save a view, replacing any view with the same name
    Save {
        name: String,

        /// Filter rule as `column:operator[:value]`, may be repeated
        #[arg(long = "rule", short = 'r')]
        rules: Vec<String>,

        /// Start from the rules of a built-in preset
        #[arg(long)]
        preset: Option<String>,

        /// Column to show, may be repeated; all columns when omitted
        #[arg(long = "column", short = 'c')]
        columns: Vec<String>,
    },
    /// List saved views
    List,
    /// Print a saved view as JSON
    Show { name: String },
    /// Delete a saved view
    Delete { name: String },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
