use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "charsheet",
    version,
    about = "Character sheet parsing, schema validation and quality reporting"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse, validate and score every sheet, then write the quality report.
    Validate(ValidateArgs),
    /// Parse a single sheet and print the resulting record as JSON.
    Parse(ParseArgs),
    /// Summarize a previously written quality report.
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[arg(long, default_value = "schemas/character_sheet.schema.json")]
    pub schema_path: PathBuf,

    #[arg(long, default_value = "characters")]
    pub sheets_dir: PathBuf,

    /// Explicit sheets in processing order. Overrides `--sheets-dir` discovery.
    #[arg(long = "sheet")]
    pub sheets: Vec<PathBuf>,

    #[arg(long, default_value = "reports/character_quality_report.json")]
    pub report_path: PathBuf,

    #[arg(long)]
    pub scoring_config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    #[arg(long)]
    pub sheet: PathBuf,

    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = "reports/character_quality_report.json")]
    pub report_path: PathBuf,
}
