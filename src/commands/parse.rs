use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::ParseArgs;
use crate::commands::CommandOutcome;
use crate::scoring::missing_sections;
use crate::sheet::SheetParser;
use crate::util::{now_utc_string, write_json_pretty};

pub fn run(args: ParseArgs) -> Result<CommandOutcome> {
    let text = fs::read_to_string(&args.sheet)
        .with_context(|| format!("failed to read sheet: {}", args.sheet.display()))?;

    let parser = SheetParser::new(now_utc_string())?;
    let record = parser.parse(&text, &args.sheet.display().to_string());

    info!(
        sheet = %args.sheet.display(),
        character_id = %record.metadata.character_id,
        stats = record.stats.base_stats.len(),
        matchups = record.integrations.system_matchups.len(),
        achievements = record.achievements.achievements.len(),
        missing = %missing_sections(&record).join(","),
        "parsed sheet"
    );

    match args.output {
        Some(path) => {
            write_json_pretty(&path, &record)?;
            info!(path = %path.display(), "wrote character record");
        }
        None => {
            let mut output = io::BufWriter::new(io::stdout().lock());
            serde_json::to_writer_pretty(&mut output, &record)
                .context("failed to serialize character record")?;
            writeln!(output)?;
            output.flush()?;
        }
    }

    Ok(CommandOutcome::Completed)
}
