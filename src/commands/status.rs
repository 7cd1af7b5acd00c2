use anyhow::Result;
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::commands::CommandOutcome;
use crate::model::QualityReport;
use crate::util::read_json;

pub fn run(args: StatusArgs) -> Result<CommandOutcome> {
    info!(report_path = %args.report_path.display(), "status requested");

    if !args.report_path.exists() {
        warn!(path = %args.report_path.display(), "quality report missing");
        return Ok(CommandOutcome::Completed);
    }

    let report: QualityReport = read_json(&args.report_path)?;

    info!(
        generated_at = %report.generated_at,
        schema = %report.schema_path,
        total = report.summary.total_characters,
        valid = report.summary.valid_characters,
        validation_rate = report.summary.validation_rate,
        average_quality = report.summary.average_quality,
        average_completeness = report.summary.average_completeness,
        structural_consistency = report.structural_consistency,
        passed = report.passed(),
        "loaded quality report"
    );

    for result in report.details.iter().filter(|result| !result.valid) {
        warn!(
            file = %result.filename,
            errors = result.errors.len(),
            hash = %result.hash,
            "sheet failed validation"
        );
    }

    for recommendation in &report.recommendations {
        info!(
            kind = ?recommendation.kind,
            severity = ?recommendation.severity,
            affected = recommendation.affected_files.len(),
            "{}",
            recommendation.message
        );
    }

    if !report.duplicate_character_ids.is_empty() {
        warn!(
            ids = %report.duplicate_character_ids.join(", "),
            "report lists colliding character ids"
        );
    }

    Ok(CommandOutcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReportSummary;
    use crate::util::write_json_pretty;

    #[test]
    fn status_reads_written_report_and_tolerates_missing_one() {
        let path = std::env::temp_dir().join(format!(
            "charsheet-status-{}/report.json",
            std::process::id()
        ));
        let report = QualityReport {
            report_version: 1,
            generated_at: "2026-10-19T00:00:00Z".to_string(),
            schema_path: "schemas/character_sheet.schema.json".to_string(),
            summary: ReportSummary {
                total_characters: 0,
                valid_characters: 0,
                validation_rate: 0,
                average_quality: 0,
                average_completeness: 0,
            },
            details: Vec::new(),
            recommendations: Vec::new(),
            structural_consistency: true,
            duplicate_character_ids: Vec::new(),
        };
        write_json_pretty(&path, &report).expect("write report");

        let outcome = run(StatusArgs {
            report_path: path.clone(),
        })
        .expect("status reads report");
        assert_eq!(outcome, CommandOutcome::Completed);

        let _ = std::fs::remove_file(&path);
        let outcome = run(StatusArgs { report_path: path }).expect("missing report is not fatal");
        assert_eq!(outcome, CommandOutcome::Completed);
    }
}
