use super::*;

pub fn run(args: ValidateArgs) -> Result<CommandOutcome> {
    let scoring = ScoringConfig::load_or_default(args.scoring_config.as_deref())?;
    let validator = SchemaValidator::load(&args.schema_path)?;
    let sheets = resolve_sheets(&args)?;

    info!(
        schema = %args.schema_path.display(),
        sheets = sheets.len(),
        "starting character validation"
    );

    let reporter = Reporter::new(now_utc_string(), validator, scoring)?;
    let report = reporter.run_all(&sheets);

    match write_json_pretty(&args.report_path, &report) {
        Ok(()) => info!(path = %args.report_path.display(), "wrote quality report"),
        Err(err) => error!(
            path = %args.report_path.display(),
            error = %format!("{err:#}"),
            "failed to write quality report"
        ),
    }

    info!(
        total = report.summary.total_characters,
        valid = report.summary.valid_characters,
        validation_rate = report.summary.validation_rate,
        average_quality = report.summary.average_quality,
        average_completeness = report.summary.average_completeness,
        structural_consistency = report.structural_consistency,
        "validation completed"
    );

    if report.passed() {
        Ok(CommandOutcome::Completed)
    } else {
        warn!(
            validation_rate = report.summary.validation_rate,
            structural_consistency = report.structural_consistency,
            "validation gate failed"
        );
        Ok(CommandOutcome::GateFailed)
    }
}
