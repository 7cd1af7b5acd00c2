use super::*;
use crate::util::read_json;

const STAMP: &str = "2026-10-19T00:00:00Z";
const BLAZE: &str = include_str!("../../../characters/blaze.md");
const FROST: &str = include_str!("../../../characters/frost.md");

fn shipped_validator() -> SchemaValidator {
    let schema = serde_json::from_str(include_str!(
        "../../../schemas/character_sheet.schema.json"
    ))
    .expect("shipped schema is valid json");
    SchemaValidator::from_value(&schema, "schemas/character_sheet.schema.json")
        .expect("shipped schema compiles")
}

fn reporter() -> Reporter {
    Reporter::new(STAMP, shipped_validator(), ScoringConfig::default()).expect("reporter builds")
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("charsheet-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn validate_args(dir: &Path, sheets: Vec<PathBuf>) -> ValidateArgs {
    ValidateArgs {
        schema_path: Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("schemas")
            .join("character_sheet.schema.json"),
        sheets_dir: dir.to_path_buf(),
        sheets,
        report_path: dir.join("reports").join("quality.json"),
        scoring_config: None,
    }
}

fn result(filename: &str, valid: bool, completeness: u32, quality: u32, hash: &str) -> ValidationResult {
    ValidationResult {
        filename: filename.to_string(),
        character_id: Some(
            Path::new(filename)
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or(filename)
                .to_string(),
        ),
        valid,
        errors: Vec::new(),
        completeness,
        quality_score: quality,
        hash: hash.to_string(),
    }
}

#[test]
fn shipped_sheets_pass_the_gate_in_input_order() {
    let dir = scratch_dir("shipped");
    let frost = dir.join("frost.md");
    let blaze = dir.join("blaze.md");
    fs::write(&frost, FROST).expect("write frost");
    fs::write(&blaze, BLAZE).expect("write blaze");

    let report = reporter().run_all(&[frost.clone(), blaze.clone()]);

    assert_eq!(report.details.len(), 2);
    assert_eq!(report.details[0].filename, frost.display().to_string());
    assert_eq!(report.details[1].filename, blaze.display().to_string());
    for detail in &report.details {
        assert!(detail.valid, "unexpected errors: {:?}", detail.errors);
        assert_eq!(detail.quality_score, 100);
        assert_eq!(detail.completeness, 58);
    }
    assert_eq!(report.details[0].hash, report.details[1].hash);
    assert!(report.structural_consistency);
    assert_eq!(report.summary.validation_rate, 100);
    assert_eq!(report.summary.average_quality, 100);
    assert!(report.passed());
    assert!(report.duplicate_character_ids.is_empty());
    assert_eq!(report.generated_at, STAMP);

    // Every shipped sheet still leaves five sections without extraction.
    assert_eq!(report.recommendations.len(), 1);
    assert_eq!(
        report.recommendations[0].kind,
        RecommendationKind::Completeness
    );
    assert_eq!(report.recommendations[0].affected_files.len(), 2);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unreadable_sheet_becomes_failing_result_without_aborting_batch() {
    let dir = scratch_dir("missing");
    let blaze = dir.join("blaze.md");
    let missing = dir.join("ghost.md");
    fs::write(&blaze, BLAZE).expect("write blaze");

    let report = reporter().run_all(&[missing.clone(), blaze]);

    let failed = &report.details[0];
    assert!(!failed.valid);
    assert_eq!(failed.hash, ERROR_HASH);
    assert_eq!(failed.completeness, 0);
    assert_eq!(failed.quality_score, 0);
    assert!(failed.character_id.is_none());
    assert_eq!(failed.errors.len(), 1);
    assert!(failed.errors[0].message.contains("failed to read sheet"));

    assert!(report.details[1].valid);
    assert!(!report.structural_consistency);
    assert_eq!(report.summary.validation_rate, 50);
    assert!(!report.passed());

    let validation = report
        .recommendations
        .iter()
        .find(|item| item.kind == RecommendationKind::Validation)
        .expect("validation recommendation");
    assert_eq!(validation.severity, Severity::High);
    assert_eq!(validation.affected_files, vec![missing.display().to_string()]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_profile_drops_one_section_and_fails_schema() {
    let reporter = reporter();
    let complete = reporter.evaluate_text(BLAZE, "blaze.md");
    let headless = BLAZE.replace("**Ultimate:** Phoenix Rising\n", "");
    let partial = reporter.evaluate_text(&headless, "blaze.md");

    assert!(complete.valid);
    assert!(!partial.valid);
    assert!(partial.errors.iter().any(|error| error.path == "/profile"));
    assert_eq!(complete.completeness - partial.completeness, 8);
    assert_eq!(complete.quality_score - partial.quality_score, 20);
}

#[test]
fn same_shape_with_different_values_shares_hash() {
    let reporter = reporter();
    let fast = reporter.evaluate_text(BLAZE, "blaze.md");
    let slowed = BLAZE
        .replace("80/100", "20/100")
        .replace("SHA256", "a house hash");
    let slow = reporter.evaluate_text(&slowed, "blaze.md");

    assert_eq!(fast.hash, slow.hash);
    assert!(structural_consistency(&[fast.clone(), slow.clone()]));
    assert_eq!(fast.quality_score, 100);
    assert_eq!(slow.quality_score, 80);
}

#[test]
fn out_of_range_stat_is_rejected_by_schema_not_parser() {
    let reporter = reporter();
    let boosted = BLAZE.replace("POWER:        █████████░  90/100", "POWER:        █████████░  150/100");
    let result = reporter.evaluate_text(&boosted, "blaze.md");

    assert!(!result.valid);
    assert!(
        result
            .errors
            .iter()
            .any(|error| error.path == "/stats/baseStats/power")
    );
    assert_eq!(result.quality_score, 100);

    let drained = BLAZE.replace("POWER:        █████████░  90/100", "POWER:        █████████░  -5/100");
    let result = reporter.evaluate_text(&drained, "blaze.md");

    assert!(!result.valid);
    assert!(
        result
            .errors
            .iter()
            .any(|error| error.path == "/stats/baseStats/power")
    );
}

#[test]
fn summary_rates_are_rounded_percentages() {
    let details = vec![
        result("a.md", true, 58, 100, "aaaa0000"),
        result("b.md", false, 50, 75, "aaaa0000"),
        result("c.md", true, 58, 90, "aaaa0000"),
    ];

    let summary = summarize(&details);
    assert_eq!(summary.total_characters, 3);
    assert_eq!(summary.valid_characters, 2);
    assert_eq!(summary.validation_rate, 67);
    assert_eq!(summary.average_quality, 88);
    assert_eq!(summary.average_completeness, 55);

    let empty = summarize(&[]);
    assert_eq!(empty.validation_rate, 0);
    assert_eq!(empty.average_quality, 0);
}

#[test]
fn recommendations_aggregate_one_entry_per_check() {
    let details = vec![
        result("a.md", false, 58, 70, "aaaa0000"),
        result("b.md", false, 95, 60, "aaaa0000"),
        result("c.md", true, 100, 100, "aaaa0000"),
    ];

    let recommendations =
        build_recommendations(&details, &RecommendationThresholds::default());
    assert_eq!(recommendations.len(), 3);

    assert_eq!(recommendations[0].kind, RecommendationKind::Quality);
    assert_eq!(recommendations[0].severity, Severity::Medium);
    assert_eq!(recommendations[0].affected_files, vec!["a.md", "b.md"]);

    assert_eq!(recommendations[1].kind, RecommendationKind::Validation);
    assert_eq!(recommendations[1].affected_files, vec!["a.md", "b.md"]);

    assert_eq!(recommendations[2].kind, RecommendationKind::Completeness);
    assert_eq!(recommendations[2].severity, Severity::Low);
    assert_eq!(recommendations[2].affected_files, vec!["a.md"]);
}

#[test]
fn structural_consistency_requires_identical_hashes() {
    assert!(structural_consistency(&[]));
    assert!(structural_consistency(&[result("a.md", true, 58, 100, "aaaa0000")]));
    assert!(!structural_consistency(&[
        result("a.md", true, 58, 100, "aaaa0000"),
        result("b.md", true, 58, 100, "bbbb1111"),
    ]));
}

#[test]
fn colliding_character_ids_are_flagged() {
    let details = vec![
        result("one/blaze.md", true, 58, 100, "aaaa0000"),
        result("two/blaze.md", true, 58, 100, "aaaa0000"),
        result("frost.md", true, 58, 100, "aaaa0000"),
    ];
    assert_eq!(duplicate_character_ids(&details), vec!["blaze".to_string()]);
}

#[test]
fn discover_sheets_returns_sorted_markdown_files_only() {
    let dir = scratch_dir("discover");
    fs::write(dir.join("zeta.md"), "z").expect("write zeta");
    fs::write(dir.join("alpha.MD"), "a").expect("write alpha");
    fs::write(dir.join("notes.txt"), "n").expect("write notes");
    fs::create_dir_all(dir.join("nested.md")).expect("create nested dir");

    let sheets = discover_sheets(&dir).expect("discovery succeeds");
    let names = sheets
        .iter()
        .filter_map(|path| path.file_name().and_then(|name| name.to_str()))
        .collect::<Vec<&str>>();
    assert_eq!(names, vec!["alpha.MD", "zeta.md"]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn report_serializes_with_camel_case_keys() {
    let report = reporter().run_all(&[]);
    let value = serde_json::to_value(&report).expect("report serializes");

    assert_eq!(value["summary"]["totalCharacters"], 0);
    assert_eq!(value["structuralConsistency"], true);
    assert!(value["details"].as_array().is_some_and(|items| items.is_empty()));
    assert!(!report.passed());
}

#[test]
fn validate_run_writes_report_and_passes_gate_for_shipped_sheets() {
    let dir = scratch_dir("run-pass");
    fs::write(dir.join("blaze.md"), BLAZE).expect("write blaze");
    fs::write(dir.join("frost.md"), FROST).expect("write frost");

    let args = validate_args(&dir, Vec::new());
    let report_path = args.report_path.clone();
    let outcome = run(args).expect("validation runs");
    assert_eq!(outcome, CommandOutcome::Completed);

    let report: QualityReport = read_json(&report_path).expect("report written");
    assert_eq!(report.summary.total_characters, 2);
    assert_eq!(report.details[0].character_id.as_deref(), Some("blaze"));
    assert!(report.passed());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn validate_run_reports_gate_failure_for_failing_sheet() {
    let dir = scratch_dir("run-gate");
    let blaze = dir.join("blaze.md");
    fs::write(&blaze, BLAZE).expect("write blaze");

    let args = validate_args(&dir, vec![blaze, dir.join("absent.md")]);
    let report_path = args.report_path.clone();
    let outcome = run(args).expect("per-sheet failures are not fatal");
    assert_eq!(outcome, CommandOutcome::GateFailed);

    let report: QualityReport = read_json(&report_path).expect("report written");
    assert_eq!(report.summary.validation_rate, 50);
    assert_eq!(report.details[1].hash, ERROR_HASH);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn validate_run_survives_unwritable_report_path() {
    let dir = scratch_dir("run-unwritable");
    fs::write(dir.join("blaze.md"), BLAZE).expect("write blaze");
    let blocker = dir.join("blocker");
    fs::write(&blocker, "regular file").expect("write blocker");

    let mut args = validate_args(&dir, Vec::new());
    args.report_path = blocker.join("quality.json");
    let outcome = run(args).expect("report write failure is only logged");
    assert_eq!(outcome, CommandOutcome::Completed);
    assert!(blocker.is_file());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn validate_run_aborts_when_schema_is_missing() {
    let dir = scratch_dir("run-no-schema");
    fs::write(dir.join("blaze.md"), BLAZE).expect("write blaze");

    let mut args = validate_args(&dir, Vec::new());
    args.schema_path = dir.join("missing.schema.json");
    let report_path = args.report_path.clone();
    assert!(run(args).is_err());
    assert!(!report_path.exists());

    let _ = fs::remove_dir_all(&dir);
}
