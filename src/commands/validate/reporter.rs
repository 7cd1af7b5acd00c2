use super::*;

pub const ERROR_HASH: &str = "error";

/// Drives parse, validate and score over a batch of sheets, in input order.
pub struct Reporter {
    parser: SheetParser,
    validator: SchemaValidator,
    scoring: ScoringConfig,
    generated_at: String,
}

impl Reporter {
    pub fn new(
        generated_at: impl Into<String>,
        validator: SchemaValidator,
        scoring: ScoringConfig,
    ) -> Result<Self> {
        let generated_at = generated_at.into();
        Ok(Self {
            parser: SheetParser::new(generated_at.clone())?,
            validator,
            scoring,
            generated_at,
        })
    }

    pub fn run_all(&self, sheets: &[PathBuf]) -> QualityReport {
        let mut details = Vec::with_capacity(sheets.len());

        for path in sheets {
            let filename = path.display().to_string();
            let result = match self.evaluate_sheet(path) {
                Ok(result) => result,
                Err(err) => {
                    warn!(file = %filename, error = %format!("{err:#}"), "sheet could not be processed");
                    failed_result(&filename, &err)
                }
            };

            info!(
                file = %result.filename,
                valid = result.valid,
                errors = result.errors.len(),
                completeness = result.completeness,
                quality = result.quality_score,
                hash = %result.hash,
                "evaluated sheet"
            );
            details.push(result);
        }

        let duplicate_character_ids = duplicate_character_ids(&details);
        for id in &duplicate_character_ids {
            warn!(character_id = %id, "multiple sheets share a character id");
        }

        QualityReport {
            report_version: REPORT_VERSION,
            generated_at: self.generated_at.clone(),
            schema_path: self.validator.source().to_string(),
            summary: summarize(&details),
            recommendations: build_recommendations(&details, &self.scoring.thresholds),
            structural_consistency: structural_consistency(&details),
            duplicate_character_ids,
            details,
        }
    }

    pub fn evaluate_sheet(&self, path: &Path) -> Result<ValidationResult> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read sheet: {}", path.display()))?;
        Ok(self.evaluate_text(&text, &path.display().to_string()))
    }

    pub fn evaluate_text(&self, text: &str, filename: &str) -> ValidationResult {
        let record = self.parser.parse(text, filename);
        let verdict = self.validator.validate(&record);
        let scored = score(&record, &self.scoring);

        ValidationResult {
            filename: filename.to_string(),
            character_id: Some(record.metadata.character_id),
            valid: verdict.valid,
            errors: verdict.errors,
            completeness: scored.completeness,
            quality_score: scored.quality_score,
            hash: scored.hash,
        }
    }
}

pub fn failed_result(filename: &str, err: &anyhow::Error) -> ValidationResult {
    ValidationResult {
        filename: filename.to_string(),
        character_id: None,
        valid: false,
        errors: vec![ValidationIssue {
            path: ROOT_POINTER.to_string(),
            message: format!("{err:#}"),
        }],
        completeness: 0,
        quality_score: 0,
        hash: ERROR_HASH.to_string(),
    }
}
