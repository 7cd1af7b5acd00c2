use super::*;

pub fn summarize(details: &[ValidationResult]) -> ReportSummary {
    let total = details.len();
    let valid = details.iter().filter(|result| result.valid).count();
    let quality_sum = details
        .iter()
        .map(|result| result.quality_score as usize)
        .sum::<usize>();
    let completeness_sum = details
        .iter()
        .map(|result| result.completeness as usize)
        .sum::<usize>();

    ReportSummary {
        total_characters: total,
        valid_characters: valid,
        validation_rate: percent(valid, total),
        average_quality: rounded_mean(quality_sum, total),
        average_completeness: rounded_mean(completeness_sum, total),
    }
}

fn rounded_mean(sum: usize, count: usize) -> u32 {
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as u32
}

/// True when every sheet produced the same structural hash.
pub fn structural_consistency(details: &[ValidationResult]) -> bool {
    match details.split_first() {
        Some((first, rest)) => rest.iter().all(|result| result.hash == first.hash),
        None => true,
    }
}

/// One aggregated entry per failing check, listing every affected file.
pub fn build_recommendations(
    details: &[ValidationResult],
    thresholds: &RecommendationThresholds,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    let low_quality = affected_files(details, |result| {
        result.quality_score < thresholds.min_quality_score
    });
    if !low_quality.is_empty() {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Quality,
            severity: Severity::Medium,
            message: format!(
                "{} sheet(s) scored below {}% quality; add stats, matchups, metrics or achievements to reach the targets",
                low_quality.len(),
                thresholds.min_quality_score
            ),
            affected_files: low_quality,
        });
    }

    let invalid = affected_files(details, |result| !result.valid);
    if !invalid.is_empty() {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Validation,
            severity: Severity::High,
            message: format!(
                "{} sheet(s) failed schema validation; fix the listed violations before release",
                invalid.len()
            ),
            affected_files: invalid,
        });
    }

    let incomplete = affected_files(details, |result| {
        result.completeness < thresholds.min_completeness
    });
    if !incomplete.is_empty() {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Completeness,
            severity: Severity::Low,
            message: format!(
                "{} sheet(s) are below {}% completeness; fill in the empty top-level sections",
                incomplete.len(),
                thresholds.min_completeness
            ),
            affected_files: incomplete,
        });
    }

    recommendations
}

fn affected_files<F>(details: &[ValidationResult], predicate: F) -> Vec<String>
where
    F: Fn(&ValidationResult) -> bool,
{
    details
        .iter()
        .filter(|result| predicate(*result))
        .map(|result| result.filename.clone())
        .collect()
}

/// Character ids derived from more than one sheet, sorted.
pub fn duplicate_character_ids(details: &[ValidationResult]) -> Vec<String> {
    let mut counts = BTreeMap::<&str, usize>::new();
    for id in details
        .iter()
        .filter_map(|result| result.character_id.as_deref())
    {
        *counts.entry(id).or_default() += 1;
    }

    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, _)| id.to_string())
        .collect()
}
