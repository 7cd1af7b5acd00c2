use std::collections::BTreeSet;

use serde_json::json;

use crate::config::ScoringConfig;
use crate::model::{CharacterRecord, Encryption, Profile, Section};
use crate::util::sha256_hex;

pub const STRUCTURAL_HASH_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityScore {
    pub completeness: u32,
    pub quality_score: u32,
    pub hash: String,
}

pub fn score(record: &CharacterRecord, config: &ScoringConfig) -> QualityScore {
    QualityScore {
        completeness: completeness(record),
        quality_score: quality_score(record, config),
        hash: structural_hash(record),
    }
}

/// Percentage of the twelve top-level sections that are populated.
pub fn completeness(record: &CharacterRecord) -> u32 {
    let total = Section::ALL.len();
    let populated = record.populated_sections();
    percent(populated, total)
}

pub fn missing_sections(record: &CharacterRecord) -> Vec<&'static str> {
    Section::ALL
        .iter()
        .filter(|section| !record.is_populated(**section))
        .map(|section| section.as_str())
        .collect()
}

pub fn quality_score(record: &CharacterRecord, config: &ScoringConfig) -> u32 {
    let weights = &config.weights;
    let targets = &config.targets;

    let profile = if record.profile.is_some() {
        weights.profile
    } else {
        0.0
    };
    let stats = weights.stats * capped_ratio(record.stats.base_stats.len(), targets.stats);
    let integrations = weights.integrations
        * capped_ratio(
            record.integrations.system_matchups.len(),
            targets.integrations,
        );
    let security = if record.security.encryption.primary_hash.is_known() {
        weights.security
    } else {
        0.0
    };
    let performance = weights.performance
        * capped_ratio(
            record.performance.core_metrics.len(),
            targets.performance_metrics,
        );
    let achievements = weights.achievements
        * capped_ratio(
            record.achievements.achievements.len(),
            targets.achievements,
        );

    let points = profile + stats + integrations + security + performance + achievements;
    points.round().clamp(0.0, 100.0) as u32
}

fn capped_ratio(count: usize, target: usize) -> f64 {
    if target == 0 {
        return 1.0;
    }
    (count as f64 / target as f64).min(1.0)
}

/// Digest over which keys are present, never their values. Records with
/// the same shape share a hash.
pub fn structural_hash(record: &CharacterRecord) -> String {
    let profile_keys = match record.profile {
        Some(_) => Profile::FIELD_NAMES.iter().copied().collect::<BTreeSet<&str>>(),
        None => BTreeSet::new(),
    };
    let stat_names = record
        .stats
        .base_stats
        .keys()
        .map(String::as_str)
        .collect::<BTreeSet<&str>>();
    let integration_keys = record
        .integrations
        .system_matchups
        .keys()
        .map(String::as_str)
        .collect::<BTreeSet<&str>>();
    let security_keys = Encryption::FIELD_NAMES
        .iter()
        .copied()
        .collect::<BTreeSet<&str>>();
    let performance_keys = record
        .performance
        .core_metrics
        .keys()
        .map(String::as_str)
        .collect::<BTreeSet<&str>>();

    let shape = json!({
        "profileKeys": profile_keys,
        "statNames": stat_names,
        "integrationKeys": integration_keys,
        "securityKeys": security_keys,
        "performanceKeys": performance_keys,
        "achievementCount": record.achievements.achievements.len(),
    });

    let mut digest = sha256_hex(shape.to_string().as_bytes());
    digest.truncate(STRUCTURAL_HASH_LEN);
    digest
}

pub fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * part as f64 / total as f64).round() as u32
}
