use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, warn};

use crate::model::{
    Achievements, CharacterRecord, Encryption, HashAlgorithm, Integrations, Matchup, Metadata,
    NamedEntry, Performance, Profile, RECORD_SCHEMA_VERSION, RECORD_VERSION, Security,
    SignatureScheme, Stats, UNSPECIFIED,
};

mod extract;
mod sections;

use extract::*;
use sections::*;

/// Compiled line patterns of the character-sheet dialect.
#[derive(Debug)]
pub struct SheetPatterns {
    profile_header: Regex,
    stat_line: Regex,
    list_entry: Regex,
    label_line: Regex,
    metric_line: Regex,
    matchup_title: Regex,
}

impl SheetPatterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            profile_header: Regex::new(
                r"(?m)^\*\*Name:\*\*[ \t]*(?P<name>.+?)[ \t]*\n\*\*Fighting Style:\*\*[ \t]*(?P<style>.+?)[ \t]*\n\*\*Element:\*\*[ \t]*(?P<element>.+?)[ \t]*\n\*\*Signature Move:\*\*[ \t]*(?P<signature>.+?)[ \t]*\n\*\*Ultimate:\*\*[ \t]*(?P<ultimate>.+?)[ \t]*$",
            )
            .context("failed to compile profile header regex")?,
            stat_line: Regex::new(
                r"^\s*(?P<label>[A-Za-z][A-Za-z0-9 _-]*?)\s*:?[^\w\n]*?(?P<value>-?\d+)\s*/\s*100\b",
            )
            .context("failed to compile stat line regex")?,
            list_entry: Regex::new(
                r"^\s*[-*+]\s+(?:[^*\s]+\s+)?\*\*(?P<name>[^*]+?)\s*:?\*\*\s*:?\s*(?P<description>.*?)\s*$",
            )
            .context("failed to compile list entry regex")?,
            label_line: Regex::new(
                r"^\s*(?:[-*+]\s+)?\*\*(?P<label>[^*]+?):\*\*\s*(?P<value>.*?)\s*$",
            )
            .context("failed to compile labelled line regex")?,
            metric_line: Regex::new(
                r"^\s*[-*+]\s+(?:\*\*(?P<bold>[^*]+?):?\*\*\s*:?|(?P<plain>[^:*]+?)\s*:)\s*(?P<value>.+?)\s*$",
            )
            .context("failed to compile metric line regex")?,
            matchup_title: Regex::new(r"^(?i)vs\.?\s+(?P<name>.+)$")
                .context("failed to compile matchup heading regex")?,
        })
    }
}

#[derive(Debug)]
pub struct SheetParser {
    patterns: SheetPatterns,
    stamp: String,
}

impl SheetParser {
    /// `stamp` becomes `createdAt`/`updatedAt` of every record this parser
    /// produces, so equal inputs always serialize to equal bytes.
    pub fn new(stamp: impl Into<String>) -> Result<Self> {
        Ok(Self {
            patterns: SheetPatterns::new()?,
            stamp: stamp.into(),
        })
    }

    pub fn parse(&self, text: &str, filename: &str) -> CharacterRecord {
        let normalized = text.replace("\r\n", "\n");
        let outline = SheetOutline::new(&normalized);
        let character_id = derive_character_id(filename);

        let profile = extract_profile(&self.patterns, &normalized);
        if profile.is_none() {
            debug!(character_id = %character_id, "profile header not found");
        }

        let base_stats = extract_base_stats(&self.patterns, &outline).unwrap_or_else(|| {
            debug!(character_id = %character_id, "stat block not found");
            BTreeMap::new()
        });
        let special_attributes = extract_special_attributes(&self.patterns, &outline)
            .unwrap_or_else(|| {
                debug!(character_id = %character_id, "special attributes not found");
                Vec::new()
            });
        let system_matchups = extract_matchups(&self.patterns, &outline).unwrap_or_else(|| {
            debug!(character_id = %character_id, "no system matchups found");
            BTreeMap::new()
        });
        let encryption = extract_encryption(&self.patterns, &outline).unwrap_or_else(|| {
            debug!(character_id = %character_id, "encryption section not found");
            Encryption::default()
        });
        let core_metrics = extract_core_metrics(&self.patterns, &outline).unwrap_or_else(|| {
            debug!(character_id = %character_id, "no performance metrics found");
            BTreeMap::new()
        });
        let achievements = extract_achievements(&self.patterns, &outline).unwrap_or_else(|| {
            debug!(character_id = %character_id, "achievements not found");
            Vec::new()
        });

        CharacterRecord {
            metadata: Metadata {
                character_id,
                version: RECORD_VERSION.to_string(),
                created_at: self.stamp.clone(),
                updated_at: self.stamp.clone(),
                schema_version: RECORD_SCHEMA_VERSION.to_string(),
            },
            profile,
            stats: Stats {
                base_stats,
                special_attributes,
            },
            integrations: Integrations { system_matchups },
            security: Security { encryption },
            performance: Performance { core_metrics },
            achievements: Achievements { achievements },
            ..CharacterRecord::default()
        }
    }
}

/// Lowercased file stem: `sheets/Blaze.md` becomes `blaze`.
pub fn derive_character_id(filename: &str) -> String {
    let path = Path::new(filename);
    path.file_stem()
        .or_else(|| path.file_name())
        .and_then(|stem| stem.to_str())
        .unwrap_or(filename)
        .trim()
        .to_lowercase()
}
