use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

pub const RECORD_VERSION: &str = "1.0.0";
pub const RECORD_SCHEMA_VERSION: &str = "2.0.0";
pub const REPORT_VERSION: u32 = 1;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Section {
    Metadata,
    Profile,
    Stats,
    Moves,
    Strategies,
    Weaknesses,
    Integrations,
    Security,
    Performance,
    Achievements,
    Configuration,
    Techniques,
}

impl Section {
    pub const ALL: [Section; 12] = [
        Section::Metadata,
        Section::Profile,
        Section::Stats,
        Section::Moves,
        Section::Strategies,
        Section::Weaknesses,
        Section::Integrations,
        Section::Security,
        Section::Performance,
        Section::Achievements,
        Section::Configuration,
        Section::Techniques,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Metadata => "metadata",
            Self::Profile => "profile",
            Self::Stats => "stats",
            Self::Moves => "moves",
            Self::Strategies => "strategies",
            Self::Weaknesses => "weaknesses",
            Self::Integrations => "integrations",
            Self::Security => "security",
            Self::Performance => "performance",
            Self::Achievements => "achievements",
            Self::Configuration => "configuration",
            Self::Techniques => "techniques",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    pub metadata: Metadata,
    #[serde(serialize_with = "serialize_profile")]
    pub profile: Option<Profile>,
    pub stats: Stats,
    pub moves: Vec<NamedEntry>,
    pub strategies: Vec<NamedEntry>,
    pub weaknesses: Vec<NamedEntry>,
    pub integrations: Integrations,
    pub security: Security,
    pub performance: Performance,
    pub achievements: Achievements,
    pub configuration: BTreeMap<String, String>,
    pub techniques: Vec<NamedEntry>,
}

impl CharacterRecord {
    /// Shallow emptiness: wrapper objects always carry their inner keys, so
    /// they count as populated even when those inner collections are empty.
    pub fn is_populated(&self, section: Section) -> bool {
        match section {
            Section::Metadata => true,
            Section::Profile => self.profile.is_some(),
            Section::Stats => true,
            Section::Moves => !self.moves.is_empty(),
            Section::Strategies => !self.strategies.is_empty(),
            Section::Weaknesses => !self.weaknesses.is_empty(),
            Section::Integrations => true,
            Section::Security => true,
            Section::Performance => true,
            Section::Achievements => true,
            Section::Configuration => !self.configuration.is_empty(),
            Section::Techniques => !self.techniques.is_empty(),
        }
    }

    pub fn populated_sections(&self) -> usize {
        Section::ALL
            .iter()
            .filter(|section| self.is_populated(**section))
            .count()
    }
}

// A missing profile is written as `{}` so the record keeps its declared shape.
fn serialize_profile<S>(profile: &Option<Profile>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match profile {
        Some(value) => value.serialize(serializer),
        None => BTreeMap::<String, String>::new().serialize(serializer),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub character_id: String,
    pub version: String,
    pub created_at: String,
    pub updated_at: String,
    pub schema_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub fighting_style: String,
    pub element: String,
    pub signature_move: String,
    pub ultimate: String,
}

impl Profile {
    pub const FIELD_NAMES: [&'static str; 5] = [
        "name",
        "fightingStyle",
        "element",
        "signatureMove",
        "ultimate",
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NamedEntry {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub base_stats: BTreeMap<String, i64>,
    pub special_attributes: Vec<NamedEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Integrations {
    pub system_matchups: BTreeMap<String, Matchup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Matchup {
    pub synergy: String,
    pub combo: String,
    pub strategy: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Security {
    pub encryption: Encryption,
}

pub const UNSPECIFIED: &str = "unspecified";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Encryption {
    pub primary_hash: HashAlgorithm,
    pub signatures: SignatureScheme,
    pub key_management: String,
    pub tamper_detection: String,
}

impl Encryption {
    pub const FIELD_NAMES: [&'static str; 4] = [
        "primaryHash",
        "signatures",
        "keyManagement",
        "tamperDetection",
    ];
}

impl Default for Encryption {
    fn default() -> Self {
        Self {
            primary_hash: HashAlgorithm::Unknown,
            signatures: SignatureScheme::Unknown,
            key_management: UNSPECIFIED.to_string(),
            tamper_detection: UNSPECIFIED.to_string(),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub enum HashAlgorithm {
    #[serde(rename = "SHA-256")]
    Sha256,
    #[serde(rename = "SHA-512")]
    Sha512,
    #[serde(rename = "BLAKE3")]
    Blake3,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl HashAlgorithm {
    pub fn is_known(self) -> bool {
        match self {
            Self::Sha256 | Self::Sha512 | Self::Blake3 => true,
            Self::Unknown => false,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub enum SignatureScheme {
    #[serde(rename = "ECDSA")]
    Ecdsa,
    #[serde(rename = "Ed25519")]
    Ed25519,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub core_metrics: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Achievements {
    pub achievements: Vec<NamedEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<String>,
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub completeness: u32,
    pub quality_score: u32,
    pub hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_characters: usize,
    pub valid_characters: usize,
    pub validation_rate: u32,
    pub average_quality: u32,
    pub average_completeness: u32,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Quality,
    Validation,
    Completeness,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub severity: Severity,
    pub message: String,
    pub affected_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    pub report_version: u32,
    pub generated_at: String,
    pub schema_path: String,
    pub summary: ReportSummary,
    pub details: Vec<ValidationResult>,
    pub recommendations: Vec<Recommendation>,
    pub structural_consistency: bool,
    #[serde(default)]
    pub duplicate_character_ids: Vec<String>,
}

impl QualityReport {
    pub fn passed(&self) -> bool {
        self.summary.validation_rate == 100 && self.structural_consistency
    }
}
