use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{error, info, warn};

use crate::cli::ValidateArgs;
use crate::commands::CommandOutcome;
use crate::config::{RecommendationThresholds, ScoringConfig};
use crate::model::{
    QualityReport, REPORT_VERSION, Recommendation, RecommendationKind, ReportSummary, Severity,
    ValidationIssue, ValidationResult,
};
use crate::schema::{ROOT_POINTER, SchemaValidator};
use crate::scoring::{percent, score};
use crate::sheet::SheetParser;
use crate::util::{now_utc_string, write_json_pretty};

mod discovery;
mod reporter;
mod run;
mod summary;
#[cfg(test)]
mod tests;

pub use run::run;

use discovery::*;
use reporter::*;
use summary::*;
