use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use tracing::info;

use crate::model::{CharacterRecord, ValidationIssue};

/// Pointer used for violations that do not belong to a nested field.
pub const ROOT_POINTER: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaVerdict {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
}

/// Character-record schema, compiled once per run.
pub struct SchemaValidator {
    validator: jsonschema::Validator,
    source: String,
}

impl SchemaValidator {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read(path)
            .with_context(|| format!("failed to read schema file: {}", path.display()))?;
        let schema: Value = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse schema file: {}", path.display()))?;

        let validator = Self::from_value(&schema, path.display().to_string())?;
        info!(path = %path.display(), "compiled character schema");
        Ok(validator)
    }

    pub fn from_value(schema: &Value, source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let validator = jsonschema::validator_for(schema)
            .map_err(|err| anyhow!("failed to compile schema {source}: {err}"))?;

        Ok(Self { validator, source })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Collects every violation in one pass.
    pub fn validate(&self, record: &CharacterRecord) -> SchemaVerdict {
        let instance = match serde_json::to_value(record) {
            Ok(instance) => instance,
            Err(err) => {
                return SchemaVerdict {
                    valid: false,
                    errors: vec![ValidationIssue {
                        path: ROOT_POINTER.to_string(),
                        message: format!("record could not be serialized: {err}"),
                    }],
                };
            }
        };

        self.validate_value(&instance)
    }

    pub fn validate_value(&self, instance: &Value) -> SchemaVerdict {
        let errors = self
            .validator
            .iter_errors(instance)
            .map(|error| {
                let pointer = error.instance_path.to_string();
                ValidationIssue {
                    path: if pointer.is_empty() {
                        ROOT_POINTER.to_string()
                    } else {
                        pointer
                    },
                    message: error.to_string(),
                }
            })
            .collect::<Vec<ValidationIssue>>();

        SchemaVerdict {
            valid: errors.is_empty(),
            errors,
        }
    }
}
