use crate::models::EvaluationRequest;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An evaluation submission described as a TOML run file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunFile {
    /// Name under which the experiment is recorded
    pub experiment_name: String,
    /// Path to the dataset on the backend
    pub dataset_path: String,
    /// Models to evaluate; must be non-empty
    pub models: Vec<String>,
    /// Metrics to score; must be non-empty
    pub metrics: Vec<String>,
    /// Optional local path to store the returned outcome as JSON
    #[serde(default)]
    pub storage_path: Option<String>,
}

impl RunFile {
    /// Load a run file from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read run file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML run file: {}", path.display()))
    }

    /// Reject submissions that would be refused by the backend
    pub fn validate(&self) -> Result<()> {
        if self.models.is_empty() {
            bail!("Run file must select at least one model");
        }
        if self.metrics.is_empty() {
            bail!("Run file must select at least one metric");
        }
        Ok(())
    }

    /// Convert into the wire-level submission body
    pub fn into_request(self) -> EvaluationRequest {
        EvaluationRequest {
            experiment_name: self.experiment_name,
            dataset_path: self.dataset_path,
            models: self.models,
            metrics: self.metrics,
        }
    }
}
