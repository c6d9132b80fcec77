use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-metric scores keyed by metric id.
///
/// The backend reports scores as JSON numbers but may emit `null` for a
/// metric it could not compute, so values are optional. Consumers skip
/// missing or non-finite entries rather than failing.
pub type MetricScores = HashMap<String, Option<f64>>;

/// One experiment as returned by the experiment listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentSummary {
    /// Experiment name, also its identifier in detail lookups
    pub name: String,
    /// ISO-8601 timestamp of the most recent run
    pub date: String,
    /// Human-readable dataset name
    pub dataset: String,
    /// Models evaluated in this experiment
    pub models: Vec<String>,
    /// Metrics scored in this experiment
    pub metrics: Vec<String>,
    /// Number of tasks in the dataset
    #[serde(default)]
    pub task_count: u64,
}

/// Response shape of the experiment listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentList {
    pub experiments: Vec<ExperimentSummary>,
}

/// Aggregated per-model numbers within an experiment report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSummary {
    pub avg_latency: Option<f64>,
    #[serde(default)]
    pub avg_time_to_first_token: Option<f64>,
    #[serde(default)]
    pub avg_tokens_per_second: Option<f64>,
    pub avg_tokens: Option<f64>,
    pub total_cost: Option<f64>,
    pub avg_cost: Option<f64>,
    #[serde(default)]
    pub total_api_cost: Option<f64>,
    #[serde(default)]
    pub total_infrastructure_cost: Option<f64>,
    /// Average score per metric for this model
    #[serde(default)]
    pub metric_scores: MetricScores,
}

/// Summary section of an experiment detail payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub dataset: String,
    pub models: Vec<String>,
    pub metrics: Vec<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub task_count: u64,
    #[serde(default)]
    pub model_summaries: HashMap<String, ModelSummary>,
    /// Per-metric, per-model averages; absent for sparse experiments
    #[serde(default)]
    pub metric_summaries: HashMap<String, HashMap<String, Option<f64>>>,
}

/// One model's scored response to one task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResult {
    pub model_id: String,
    pub task_id: String,
    pub response: String,
    pub latency: Option<f64>,
    pub token_count: Option<f64>,
    pub cost: Option<f64>,
    #[serde(default)]
    pub metric_scores: MetricScores,
}

/// Full experiment detail, optionally scoped to a single run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentDetail {
    pub experiment_name: String,
    #[serde(default)]
    pub run_id: Option<String>,
    pub summary: ExperimentReport,
    #[serde(default)]
    pub results: Vec<TaskResult>,
    #[serde(default)]
    pub report_url: Option<String>,
}

/// Per-1k-token pricing attached to a model catalog entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostInfo {
    #[serde(default)]
    pub prompt_price_per_1k: f64,
    #[serde(default)]
    pub completion_price_per_1k: f64,
    #[serde(default)]
    pub input_price_per_1k: f64,
    #[serde(default)]
    pub output_price_per_1k: f64,
}

/// One model catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub model_type: Option<String>,
    #[serde(default)]
    pub cost_info: CostInfo,
}

/// Response shape of the model listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelList {
    pub models: Vec<ModelInfo>,
}

/// One metric catalog entry
///
/// `higher_is_better` is the metric's polarity. Current backends do not
/// populate it; `scoring::polarity_for` falls back to the known inverted
/// metric when it is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub higher_is_better: Option<bool>,
}

/// Response shape of the metrics catalog endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsCatalog {
    #[serde(default)]
    pub metrics: HashMap<String, MetricDefinition>,
    /// Metric ids grouped by task type (rag, generation, qa, ...)
    #[serde(default)]
    pub task_metrics: HashMap<String, Vec<String>>,
}

/// One dataset catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub task_count: u64,
    pub path: String,
}

/// Response shape of the dataset listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetList {
    pub datasets: Vec<DatasetInfo>,
}

/// Evaluation submission body
///
/// `models` and `metrics` must each be non-empty before submission;
/// `config::RunFile::validate` enforces this ahead of the POST.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub experiment_name: String,
    pub dataset_path: String,
    pub models: Vec<String>,
    pub metrics: Vec<String>,
}

/// Acknowledgement returned when an evaluation is submitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub experiment_name: String,
    pub run_id: String,
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Result of sending one ad-hoc prompt to one model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResponse {
    #[serde(default)]
    pub response_id: Option<String>,
    #[serde(default)]
    pub model_id: Option<String>,
    /// The generated text response
    pub response: String,
    /// Measured metrics for the generation (latency, cost, tokens, ...)
    #[serde(default)]
    pub metrics: MetricScores,
}
