use crate::models::{
    DatasetList, EvaluationOutcome, EvaluationRequest, ExperimentDetail, ExperimentList,
    MetricsCatalog, ModelList, ModelResponse,
};
use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

/// Environment variable overriding the backend base URL
pub const API_URL_ENV_VAR: &str = "LLM_EVAL_API_URL";

/// Default backend base URL for local development
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Default per-request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Typed client for the evaluation platform REST API
///
/// Every operation is a single best-effort request: no retries, no backoff,
/// no client-side caching. Failures (non-2xx status or transport errors)
/// surface as an error with a fixed message per endpoint; the underlying
/// cause stays attached to the error chain.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from the environment, falling back to the local
    /// development endpoint when `LLM_EVAL_API_URL` is unset
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var(API_URL_ENV_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(base_url, DEFAULT_TIMEOUT)
    }

    /// Base URL this client targets
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List all experiments
    pub async fn fetch_experiments(&self) -> Result<ExperimentList> {
        self.get("/experiments")
            .await
            .context("Failed to fetch experiments")
    }

    /// Fetch details for one experiment, optionally scoped to a single run
    pub async fn fetch_experiment_details(
        &self,
        experiment_id: &str,
        run_id: Option<&str>,
    ) -> Result<ExperimentDetail> {
        let path = match run_id {
            Some(run_id) => format!("/experiments/{}/runs/{}", experiment_id, run_id),
            None => format!("/experiments/{}", experiment_id),
        };

        // 404 is deliberately not distinguished from other failures here
        self.get(&path)
            .await
            .with_context(|| format!("Failed to fetch experiment details for {}", experiment_id))
    }

    /// List available models
    pub async fn fetch_models(&self) -> Result<ModelList> {
        self.get("/models").await.context("Failed to fetch models")
    }

    /// Fetch the metrics catalog
    pub async fn fetch_metrics(&self) -> Result<MetricsCatalog> {
        self.get("/metrics")
            .await
            .context("Failed to fetch metrics")
    }

    /// List available datasets
    pub async fn fetch_datasets(&self) -> Result<DatasetList> {
        self.get("/datasets")
            .await
            .context("Failed to fetch datasets")
    }

    /// Submit an evaluation run
    pub async fn run_evaluation(&self, evaluation: &EvaluationRequest) -> Result<EvaluationOutcome> {
        self.post("/evaluations", evaluation)
            .await
            .context("Failed to run evaluation")
    }

    /// Send one ad-hoc prompt to one model
    pub async fn generate_response(&self, model_id: &str, prompt: &str) -> Result<ModelResponse> {
        let body = json!({
            "model_id": model_id,
            "prompt": prompt,
        });

        self.post("/generate", &body)
            .await
            .context("Failed to generate response")
    }

    /// Issue a GET request and decode the JSON body
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.http.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    /// Issue a POST request with a JSON body and decode the JSON response
    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    /// Join the base URL with an endpoint path
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Fail on non-2xx status, otherwise decode the body verbatim
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let response = response.error_for_status()?;
        Ok(response.json().await?)
    }
}
