use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

mod client;
mod config;
mod models;
mod output;
mod scoring;

use crate::client::ApiClient;
use crate::config::RunFile;
use crate::models::{EvaluationOutcome, MetricsCatalog};
use crate::output::OutputFormat;

/// Console for an LLM evaluation platform - browse experiments, launch
/// evaluation runs, and send ad-hoc prompts to models
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output format: plain or json
    #[arg(short, long, default_value = "plain", global = true)]
    output: OutputFormat,

    /// Verbose output - show progress for each API request
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List experiments
    Experiments,
    /// Show details for one experiment
    Show {
        /// Experiment name
        experiment: String,
        /// Optional run id to scope the detail view to
        #[arg(long)]
        run: Option<String>,
    },
    /// List available models
    Models,
    /// List available metrics
    Metrics,
    /// List available datasets
    Datasets,
    /// Submit an evaluation run described by a TOML run file
    Run {
        /// Path to the TOML run file
        run_file: PathBuf,
    },
    /// Send one prompt to one model and show the scored response
    Generate {
        /// Model id
        model_id: String,
        /// Prompt text
        prompt: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let client = ApiClient::from_env()?;

    if args.verbose {
        println!("Using API at {}", client.base_url());
    }

    match args.command {
        Command::Experiments => {
            let list = client.fetch_experiments().await?;
            output::print_experiments(&list, args.output);
        }
        Command::Show { experiment, run } => {
            let detail = client
                .fetch_experiment_details(&experiment, run.as_deref())
                .await?;
            let catalog = fetch_catalog_or_empty(&client, args.verbose).await;
            output::print_experiment_detail(&detail, &catalog, args.output);
        }
        Command::Models => {
            let list = client.fetch_models().await?;
            output::print_models(&list, args.output);
        }
        Command::Metrics => {
            let catalog = client.fetch_metrics().await?;
            output::print_metrics(&catalog, args.output);
        }
        Command::Datasets => {
            let list = client.fetch_datasets().await?;
            output::print_datasets(&list, args.output);
        }
        Command::Run { run_file } => {
            let outcome = submit_run(&client, &run_file, args.verbose).await?;
            output::print_outcome(&outcome, args.output);
        }
        Command::Generate { model_id, prompt } => {
            if args.verbose {
                println!("Generating response with model {}", model_id);
            }
            let response = client.generate_response(&model_id, &prompt).await?;
            output::print_generation(&response, args.output);
        }
    }

    Ok(())
}

/// Load, validate and submit a run file, storing the outcome if configured
async fn submit_run(client: &ApiClient, run_file: &Path, verbose: bool) -> Result<EvaluationOutcome> {
    let run = RunFile::from_file(run_file)?;
    run.validate()?;

    if verbose {
        println!(
            "Submitting evaluation {:?} with {} models and {} metrics",
            run.experiment_name,
            run.models.len(),
            run.metrics.len()
        );
    }

    let storage_path = run.storage_path.clone();
    let outcome = client.run_evaluation(&run.into_request()).await?;

    if let Some(storage_path) = storage_path {
        store_outcome(&outcome, &storage_path)?;
        println!("Outcome stored to: {}", storage_path);
    }

    Ok(outcome)
}

/// Fetch the metrics catalog, degrading to an empty catalog on failure
///
/// The detail view still renders without the catalog; polarity resolution
/// then relies on the built-in fallback.
async fn fetch_catalog_or_empty(client: &ApiClient, verbose: bool) -> MetricsCatalog {
    if verbose {
        println!("Fetching metrics catalog");
    }

    match client.fetch_metrics().await {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Warning: metrics catalog unavailable ({}), continuing without it", e);
            MetricsCatalog::default()
        }
    }
}

/// Store an evaluation outcome to a JSON file, creating directories as needed
fn store_outcome(outcome: &EvaluationOutcome, path: &str) -> Result<()> {
    let json_content =
        serde_json::to_string_pretty(outcome).context("Failed to serialize outcome to JSON")?;

    if let Some(parent) = Path::new(path).parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, json_content)
        .with_context(|| format!("Failed to write outcome to: {}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use std::time::Duration;
    use tempfile::tempdir;

    fn sample_outcome() -> EvaluationOutcome {
        EvaluationOutcome {
            experiment_name: "test_run".to_string(),
            run_id: "abc-123".to_string(),
            status: "success".to_string(),
            message: "Evaluation completed successfully".to_string(),
        }
    }

    #[test]
    fn test_store_outcome() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("outcome.json");

        store_outcome(&sample_outcome(), file_path.to_str().unwrap()).unwrap();

        assert!(file_path.exists());
        let content = std::fs::read_to_string(&file_path).unwrap();
        assert!(content.contains("abc-123"));
        assert!(content.contains("success"));
    }

    #[test]
    fn test_store_outcome_creates_nested_directories() {
        let temp_dir = tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested").join("dir").join("outcome.json");

        store_outcome(&sample_outcome(), nested_path.to_str().unwrap()).unwrap();
        assert!(nested_path.exists());
    }

    #[test]
    fn test_store_outcome_unwritable_path_fails() {
        let result = store_outcome(&sample_outcome(), "/dev/null/not_a_directory/outcome.json");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_submit_run_posts_and_stores() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/evaluations")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "experiment_name": "rag_comparison",
                    "run_id": "run-42",
                    "status": "success",
                    "message": "ok"
                }"#,
            )
            .create_async()
            .await;

        let temp_dir = tempdir().unwrap();
        let outcome_path = temp_dir.path().join("outcome.json");
        let run_file_path = temp_dir.path().join("run.toml");
        std::fs::write(
            &run_file_path,
            format!(
                r#"
experiment_name = "rag_comparison"
dataset_path = "configs/datasets/sample_rag.json"
models = ["gpt4o"]
metrics = ["f1", "hallucination"]
storage_path = "{}"
"#,
                outcome_path.display()
            ),
        )
        .unwrap();

        let client = ApiClient::new(server.url(), Duration::from_secs(5)).unwrap();
        let outcome = submit_run(&client, &run_file_path, false).await.unwrap();

        mock.assert_async().await;
        assert_eq!(outcome.run_id, "run-42");
        assert!(outcome_path.exists());
    }

    #[tokio::test]
    async fn test_submit_run_rejects_empty_models_before_posting() {
        let temp_dir = tempdir().unwrap();
        let run_file_path = temp_dir.path().join("run.toml");
        std::fs::write(
            &run_file_path,
            r#"
experiment_name = "bad_run"
dataset_path = "configs/datasets/sample.json"
models = []
metrics = ["f1"]
"#,
        )
        .unwrap();

        // No server: validation must fail before any request is issued
        let client = ApiClient::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        let result = submit_run(&client, &run_file_path, false).await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("at least one model"));
    }

    #[tokio::test]
    async fn test_fetch_catalog_degrades_to_empty() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/metrics")
            .with_status(500)
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), Duration::from_secs(5)).unwrap();
        let catalog = fetch_catalog_or_empty(&client, false).await;
        assert!(catalog.metrics.is_empty());
    }
}
