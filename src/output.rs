use crate::models::{
    DatasetList, EvaluationOutcome, ExperimentDetail, ExperimentList, MetricsCatalog, ModelList,
    ModelResponse,
};
use crate::scoring;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output format options
#[derive(Debug, Clone, ValueEnum, Serialize, Deserialize)]
pub enum OutputFormat {
    Plain,
    Json,
}

/// Format a numeric value with a fixed number of decimal places
///
/// Missing and non-finite values render as the "N/A" sentinel instead of
/// failing.
pub fn format_number(value: Option<f64>, decimal_places: usize) -> String {
    match value {
        Some(value) if value.is_finite() => format!("{:.*}", decimal_places, value),
        _ => "N/A".to_string(),
    }
}

/// Format one named metric value for display
///
/// Cost metrics get a dollar prefix and four decimal places; latency and
/// time metrics get a seconds suffix. Everything else is the plain
/// two-decimal rendering.
pub fn format_metric(name: &str, value: Option<f64>) -> String {
    if name.contains("cost") {
        format!("${}", format_number(value, 4))
    } else if name.contains("latency") || name.contains("time_to_first_token") {
        format!("{}s", format_number(value, 2))
    } else {
        format_number(value, 2)
    }
}

/// Print the experiment listing
pub fn print_experiments(list: &ExperimentList, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(list),
        OutputFormat::Plain => {
            if list.experiments.is_empty() {
                println!("No experiments found.");
                return;
            }

            println!(
                "{:<35} {:<20} {:<25} {:<8} {:<8}",
                "Name", "Date", "Dataset", "Models", "Tasks"
            );
            println!("{}", "-".repeat(100));
            for experiment in &list.experiments {
                println!(
                    "{:<35} {:<20} {:<25} {:<8} {:<8}",
                    experiment.name,
                    experiment.date,
                    experiment.dataset,
                    experiment.models.len(),
                    experiment.task_count
                );
            }
        }
    }
}

/// Print an experiment detail view with per-model average scores
pub fn print_experiment_detail(
    detail: &ExperimentDetail,
    catalog: &MetricsCatalog,
    format: OutputFormat,
) {
    match format {
        OutputFormat::Json => print_json(detail),
        OutputFormat::Plain => {
            println!("Experiment: {}", detail.experiment_name);
            if let Some(run_id) = &detail.run_id {
                println!("Run: {}", run_id);
            }
            println!("Dataset: {}", detail.summary.dataset);
            println!("Tasks: {}", detail.summary.task_count);
            println!();

            println!(
                "{:<20} {:<10} {:<12} {:<12} {:<12}",
                "Model", "Avg Score", "Avg Latency", "Avg Cost", "Total Cost"
            );
            println!("{}", "-".repeat(70));
            for model in &detail.summary.models {
                let Some(summary) = detail.summary.model_summaries.get(model) else {
                    continue;
                };
                let avg = scoring::average_score(&summary.metric_scores, catalog);
                println!(
                    "{:<20} {:<10} {:<12} {:<12} {:<12}",
                    model,
                    format_number(Some(avg), 2),
                    format_metric("avg_latency", summary.avg_latency),
                    format_metric("avg_cost", summary.avg_cost),
                    format_metric("total_cost", summary.total_cost)
                );
            }

            if !detail.summary.metrics.is_empty() {
                println!();
                println!("Per-metric scores:");
                for metric in &detail.summary.metrics {
                    println!("  {}", metric);
                    for model in &detail.summary.models {
                        let score = detail
                            .summary
                            .model_summaries
                            .get(model)
                            .and_then(|s| s.metric_scores.get(metric).copied())
                            .flatten();
                        println!("    {:<20} {}", model, format_number(score, 2));
                    }
                }
            }

            if !detail.results.is_empty() {
                println!();
                println!("{} task results available (use --output json for the full set)", detail.results.len());
            }
        }
    }
}

/// Print the model catalog
pub fn print_models(list: &ModelList, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(list),
        OutputFormat::Plain => {
            if list.models.is_empty() {
                println!("No models available.");
                return;
            }

            println!("{:<20} {:<35} {:<10}", "ID", "Name", "Type");
            println!("{}", "-".repeat(65));
            for model in &list.models {
                println!(
                    "{:<20} {:<35} {:<10}",
                    model.id,
                    model.name,
                    model.model_type.as_deref().unwrap_or("-")
                );
            }
        }
    }
}

/// Print the metrics catalog
pub fn print_metrics(catalog: &MetricsCatalog, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(catalog),
        OutputFormat::Plain => {
            if catalog.metrics.is_empty() {
                println!("No metrics available.");
                return;
            }

            let mut ids: Vec<_> = catalog.metrics.keys().collect();
            ids.sort();

            println!("{:<20} {:<20} {}", "ID", "Name", "Description");
            println!("{}", "-".repeat(90));
            for id in ids {
                let definition = &catalog.metrics[id];
                println!(
                    "{:<20} {:<20} {}",
                    id, definition.name, definition.description
                );
            }
        }
    }
}

/// Print the dataset catalog
pub fn print_datasets(list: &DatasetList, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(list),
        OutputFormat::Plain => {
            if list.datasets.is_empty() {
                println!("No datasets available.");
                return;
            }

            println!("{:<25} {:<30} {:<8} {}", "ID", "Name", "Tasks", "Path");
            println!("{}", "-".repeat(95));
            for dataset in &list.datasets {
                println!(
                    "{:<25} {:<30} {:<8} {}",
                    dataset.id, dataset.name, dataset.task_count, dataset.path
                );
            }
        }
    }
}

/// Print the acknowledgement of a submitted evaluation
pub fn print_outcome(outcome: &EvaluationOutcome, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(outcome),
        OutputFormat::Plain => {
            println!("Experiment: {}", outcome.experiment_name);
            println!("Run: {}", outcome.run_id);
            println!("Status: {}", outcome.status);
            if !outcome.message.is_empty() {
                println!("Message: {}", outcome.message);
            }
        }
    }
}

/// Print one ad-hoc generation result with formatted metric values
pub fn print_generation(response: &ModelResponse, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(response),
        OutputFormat::Plain => {
            if let Some(model_id) = &response.model_id {
                println!("Model: {}", model_id);
            }
            println!("Response:");
            println!("{}", response.response);

            if !response.metrics.is_empty() {
                println!();
                println!("Metrics:");
                let mut names: Vec<_> = response.metrics.keys().collect();
                names.sort();
                for name in names {
                    println!(
                        "  {:<25} {}",
                        name,
                        format_metric(name, response.metrics[name])
                    );
                }
            }
        }
    }
}

/// Print any payload as pretty JSON
fn print_json<T: Serialize>(payload: &T) {
    match serde_json::to_string_pretty(payload) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing output to JSON: {}", e),
    }
}
