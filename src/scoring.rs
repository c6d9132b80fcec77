use crate::models::{MetricScores, MetricsCatalog};

/// The metric the backend scores inverted when the catalog carries no
/// polarity flag. Lower hallucination is better.
const INVERTED_FALLBACK_METRIC: &str = "hallucination";

/// Whether a higher or lower raw score indicates better quality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

/// Resolve the polarity of a metric from the catalog
///
/// The catalog's `higher_is_better` flag wins when present. Catalogs that
/// predate the flag fall back to the one known inverted metric.
pub fn polarity_for(metric_id: &str, catalog: &MetricsCatalog) -> Polarity {
    if let Some(definition) = catalog.metrics.get(metric_id) {
        match definition.higher_is_better {
            Some(true) => return Polarity::HigherIsBetter,
            Some(false) => return Polarity::LowerIsBetter,
            None => {}
        }
    }

    if metric_id == INVERTED_FALLBACK_METRIC {
        Polarity::LowerIsBetter
    } else {
        Polarity::HigherIsBetter
    }
}

/// Reduce a per-metric score map to one headline number
///
/// Missing and non-finite scores are skipped entirely: they count toward
/// neither numerator nor denominator. Lower-is-better metrics are included
/// as `1 - score` so every metric contributes on the same scale. Returns
/// `0.0` when nothing survives filtering; never fails.
pub fn average_score(scores: &MetricScores, catalog: &MetricsCatalog) -> f64 {
    let mut included = Vec::new();

    for (metric_id, score) in scores {
        let score = match score {
            Some(score) if score.is_finite() => *score,
            _ => continue,
        };

        match polarity_for(metric_id, catalog) {
            Polarity::HigherIsBetter => included.push(score),
            Polarity::LowerIsBetter => included.push(1.0 - score),
        }
    }

    if included.is_empty() {
        return 0.0;
    }

    included.iter().sum::<f64>() / included.len() as f64
}
