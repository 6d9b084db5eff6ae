//! Statistics Aggregator
//!
//! Reduces per-node outcomes into the dashboard summary. Pure and
//! order-independent; an empty input yields all zeros, never NaN.

use serde::{Deserialize, Serialize};

use super::outcome::Outcome;
use super::rules::{
    round_to, AVERAGE_DECIMALS, HIGH_RISK_THRESHOLD, LOW_RISK_THRESHOLD, PERCENTAGE_DECIMALS,
};

/// Summary metrics (`data.statistics` on the wire)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_samples: usize,
    pub benign_nodes: usize,
    pub malicious_nodes: usize,
    pub benign_percentage: f64,
    pub malicious_percentage: f64,
    pub average_risk_score: f64,
    pub high_risk_nodes: usize,
    pub low_risk_nodes: usize,
}

/// Aggregate outcomes into statistics
pub fn aggregate(outcomes: &[Outcome]) -> Statistics {
    let total = outcomes.len();

    let malicious = outcomes
        .iter()
        .filter(|o| o.prediction.is_malicious())
        .count();
    let benign = total - malicious;

    let high_risk = outcomes
        .iter()
        .filter(|o| o.probability > HIGH_RISK_THRESHOLD)
        .count();
    let low_risk = outcomes
        .iter()
        .filter(|o| o.probability < LOW_RISK_THRESHOLD)
        .count();

    if total == 0 {
        return Statistics::default();
    }

    // Summed in sorted order so the result is bit-identical under any permutation
    let mut probabilities: Vec<f64> = outcomes.iter().map(|o| o.probability).collect();
    probabilities.sort_by(|a, b| a.total_cmp(b));
    let probability_sum: f64 = probabilities.iter().sum();

    Statistics {
        total_samples: total,
        benign_nodes: benign,
        malicious_nodes: malicious,
        benign_percentage: percentage(benign, total),
        malicious_percentage: percentage(malicious, total),
        average_risk_score: round_to(probability_sum / total as f64, AVERAGE_DECIMALS),
        high_risk_nodes: high_risk,
        low_risk_nodes: low_risk,
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    round_to(count as f64 / total as f64 * 100.0, PERCENTAGE_DECIMALS)
}
