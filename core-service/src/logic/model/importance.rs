//! Feature Importance Synthesizer
//!
//! Fixed ranking of PoS node features used when the classifier's own
//! importances are unavailable.

use serde::{Deserialize, Serialize};

use super::rules::round_to;

/// Base ranking (feature, importance), already sorted descending
pub const BASE_FEATURES: [(&str, f64); 7] = [
    ("downtime_percent", 0.0967),
    ("node_latency", 0.0918),
    ("stake_distribution_rate", 0.0868),
    ("coin_age", 0.0818),
    ("stake_reward", 0.0694),
    ("stake_amount", 0.0620),
    ("block_generation_rate", 0.0587),
];

/// File-name marker that triggers the rank-1/rank-2 boost
pub const IMBALANCED_MARKER: &str = "imbalanced";

/// Boost applied to rank 1 and rank 2 for imbalanced datasets
pub const IMBALANCED_BOOST: [f64; 2] = [0.01, 0.008];

/// One ranked feature (`data.feature_importance[]` on the wire)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
    pub rank: usize,
}

/// Build the 7-entry ranking for a file
///
/// NOTE: the imbalanced boost does not re-sort. Ranks stay as in the base
/// table even if a larger boost would overtake rank 3.
pub fn synthesize(file_name: &str) -> Vec<FeatureImportance> {
    let boosted = file_name.contains(IMBALANCED_MARKER);

    BASE_FEATURES
        .iter()
        .enumerate()
        .map(|(i, &(feature, importance))| {
            let boost = if boosted {
                IMBALANCED_BOOST.get(i).copied().unwrap_or(0.0)
            } else {
                0.0
            };

            FeatureImportance {
                feature: feature.to_string(),
                importance: round_to(importance + boost, 4),
                rank: i + 1,
            }
        })
        .collect()
}
