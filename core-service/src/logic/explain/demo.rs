//! Demo Explanation Fixture
//!
//! Authored explanation shown when neither the classifier nor a stored
//! analysis is reachable.

use std::collections::BTreeMap;

use super::engine::SHAP_METHODS;
use super::sources::{StoredContribution, StoredSampleExplanation, StoredShapAnalysis};
use super::types::{
    AnalysisMetadata, HybridMetadata, HybridModelShap, HybridShapFeature, HybridStatistics,
    ShapFeature,
};
use crate::logic::model::importance::BASE_FEATURES;

/// (feature, hybrid value, dt contribution, rf contribution)
const DEMO_HYBRID: [(&str, f64, f64, f64); 5] = [
    ("downtime_percent", 0.0967, 0.0387, 0.0580),
    ("node_latency", 0.0918, 0.0367, 0.0551),
    ("stake_distribution_rate", 0.0868, 0.0347, 0.0521),
    ("coin_age", 0.0818, 0.0327, 0.0491),
    ("stake_reward", 0.0694, 0.0278, 0.0416),
];

/// Authored, not computed
const DEMO_TOP_5_CUMULATIVE: f64 = 85.2;

/// (feature, shap value, feature value, impact) per demo sample
type DemoContribution = (&'static str, f64, f64, &'static str);

const MALICIOUS_SAMPLE: [DemoContribution; 3] = [
    ("downtime_percent", 0.23, 85.2, "Increases"),
    ("node_latency", 0.18, 120.5, "Increases"),
    ("stake_distribution_rate", -0.12, 15.3, "Decreases"),
];

const BENIGN_SAMPLE: [DemoContribution; 3] = [
    ("downtime_percent", -0.05, 5.1, "Decreases"),
    ("node_latency", -0.03, 25.4, "Decreases"),
    ("stake_distribution_rate", 0.02, 78.9, "Increases"),
];

/// Build the demo explanation in its stored shape
pub fn demo_analysis() -> StoredShapAnalysis {
    let individual_model_shap = BASE_FEATURES
        .iter()
        .enumerate()
        .map(|(i, &(feature, importance))| ShapFeature {
            feature: feature.to_string(),
            importance,
            mean_abs_shap_value: importance,
            rank: i + 1,
        })
        .collect();

    let top_5_hybrid_features = DEMO_HYBRID
        .iter()
        .enumerate()
        .map(|(i, &(feature, hybrid, dt, rf))| HybridShapFeature {
            rank: i + 1,
            feature: feature.to_string(),
            hybrid_shap_value: hybrid,
            dt_contribution: dt,
            rf_contribution: rf,
        })
        .collect();

    StoredShapAnalysis {
        individual_model_shap,
        hybrid_model_shap: HybridModelShap {
            top_5_hybrid_features,
            hybrid_analysis_metadata: HybridMetadata::default(),
            hybrid_statistics: HybridStatistics {
                most_important_feature: DEMO_HYBRID[0].0.to_string(),
                top_5_cumulative_percentage: DEMO_TOP_5_CUMULATIVE,
            },
        },
        sample_explanations: vec![
            demo_sample(0, 1, 0.87, "Malicious", &MALICIOUS_SAMPLE),
            demo_sample(1, 0, 0.15, "Benign", &BENIGN_SAMPLE),
        ],
        analysis_metadata: AnalysisMetadata {
            total_features_analyzed: BASE_FEATURES.len(),
            feature_names: BASE_FEATURES.iter().map(|(f, _)| f.to_string()).collect(),
            shap_methods: SHAP_METHODS.iter().map(|m| m.to_string()).collect(),
        },
    }
}

fn demo_sample(
    sample_id: usize,
    actual_label: u8,
    predicted_probability: f64,
    prediction: &str,
    contributions: &[DemoContribution],
) -> StoredSampleExplanation {
    let feature_contributions: BTreeMap<String, StoredContribution> = contributions
        .iter()
        .map(|&(feature, shap_value, feature_value, impact)| {
            (
                feature.to_string(),
                StoredContribution {
                    shap_value,
                    feature_value,
                    impact: impact.to_string(),
                },
            )
        })
        .collect();

    StoredSampleExplanation {
        sample_id,
        actual_label,
        predicted_probability,
        prediction: prediction.to_string(),
        feature_contributions,
    }
}
