use std::collections::BTreeMap;

use super::sources::{
    DataInfo, ExplanationSource, LiveFeatureContribution, LiveHybridFeature, LiveHybridShap,
    LiveSampleExplanation, LiveShapAnalysis, LiveShapResponse, LocalShapInput, ShapMetadata,
    StoredSampleExplanation, StoredShapAnalysis,
};
use super::types::{
    AnalysisMetadata, ExplanationModel, FeatureContribution, HybridMetadata, HybridModelShap,
    HybridShapFeature, HybridStatistics, Impact, SampleExplanation, ShapFeature,
};
use crate::logic::model::rules::round_to;
use crate::logic::model::Prediction;

/// Methods reported in `analysis_metadata.shap_methods`
pub const SHAP_METHODS: [&str; 3] = ["TreeExplainer", "Live Analysis", "Hybrid Weighting"];

/// Reported when the hybrid ranking is empty
pub const DEFAULT_TOP_FEATURE: &str = "downtime_percent";

/// Hybrid ranking length
pub const HYBRID_TOP_N: usize = 5;

/// Sample explanations synthesized for a local analysis
pub const LOCAL_SAMPLE_COUNT: usize = 4;

/// Contributing features per local sample explanation
pub const LOCAL_CONTRIBUTING_FEATURES: usize = 3;

/// Map any source shape into the canonical model
pub fn normalize(source: ExplanationSource) -> ExplanationModel {
    match source {
        ExplanationSource::Live(response) => from_live(response),
        ExplanationSource::Demo(stored) => from_stored(stored),
        ExplanationSource::LocalFile(input) => from_local(&input),
    }
}

/// Direction label for a contribution
///
/// The sign decides. A zero contribution falls back to the source's own
/// label, then to `Decreases`.
pub fn resolve_impact(shap_value: f64, label: Option<&str>) -> Impact {
    let labelled = label.and_then(Impact::parse_label);

    let impact = if shap_value > 0.0 {
        Impact::Increases
    } else if shap_value < 0.0 {
        Impact::Decreases
    } else {
        labelled.unwrap_or(Impact::Decreases)
    };

    if let Some(labelled) = labelled {
        if labelled != impact {
            log::debug!(
                "Impact label {:?} disagrees with shap value {}, using {}",
                label, shap_value, impact
            );
        }
    }

    impact
}

// ============================================================================
// LIVE
// ============================================================================

fn from_live(response: LiveShapResponse) -> ExplanationModel {
    let LiveShapResponse { analysis, data_info } = response;
    let weights = analysis.hybrid_model_shap.hybrid_analysis_metadata;

    let individual_model_shap: Vec<ShapFeature> = analysis
        .individual_model_shap
        .iter()
        .map(|f| ShapFeature {
            feature: f.feature.clone(),
            importance: f.importance,
            mean_abs_shap_value: f.importance,
            rank: f.rank,
        })
        .collect();

    // Split derived from the given weights, passed through as-is
    let top_5_hybrid_features: Vec<HybridShapFeature> = analysis
        .hybrid_model_shap
        .top_5_hybrid_features
        .iter()
        .map(|f| HybridShapFeature {
            rank: f.rank,
            feature: f.feature.clone(),
            hybrid_shap_value: f.hybrid_shap_value,
            dt_contribution: f.hybrid_shap_value * weights.dt_weight,
            rf_contribution: f.hybrid_shap_value * weights.rf_weight,
        })
        .collect();

    let hybrid_statistics = hybrid_statistics(&individual_model_shap, &top_5_hybrid_features);

    let sample_explanations = analysis
        .sample_explanations
        .into_iter()
        .map(from_live_sample)
        .collect();

    let feature_names = data_info
        .map(|info| info.required_features)
        .filter(|names| !names.is_empty())
        .unwrap_or_else(|| individual_model_shap.iter().map(|f| f.feature.clone()).collect());

    let total_features_analyzed = analysis
        .shap_metadata
        .map(|m| m.features_analyzed)
        .unwrap_or(individual_model_shap.len());

    ExplanationModel {
        individual_model_shap,
        hybrid_model_shap: HybridModelShap {
            top_5_hybrid_features,
            hybrid_analysis_metadata: weights,
            hybrid_statistics,
        },
        sample_explanations,
        analysis_metadata: AnalysisMetadata {
            total_features_analyzed,
            feature_names,
            shap_methods: shap_methods(),
        },
    }
}

fn from_live_sample(sample: LiveSampleExplanation) -> SampleExplanation {
    let feature_contributions: BTreeMap<String, FeatureContribution> = sample
        .top_contributing_features
        .into_iter()
        .map(|c| {
            let impact = resolve_impact(c.shap_value, c.impact_direction.as_deref());
            (
                c.feature,
                FeatureContribution {
                    shap_value: c.shap_value,
                    feature_value: c.feature_value,
                    impact,
                },
            )
        })
        .collect();

    SampleExplanation {
        sample_id: sample.sample_id,
        // The live service does not echo ground truth
        actual_label: sample.predicted_class,
        predicted_probability: sample.predicted_probability,
        prediction: class_label(sample.predicted_class).to_string(),
        feature_contributions,
    }
}

// ============================================================================
// STORED / DEMO
// ============================================================================

fn from_stored(stored: StoredShapAnalysis) -> ExplanationModel {
    let individual_model_shap = stored
        .individual_model_shap
        .into_iter()
        .map(|mut f| {
            if f.mean_abs_shap_value == 0.0 {
                f.mean_abs_shap_value = f.importance;
            }
            f
        })
        .collect();

    let sample_explanations = stored
        .sample_explanations
        .into_iter()
        .map(from_stored_sample)
        .collect();

    ExplanationModel {
        individual_model_shap,
        hybrid_model_shap: stored.hybrid_model_shap,
        sample_explanations,
        analysis_metadata: stored.analysis_metadata,
    }
}

fn from_stored_sample(sample: StoredSampleExplanation) -> SampleExplanation {
    let feature_contributions = sample
        .feature_contributions
        .into_iter()
        .map(|(feature, c)| {
            let impact = resolve_impact(c.shap_value, Some(c.impact.as_str()));
            (
                feature,
                FeatureContribution {
                    shap_value: c.shap_value,
                    feature_value: c.feature_value,
                    impact,
                },
            )
        })
        .collect();

    SampleExplanation {
        sample_id: sample.sample_id,
        actual_label: sample.actual_label,
        predicted_probability: sample.predicted_probability,
        prediction: sample.prediction,
        feature_contributions,
    }
}

// ============================================================================
// LOCAL FILE
// ============================================================================

fn from_local(input: &LocalShapInput) -> ExplanationModel {
    from_live(local_to_live(input))
}

/// Reshape local engine output into a live response
///
/// Importances stand in for SHAP values; the hybrid weights are the
/// defaults of the published ensemble.
pub fn local_to_live(input: &LocalShapInput) -> LiveShapResponse {
    let top_5_hybrid_features = input
        .feature_importance
        .iter()
        .take(HYBRID_TOP_N)
        .map(|f| LiveHybridFeature {
            rank: f.rank,
            feature: f.feature.clone(),
            hybrid_shap_value: f.importance,
        })
        .collect();

    let sample_explanations = input
        .outcomes
        .iter()
        .take(LOCAL_SAMPLE_COUNT)
        .enumerate()
        .map(|(i, outcome)| {
            let direction = if outcome.prediction.is_malicious() { 1.0 } else { -1.0 };

            let top_contributing_features = input
                .feature_importance
                .iter()
                .take(LOCAL_CONTRIBUTING_FEATURES)
                .map(|f| LiveFeatureContribution {
                    feature: f.feature.clone(),
                    shap_value: round_to(direction * f.importance * (0.5 + outcome.probability), 4),
                    feature_value: input
                        .sample_rows
                        .get(i)
                        .and_then(|row| row.get_f64(&f.feature))
                        .unwrap_or(0.0),
                    impact_direction: None,
                })
                .collect();

            LiveSampleExplanation {
                sample_id: i,
                predicted_class: outcome.prediction.as_u8(),
                predicted_probability: round_to(outcome.probability, 4),
                top_contributing_features,
            }
        })
        .collect();

    let required_features = input
        .feature_importance
        .iter()
        .map(|f| f.feature.clone())
        .collect();

    LiveShapResponse {
        analysis: LiveShapAnalysis {
            individual_model_shap: input.feature_importance.clone(),
            hybrid_model_shap: LiveHybridShap {
                top_5_hybrid_features,
                hybrid_analysis_metadata: HybridMetadata::default(),
            },
            sample_explanations,
            shap_metadata: Some(ShapMetadata {
                features_analyzed: input.feature_importance.len(),
            }),
        },
        data_info: Some(DataInfo { required_features }),
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn hybrid_statistics(individual: &[ShapFeature], hybrid: &[HybridShapFeature]) -> HybridStatistics {
    let most_important_feature = hybrid
        .first()
        .map(|f| f.feature.clone())
        .unwrap_or_else(|| DEFAULT_TOP_FEATURE.to_string());

    let total: f64 = individual.iter().map(|f| f.importance).sum();
    let top: f64 = hybrid.iter().take(HYBRID_TOP_N).map(|f| f.hybrid_shap_value).sum();

    let top_5_cumulative_percentage = if total > 0.0 {
        round_to(top / total * 100.0, 1)
    } else {
        0.0
    };

    HybridStatistics {
        most_important_feature,
        top_5_cumulative_percentage,
    }
}

fn class_label(predicted_class: u8) -> &'static str {
    match Prediction::try_from(predicted_class) {
        Ok(p) => p.label(),
        Err(_) => Prediction::Benign.label(),
    }
}

fn shap_methods() -> Vec<String> {
    SHAP_METHODS.iter().map(|m| m.to_string()).collect()
}
