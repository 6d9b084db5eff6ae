//! Normalizer tests for the three source shapes.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

use super::demo::demo_analysis;
use super::engine::{local_to_live, normalize, resolve_impact, LOCAL_SAMPLE_COUNT};
use super::sources::{
    DataInfo, ExplanationSource, LiveShapAnalysis, LiveShapResponse, LocalShapInput,
    StoredShapAnalysis,
};
use super::types::Impact;
use crate::logic::dataset::{self, LabelCounts};
use crate::logic::model::{generate, synthesize};

fn live_fixture(dt_weight: f64, rf_weight: f64) -> LiveShapAnalysis {
    serde_json::from_value(json!({
        "individual_model_shap": [
            { "feature": "node_latency", "importance": 0.3, "rank": 1 },
            { "feature": "coin_age", "importance": 0.2, "rank": 2 }
        ],
        "hybrid_model_shap": {
            "top_5_hybrid_features": [
                { "rank": 1, "feature": "node_latency", "hybrid_shap_value": 0.25 },
                { "rank": 2, "feature": "coin_age", "hybrid_shap_value": 0.15 }
            ],
            "hybrid_analysis_metadata": { "dt_weight": dt_weight, "rf_weight": rf_weight }
        },
        "sample_explanations": [
            {
                "sample_id": 3,
                "predicted_class": 1,
                "predicted_probability": 0.91,
                "top_contributing_features": [
                    { "feature": "node_latency", "shap_value": 0.4, "feature_value": 140.0, "impact_direction": "increases risk" },
                    { "feature": "coin_age", "shap_value": -0.1, "feature_value": 12.0 }
                ]
            }
        ],
        "shap_metadata": { "features_analyzed": 9 }
    }))
    .unwrap()
}

#[test]
fn test_live_split_uses_given_weights() {
    let model = normalize(ExplanationSource::Live(LiveShapResponse {
        analysis: live_fixture(0.4, 0.6),
        data_info: None,
    }));

    let top = &model.hybrid_model_shap.top_5_hybrid_features[0];
    assert!((top.dt_contribution - 0.1).abs() < 1e-12);
    assert!((top.rf_contribution - 0.15).abs() < 1e-12);
}

#[test]
fn test_live_weights_pass_through_unnormalized() {
    // Weights that do not sum to 1 are kept as given
    let model = normalize(ExplanationSource::Live(LiveShapResponse {
        analysis: live_fixture(0.5, 0.7),
        data_info: None,
    }));

    let meta = &model.hybrid_model_shap.hybrid_analysis_metadata;
    assert_eq!(meta.dt_weight, 0.5);
    assert_eq!(meta.rf_weight, 0.7);

    let second = &model.hybrid_model_shap.top_5_hybrid_features[1];
    assert!((second.dt_contribution - 0.075).abs() < 1e-12);
    assert!((second.rf_contribution - 0.105).abs() < 1e-12);
}

#[test]
fn test_live_samples_become_feature_map() {
    let model = normalize(ExplanationSource::Live(LiveShapResponse {
        analysis: live_fixture(0.4, 0.6),
        data_info: Some(DataInfo {
            required_features: vec!["node_latency".into(), "coin_age".into(), "stake_amount".into()],
        }),
    }));

    let sample = &model.sample_explanations[0];
    assert_eq!(sample.sample_id, 3);
    assert_eq!(sample.actual_label, 1);
    assert_eq!(sample.prediction, "Malicious");

    let latency = &sample.feature_contributions["node_latency"];
    assert_eq!(latency.feature_value, 140.0);
    assert_eq!(latency.impact, Impact::Increases);
    assert_eq!(sample.feature_contributions["coin_age"].impact, Impact::Decreases);

    assert_eq!(model.analysis_metadata.total_features_analyzed, 9);
    assert_eq!(model.analysis_metadata.feature_names.len(), 3);
    assert_eq!(model.analysis_metadata.shap_methods.len(), 3);
}

#[test]
fn test_live_hybrid_statistics() {
    let model = normalize(ExplanationSource::Live(LiveShapResponse {
        analysis: live_fixture(0.4, 0.6),
        data_info: None,
    }));

    let stats = &model.hybrid_model_shap.hybrid_statistics;
    assert_eq!(stats.most_important_feature, "node_latency");
    // (0.25 + 0.15) / (0.3 + 0.2) = 80%
    assert_eq!(stats.top_5_cumulative_percentage, 80.0);
    // Without data_info, feature names come from the individual ranking
    assert_eq!(model.analysis_metadata.feature_names, vec!["node_latency", "coin_age"]);
}

#[test]
fn test_live_empty_hybrid_defaults() {
    let mut analysis = live_fixture(0.4, 0.6);
    analysis.hybrid_model_shap.top_5_hybrid_features.clear();
    analysis.individual_model_shap.clear();

    let model = normalize(ExplanationSource::Live(LiveShapResponse { analysis, data_info: None }));
    let stats = &model.hybrid_model_shap.hybrid_statistics;
    assert_eq!(stats.most_important_feature, "downtime_percent");
    assert_eq!(stats.top_5_cumulative_percentage, 0.0);
}

#[test]
fn test_impact_sign_wins() {
    assert_eq!(resolve_impact(0.2, None), Impact::Increases);
    assert_eq!(resolve_impact(-0.2, None), Impact::Decreases);
    assert_eq!(resolve_impact(0.2, Some("Decreases")), Impact::Increases);
    assert_eq!(resolve_impact(-0.2, Some("positive")), Impact::Decreases);
}

#[test]
fn test_impact_zero_uses_label() {
    assert_eq!(resolve_impact(0.0, Some("INCREASES")), Impact::Increases);
    assert_eq!(resolve_impact(0.0, Some("gibberish")), Impact::Decreases);
    assert_eq!(resolve_impact(0.0, None), Impact::Decreases);
}

#[test]
fn test_demo_passes_split_through() {
    let model = normalize(ExplanationSource::Demo(demo_analysis()));

    assert_eq!(model.individual_model_shap.len(), 7);
    let top = &model.hybrid_model_shap.top_5_hybrid_features;
    assert_eq!(top.len(), 5);
    assert_eq!(top[0].dt_contribution, 0.0387);
    assert_eq!(top[0].rf_contribution, 0.0580);
    assert_eq!(model.hybrid_model_shap.hybrid_statistics.top_5_cumulative_percentage, 85.2);

    assert_eq!(model.sample_explanations.len(), 2);
    let benign = &model.sample_explanations[1];
    assert_eq!(benign.prediction, "Benign");
    assert_eq!(benign.feature_contributions["stake_distribution_rate"].impact, Impact::Increases);
}

#[test]
fn test_stored_payload_deserializes_and_fills_mean_abs() {
    let stored: StoredShapAnalysis = serde_json::from_value(json!({
        "individual_model_shap": [ { "feature": "coin_age", "importance": 0.08, "rank": 1 } ],
        "hybrid_model_shap": {
            "top_5_hybrid_features": [
                { "rank": 1, "feature": "coin_age", "hybrid_shap_value": 0.08, "dt_contribution": 0.03, "rf_contribution": 0.05 }
            ],
            "hybrid_analysis_metadata": { "dt_weight": 0.4, "rf_weight": 0.6, "dt_accuracy": 0.8, "rf_accuracy": 0.9 },
            "hybrid_statistics": { "most_important_feature": "coin_age", "top_5_cumulative_percentage": 100.0 }
        },
        "sample_explanations": [
            {
                "sample_id": 0, "actual_label": 0, "predicted_probability": 0.2, "prediction": "Benign",
                "feature_contributions": { "coin_age": { "shap_value": -0.01, "feature_value": 3.0, "impact": "Decreases" } }
            }
        ],
        "analysis_metadata": { "total_features_analyzed": 1, "feature_names": ["coin_age"], "shap_methods": ["TreeExplainer"] }
    }))
    .unwrap();

    let model = normalize(ExplanationSource::Demo(stored));
    assert_eq!(model.individual_model_shap[0].mean_abs_shap_value, 0.08);
    assert_eq!(model.hybrid_model_shap.hybrid_analysis_metadata.dt_accuracy, 0.8);
    assert_eq!(model.sample_explanations[0].feature_contributions["coin_age"].impact, Impact::Decreases);
}

fn local_input(file_name: &str, csv: &str, counts: LabelCounts) -> LocalShapInput {
    let parsed = dataset::parse(csv);
    LocalShapInput {
        outcomes: generate(counts, &mut StdRng::seed_from_u64(11)),
        feature_importance: synthesize(file_name),
        sample_rows: parsed.rows,
    }
}

#[test]
fn test_local_reshapes_into_live() {
    let csv = "downtime_percent,node_latency\n12.5,80\n3.0,20\n";
    let input = local_input("upload.csv", csv, LabelCounts::new(6, 4));

    let live = local_to_live(&input);
    assert_eq!(live.analysis.individual_model_shap.len(), 7);
    assert_eq!(live.analysis.hybrid_model_shap.top_5_hybrid_features.len(), 5);
    assert_eq!(live.analysis.sample_explanations.len(), LOCAL_SAMPLE_COUNT);
    assert_eq!(live.data_info.as_ref().map(|d| d.required_features.len()), Some(7));

    // Feature values come from the leading rows when present
    let first = &live.analysis.sample_explanations[0].top_contributing_features;
    assert_eq!(first[0].feature, "downtime_percent");
    assert_eq!(first[0].feature_value, 12.5);
    let third = &live.analysis.sample_explanations[2].top_contributing_features;
    assert_eq!(third[0].feature_value, 0.0);
}

#[test]
fn test_local_normalizes_with_default_weights() {
    let input = local_input("upload.csv", "a\n1\n", LabelCounts::new(1, 1));
    let model = normalize(ExplanationSource::LocalFile(input.clone()));

    let meta = &model.hybrid_model_shap.hybrid_analysis_metadata;
    assert_eq!(meta.dt_weight, 0.4);
    assert_eq!(meta.rf_weight, 0.6);

    let top = &model.hybrid_model_shap.top_5_hybrid_features[0];
    assert!((top.dt_contribution - 0.0967 * 0.4).abs() < 1e-12);

    // Fewer outcomes than the sample cap
    assert_eq!(model.sample_explanations.len(), 2);

    for (sample, outcome) in model.sample_explanations.iter().zip(input.outcomes.iter()) {
        assert_eq!(sample.prediction, outcome.prediction.label());
        let expected = if outcome.prediction.is_malicious() {
            Impact::Increases
        } else {
            Impact::Decreases
        };
        assert!(sample.feature_contributions.values().all(|c| c.impact == expected));
    }
}

#[test]
fn test_model_serializes_for_export() {
    let model = normalize(ExplanationSource::Demo(demo_analysis()));
    let value = serde_json::to_value(&model).unwrap();

    assert!(value["hybrid_model_shap"]["top_5_hybrid_features"].is_array());
    assert_eq!(
        value["sample_explanations"][0]["feature_contributions"]["node_latency"]["impact"],
        "Increases"
    );
}
