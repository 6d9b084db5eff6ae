//! Explanation Sources
//!
//! The three shapes an explanation can arrive in. The live and stored
//! shapes mirror the classifier's JSON; the local shape carries the
//! fallback engine's output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::{AnalysisMetadata, HybridMetadata, HybridModelShap, ShapFeature};
use crate::logic::dataset::RawRow;
use crate::logic::model::{FeatureImportance, Outcome};

/// Input to the normalizer, one variant per source shape
#[derive(Debug, Clone)]
pub enum ExplanationSource {
    /// `/analyze` response (`data.live_shap_analysis` + `data.data_info`)
    Live(LiveShapResponse),
    /// Authored fixture or stored `/shap-analysis` payload
    Demo(StoredShapAnalysis),
    /// Local fallback engine output for an uploaded file
    LocalFile(LocalShapInput),
}

// ============================================================================
// LIVE SHAPE
// ============================================================================

/// Live SHAP block plus the data info that names the required features
#[derive(Debug, Clone)]
pub struct LiveShapResponse {
    pub analysis: LiveShapAnalysis,
    pub data_info: Option<DataInfo>,
}

/// `data.live_shap_analysis`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveShapAnalysis {
    pub individual_model_shap: Vec<FeatureImportance>,
    pub hybrid_model_shap: LiveHybridShap,
    #[serde(default)]
    pub sample_explanations: Vec<LiveSampleExplanation>,
    #[serde(default)]
    pub shap_metadata: Option<ShapMetadata>,
}

/// Hybrid block without the per-base-model split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveHybridShap {
    pub top_5_hybrid_features: Vec<LiveHybridFeature>,
    pub hybrid_analysis_metadata: HybridMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveHybridFeature {
    pub rank: usize,
    pub feature: String,
    pub hybrid_shap_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveSampleExplanation {
    pub sample_id: usize,
    pub predicted_class: u8,
    pub predicted_probability: f64,
    #[serde(default)]
    pub top_contributing_features: Vec<LiveFeatureContribution>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveFeatureContribution {
    pub feature: String,
    pub shap_value: f64,
    #[serde(default)]
    pub feature_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_direction: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapMetadata {
    pub features_analyzed: usize,
}

/// `data.data_info`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataInfo {
    #[serde(default)]
    pub required_features: Vec<String>,
}

// ============================================================================
// STORED / DEMO SHAPE
// ============================================================================

/// Split already present; impact labels are free-form strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredShapAnalysis {
    pub individual_model_shap: Vec<ShapFeature>,
    pub hybrid_model_shap: HybridModelShap,
    #[serde(default)]
    pub sample_explanations: Vec<StoredSampleExplanation>,
    pub analysis_metadata: AnalysisMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSampleExplanation {
    pub sample_id: usize,
    pub actual_label: u8,
    pub predicted_probability: f64,
    pub prediction: String,
    pub feature_contributions: BTreeMap<String, StoredContribution>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredContribution {
    pub shap_value: f64,
    #[serde(default)]
    pub feature_value: f64,
    #[serde(default)]
    pub impact: String,
}

// ============================================================================
// LOCAL FILE SHAPE
// ============================================================================

/// Fallback engine output for one file
#[derive(Debug, Clone)]
pub struct LocalShapInput {
    pub outcomes: Vec<Outcome>,
    pub feature_importance: Vec<FeatureImportance>,
    /// Leading rows of the file, used for feature values in sample explanations
    pub sample_rows: Vec<RawRow>,
}
