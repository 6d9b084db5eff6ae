//! Explanation Types
//!
//! Canonical explanation model consumed by the display layer and written by
//! the SHAP export. KHÔNG chứa logic - chỉ data structures.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// IMPACT
// ============================================================================

/// Direction a feature pushes the malicious probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    Increases,
    Decreases,
}

impl Impact {
    /// Parse a free-form direction label ("increase", "Positive", "↑", ...)
    pub fn parse_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        if label.starts_with("increas") || label == "positive" || label == "up" || label == "↑" {
            Some(Impact::Increases)
        } else if label.starts_with("decreas") || label == "negative" || label == "down" || label == "↓" {
            Some(Impact::Decreases)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Increases => "Increases",
            Impact::Decreases => "Decreases",
        }
    }
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// INDIVIDUAL MODEL
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapFeature {
    pub feature: String,
    pub importance: f64,
    #[serde(default)]
    pub mean_abs_shap_value: f64,
    pub rank: usize,
}

// ============================================================================
// HYBRID MODEL
// ============================================================================

/// One hybrid feature with its per-base-model split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridShapFeature {
    pub rank: usize,
    pub feature: String,
    pub hybrid_shap_value: f64,
    pub dt_contribution: f64,
    pub rf_contribution: f64,
}

/// Base-model weights as reported by the source (not required to sum to 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridMetadata {
    pub dt_weight: f64,
    pub rf_weight: f64,
    #[serde(default)]
    pub dt_accuracy: f64,
    #[serde(default)]
    pub rf_accuracy: f64,
}

impl Default for HybridMetadata {
    fn default() -> Self {
        Self {
            dt_weight: 0.4,
            rf_weight: 0.6,
            dt_accuracy: 0.85,
            rf_accuracy: 0.92,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridStatistics {
    pub most_important_feature: String,
    pub top_5_cumulative_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridModelShap {
    pub top_5_hybrid_features: Vec<HybridShapFeature>,
    pub hybrid_analysis_metadata: HybridMetadata,
    pub hybrid_statistics: HybridStatistics,
}

// ============================================================================
// SAMPLE EXPLANATIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub shap_value: f64,
    pub feature_value: f64,
    pub impact: Impact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleExplanation {
    pub sample_id: usize,
    pub actual_label: u8,
    pub predicted_probability: f64,
    /// "Malicious" or "Benign"
    pub prediction: String,
    pub feature_contributions: BTreeMap<String, FeatureContribution>,
}

// ============================================================================
// MODEL
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub total_features_analyzed: usize,
    pub feature_names: Vec<String>,
    pub shap_methods: Vec<String>,
}

/// Canonical explanation model, one per analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationModel {
    pub individual_model_shap: Vec<ShapFeature>,
    pub hybrid_model_shap: HybridModelShap,
    pub sample_explanations: Vec<SampleExplanation>,
    pub analysis_metadata: AnalysisMetadata,
}
