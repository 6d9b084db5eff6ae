//! Classifier Wire Types
//!
//! Request/response shapes of the remote classifier. The local fallback
//! produces the same `AnalysisResult` so the display layer never branches
//! on where a result came from.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::logic::explain::{DataInfo, LiveShapAnalysis, StoredShapAnalysis};
use crate::logic::model::{FeatureImportance, Prediction, Statistics};

// ============================================================================
// ANALYZE
// ============================================================================

/// `POST /analyze` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub data: AnalysisData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisData {
    pub predictions: Vec<Prediction>,
    pub probabilities: Vec<f64>,
    pub statistics: Statistics,
    #[serde(default)]
    pub feature_importance: Vec<FeatureImportance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_shap_analysis: Option<LiveShapAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_info: Option<DataInfo>,
}

impl AnalysisData {
    /// (index, prediction, probability) per node, in response order
    pub fn nodes(&self) -> impl Iterator<Item = (usize, Prediction, f64)> + '_ {
        self.predictions
            .iter()
            .zip(self.probabilities.iter())
            .enumerate()
            .map(|(i, (&p, &prob))| (i, p, prob))
    }
}

/// Which page issued the analyze call; selects the timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzeProfile {
    /// Main dashboard upload
    Dashboard,
    /// Upload from the SHAP view
    ShapView,
}

// ============================================================================
// METRICS
// ============================================================================

/// `GET /metrics` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub model_performance: ModelPerformance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPerformance {
    pub hybrid_ensemble: EnsembleMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

impl EnsembleMetrics {
    /// Every value is a fraction in [0, 1]
    pub fn is_valid(&self) -> bool {
        [self.accuracy, self.precision, self.recall, self.f1_score]
            .iter()
            .all(|v| (0.0..=1.0).contains(v))
    }
}

impl ModelMetrics {
    pub fn ensemble(&self) -> &EnsembleMetrics {
        &self.model_performance.hybrid_ensemble
    }
}

// ============================================================================
// STORED SHAP
// ============================================================================

/// `GET /shap-analysis` response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct StoredShapEnvelope {
    pub data: StoredShapAnalysis,
}

// ============================================================================
// CONTACT
// ============================================================================

/// `POST /contact` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email is not valid"))]
    pub email: String,
    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
}
