//! Remote Module - Classifier Service Communication
//!
//! This module handles:
//! - File upload to `/analyze` (dashboard and SHAP-view timeouts)
//! - Model metrics from `/metrics`
//! - Stored SHAP analysis from `/shap-analysis`
//! - Contact form delivery to `/contact`

pub mod client;
pub mod types;

pub use client::{ClassifierApi, ClassifierClient, ClientConfig, RemoteError};
pub use types::{
    AnalysisData, AnalysisResult, AnalyzeProfile, ContactForm, EnsembleMetrics, ModelMetrics,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::Prediction;
    use serde_json::json;
    use validator::Validate;

    #[test]
    fn test_analysis_result_from_wire() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "status": "success",
            "message": "Analysis complete",
            "data": {
                "predictions": [1, 0],
                "probabilities": [0.91, 0.12],
                "statistics": {
                    "total_samples": 2, "benign_nodes": 1, "malicious_nodes": 1,
                    "benign_percentage": 50.0, "malicious_percentage": 50.0,
                    "average_risk_score": 0.515, "high_risk_nodes": 1, "low_risk_nodes": 1
                },
                "feature_importance": [ { "feature": "coin_age", "importance": 0.1, "rank": 1 } ],
                "data_info": { "required_features": ["coin_age"] }
            }
        }))
        .unwrap();

        assert_eq!(result.data.predictions, vec![Prediction::Malicious, Prediction::Benign]);
        assert!(result.data.live_shap_analysis.is_none());
        assert_eq!(result.data.nodes().nth(1), Some((1, Prediction::Benign, 0.12)));
    }

    #[test]
    fn test_prediction_outside_binary_rejected() {
        let result = serde_json::from_value::<AnalysisResult>(json!({
            "status": "success",
            "data": {
                "predictions": [2],
                "probabilities": [0.5],
                "statistics": {
                    "total_samples": 1, "benign_nodes": 0, "malicious_nodes": 1,
                    "benign_percentage": 0.0, "malicious_percentage": 100.0,
                    "average_risk_score": 0.5, "high_risk_nodes": 0, "low_risk_nodes": 0
                }
            }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_metrics_range_check() {
        let mut metrics = EnsembleMetrics {
            accuracy: 0.9412,
            precision: 0.9286,
            recall: 0.9524,
            f1_score: 0.9404,
        };
        assert!(metrics.is_valid());

        metrics.recall = 94.0;
        assert!(!metrics.is_valid());
    }

    #[test]
    fn test_contact_form_validation() {
        let form = ContactForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Hello".into(),
        };
        assert!(form.validate().is_ok());

        let bad_email = ContactForm { email: "not-an-email".into(), ..form.clone() };
        assert!(bad_email.validate().is_err());

        let empty = ContactForm { name: String::new(), message: String::new(), ..form };
        let errors = empty.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("message"));
    }
}
