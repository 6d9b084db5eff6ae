//! Local Fallback Engine
//!
//! Runs the resolver → generator → aggregator → synthesizer pipeline over an
//! uploaded file and packs the output into the classifier's response shape.

use rand::Rng;

use super::types::AnalysisError;
use crate::logic::dataset::{self, labels};
use crate::logic::explain::{local_to_live, LocalShapInput};
use crate::logic::model::{aggregate, generate, synthesize};
use crate::logic::remote::{AnalysisData, AnalysisResult};

/// Rows kept for sample-explanation feature values
const SAMPLE_ROWS: usize = crate::logic::explain::engine::LOCAL_SAMPLE_COUNT;

pub const FALLBACK_STATUS: &str = "success";
pub const FALLBACK_MESSAGE: &str = "Demo analysis (classifier unavailable)";

/// Local analysis of one file
#[derive(Debug, Clone)]
pub struct LocalAnalysis {
    pub result: AnalysisResult,
    /// Same outcomes and ranking, ready for the explanation normalizer
    pub shap_input: LocalShapInput,
}

/// Decode uploaded bytes as UTF-8 text
pub fn decode(file_name: &str, bytes: &[u8]) -> Result<String, AnalysisError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| AnalysisError::Unreadable {
        path: file_name.into(),
        reason: format!("not valid UTF-8: {}", e),
    })
}

/// Analyze file text without the classifier
pub fn analyze_text<R: Rng + ?Sized>(
    file_name: &str,
    text: &str,
    rng: &mut R,
) -> Result<LocalAnalysis, AnalysisError> {
    let parsed = dataset::parse(text);
    if parsed.headers.is_empty() || parsed.is_empty() {
        return Err(AnalysisError::EmptyDataset(file_name.to_string()));
    }

    let (counts, rule) = labels::resolve_with_source(file_name, &parsed.rows, &parsed.headers);
    log::info!(
        "Local engine: {} rows, {} benign / {} malicious ({:?})",
        parsed.len(), counts.benign, counts.malicious, rule
    );

    let outcomes = generate(counts, rng);
    let statistics = aggregate(&outcomes);
    let feature_importance = synthesize(file_name);

    let shap_input = LocalShapInput {
        outcomes,
        feature_importance,
        sample_rows: parsed.rows.into_iter().take(SAMPLE_ROWS).collect(),
    };
    let live = local_to_live(&shap_input);

    let result = AnalysisResult {
        status: FALLBACK_STATUS.to_string(),
        message: FALLBACK_MESSAGE.to_string(),
        data: AnalysisData {
            predictions: shap_input.outcomes.iter().map(|o| o.prediction).collect(),
            probabilities: shap_input.outcomes.iter().map(|o| o.probability).collect(),
            statistics,
            feature_importance: shap_input.feature_importance.clone(),
            live_shap_analysis: Some(live.analysis),
            data_info: live.data_info,
        },
    };

    Ok(LocalAnalysis { result, shap_input })
}
