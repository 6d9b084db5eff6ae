//! Result Exporter
//!
//! The two downloads: per-node results as CSV and the explanation model as
//! pretty JSON.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::constants::{RESULTS_FILE_NAME, SHAP_EXPORT_PREFIX};
use crate::logic::explain::ExplanationModel;
use crate::logic::model::RiskLevel;
use crate::logic::remote::AnalysisResult;

pub const RESULTS_HEADER: &str = "Node_Index,Prediction,Risk_Probability,Risk_Level";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot serialize explanation: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// RESULTS CSV
// ============================================================================

/// Render per-node results (1-based index, 4-decimal probability)
pub fn results_csv(result: &AnalysisResult) -> String {
    let mut lines = Vec::with_capacity(result.data.predictions.len() + 1);
    lines.push(RESULTS_HEADER.to_string());

    for (i, prediction, probability) in result.data.nodes() {
        lines.push(format!(
            "{},{},{:.4},{}",
            i + 1,
            prediction.label(),
            probability,
            RiskLevel::from_probability(probability)
        ));
    }

    lines.join("\n")
}

/// Write the results CSV into `dir`, returning the file path
pub fn write_results_csv(result: &AnalysisResult, dir: &Path) -> Result<PathBuf, ExportError> {
    let path = dir.join(RESULTS_FILE_NAME);
    write(&path, results_csv(result).as_bytes())?;
    log::info!("Results exported to {}", path.display());
    Ok(path)
}

// ============================================================================
// SHAP JSON
// ============================================================================

pub fn shap_file_name(date: NaiveDate) -> String {
    format!("{}_{}.json", SHAP_EXPORT_PREFIX, date.format("%Y-%m-%d"))
}

pub fn shap_json(model: &ExplanationModel) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(model)?)
}

/// Write the explanation model into `dir` under a dated file name
pub fn write_shap_json(
    model: &ExplanationModel,
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(shap_file_name(date));
    write(&path, shap_json(model)?.as_bytes())?;
    log::info!("SHAP analysis exported to {}", path.display());
    Ok(path)
}

fn write(path: &Path, contents: &[u8]) -> Result<(), ExportError> {
    std::fs::write(path, contents).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// TESTS
// ============================================================================
