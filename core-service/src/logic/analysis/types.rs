//! Analysis Types
//!
//! Outcome tags returned by the orchestrator. KHÔNG chứa logic - chỉ data structures.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::explain::ExplanationModel;
use crate::logic::remote::{AnalysisResult, EnsembleMetrics, RemoteError};

// ============================================================================
// ERRORS
// ============================================================================

/// Failures surfaced to the user
///
/// `Remote` never leaves the orchestrator as an outcome; it is carried as
/// the reason of a `Fallback`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Invalid file type: {0} (expected a .csv file)")]
    InvalidFileType(String),

    #[error("Cannot read {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("No usable rows in {0}")]
    EmptyDataset(String),

    #[error("Classifier unavailable: {0}")]
    Remote(#[from] RemoteError),
}

// ============================================================================
// ANALYSIS REPORT
// ============================================================================

/// Where the result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultSource {
    Remote,
    LocalFallback,
}

impl ResultSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultSource::Remote => "Remote",
            ResultSource::LocalFallback => "Demo",
        }
    }
}

/// Analysis result plus provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub file_name: String,
    pub file_sha256: String,
    pub file_size_bytes: u64,
    pub source: ResultSource,
    pub generated_at: DateTime<Utc>,
    pub result: AnalysisResult,
}

/// Tagged outcome of `run_analysis`; the caller switches on the tag
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    Success(AnalysisReport),
    Fallback {
        report: AnalysisReport,
        reason: RemoteError,
    },
    Error(AnalysisError),
}

impl AnalysisOutcome {
    /// Report for either non-error variant
    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            AnalysisOutcome::Success(report) => Some(report),
            AnalysisOutcome::Fallback { report, .. } => Some(report),
            AnalysisOutcome::Error(_) => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, AnalysisOutcome::Fallback { .. })
    }
}

// ============================================================================
// SHAP REPORT
// ============================================================================

/// Which source produced the displayed explanation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapSource {
    Live,
    LocalFile,
    Stored,
    Demo,
}

impl ShapSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapSource::Live => "Live analysis",
            ShapSource::LocalFile => "Local analysis",
            ShapSource::Stored => "Stored analysis",
            ShapSource::Demo => "Demo data",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShapReport {
    pub model: ExplanationModel,
    pub source: ShapSource,
    /// Uploaded file, when the explanation covers one
    pub file_name: Option<String>,
}

// ============================================================================
// METRICS / CONTACT
// ============================================================================

/// Hybrid ensemble metrics and whether they are the demo values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsReport {
    pub metrics: EnsembleMetrics,
    pub is_demo: bool,
}

/// Result of a contact submission as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactReceipt {
    /// Whether the classifier accepted the message
    pub delivered: bool,
}
