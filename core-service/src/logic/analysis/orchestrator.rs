//! Fallback Orchestrator
//!
//! One remote attempt, then the local engine. Nothing here returns `Err`
//! for a classifier failure: every entry point degrades to a local or demo
//! result, and only bad input is surfaced.

use std::path::Path;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use super::local::{self, LocalAnalysis};
use super::types::{
    AnalysisError, AnalysisOutcome, AnalysisReport, ContactReceipt, MetricsReport, ResultSource,
    ShapReport, ShapSource,
};
use crate::constants;
use crate::logic::explain::{demo_analysis, normalize, ExplanationSource, LiveShapResponse};
use crate::logic::remote::{
    AnalysisResult, AnalyzeProfile, ClassifierApi, ContactForm, EnsembleMetrics, RemoteError,
};

/// Metrics shown when the classifier cannot be reached
pub const DEMO_METRICS: EnsembleMetrics = EnsembleMetrics {
    accuracy: 0.9412,
    precision: 0.9286,
    recall: 0.9524,
    f1_score: 0.9404,
};

const REQUIRED_EXTENSION: &str = "csv";

/// Uploaded file, read and fingerprinted
#[derive(Debug, Clone)]
struct LoadedFile {
    file_name: String,
    bytes: Vec<u8>,
    sha256: String,
}

/// Sequences classifier calls with their local fallbacks
pub struct Analyzer<C: ClassifierApi> {
    client: C,
    offline: bool,
}

impl<C: ClassifierApi> Analyzer<C> {
    /// Offline mode follows `EPOCHGUARD_OFFLINE`
    pub fn new(client: C) -> Self {
        Self {
            client,
            offline: constants::is_offline(),
        }
    }

    /// Skip the classifier entirely
    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    // ========================================================================
    // ANALYZE
    // ========================================================================

    /// Analyze an uploaded CSV
    pub async fn run_analysis(&self, path: &Path) -> AnalysisOutcome {
        let mut rng = StdRng::from_entropy();
        self.run_analysis_with_rng(path, &mut rng).await
    }

    /// `run_analysis` with an injected RNG for the local engine
    pub async fn run_analysis_with_rng<R: Rng + ?Sized>(
        &self,
        path: &Path,
        rng: &mut R,
    ) -> AnalysisOutcome {
        let file = match load_file(path).await {
            Ok(file) => file,
            Err(e) => {
                log::error!("Analysis rejected: {}", e);
                return AnalysisOutcome::Error(e);
            }
        };

        log::info!("Analyzing {} ({} bytes)", file.file_name, file.bytes.len());

        let reason = match self.request_remote(&file, AnalyzeProfile::Dashboard).await {
            Ok(result) => {
                log::info!("Classifier analyzed {}", file.file_name);
                return AnalysisOutcome::Success(build_report(&file, ResultSource::Remote, result));
            }
            Err(e) => e,
        };

        log::warn!("Classifier failed ({}), using local engine for {}", reason, file.file_name);

        match run_local(&file, rng) {
            Ok(local) => AnalysisOutcome::Fallback {
                report: build_report(&file, ResultSource::LocalFallback, local.result),
                reason,
            },
            Err(e) => {
                log::error!("Local analysis failed: {}", e);
                AnalysisOutcome::Error(e)
            }
        }
    }

    async fn request_remote(
        &self,
        file: &LoadedFile,
        profile: AnalyzeProfile,
    ) -> Result<AnalysisResult, RemoteError> {
        if self.offline {
            return Err(RemoteError::Network("offline mode".to_string()));
        }

        let result = self.client
            .analyze(&file.file_name, file.bytes.clone(), profile)
            .await?;

        if result.data.predictions.len() != result.data.probabilities.len() {
            return Err(RemoteError::Parse(format!(
                "{} predictions but {} probabilities",
                result.data.predictions.len(),
                result.data.probabilities.len()
            )));
        }

        Ok(result)
    }

    // ========================================================================
    // SHAP
    // ========================================================================

    /// Explanation for the SHAP view
    ///
    /// With a file: live analysis, then the local engine on that file.
    /// Without one, or when the file is unusable: stored analysis, then demo.
    pub async fn run_shap_analysis(&self, path: Option<&Path>) -> ShapReport {
        let mut rng = StdRng::from_entropy();
        self.run_shap_analysis_with_rng(path, &mut rng).await
    }

    pub async fn run_shap_analysis_with_rng<R: Rng + ?Sized>(
        &self,
        path: Option<&Path>,
        rng: &mut R,
    ) -> ShapReport {
        let Some(path) = path else {
            return self.stored_explanation().await;
        };

        let file = match load_file(path).await {
            Ok(file) => file,
            Err(e) => {
                log::warn!("SHAP upload rejected ({}), showing stored analysis", e);
                return self.stored_explanation().await;
            }
        };

        match self.request_remote(&file, AnalyzeProfile::ShapView).await {
            Ok(AnalysisResult { data, .. }) => match data.live_shap_analysis {
                Some(analysis) => {
                    log::info!("Live SHAP analysis for {}", file.file_name);
                    return ShapReport {
                        model: normalize(ExplanationSource::Live(LiveShapResponse {
                            analysis,
                            data_info: data.data_info,
                        })),
                        source: ShapSource::Live,
                        file_name: Some(file.file_name),
                    };
                }
                None => log::warn!("Classifier response has no live SHAP block"),
            },
            Err(e) => log::warn!("Live SHAP analysis failed ({})", e),
        }

        match run_local(&file, rng) {
            Ok(local) => ShapReport {
                model: normalize(ExplanationSource::LocalFile(local.shap_input)),
                source: ShapSource::LocalFile,
                file_name: Some(file.file_name),
            },
            Err(e) => {
                log::warn!("Local SHAP analysis failed ({}), showing stored analysis", e);
                self.stored_explanation().await
            }
        }
    }

    async fn stored_explanation(&self) -> ShapReport {
        if !self.offline {
            match self.client.stored_shap().await {
                Ok(stored) => {
                    return ShapReport {
                        model: normalize(ExplanationSource::Demo(stored)),
                        source: ShapSource::Stored,
                        file_name: None,
                    };
                }
                Err(e) => log::warn!("Stored SHAP analysis unavailable ({}), using demo data", e),
            }
        }

        ShapReport {
            model: normalize(ExplanationSource::Demo(demo_analysis())),
            source: ShapSource::Demo,
            file_name: None,
        }
    }

    // ========================================================================
    // METRICS / CONTACT
    // ========================================================================

    /// Hybrid ensemble metrics, demo values on any failure
    pub async fn load_metrics(&self) -> MetricsReport {
        if !self.offline {
            match self.client.metrics().await {
                Ok(metrics) => {
                    return MetricsReport {
                        metrics: *metrics.ensemble(),
                        is_demo: false,
                    };
                }
                Err(e) => log::warn!("Metrics unavailable ({}), using demo values", e),
            }
        }

        MetricsReport {
            metrics: DEMO_METRICS,
            is_demo: true,
        }
    }

    /// Submit the contact form
    ///
    /// An invalid form is rejected. A delivery failure is not: the user
    /// still gets a receipt, with `delivered: false`.
    pub async fn submit_contact(&self, form: &ContactForm) -> Result<ContactReceipt, ValidationErrors> {
        form.validate()?;

        if self.offline {
            return Ok(ContactReceipt { delivered: false });
        }

        match self.client.contact(form).await {
            Ok(()) => Ok(ContactReceipt { delivered: true }),
            Err(e) => {
                log::warn!("Contact delivery failed ({}), reporting success", e);
                Ok(ContactReceipt { delivered: false })
            }
        }
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Validate the extension, then read and fingerprint the file
async fn load_file(path: &Path) -> Result<LoadedFile, AnalysisError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    if !has_csv_extension(path) {
        return Err(AnalysisError::InvalidFileType(file_name));
    }

    let bytes = tokio::fs::read(path).await.map_err(|e| AnalysisError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let sha256 = hex::encode(hasher.finalize());

    Ok(LoadedFile { file_name, bytes, sha256 })
}

/// Case-insensitive `.csv` check
pub fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(REQUIRED_EXTENSION))
        .unwrap_or(false)
}

fn run_local<R: Rng + ?Sized>(file: &LoadedFile, rng: &mut R) -> Result<LocalAnalysis, AnalysisError> {
    let text = local::decode(&file.file_name, &file.bytes)?;
    local::analyze_text(&file.file_name, &text, rng)
}

fn build_report(file: &LoadedFile, source: ResultSource, result: AnalysisResult) -> AnalysisReport {
    AnalysisReport {
        id: Uuid::new_v4(),
        file_name: file.file_name.clone(),
        file_sha256: file.sha256.clone(),
        file_size_bytes: file.bytes.len() as u64,
        source,
        generated_at: Utc::now(),
        result,
    }
}
