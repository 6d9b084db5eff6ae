//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To point the engine at another classifier, set `EPOCHGUARD_API_URL`
//! or edit this file.

use std::path::PathBuf;
use std::time::Duration;

/// Default classifier service URL
///
/// This is the fallback URL when no environment variable is set.
/// For development: http://localhost:8000
pub const DEFAULT_API_URL: &str = "https://epochguard-backend.onrender.com";

/// Timeout for the primary `/analyze` call (seconds)
pub const DEFAULT_ANALYZE_TIMEOUT: u64 = 30;

/// Timeout for `/analyze` when issued from the SHAP view (seconds)
pub const DEFAULT_SHAP_ANALYZE_TIMEOUT: u64 = 10;

/// Timeout for `/shap-analysis` (seconds)
pub const DEFAULT_STORED_SHAP_TIMEOUT: u64 = 5;

/// Timeout for `/metrics` and `/contact` (seconds)
pub const DEFAULT_METRICS_TIMEOUT: u64 = 10;

/// Results download file name
pub const RESULTS_FILE_NAME: &str = "epochguard_analysis_results.csv";

/// SHAP export file name prefix (date is appended)
pub const SHAP_EXPORT_PREFIX: &str = "epochguard_shap_analysis";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "EpochGuard";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get classifier URL from environment or use default
pub fn get_api_url() -> String {
    std::env::var("EPOCHGUARD_API_URL")
        .map(|s| s.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Get analyze timeout from environment or use default
pub fn get_analyze_timeout() -> Duration {
    Duration::from_secs(env_secs("EPOCHGUARD_ANALYZE_TIMEOUT_SECS", DEFAULT_ANALYZE_TIMEOUT))
}

/// Get metrics/contact timeout from environment or use default
pub fn get_metrics_timeout() -> Duration {
    Duration::from_secs(env_secs("EPOCHGUARD_METRICS_TIMEOUT_SECS", DEFAULT_METRICS_TIMEOUT))
}

/// Check if the remote classifier should be skipped
pub fn is_offline() -> bool {
    std::env::var("EPOCHGUARD_OFFLINE")
        .map(|s| s.to_lowercase() == "true" || s == "1")
        .unwrap_or(false)
}

/// Directory downloads are written to when none is given
pub fn default_output_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn env_secs(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
