//! Classifier API Client
//!
//! HTTP client for the remote EpochGuard classifier. One attempt per call,
//! each bounded by its own timeout; a timeout is reported like any other
//! network failure so callers can fall back uniformly.

use std::time::Duration;

use reqwest::multipart::{Form, Part};

use super::types::{
    AnalysisResult, AnalyzeProfile, ContactForm, ModelMetrics, StoredShapEnvelope,
};
use crate::constants;
use crate::logic::explain::StoredShapAnalysis;

/// Classifier connection settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub analyze_timeout: Duration,
    pub shap_analyze_timeout: Duration,
    pub stored_shap_timeout: Duration,
    pub metrics_timeout: Duration,
    pub contact_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: constants::get_api_url(),
            analyze_timeout: constants::get_analyze_timeout(),
            shap_analyze_timeout: Duration::from_secs(constants::DEFAULT_SHAP_ANALYZE_TIMEOUT),
            stored_shap_timeout: Duration::from_secs(constants::DEFAULT_STORED_SHAP_TIMEOUT),
            metrics_timeout: constants::get_metrics_timeout(),
            contact_timeout: constants::get_metrics_timeout(),
        }
    }
}

impl ClientConfig {
    /// Default timeouts against a specific base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    fn analyze_timeout_for(&self, profile: AnalyzeProfile) -> Duration {
        match profile {
            AnalyzeProfile::Dashboard => self.analyze_timeout,
            AnalyzeProfile::ShapView => self.shap_analyze_timeout,
        }
    }
}

/// Classifier client errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RemoteError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request timed out")]
    Timeout,
    #[error("Server error: {0}")]
    Server(u16),
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RemoteError::Timeout
        } else if e.is_decode() {
            RemoteError::Parse(e.to_string())
        } else {
            RemoteError::Network(e.to_string())
        }
    }
}

/// Calls the orchestrator makes against the classifier
///
/// Implemented by `ClassifierClient` for real HTTP and by fakes in tests.
#[allow(async_fn_in_trait)]
pub trait ClassifierApi {
    async fn analyze(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        profile: AnalyzeProfile,
    ) -> Result<AnalysisResult, RemoteError>;

    async fn metrics(&self) -> Result<ModelMetrics, RemoteError>;

    async fn stored_shap(&self) -> Result<StoredShapAnalysis, RemoteError>;

    async fn contact(&self, form: &ContactForm) -> Result<(), RemoteError>;
}

/// reqwest-backed classifier client
pub struct ClassifierClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl ClassifierClient {
    /// Create new classifier client
    pub fn new(config: ClientConfig) -> Result<Self, RemoteError> {
        let http_client = reqwest::Client::builder()
            .user_agent(format!("{}/{}", constants::APP_NAME, constants::APP_VERSION))
            .build()
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        Ok(Self { config, http_client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }
}

impl ClassifierApi for ClassifierClient {
    async fn analyze(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        profile: AnalyzeProfile,
    ) -> Result<AnalysisResult, RemoteError> {
        let url = self.url("analyze");
        let timeout = self.config.analyze_timeout_for(profile);

        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("text/csv")
            .map_err(|e| RemoteError::Network(e.to_string()))?;
        let form = Form::new().part("file", part);

        log::info!("Uploading {} to {} (timeout {:?})", file_name, url, timeout);

        let response = self.http_client
            .post(&url)
            .multipart(form)
            .timeout(timeout)
            .send()
            .await?;

        if response.status().is_success() {
            response.json().await
                .map_err(|e| RemoteError::Parse(e.to_string()))
        } else {
            Err(RemoteError::Server(response.status().as_u16()))
        }
    }

    async fn metrics(&self) -> Result<ModelMetrics, RemoteError> {
        let response = self.http_client
            .get(self.url("metrics"))
            .timeout(self.config.metrics_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RemoteError::Server(response.status().as_u16()));
        }

        let metrics: ModelMetrics = response.json().await
            .map_err(|e| RemoteError::Parse(e.to_string()))?;

        if metrics.ensemble().is_valid() {
            Ok(metrics)
        } else {
            Err(RemoteError::Parse("metric outside [0, 1]".to_string()))
        }
    }

    async fn stored_shap(&self) -> Result<StoredShapAnalysis, RemoteError> {
        let response = self.http_client
            .get(self.url("shap-analysis"))
            .timeout(self.config.stored_shap_timeout)
            .send()
            .await?;

        if response.status().is_success() {
            let envelope: StoredShapEnvelope = response.json().await
                .map_err(|e| RemoteError::Parse(e.to_string()))?;
            Ok(envelope.data)
        } else {
            Err(RemoteError::Server(response.status().as_u16()))
        }
    }

    async fn contact(&self, form: &ContactForm) -> Result<(), RemoteError> {
        let response = self.http_client
            .post(self.url("contact"))
            .json(form)
            .timeout(self.config.contact_timeout)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(RemoteError::Server(response.status().as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_url_trims_slash() {
        let config = ClientConfig::with_base_url("http://localhost:8000/");
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.shap_analyze_timeout, Duration::from_secs(10));
        assert_eq!(config.stored_shap_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_profile_selects_timeout() {
        let config = ClientConfig {
            analyze_timeout: Duration::from_secs(30),
            shap_analyze_timeout: Duration::from_secs(10),
            ..ClientConfig::with_base_url("http://localhost")
        };
        assert_eq!(config.analyze_timeout_for(AnalyzeProfile::Dashboard), Duration::from_secs(30));
        assert_eq!(config.analyze_timeout_for(AnalyzeProfile::ShapView), Duration::from_secs(10));
    }

    #[test]
    fn test_url_join() {
        let client = ClassifierClient::new(ClientConfig::with_base_url("http://localhost:8000")).unwrap();
        assert_eq!(client.url("analyze"), "http://localhost:8000/analyze");
    }
}
