//! Display Commands - View models cho CLI
//!
//! Turns orchestrator output into the cards the dashboard shows. No I/O here;
//! `main.rs` prints these (text or JSON).

use serde::{Deserialize, Serialize};

use crate::logic::analysis::{AnalysisReport, ContactReceipt, MetricsReport, ShapReport};
use crate::logic::model::rules::round_to;
use crate::logic::model::FeatureImportance;

/// Risk factors shown under the dashboard cards
pub const TOP_RISK_FACTORS: usize = 5;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Dashboard cards for one analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    pub analysis_id: String,
    pub file_name: String,
    pub file_size: String,
    /// "Remote" or "Demo"
    pub source: String,
    pub total_nodes: usize,
    pub benign_nodes: usize,
    pub malicious_nodes: usize,
    pub benign_percentage: f64,
    pub malicious_percentage: f64,
    pub average_risk_score: f64,
    pub high_risk_nodes: usize,
    pub low_risk_nodes: usize,
    pub risk_factors: Vec<RiskFactorView>,
}

/// One ranked feature with its bar width relative to rank 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactorView {
    pub rank: usize,
    pub name: String,
    pub importance_percent: f64,
    pub bar_width_percent: f64,
}

/// Model performance card (percentages, one decimal)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsView {
    pub accuracy_percent: f64,
    pub precision_percent: f64,
    pub recall_percent: f64,
    pub f1_score_percent: f64,
    pub is_demo: bool,
}

/// Hybrid feature bar (DT / RF split)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridBarView {
    pub rank: usize,
    pub name: String,
    pub hybrid_value: f64,
    pub dt_contribution: f64,
    pub rf_contribution: f64,
    pub bar_width_percent: f64,
}

/// SHAP page summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapOverview {
    pub source: String,
    pub file_name: Option<String>,
    pub most_important_feature: String,
    pub top_5_cumulative_percentage: f64,
    pub features_analyzed: usize,
    pub dt_weight_percent: f64,
    pub rf_weight_percent: f64,
    pub dt_accuracy_percent: f64,
    pub rf_accuracy_percent: f64,
    pub hybrid_features: Vec<HybridBarView>,
    pub sample_count: usize,
}

// ============================================================================
// BUILDERS
// ============================================================================

pub fn dashboard_view(report: &AnalysisReport) -> DashboardView {
    let stats = &report.result.data.statistics;

    DashboardView {
        analysis_id: report.id.to_string(),
        file_name: report.file_name.clone(),
        file_size: format_file_size(report.file_size_bytes),
        source: report.source.as_str().to_string(),
        total_nodes: stats.total_samples,
        benign_nodes: stats.benign_nodes,
        malicious_nodes: stats.malicious_nodes,
        benign_percentage: stats.benign_percentage,
        malicious_percentage: stats.malicious_percentage,
        average_risk_score: stats.average_risk_score,
        high_risk_nodes: stats.high_risk_nodes,
        low_risk_nodes: stats.low_risk_nodes,
        risk_factors: risk_factors(&report.result.data.feature_importance),
    }
}

/// Top features, bar widths relative to the first one
pub fn risk_factors(features: &[FeatureImportance]) -> Vec<RiskFactorView> {
    let top = features.first().map(|f| f.importance).unwrap_or(0.0);

    features
        .iter()
        .take(TOP_RISK_FACTORS)
        .map(|f| RiskFactorView {
            rank: f.rank,
            name: format_feature_name(&f.feature),
            importance_percent: round_to(f.importance * 100.0, 1),
            bar_width_percent: relative_width(f.importance, top),
        })
        .collect()
}

pub fn metrics_view(report: &MetricsReport) -> MetricsView {
    let m = &report.metrics;
    MetricsView {
        accuracy_percent: as_percent(m.accuracy, 1),
        precision_percent: as_percent(m.precision, 1),
        recall_percent: as_percent(m.recall, 1),
        f1_score_percent: as_percent(m.f1_score, 1),
        is_demo: report.is_demo,
    }
}

pub fn shap_overview(report: &ShapReport) -> ShapOverview {
    let hybrid = &report.model.hybrid_model_shap;
    let meta = &hybrid.hybrid_analysis_metadata;
    let max_value = hybrid
        .top_5_hybrid_features
        .iter()
        .map(|f| f.hybrid_shap_value)
        .fold(0.0_f64, f64::max);

    let hybrid_features = hybrid
        .top_5_hybrid_features
        .iter()
        .map(|f| HybridBarView {
            rank: f.rank,
            name: format_feature_name(&f.feature),
            hybrid_value: round_to(f.hybrid_shap_value, 4),
            dt_contribution: round_to(f.dt_contribution, 4),
            rf_contribution: round_to(f.rf_contribution, 4),
            bar_width_percent: relative_width(f.hybrid_shap_value, max_value),
        })
        .collect();

    ShapOverview {
        source: report.source.as_str().to_string(),
        file_name: report.file_name.clone(),
        most_important_feature: format_feature_name(&hybrid.hybrid_statistics.most_important_feature),
        top_5_cumulative_percentage: hybrid.hybrid_statistics.top_5_cumulative_percentage,
        features_analyzed: report.model.analysis_metadata.total_features_analyzed,
        dt_weight_percent: as_percent(meta.dt_weight, 0),
        rf_weight_percent: as_percent(meta.rf_weight, 0),
        dt_accuracy_percent: as_percent(meta.dt_accuracy, 1),
        rf_accuracy_percent: as_percent(meta.rf_accuracy, 1),
        hybrid_features,
        sample_count: report.model.sample_explanations.len(),
    }
}

/// Message shown after a contact submission
///
/// Identical whether or not the classifier accepted it.
pub fn contact_message(receipt: &ContactReceipt) -> &'static str {
    if !receipt.delivered {
        log::debug!("Contact message was not delivered");
    }
    "Message sent successfully! We'll get back to you soon."
}

// ============================================================================
// FORMATTING
// ============================================================================

/// `downtime_percent` → `Downtime Percent`
pub fn format_feature_name(name: &str) -> String {
    name.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Bytes as KB with one decimal
pub fn format_file_size(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

fn as_percent(fraction: f64, decimals: i32) -> f64 {
    round_to(fraction * 100.0, decimals)
}

fn relative_width(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        round_to(value / max * 100.0, 1)
    } else {
        0.0
    }
}

// ============================================================================
// TESTS
// ============================================================================
