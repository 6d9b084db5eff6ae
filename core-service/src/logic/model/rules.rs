//! Local Engine Rules & Thresholds
//!
//! Constants shared by the outcome generator, the aggregator and the
//! results export. KHÔNG chứa logic - chỉ constants.

use serde::{Deserialize, Serialize};

// ============================================================================
// PROBABILITY RANGES (half-open)
// ============================================================================

/// Malicious outcomes draw their probability from [0.65, 1.0)
pub const MALICIOUS_PROBABILITY_MIN: f64 = 0.65;
pub const MALICIOUS_PROBABILITY_MAX: f64 = 1.0;

/// Benign outcomes draw their probability from [0.05, 0.5)
pub const BENIGN_PROBABILITY_MIN: f64 = 0.05;
pub const BENIGN_PROBABILITY_MAX: f64 = 0.5;

// ============================================================================
// RISK THRESHOLDS (exclusive)
// ============================================================================

/// Above this probability a node is high risk
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;

/// Below this probability a node is low risk (statistics);
/// at or below it the export buckets it as Low
pub const LOW_RISK_THRESHOLD: f64 = 0.3;

// ============================================================================
// ROUNDING
// ============================================================================

pub const PERCENTAGE_DECIMALS: i32 = 2;
pub const AVERAGE_DECIMALS: i32 = 4;

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Export bucket for one node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn from_probability(probability: f64) -> Self {
        if probability > HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else if probability > LOW_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
