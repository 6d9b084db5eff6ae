//! Dataset Label Resolver
//!
//! Decides benign/malicious counts for a file without a classifier.
//! Precedence: known sample dataset → explicit label column → size tier.

use serde::{Deserialize, Serialize};

use super::csv::RawRow;

// ============================================================================
// RULE TABLES
// ============================================================================

/// Sample datasets shipped with the demo (file name, benign, malicious)
pub const KNOWN_DATASETS: [(&str, usize, usize); 5] = [
    ("dataset_balanced_100_100.csv", 100, 100),
    ("dataset_balanced_250_250.csv", 250, 250),
    ("dataset_imbalanced_180_20.csv", 180, 20),
    ("dataset_imbalanced_450_50.csv", 450, 50),
    ("dataset_attack_heavy_30_170.csv", 30, 170),
];

/// Header names recognised as ground-truth labels, checked in order
pub const LABEL_COLUMNS: [&str; 3] = ["Node Label", "label", "class"];

/// Value marking a malicious row in a label column
pub const MALICIOUS_LABEL: &str = "1";

/// Size tiers: (max rows inclusive, malicious share in percent)
const SIZE_TIERS: [(usize, usize); 2] = [(50, 25), (200, 35)];

/// Share for files above the last tier
const LARGE_FILE_SHARE: usize = 40;

// ============================================================================
// TYPES
// ============================================================================

/// Benign/malicious split for one file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    pub benign: usize,
    pub malicious: usize,
}

impl LabelCounts {
    pub fn new(benign: usize, malicious: usize) -> Self {
        Self { benign, malicious }
    }

    pub fn total(&self) -> usize {
        self.benign + self.malicious
    }
}

/// Which rule produced the counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelSource {
    KnownDataset,
    LabelColumn(String),
    SizeTier { percent: usize },
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Resolve label counts for a file
pub fn resolve(file_name: &str, rows: &[RawRow], headers: &[String]) -> LabelCounts {
    resolve_with_source(file_name, rows, headers).0
}

/// Resolve label counts and report which rule applied
pub fn resolve_with_source(
    file_name: &str,
    rows: &[RawRow],
    headers: &[String],
) -> (LabelCounts, LabelSource) {
    if let Some(counts) = known_dataset(file_name) {
        return (counts, LabelSource::KnownDataset);
    }

    if let Some(column) = label_column(headers) {
        let malicious = rows
            .iter()
            .filter(|row| row.get(column).map(str::trim) == Some(MALICIOUS_LABEL))
            .count();
        let counts = LabelCounts::new(rows.len() - malicious, malicious);
        return (counts, LabelSource::LabelColumn(column.to_string()));
    }

    let total = rows.len();
    let percent = size_tier_percent(total);
    // Integer floor of total * share
    let malicious = total * percent / 100;

    (
        LabelCounts::new(total - malicious, malicious),
        LabelSource::SizeTier { percent },
    )
}

/// Hard-coded counts for a recognised sample file
pub fn known_dataset(file_name: &str) -> Option<LabelCounts> {
    KNOWN_DATASETS
        .iter()
        .find(|(name, _, _)| *name == file_name)
        .map(|&(_, benign, malicious)| LabelCounts::new(benign, malicious))
}

fn label_column(headers: &[String]) -> Option<&'static str> {
    LABEL_COLUMNS
        .iter()
        .copied()
        .find(|candidate| headers.iter().any(|h| h == candidate))
}

fn size_tier_percent(total: usize) -> usize {
    SIZE_TIERS
        .iter()
        .find(|(max_rows, _)| total <= *max_rows)
        .map(|&(_, percent)| percent)
        .unwrap_or(LARGE_FILE_SHARE)
}
