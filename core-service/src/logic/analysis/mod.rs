//! Analysis Module - Fallback Orchestrator
//!
//! Entry points used by the command surface:
//! - `run_analysis`: dashboard upload (remote → local fallback → error)
//! - `run_shap_analysis`: SHAP view (live → local → stored → demo)
//! - `load_metrics`, `submit_contact`

pub mod types;
pub mod local;
pub mod orchestrator;


pub use types::{
    AnalysisError, AnalysisOutcome, AnalysisReport, ContactReceipt, MetricsReport, ResultSource,
    ShapReport, ShapSource,
};
pub use local::{analyze_text, LocalAnalysis};
pub use orchestrator::{has_csv_extension, Analyzer, DEMO_METRICS};
