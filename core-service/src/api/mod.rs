//! API Module
//!
//! View models consumed by the command-line surface.
//!
//! Usage:
//! - `api::commands::dashboard_view(&report)` - Dashboard cards
//! - `api::shap_overview(&shap_report)` - Re-exported at module root

pub mod commands;

// Re-export current version as default
pub use commands::*;
