//! Logic Module - Analysis Engines
//!
//! Chứa các engines xử lý: Dataset, Model, Explain, Remote, Analysis, Export.
//!
//! ## Data flow
//! - `dataset/` - CSV rows + label resolver
//! - `model/` - Synthetic outcomes, statistics, feature ranking
//! - `explain/` - SHAP explanation normalizer
//! - `remote/` - Classifier HTTP client
//! - `analysis/` - Fallback orchestrator
//! - `export` - Results CSV / SHAP JSON downloads

pub mod dataset;
pub mod model;
pub mod explain;
pub mod remote;
pub mod analysis;
pub mod export;
