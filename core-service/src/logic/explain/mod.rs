//! Explain Module - SHAP Explanation Normalizer
//!
//! Maps the live classifier response, the stored/demo analysis and the
//! local fallback output into one `ExplanationModel`.
//!
//! ## Usage
//! ```ignore
//! use crate::logic::explain::{normalize, ExplanationSource};
//!
//! let model = normalize(ExplanationSource::Demo(demo_analysis()));
//! println!("{}", model.hybrid_model_shap.hybrid_statistics.most_important_feature);
//! ```

pub mod types;
pub mod sources;
pub mod engine;
pub mod demo;

#[cfg(test)]
mod tests;

pub use types::{ExplanationModel, FeatureContribution, Impact, SampleExplanation};
pub use sources::{
    DataInfo, ExplanationSource, LiveShapAnalysis, LiveShapResponse, LocalShapInput,
    StoredShapAnalysis,
};
pub use engine::{local_to_live, normalize, resolve_impact};
pub use demo::demo_analysis;
