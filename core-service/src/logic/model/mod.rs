//! Model Module - Local Analysis Engine
//!
//! Stand-in for the remote classifier: synthesizes outcomes, reduces them
//! to statistics and supplies a feature ranking. Every function here is
//! pure (the RNG is passed in).

pub mod rules;
pub mod outcome;
pub mod statistics;
pub mod importance;


// Re-export common types
pub use outcome::{generate, Outcome, Prediction};
pub use statistics::{aggregate, Statistics};
pub use importance::{synthesize, FeatureImportance};
pub use rules::RiskLevel;
