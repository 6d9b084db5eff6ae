//! Dataset Module - Uploaded CSV handling
//!
//! Turns the uploaded telemetry file into rows and decides how many
//! nodes are benign vs malicious when the classifier is not reachable.
//!
//! ## Structure
//! - `csv`: Line/comma splitting into `RawRow`s (best-effort, never rejects ragged rows)
//! - `labels`: Dataset Label Resolver (known file → label column → size tier)

pub mod csv;
pub mod labels;

#[cfg(test)]
mod tests;

pub use csv::{parse, ParsedCsv, RawRow};
pub use labels::{resolve, LabelCounts, LabelSource};
