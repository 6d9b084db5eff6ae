//! Synthetic Outcome Generator
//!
//! Produces one (prediction, probability) pair per node so that the label
//! counts match the resolver exactly, then shuffles so position carries
//! no label information.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rules::{
    BENIGN_PROBABILITY_MAX, BENIGN_PROBABILITY_MIN, MALICIOUS_PROBABILITY_MAX,
    MALICIOUS_PROBABILITY_MIN,
};
use crate::logic::dataset::LabelCounts;

/// Node classification, serialized as 0 / 1 on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Prediction {
    Benign,
    Malicious,
}

impl Prediction {
    pub fn as_u8(&self) -> u8 {
        match self {
            Prediction::Benign => 0,
            Prediction::Malicious => 1,
        }
    }

    /// Display label used by the results export and sample explanations
    pub fn label(&self) -> &'static str {
        match self {
            Prediction::Benign => "Benign",
            Prediction::Malicious => "Malicious",
        }
    }

    pub fn is_malicious(&self) -> bool {
        matches!(self, Prediction::Malicious)
    }
}

impl From<Prediction> for u8 {
    fn from(p: Prediction) -> u8 {
        p.as_u8()
    }
}

impl TryFrom<u8> for Prediction {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Prediction::Benign),
            1 => Ok(Prediction::Malicious),
            other => Err(format!("prediction must be 0 or 1, got {}", other)),
        }
    }
}

impl std::fmt::Display for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One synthetic node result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub prediction: Prediction,
    pub probability: f64,
}

/// Generate shuffled outcomes matching `counts`
///
/// The RNG is injected so tests can pin the sequence; production passes
/// an entropy-seeded `StdRng`.
pub fn generate<R: Rng + ?Sized>(counts: LabelCounts, rng: &mut R) -> Vec<Outcome> {
    let mut outcomes = Vec::with_capacity(counts.total());

    for _ in 0..counts.malicious {
        outcomes.push(Outcome {
            prediction: Prediction::Malicious,
            probability: rng.gen_range(MALICIOUS_PROBABILITY_MIN..MALICIOUS_PROBABILITY_MAX),
        });
    }

    for _ in 0..counts.benign {
        outcomes.push(Outcome {
            prediction: Prediction::Benign,
            probability: rng.gen_range(BENIGN_PROBABILITY_MIN..BENIGN_PROBABILITY_MAX),
        });
    }

    // Fisher-Yates
    outcomes.shuffle(rng);
    outcomes
}
