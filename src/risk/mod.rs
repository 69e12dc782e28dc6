//! Risk prediction -- escalation scoring, tier classification, time-to-failure
//! and recommended action.
//!
//! Everything here is a pure function of its arguments. Callers may run any
//! number of predictions in parallel.

pub mod scorer;
pub mod tier;

pub use scorer::{escalation_probability, MAX_PROBABILITY};
pub use tier::{estimated_time_to_failure, RiskTier, UnknownTier};

use serde::Serialize;

use crate::catalog::{Incident, SystemStats};

/// Inputs the score is built from, in the order they are weighed.
pub const EXPLAINABILITY_FACTORS: [&str; 3] = [
    "historical critical incident rate",
    "incident frequency",
    "signals and business impact",
];

/// Result of a risk prediction. Derived on every call, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub tier: RiskTier,
    pub probability: f64,
    pub eta_minutes: u32,
    pub recommendation: &'static str,
}

impl RiskAssessment {
    /// Probability rounded to two decimals, as reported to humans.
    pub fn rounded_probability(&self) -> f64 {
        (self.probability * 100.0).round() / 100.0
    }
}

/// Score `incident` against `stats` and derive tier, ETA and action.
pub fn predict_risk(incident: &Incident, stats: &SystemStats) -> RiskAssessment {
    let probability = escalation_probability(incident, stats);
    let tier = RiskTier::from_probability(probability);

    RiskAssessment {
        tier,
        probability,
        eta_minutes: estimated_time_to_failure(probability),
        recommendation: tier.recommendation(),
    }
}
