use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Discrete risk level derived from an escalation probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Error)]
#[error("unknown risk tier: {0}")]
pub struct UnknownTier(pub String);

impl RiskTier {
    pub const ALL: [RiskTier; 4] = [
        RiskTier::Low,
        RiskTier::Medium,
        RiskTier::High,
        RiskTier::Critical,
    ];

    /// Lower bound (inclusive) of each band above Low, highest first.
    const THRESHOLDS: [(f64, RiskTier); 3] = [
        (0.80, RiskTier::Critical),
        (0.60, RiskTier::High),
        (0.35, RiskTier::Medium),
    ];

    /// Band containing `probability`. NaN falls through to Low.
    pub fn from_probability(probability: f64) -> Self {
        Self::THRESHOLDS
            .iter()
            .find(|(floor, _)| probability >= *floor)
            .map(|(_, tier)| *tier)
            .unwrap_or(RiskTier::Low)
    }

    /// Expected minutes until the incident escalates further.
    pub fn eta_minutes(self) -> u32 {
        match self {
            RiskTier::Critical => 10,
            RiskTier::High => 20,
            RiskTier::Medium => 45,
            RiskTier::Low => 120,
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            RiskTier::Low => "Monitor and re-check in 30 minutes",
            RiskTier::Medium => "Assign to engineering and begin diagnostics",
            RiskTier::High => "Escalate to SRE on-call and prepare incident channel",
            RiskTier::Critical => "Page Incident Commander and notify leadership immediately",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
            RiskTier::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RiskTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| UnknownTier(s.to_string()))
    }
}

/// Minutes to failure for `probability`. Classifies first so the ETA band is
/// always the tier band.
pub fn estimated_time_to_failure(probability: f64) -> u32 {
    RiskTier::from_probability(probability).eta_minutes()
}
