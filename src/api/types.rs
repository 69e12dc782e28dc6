//! Request and response bodies. Shared by the handlers and the demo client.
//!
//! Request fields degrade to defaults when missing or mistyped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{lenient, Incident, SystemStats};
use crate::risk::{RiskAssessment, RiskTier, EXPLAINABILITY_FACTORS};

/// Length of the history window behind [`SystemStats`].
pub const STATS_WINDOW_DAYS: u32 = 30;

/// Severity assumed by `/assign-owner` when the caller sends none.
pub const DEFAULT_SEVERITY: &str = "Medium";

pub const NOTIFICATION_SENT: &str = "notification_sent";

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictRiskRequest {
    #[serde(deserialize_with = "lenient")]
    pub incident: Incident,
    #[serde(deserialize_with = "lenient")]
    pub stats: SystemStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignOwnerRequest {
    #[serde(deserialize_with = "lenient")]
    pub incident_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub severity: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyRequest {
    #[serde(deserialize_with = "lenient")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SystemStatsQuery {
    pub system: String,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// A catalog incident as handed out by `GET /incident`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedIncident {
    #[serde(flatten)]
    pub incident: Incident,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStatsResponse {
    pub system: String,
    pub window_days: u32,
    #[serde(flatten)]
    pub stats: SystemStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explainability {
    pub based_on: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRiskResponse {
    pub predicted_risk: RiskTier,
    /// Rounded to two decimals.
    pub escalation_probability: f64,
    pub expected_time_to_failure_minutes: u32,
    pub recommended_action: String,
    pub explainability: Explainability,
    pub generated_at: DateTime<Utc>,
}

impl PredictRiskResponse {
    pub fn from_assessment(assessment: &RiskAssessment) -> Self {
        Self {
            predicted_risk: assessment.tier,
            escalation_probability: assessment.rounded_probability(),
            expected_time_to_failure_minutes: assessment.eta_minutes,
            recommended_action: assessment.recommendation.to_string(),
            explainability: Explainability {
                based_on: EXPLAINABILITY_FACTORS.iter().map(|f| f.to_string()).collect(),
            },
            generated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignOwnerResponse {
    pub incident_id: Option<String>,
    pub severity: String,
    pub assigned_owner: String,
    pub assigned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyResponse {
    pub status: String,
    pub notification_id: Uuid,
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}
