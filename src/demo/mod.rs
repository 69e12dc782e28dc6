//! Scripted end-to-end walkthrough against a running service:
//! detect -> profile -> predict -> assign -> notify.

mod client;
pub mod summary;

pub use client::DemoClient;

use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::api::types::*;

const BANNER_WIDTH: usize = 80;

/// Everything the walkthrough received, step by step.
#[derive(Debug, Clone)]
pub struct DemoReport {
    pub incident: DetectedIncident,
    pub stats: SystemStatsResponse,
    pub risk: PredictRiskResponse,
    pub owner: AssignOwnerResponse,
    pub message: String,
    pub notification: NotifyResponse,
}

/// Stakeholder update sent by the reporter step.
pub fn notification_message(
    incident: &DetectedIncident,
    risk: &PredictRiskResponse,
    owner: &AssignOwnerResponse,
) -> String {
    format!(
        "[INCIDENT UPDATE] {} | System: {} | Predicted Risk: {} (p={}) | \
         ETA to failure: {} min | Assigned: {} | Recommended: {}",
        incident.incident.incident_id,
        incident.incident.system,
        risk.predicted_risk,
        risk.escalation_probability,
        risk.expected_time_to_failure_minutes,
        owner.assigned_owner,
        risk.recommended_action,
    )
}

fn section(title: &str) {
    let rule = "=".repeat(BANNER_WIDTH);
    println!("\n{rule}\n{title}\n{rule}");
}

async fn show<T: Serialize>(value: &T, pause: Duration) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    if !pause.is_zero() {
        tokio::time::sleep(pause).await;
    }
    Ok(())
}

/// Drive the service at `client` through the full triage flow, printing each
/// step and pausing `pause` after it.
pub async fn run_demo(client: &DemoClient, pause: Duration) -> Result<DemoReport> {
    info!(base_url = %client.base_url(), "starting incident commander demo");

    section("🚨 MONITOR AGENT -- INCIDENT DETECTED (REAL-TIME)");
    let incident = client.fetch_incident().await?;
    show(&incident, pause).await?;

    section("📈 STATS INTELLIGENCE AGENT -- HISTORICAL SYSTEM PROFILE (LAST 30 DAYS)");
    let stats = client.fetch_stats(&incident.incident.system).await?;
    show(&stats, pause).await?;

    section("🔮 RISK PREDICTION AGENT -- FORECASTING ESCALATION & TIME-TO-FAILURE");
    let risk = client.predict_risk(&incident.incident, &stats.stats).await?;
    show(&risk, pause).await?;

    section("🧩 COORDINATOR AGENT -- OWNER ASSIGNMENT BASED ON PREDICTED RISK");
    let owner = client
        .assign_owner(&incident.incident.incident_id, risk.predicted_risk)
        .await?;
    show(&owner, pause).await?;

    section("📣 REPORTER AGENT -- STAKEHOLDER NOTIFICATION WITH FUTURE RISK");
    let message = notification_message(&incident, &risk, &owner);
    let notification = client.notify(&message).await?;
    show(&notification, pause).await?;

    section("⚡ BEFORE vs AFTER -- WHY THIS MATTERS (ENTERPRISE IMPACT)");
    show(&summary::before_after(), pause).await?;

    section("📊 IMPACT METRICS -- SIMULATED ENTERPRISE RESULTS");
    show(&summary::impact_metrics(), pause).await?;

    println!("\n✅ INCIDENT COMMANDER WORKFLOW COMPLETED ✅\n");
    info!(
        incident_id = %incident.incident.incident_id,
        tier = %risk.predicted_risk,
        owner = %owner.assigned_owner,
        "demo finished"
    );

    Ok(DemoReport {
        incident,
        stats,
        risk,
        owner,
        message,
        notification,
    })
}
