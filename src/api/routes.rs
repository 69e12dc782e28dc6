//! API route definitions.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::ApiError;
use super::state::AppState;
use super::types::*;
use crate::risk::{self, RiskTier};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/incident", get(incident))
        .route("/system-stats", get(system_stats))
        .route("/predict-risk", post(predict_risk))
        .route("/assign-owner", post(assign_owner))
        .route("/notify", post(notify))
}

/// Unwrap a JSON body, treating a missing or unparseable one as `{}`.
fn body_or_default<T: DeserializeOwned + Default>(
    route: &'static str,
    payload: Result<Json<T>, JsonRejection>,
) -> T {
    match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!(route, error = %rejection, "unusable request body, using defaults");
            T::default()
        }
    }
}

async fn home() -> Json<Value> {
    Json(json!({
        "service": "Enterprise AI Incident Commander",
        "status": "running"
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn incident(State(state): State<AppState>) -> Result<Json<DetectedIncident>, ApiError> {
    let incident = state.pick_incident().ok_or(ApiError::NoIncidents)?;
    info!(incident_id = %incident.incident_id, system = %incident.system, "incident detected");

    Ok(Json(DetectedIncident {
        incident,
        timestamp: Utc::now(),
    }))
}

async fn system_stats(
    State(state): State<AppState>,
    Query(query): Query<SystemStatsQuery>,
) -> Json<SystemStatsResponse> {
    let stats = state.catalog.stats_for(&query.system);
    debug!(system = %query.system, "system stats requested");

    Json(SystemStatsResponse {
        system: query.system,
        window_days: STATS_WINDOW_DAYS,
        stats,
    })
}

async fn predict_risk(
    payload: Result<Json<PredictRiskRequest>, JsonRejection>,
) -> Json<PredictRiskResponse> {
    let request = body_or_default("/predict-risk", payload);
    let assessment = risk::predict_risk(&request.incident, &request.stats);

    info!(
        incident_id = %request.incident.incident_id,
        tier = %assessment.tier,
        probability = assessment.probability,
        eta_minutes = assessment.eta_minutes,
        "risk predicted"
    );

    Json(PredictRiskResponse::from_assessment(&assessment))
}

async fn assign_owner(
    State(state): State<AppState>,
    payload: Result<Json<AssignOwnerRequest>, JsonRejection>,
) -> Json<AssignOwnerResponse> {
    let request = body_or_default("/assign-owner", payload);
    let severity = request
        .severity
        .unwrap_or_else(|| DEFAULT_SEVERITY.to_string());
    if let Err(e) = severity.parse::<RiskTier>() {
        warn!(error = %e, "routing to default owner");
    }
    let owner = state.catalog.resolve_owner(&severity).to_string();

    info!(
        incident_id = ?request.incident_id,
        %severity,
        %owner,
        "owner assigned"
    );

    Json(AssignOwnerResponse {
        incident_id: request.incident_id,
        severity,
        assigned_owner: owner,
        assigned_at: Utc::now(),
    })
}

async fn notify(payload: Result<Json<NotifyRequest>, JsonRejection>) -> Json<NotifyResponse> {
    let request = body_or_default("/notify", payload);
    let notification_id = Uuid::new_v4();

    info!(
        %notification_id,
        message = request.message.as_deref().unwrap_or_default(),
        "stakeholder notification sent"
    );

    Json(NotifyResponse {
        status: NOTIFICATION_SENT.to_string(),
        notification_id,
        message: request.message,
        timestamp: Utc::now(),
    })
}
