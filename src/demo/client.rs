use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::types::*;
use crate::catalog::{Incident, SystemStats};
use crate::risk::RiskTier;

/// Typed HTTP client for a running Incident Commander service.
pub struct DemoClient {
    client: Client,
    base_url: String,
}

impl DemoClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .get(&url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?
            .error_for_status()
            .with_context(|| format!("GET {url} returned an error status"))?
            .json()
            .await
            .with_context(|| format!("GET {url} returned an unexpected body"))
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST {url} failed"))?
            .error_for_status()
            .with_context(|| format!("POST {url} returned an error status"))?
            .json()
            .await
            .with_context(|| format!("POST {url} returned an unexpected body"))
    }

    pub async fn fetch_incident(&self) -> Result<DetectedIncident> {
        self.get("/incident", &[]).await
    }

    pub async fn fetch_stats(&self, system: &str) -> Result<SystemStatsResponse> {
        self.get("/system-stats", &[("system", system)]).await
    }

    pub async fn predict_risk(
        &self,
        incident: &Incident,
        stats: &SystemStats,
    ) -> Result<PredictRiskResponse> {
        let body = PredictRiskRequest {
            incident: incident.clone(),
            stats: stats.clone(),
        };
        self.post("/predict-risk", &body).await
    }

    pub async fn assign_owner(
        &self,
        incident_id: &str,
        severity: RiskTier,
    ) -> Result<AssignOwnerResponse> {
        let body = AssignOwnerRequest {
            incident_id: Some(incident_id.to_string()),
            severity: Some(severity.to_string()),
        };
        self.post("/assign-owner", &body).await
    }

    pub async fn notify(&self, message: &str) -> Result<NotifyResponse> {
        let body = NotifyRequest {
            message: Some(message.to_string()),
        };
        self.post("/notify", &body).await
    }
}
