//! Static incident catalog -- mock incidents, 30-day system history, and the
//! severity -> owner table.
//!
//! The catalog is read-only once built. The service shares it behind an `Arc`
//! and never mutates it.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

// Embed default catalog for fallback
const BUILTIN_CATALOG_TOML: &str = include_str!("seed.toml");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Deserialize a field, substituting `T::default()` when the value has the
/// wrong shape.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Any non-negative JSON number, truncated and saturating at `u64::MAX`.
/// Negative, NaN and non-numeric values read as absent.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_u64()
        .or_else(|| value.as_f64().filter(|n| *n >= 0.0).map(|n| n as u64)))
}

/// String entries of an array; anything else in it is skipped.
fn lenient_signals<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let signals = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(signal) => Some(signal),
                _ => None,
            })
            .collect(),
        _ => BTreeSet::new(),
    };
    Ok(signals)
}

/// One detected operational problem in a system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Incident {
    #[serde(deserialize_with = "lenient")]
    pub incident_id: String,
    #[serde(deserialize_with = "lenient")]
    pub system: String,
    #[serde(deserialize_with = "lenient")]
    pub description: String,
    #[serde(deserialize_with = "lenient")]
    pub business_impact: String,
    #[serde(deserialize_with = "lenient_signals")]
    pub signals: BTreeSet<String>,
}

impl Incident {
    pub fn has_signal(&self, signal: &str) -> bool {
        self.signals.contains(signal)
    }
}

/// Per-system aggregates over the last 30 days.
///
/// The scored fields are optional so a caller-supplied `{}` is a valid record;
/// the accessors apply the scoring defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemStats {
    #[serde(deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub past_30_days_incidents: Option<u64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub critical_incident_rate: Option<f64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub avg_resolution_time_minutes: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub top_causes: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub peak_risk_hours: Vec<String>,
}

impl SystemStats {
    pub const DEFAULT_CRITICAL_INCIDENT_RATE: f64 = 0.2;

    pub fn incident_count(&self) -> u64 {
        self.past_30_days_incidents.unwrap_or(0)
    }

    pub fn critical_incident_rate(&self) -> f64 {
        self.critical_incident_rate
            .unwrap_or(Self::DEFAULT_CRITICAL_INCIDENT_RATE)
    }
}

/// Immutable lookup tables consumed by the service and the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    incidents: Vec<Incident>,
    #[serde(default)]
    systems: BTreeMap<String, SystemStats>,
    default_stats: SystemStats,
    #[serde(default)]
    owners: BTreeMap<String, String>,
    default_owner: String,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn builtin() -> Self {
        toml::from_str(BUILTIN_CATALOG_TOML).expect("Embedded catalog is invalid TOML")
    }

    /// Load a catalog file with the same schema as the built-in one.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog: Self = toml::from_str(&content).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            path = %path.display(),
            incidents = catalog.incidents.len(),
            systems = catalog.systems.len(),
            "loaded incident catalog"
        );
        Ok(catalog)
    }

    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    pub fn incident(&self, incident_id: &str) -> Option<&Incident> {
        self.incidents.iter().find(|i| i.incident_id == incident_id)
    }

    /// Choose an incident with the caller's RNG. `None` only when the catalog
    /// holds no incidents.
    pub fn pick_incident<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Incident> {
        self.incidents.choose(rng)
    }

    /// 30-day stats for `system`, or the default record when it has no history.
    pub fn stats_for(&self, system: &str) -> SystemStats {
        match self.systems.get(system) {
            Some(stats) => stats.clone(),
            None => {
                debug!(%system, "no history for system, using default stats");
                self.default_stats.clone()
            }
        }
    }

    /// Team that owns incidents of `severity`. Matching is exact; anything
    /// unrecognised goes to the default owner.
    pub fn resolve_owner(&self, severity: &str) -> &str {
        self.owners
            .get(severity)
            .map(String::as_str)
            .unwrap_or(self.default_owner.as_str())
    }
}
