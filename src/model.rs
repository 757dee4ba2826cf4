//! Wire types for the Statuspage-style v2 API.
//!
//! Only the fields the downtime pipeline reads are modeled. Everything is
//! optional or defaulted so that sparse records still deserialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Incident severity label.
///
/// Known labels are ranked `critical > major > minor > maintenance > none`.
/// Any other string is kept verbatim in [`Impact::Other`] and ranks like
/// `none`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    None,
    Maintenance,
    Minor,
    Major,
    Critical,
    #[serde(untagged)]
    Other(String),
}

impl Impact {
    /// Maps a raw label onto a known variant, keeping anything else verbatim.
    pub fn from_label(label: &str) -> Self {
        match label {
            "none" => Impact::None,
            "maintenance" => Impact::Maintenance,
            "minor" => Impact::Minor,
            "major" => Impact::Major,
            "critical" => Impact::Critical,
            other => Impact::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Impact::None => "none",
            Impact::Maintenance => "maintenance",
            Impact::Minor => "minor",
            Impact::Major => "major",
            Impact::Critical => "critical",
            Impact::Other(s) => s,
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A monitored component from `summary.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Component reference attached to an incident update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectedComponent {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentUpdate {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default, deserialize_with = "lenient_time")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub affected_components: Vec<AffectedComponent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_impact")]
    pub impact: Option<Impact>,
    #[serde(default, deserialize_with = "lenient_time")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_time")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_time")]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub shortlink: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub incident_updates: Vec<IncidentUpdate>,
}

impl Incident {
    /// Severity used for aggregation. A missing or empty label counts as `minor`.
    pub fn effective_impact(&self) -> Impact {
        match &self.impact {
            None => Impact::Minor,
            Some(Impact::Other(s)) if s.is_empty() => Impact::Minor,
            Some(impact) => impact.clone(),
        }
    }

    /// When the incident began: `started_at`, falling back to `created_at`.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.started_at.or(self.created_at)
    }

    /// Distinct affected components across every update, in first-seen order.
    pub fn affected_components(&self) -> Vec<&AffectedComponent> {
        let mut seen: Vec<&AffectedComponent> = Vec::new();
        for ac in self
            .incident_updates
            .iter()
            .flat_map(|u| u.affected_components.iter())
        {
            if !seen.iter().any(|s| s.code == ac.code) {
                seen.push(ac);
            }
        }
        seen
    }
}

/// Page-level status indicator from `summary.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageStatus {
    #[serde(default)]
    pub indicator: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `GET /summary.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub components: Vec<Component>,
    #[serde(default)]
    pub status: Option<PageStatus>,
}

/// Body of `GET /incidents.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub incidents: Vec<Incident>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts any JSON value as an impact. Strings map through
/// [`Impact::from_label`]; other non-null values are kept as their JSON text.
fn lenient_impact<'de, D>(deserializer: D) -> Result<Option<Impact>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(label)) => Some(Impact::from_label(&label)),
        Some(other) => Some(Impact::Other(other.to_string())),
    })
}

/// Unparseable or non-string timestamps read as absent.
fn lenient_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(raw)) => raw.parse::<DateTime<Utc>>().ok(),
        _ => None,
    })
}
