//! Report structures handed to the output layer.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::downtime::Target;
use crate::model::Impact;

/// Page-wide banner derived from the summary's status indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallStatus {
    pub text: String,
    pub class: StatusClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    Operational,
    Degraded,
    Outage,
}

impl StatusClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusClass::Operational => "operational",
            StatusClass::Degraded => "degraded",
            StatusClass::Outage => "outage",
        }
    }
}

/// Regions are components named like `US-East-1`; everything else is a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentGroup {
    Region,
    Service,
    Overall,
}

impl ComponentGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentGroup::Region => "region",
            ComponentGroup::Service => "service",
            ComponentGroup::Overall => "overall",
        }
    }
}

/// One cell of the uptime bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub label: String,
    pub class: &'static str,
    pub minutes: f64,
    pub impact: Option<Impact>,
    pub tooltip: String,
}

/// A component (or the overall target) with its uptime and day bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentRow {
    pub target: Target,
    pub name: String,
    pub group: ComponentGroup,
    pub uptime_percent: f64,
    pub uptime_class: &'static str,
    pub uptime_label: String,
    pub downtime_days: usize,
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateLine {
    pub status: String,
    pub body: String,
    pub time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncidentCard {
    pub id: String,
    pub name: String,
    pub shortlink: Option<String>,
    pub impact: String,
    pub date: Option<String>,
    pub duration: Option<String>,
    pub components: Vec<String>,
    pub updates: Vec<UpdateLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    /// Instant the report is evaluated at.
    pub generated_at: DateTime<Utc>,
    /// Instant the status data was retrieved.
    pub fetched_at: DateTime<Utc>,
    pub window_days: u32,
    pub status: OverallStatus,
    pub overall: ComponentRow,
    pub regions: Vec<ComponentRow>,
    pub services: Vec<ComponentRow>,
    pub incidents: Vec<IncidentCard>,
}

impl StatusReport {
    /// Overall row followed by regions, then services.
    pub fn rows(&self) -> impl Iterator<Item = &ComponentRow> {
        std::iter::once(&self.overall)
            .chain(self.regions.iter())
            .chain(self.services.iter())
    }
}
