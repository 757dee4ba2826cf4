//! Turns downtime maps into the status report: banner, component rows with
//! their day bars, and incident cards.

pub mod format;
pub mod types;

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

use crate::downtime::classify::{impact_class, uptime_class};
use crate::downtime::utility::{days_ago, minutes_between};
use crate::downtime::{DayMap, Target, aggregate, uptime_percent};
use crate::model::{Incident, PageStatus, Summary};
use crate::report::format::{
    format_date, format_duration, format_short_date, format_time, format_uptime,
};
use crate::services::StatusSnapshot;

pub use types::{
    ComponentGroup, ComponentRow, DayCell, IncidentCard, OverallStatus, StatusClass,
    StatusReport, UpdateLine,
};

static REGION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(US|EU|AP|CA)-").expect("valid region pattern"));

pub const OVERALL_NAME: &str = "All components";

/// Builds the full report from a snapshot as of `now`.
pub fn build_report(snapshot: &StatusSnapshot, now: DateTime<Utc>, window_days: u32) -> StatusReport {
    let components = snapshot.components();
    let maps = aggregate(&snapshot.incidents, components, now, window_days);

    let overall = component_row(
        Target::Overall,
        OVERALL_NAME,
        ComponentGroup::Overall,
        maps.overall(),
        now,
        window_days,
    );

    let mut regions = Vec::new();
    let mut services = Vec::new();
    for c in components {
        let group = classify_component(&c.name);
        let target = Target::component(c.id.as_str());
        let day_map = maps.get_or_empty(&target);
        let row = component_row(
            target.clone(),
            &c.name,
            group,
            day_map,
            now,
            window_days,
        );
        match group {
            ComponentGroup::Region => regions.push(row),
            _ => services.push(row),
        }
    }

    StatusReport {
        generated_at: now,
        fetched_at: snapshot.fetched_at,
        window_days,
        status: overall_status(&snapshot.summary),
        overall,
        regions,
        services,
        incidents: snapshot.incidents.iter().map(incident_card).collect(),
    }
}

pub fn classify_component(name: &str) -> ComponentGroup {
    if REGION_PATTERN.is_match(name) {
        ComponentGroup::Region
    } else {
        ComponentGroup::Service
    }
}

/// Banner text and class for the page-wide indicator.
pub fn overall_status(summary: &Summary) -> OverallStatus {
    let default_status = PageStatus::default();
    let status = summary.status.as_ref().unwrap_or(&default_status);
    let indicator = status.indicator.as_deref().unwrap_or("none");
    let description = status.description.as_deref().filter(|d| !d.is_empty());

    match indicator {
        "none" => OverallStatus {
            text: "All Systems Operational".to_string(),
            class: StatusClass::Operational,
        },
        "minor" | "maintenance" => OverallStatus {
            text: description.unwrap_or("Partial Issues").to_string(),
            class: StatusClass::Degraded,
        },
        _ => OverallStatus {
            text: description.unwrap_or("Major Outage").to_string(),
            class: StatusClass::Outage,
        },
    }
}

/// One row: uptime over the window plus a bar of `window_days` cells ending today.
pub fn component_row(
    target: Target,
    name: &str,
    group: ComponentGroup,
    day_map: &DayMap,
    now: DateTime<Utc>,
    window_days: u32,
) -> ComponentRow {
    let uptime = uptime_percent(day_map, window_days);

    ComponentRow {
        target,
        name: name.to_string(),
        group,
        uptime_percent: uptime,
        uptime_class: uptime_class(uptime),
        uptime_label: format_uptime(uptime),
        downtime_days: day_map.len(),
        days: day_cells(day_map, now, window_days),
    }
}

/// Bar cells, oldest first. Days without data render as operational.
pub fn day_cells(day_map: &DayMap, now: DateTime<Utc>, window_days: u32) -> Vec<DayCell> {
    (0..window_days)
        .rev()
        .map(|i| {
            let date = days_ago(now, i).date_naive();
            let info = day_map.get(&date);
            let tooltip = match info {
                Some(bucket) => format!(
                    "{} · {} downtime",
                    bucket.max_impact,
                    format_duration(bucket.minutes)
                ),
                None => "Operational".to_string(),
            };

            DayCell {
                date,
                label: format_short_date(date),
                class: impact_class(info.map(|b| &b.max_impact)),
                minutes: info.map_or(0.0, |b| b.minutes),
                impact: info.map(|b| b.max_impact.clone()),
                tooltip,
            }
        })
        .collect()
}

/// Card for one incident. Duration is only known once the incident is resolved.
pub fn incident_card(incident: &Incident) -> IncidentCard {
    let start = incident.start();
    let duration = match (start, incident.resolved_at) {
        (Some(s), Some(e)) => Some(format_duration(minutes_between(s, e))),
        _ => None,
    };

    let mut components: Vec<String> = Vec::new();
    for ac in incident
        .incident_updates
        .iter()
        .flat_map(|u| u.affected_components.iter())
    {
        if !components.contains(&ac.name) {
            components.push(ac.name.clone());
        }
    }

    IncidentCard {
        id: incident.id.clone(),
        name: incident.name.clone(),
        shortlink: incident.shortlink.clone(),
        impact: incident
            .impact
            .as_ref()
            .map(|i| i.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("none")
            .to_string(),
        date: start.map(format_date),
        duration,
        components,
        updates: incident
            .incident_updates
            .iter()
            .rev()
            .map(|u| UpdateLine {
                status: u.status.clone(),
                body: u.body.clone(),
                time: u.created_at.map(format_time),
            })
            .collect(),
    }
}
