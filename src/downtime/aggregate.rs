use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::downtime::classify::impact_severity;
use crate::downtime::types::{DayMap, DowntimeMaps, Target};
use crate::downtime::utility::{days_ago, minutes_between, start_of_day};
use crate::model::{Component, Incident};

/// Builds per-day downtime maps for every component and for
/// [`Target::Overall`] over the `window_days` days preceding `now`.
///
/// Each incident is clipped to the window, split on UTC day boundaries, and
/// folded into the day maps of every component it affected plus the overall
/// map. Incidents that name no component land in the overall map only.
/// Minutes from overlapping incidents are added, not merged.
pub fn aggregate(
    incidents: &[Incident],
    components: &[Component],
    now: DateTime<Utc>,
    window_days: u32,
) -> DowntimeMaps {
    let window_start = days_ago(now, window_days);

    let mut maps: BTreeMap<Target, DayMap> = components
        .iter()
        .map(|c| (Target::component(c.id.as_str()), DayMap::new()))
        .collect();
    maps.insert(Target::Overall, DayMap::new());

    let mut skipped = 0usize;
    let mut folded = 0usize;

    for incident in incidents {
        let Some(start) = incident.start() else {
            warn!(incident_id = %incident.id, "Incident has no start time, ignoring");
            continue;
        };
        let end = incident.resolved_at.unwrap_or(now);

        if end < window_start {
            skipped += 1;
            continue;
        }

        let clipped_start = start.max(window_start);
        let clipped_end = end.min(now);

        let targets = attribution_targets(incident);
        for target in &targets {
            if !maps.contains_key(target) {
                debug!(incident_id = %incident.id, ?target, "Affected component is not monitored");
            }
        }

        let impact = incident.effective_impact();
        let severity = impact_severity(&impact);

        for (date, minutes) in day_overlaps(clipped_start, clipped_end) {
            if minutes <= 0.0 {
                continue;
            }

            for target in &targets {
                let Some(day_map) = maps.get_mut(target) else {
                    continue;
                };
                let bucket = day_map.entry(date).or_default();
                bucket.minutes += minutes;
                if severity > impact_severity(&bucket.max_impact) {
                    bucket.max_impact = impact.clone();
                }
            }
        }

        folded += 1;
    }

    debug!(
        incidents = incidents.len(),
        folded,
        skipped,
        targets = maps.len(),
        window_start = %window_start,
        "Downtime maps built"
    );

    DowntimeMaps { maps }
}

/// Components an incident is attributed to, always followed by the overall target.
fn attribution_targets(incident: &Incident) -> Vec<Target> {
    let mut targets: Vec<Target> = incident
        .affected_components()
        .into_iter()
        .map(|ac| Target::component(ac.code.as_str()))
        .collect();
    targets.push(Target::Overall);
    targets
}

/// Splits `[start, end]` on UTC midnights, yielding each touched day with the
/// minutes of overlap. Days with an empty overlap yield `0.0`; an inverted
/// interval yields nothing positive.
fn day_overlaps(start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<(NaiveDate, f64)> {
    let mut days = Vec::new();
    let mut cursor = start.date_naive();

    loop {
        let day_start = start_of_day(cursor);
        if day_start > end {
            break;
        }
        let Some(next) = cursor.succ_opt() else {
            break;
        };
        let day_end = start_of_day(next);

        let overlap_start = start.max(day_start);
        let overlap_end = end.min(day_end);
        days.push((cursor, minutes_between(overlap_start, overlap_end)));

        cursor = next;
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downtime::types::DayBucket;
    use crate::model::{AffectedComponent, Impact, IncidentUpdate};
    use chrono::TimeZone;

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn component(id: &str) -> Component {
        Component {
            id: id.to_string(),
            name: id.to_uppercase(),
            status: None,
        }
    }

    fn incident(
        id: &str,
        impact: Impact,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
        affected: &[&str],
    ) -> Incident {
        Incident {
            id: id.to_string(),
            name: format!("Incident {id}"),
            impact: Some(impact),
            created_at: Some(start),
            started_at: Some(start),
            resolved_at: end,
            shortlink: None,
            incident_updates: vec![IncidentUpdate {
                status: "resolved".to_string(),
                body: String::new(),
                created_at: end,
                affected_components: affected
                    .iter()
                    .map(|code| AffectedComponent {
                        code: code.to_string(),
                        name: code.to_uppercase(),
                    })
                    .collect(),
            }],
        }
    }

    #[test]
    fn test_components_without_incidents_get_empty_maps() {
        let now = ts(2024, 2, 1, 12, 0);
        let maps = aggregate(&[], &[component("api"), component("web")], now, 90);

        assert!(maps.component("api").unwrap().is_empty());
        assert!(maps.component("web").unwrap().is_empty());
        assert!(maps.overall().is_empty());
        assert_eq!(maps.targets().count(), 3);
        assert!(maps.get_or_empty(&Target::component("unknown")).is_empty());
    }

    #[test]
    fn test_three_hour_major_incident() {
        let now = ts(2024, 2, 1, 12, 0);
        let inc = incident(
            "i1",
            Impact::Major,
            ts(2024, 1, 1, 0, 0),
            Some(ts(2024, 1, 1, 3, 0)),
            &["api"],
        );
        let maps = aggregate(&[inc], &[component("api")], now, 90);

        let expected = DayBucket {
            minutes: 180.0,
            max_impact: Impact::Major,
        };
        assert_eq!(maps.component("api").unwrap()[&date(2024, 1, 1)], expected);
        assert_eq!(maps.overall()[&date(2024, 1, 1)], expected);
    }

    #[test]
    fn test_incident_split_across_midnight() {
        let now = ts(2024, 2, 1, 12, 0);
        let inc = incident(
            "i1",
            Impact::Minor,
            ts(2024, 1, 10, 22, 0),
            Some(ts(2024, 1, 12, 1, 30)),
            &["api"],
        );
        let maps = aggregate(&[inc], &[component("api")], now, 90);
        let api = maps.component("api").unwrap();

        assert_eq!(api[&date(2024, 1, 10)].minutes, 120.0);
        assert_eq!(api[&date(2024, 1, 11)].minutes, 1440.0);
        assert_eq!(api[&date(2024, 1, 12)].minutes, 90.0);
        assert_eq!(api.len(), 3);
    }

    #[test]
    fn test_resolved_exactly_at_midnight_creates_no_empty_day() {
        let now = ts(2024, 2, 1, 12, 0);
        let inc = incident(
            "i1",
            Impact::Minor,
            ts(2024, 1, 10, 23, 0),
            Some(ts(2024, 1, 11, 0, 0)),
            &["api"],
        );
        let maps = aggregate(&[inc], &[component("api")], now, 90);
        let api = maps.component("api").unwrap();

        assert_eq!(api.len(), 1);
        assert_eq!(api[&date(2024, 1, 10)].minutes, 60.0);
    }

    #[test]
    fn test_incident_before_window_is_ignored() {
        let now = ts(2024, 6, 1, 12, 0);
        let inc = incident(
            "old",
            Impact::Critical,
            ts(2024, 1, 1, 0, 0),
            Some(ts(2024, 1, 1, 5, 0)),
            &["api"],
        );
        let maps = aggregate(&[inc], &[component("api")], now, 90);

        assert!(maps.component("api").unwrap().is_empty());
        assert!(maps.overall().is_empty());
    }

    #[test]
    fn test_incident_straddling_window_start_is_clipped() {
        let now = ts(2024, 4, 10, 12, 0);
        // Window starts at 2024-01-11T00:00Z.
        let inc = incident(
            "i1",
            Impact::Major,
            ts(2024, 1, 10, 12, 0),
            Some(ts(2024, 1, 11, 2, 0)),
            &["api"],
        );
        let maps = aggregate(&[inc], &[component("api")], now, 90);
        let api = maps.component("api").unwrap();

        assert_eq!(api.len(), 1);
        assert_eq!(api[&date(2024, 1, 11)].minutes, 120.0);
    }

    #[test]
    fn test_ongoing_incident_runs_until_now() {
        let now = ts(2024, 2, 1, 6, 0);
        let inc = incident("i1", Impact::Critical, ts(2024, 1, 31, 20, 0), None, &["api"]);
        let maps = aggregate(&[inc], &[component("api")], now, 90);
        let api = maps.component("api").unwrap();

        assert_eq!(api[&date(2024, 1, 31)].minutes, 240.0);
        assert_eq!(api[&date(2024, 2, 1)].minutes, 360.0);
    }

    #[test]
    fn test_end_after_now_is_clipped_to_now() {
        let now = ts(2024, 2, 1, 6, 0);
        let inc = incident(
            "i1",
            Impact::Maintenance,
            ts(2024, 2, 1, 5, 0),
            Some(ts(2024, 2, 1, 9, 0)),
            &["api"],
        );
        let maps = aggregate(&[inc], &[component("api")], now, 90);

        assert_eq!(maps.component("api").unwrap()[&date(2024, 2, 1)].minutes, 60.0);
    }

    #[test]
    fn test_inverted_interval_contributes_nothing() {
        let now = ts(2024, 2, 1, 12, 0);
        let inc = incident(
            "i1",
            Impact::Critical,
            ts(2024, 1, 20, 10, 0),
            Some(ts(2024, 1, 20, 8, 0)),
            &["api"],
        );
        let maps = aggregate(&[inc], &[component("api")], now, 90);

        assert!(maps.component("api").unwrap().is_empty());
        assert!(maps.overall().is_empty());
    }

    #[test]
    fn test_concurrent_incidents_are_additive() {
        let now = ts(2024, 2, 1, 12, 0);
        let a = incident(
            "a",
            Impact::Critical,
            ts(2024, 1, 5, 6, 0),
            Some(ts(2024, 1, 5, 12, 0)),
            &["api"],
        );
        let b = incident(
            "b",
            Impact::Critical,
            ts(2024, 1, 5, 6, 0),
            Some(ts(2024, 1, 5, 12, 0)),
            &["api"],
        );
        let maps = aggregate(&[a, b], &[component("api")], now, 90);

        assert_eq!(maps.component("api").unwrap()[&date(2024, 1, 5)].minutes, 720.0);
        assert_eq!(maps.overall()[&date(2024, 1, 5)].minutes, 720.0);
    }

    #[test]
    fn test_overlaps_can_exceed_a_full_day() {
        let now = ts(2024, 2, 1, 12, 0);
        let full_day = |id: &str| {
            incident(
                id,
                Impact::Major,
                ts(2024, 1, 5, 0, 0),
                Some(ts(2024, 1, 6, 0, 0)),
                &["api"],
            )
        };
        let maps = aggregate(&[full_day("a"), full_day("b")], &[component("api")], now, 90);

        assert_eq!(maps.component("api").unwrap()[&date(2024, 1, 5)].minutes, 2880.0);
    }

    #[test]
    fn test_no_affected_components_goes_to_overall_only() {
        let now = ts(2024, 2, 1, 12, 0);
        let inc = incident(
            "i1",
            Impact::Minor,
            ts(2024, 1, 5, 0, 0),
            Some(ts(2024, 1, 5, 1, 0)),
            &[],
        );
        let maps = aggregate(&[inc], &[component("api"), component("web")], now, 90);

        assert!(maps.component("api").unwrap().is_empty());
        assert!(maps.component("web").unwrap().is_empty());
        assert_eq!(maps.overall()[&date(2024, 1, 5)].minutes, 60.0);
    }

    #[test]
    fn test_unknown_component_is_dropped() {
        let now = ts(2024, 2, 1, 12, 0);
        let inc = incident(
            "i1",
            Impact::Minor,
            ts(2024, 1, 5, 0, 0),
            Some(ts(2024, 1, 5, 1, 0)),
            &["ghost", "api"],
        );
        let maps = aggregate(&[inc], &[component("api")], now, 90);

        assert!(maps.component("ghost").is_none());
        assert_eq!(maps.component("api").unwrap()[&date(2024, 1, 5)].minutes, 60.0);
        assert_eq!(maps.overall()[&date(2024, 1, 5)].minutes, 60.0);
    }

    #[test]
    fn test_max_impact_is_order_independent() {
        let now = ts(2024, 2, 1, 12, 0);
        let mk = |id: &str, impact: Impact, h: u32| {
            incident(
                id,
                impact,
                ts(2024, 1, 5, h, 0),
                Some(ts(2024, 1, 5, h + 1, 0)),
                &["api"],
            )
        };
        let forward = vec![
            mk("a", Impact::Maintenance, 1),
            mk("b", Impact::Critical, 3),
            mk("c", Impact::Minor, 5),
        ];
        let mut backward = forward.clone();
        backward.reverse();

        let f = aggregate(&forward, &[component("api")], now, 90);
        let b = aggregate(&backward, &[component("api")], now, 90);

        let day = date(2024, 1, 5);
        assert_eq!(f.component("api").unwrap()[&day].max_impact, Impact::Critical);
        assert_eq!(b.component("api").unwrap()[&day].max_impact, Impact::Critical);
    }

    #[test]
    fn test_unknown_impact_never_raises_severity() {
        let now = ts(2024, 2, 1, 12, 0);
        let inc = incident(
            "i1",
            Impact::Other("sev0".to_string()),
            ts(2024, 1, 5, 0, 0),
            Some(ts(2024, 1, 5, 2, 0)),
            &["api"],
        );
        let maps = aggregate(&[inc], &[component("api")], now, 90);
        let bucket = &maps.component("api").unwrap()[&date(2024, 1, 5)];

        assert_eq!(bucket.minutes, 120.0);
        assert_eq!(bucket.max_impact, Impact::None);
    }

    #[test]
    fn test_missing_impact_counts_as_minor() {
        let now = ts(2024, 2, 1, 12, 0);
        let mut inc = incident(
            "i1",
            Impact::None,
            ts(2024, 1, 5, 0, 0),
            Some(ts(2024, 1, 5, 2, 0)),
            &["api"],
        );
        inc.impact = None;
        let maps = aggregate(&[inc], &[component("api")], now, 90);

        assert_eq!(
            maps.component("api").unwrap()[&date(2024, 1, 5)].max_impact,
            Impact::Minor
        );
    }

    #[test]
    fn test_affected_components_from_every_update() {
        let now = ts(2024, 2, 1, 12, 0);
        let mut inc = incident(
            "i1",
            Impact::Major,
            ts(2024, 1, 5, 0, 0),
            Some(ts(2024, 1, 5, 1, 0)),
            &["api"],
        );
        inc.incident_updates.push(IncidentUpdate {
            status: "investigating".to_string(),
            body: String::new(),
            created_at: None,
            affected_components: vec![
                AffectedComponent {
                    code: "web".to_string(),
                    name: "WEB".to_string(),
                },
                AffectedComponent {
                    code: "api".to_string(),
                    name: "API".to_string(),
                },
            ],
        });
        let maps = aggregate(&[inc], &[component("api"), component("web")], now, 90);

        assert_eq!(maps.component("api").unwrap()[&date(2024, 1, 5)].minutes, 60.0);
        assert_eq!(maps.component("web").unwrap()[&date(2024, 1, 5)].minutes, 60.0);
        // Listing a component twice must not double-count the overall map.
        assert_eq!(maps.overall()[&date(2024, 1, 5)].minutes, 60.0);
    }

    #[test]
    fn test_minutes_are_conserved_inside_window() {
        let now = ts(2024, 3, 1, 0, 0);
        let start = ts(2024, 2, 3, 17, 13);
        let end = ts(2024, 2, 7, 4, 41);
        let inc = incident("i1", Impact::Minor, start, Some(end), &["api"]);
        let maps = aggregate(&[inc], &[component("api")], now, 90);

        let total: f64 = maps.component("api").unwrap().values().map(|b| b.minutes).sum();
        assert_eq!(total, minutes_between(start, end));
    }

    #[test]
    fn test_ongoing_minutes_never_shrink_as_now_advances() {
        let start = ts(2024, 1, 31, 20, 0);
        let inc = incident("i1", Impact::Major, start, None, &["api"]);

        let mut previous = 0.0;
        for hour in [21, 22, 23] {
            let now = ts(2024, 1, 31, hour, 0);
            let maps = aggregate(std::slice::from_ref(&inc), &[component("api")], now, 90);
            let total: f64 = maps.component("api").unwrap().values().map(|b| b.minutes).sum();
            assert!(total >= previous);
            previous = total;
        }
        assert_eq!(previous, 180.0);
    }

    #[test]
    fn test_incident_without_any_timestamp_is_skipped() {
        let now = ts(2024, 2, 1, 12, 0);
        let mut inc = incident(
            "i1",
            Impact::Major,
            ts(2024, 1, 5, 0, 0),
            None,
            &["api"],
        );
        inc.started_at = None;
        inc.created_at = None;
        let maps = aggregate(&[inc], &[component("api")], now, 90);

        assert!(maps.overall().is_empty());
    }

    #[test]
    fn test_sparse_incident_does_not_block_valid_one() {
        let now = ts(2024, 2, 1, 12, 0);
        let list: crate::model::IncidentList = serde_json::from_str(
            r#"{"incidents": [
                {"id": "ok", "impact": "major",
                 "started_at": "2024-01-01T00:00:00Z", "resolved_at": "2024-01-01T03:00:00Z",
                 "incident_updates": [{"affected_components": [{"code": "api"}]}]},
                {"impact": 3,
                 "started_at": "2024-01-02T00:00:00Z", "resolved_at": "2024-01-02T01:00:00Z",
                 "incident_updates": [{"affected_components": [{"name": "API"}]}]}
            ]}"#,
        )
        .unwrap();
        let maps = aggregate(&list.incidents, &[component("api")], now, 90);

        let api = maps.component("api").unwrap();
        assert_eq!(api.len(), 1);
        assert_eq!(api[&date(2024, 1, 1)].minutes, 180.0);
        assert_eq!(api[&date(2024, 1, 1)].max_impact, Impact::Major);

        // The code-less reference is dropped; the overall map still gets the hour.
        assert_eq!(maps.overall()[&date(2024, 1, 2)].minutes, 60.0);
        assert_eq!(maps.overall()[&date(2024, 1, 2)].max_impact, Impact::None);
    }
}
