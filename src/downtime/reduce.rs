use crate::downtime::types::DayMap;
use crate::downtime::utility::MINUTES_PER_DAY;

/// Reduces a [`DayMap`] to an uptime percentage over a `window_days` window.
///
/// Each day contributes at most one full day of downtime, however many
/// overlapping incidents were folded into it. The result is in `[0, 100]`.
pub fn uptime_percent(day_map: &DayMap, window_days: u32) -> f64 {
    let total_minutes = f64::from(window_days) * MINUTES_PER_DAY;
    if total_minutes == 0.0 {
        return 100.0;
    }

    let total_down: f64 = day_map
        .values()
        .map(|bucket| bucket.minutes.min(MINUTES_PER_DAY))
        .sum();

    (((total_minutes - total_down) / total_minutes) * 100.0).max(0.0)
}
