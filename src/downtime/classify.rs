use crate::model::Impact;

/// Numeric rank of an impact label. Unknown labels rank with `none`.
///
/// | Impact      | Rank |
/// |-------------|------|
/// | critical    | 4    |
/// | major       | 3    |
/// | minor       | 2    |
/// | maintenance | 1    |
/// | none, other | 0    |
pub fn impact_severity(impact: &Impact) -> u8 {
    match impact {
        Impact::Critical => 4,
        Impact::Major => 3,
        Impact::Minor => 2,
        Impact::Maintenance => 1,
        Impact::None | Impact::Other(_) => 0,
    }
}

/// Display class for a day's worst impact. A day with no data is `operational`.
pub fn impact_class(impact: Option<&Impact>) -> &'static str {
    match impact {
        Some(Impact::Critical | Impact::Major) => "major",
        Some(Impact::Minor) => "minor",
        Some(Impact::Maintenance) => "maintenance",
        _ => "operational",
    }
}

/// Display class for an uptime percentage.
///
/// | Range       | Class       |
/// |-------------|-------------|
/// | >= 99.999   | uptime-100  |
/// | >= 99.9     | uptime-high |
/// | >= 99.0     | uptime-low  |
/// | < 99.0      | uptime-bad  |
pub fn uptime_class(pct: f64) -> &'static str {
    match pct {
        p if p >= 99.999 => "uptime-100",
        p if p >= 99.9 => "uptime-high",
        p if p >= 99.0 => "uptime-low",
        _ => "uptime-bad",
    }
}
