//! Incident downtime aggregation and uptime reduction.
//!
//! Incidents are folded into per-day buckets for each affected component and
//! for the page-wide overall target, then each day map is reduced to a single
//! uptime percentage over the retention window.

pub mod aggregate;
pub mod classify;
pub mod reduce;
pub mod types;
pub mod utility;

pub use aggregate::aggregate;
pub use reduce::uptime_percent;
pub use types::{DayBucket, DayMap, DowntimeMaps, Target};
