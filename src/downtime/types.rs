//! Data types produced by the downtime aggregation pipeline.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::Impact;

/// Attribution target for downtime: a real component, or the page-wide
/// aggregate. Keeping `Overall` as its own variant means no component id can
/// ever collide with it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Target {
    Component(String),
    Overall,
}

impl Target {
    pub fn component(id: impl Into<String>) -> Self {
        Target::Component(id.into())
    }
}

/// Downtime accumulated for one target on one UTC calendar day.
///
/// `minutes` is additive across incidents and may exceed a full day when
/// incidents overlap.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBucket {
    pub minutes: f64,
    pub max_impact: Impact,
}

impl Default for DayBucket {
    fn default() -> Self {
        Self {
            minutes: 0.0,
            max_impact: Impact::None,
        }
    }
}

/// Day buckets for a single target, keyed by UTC date.
pub type DayMap = BTreeMap<NaiveDate, DayBucket>;

/// Output of [`aggregate`](crate::downtime::aggregate::aggregate): one
/// [`DayMap`] per known component plus one for [`Target::Overall`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DowntimeMaps {
    pub(crate) maps: BTreeMap<Target, DayMap>,
}

impl DowntimeMaps {
    pub fn get(&self, target: &Target) -> Option<&DayMap> {
        self.maps.get(target)
    }

    pub fn component(&self, id: &str) -> Option<&DayMap> {
        self.maps.get(&Target::component(id))
    }

    /// Day map for `target`, or an empty map when the target is unknown.
    pub fn get_or_empty(&self, target: &Target) -> &DayMap {
        static EMPTY: DayMap = BTreeMap::new();
        self.maps.get(target).unwrap_or(&EMPTY)
    }

    pub fn overall(&self) -> &DayMap {
        self.get_or_empty(&Target::Overall)
    }

    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.maps.keys()
    }
}
