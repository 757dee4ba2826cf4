//! Trait and snapshot type for reading a status page.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::model::{Component, Incident, Summary};

/// Read-only view of a status page provider (e.g. a Statuspage v2 API).
#[async_trait::async_trait]
pub trait StatusApi: Send + Sync {
    /// Page summary: monitored components and the page-wide indicator.
    async fn summary(&self) -> Result<Summary>;

    /// Incident history, newest first as the provider returns it.
    async fn incidents(&self) -> Result<Vec<Incident>>;
}

/// Everything the report needs, fetched in one go.
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    pub summary: Summary,
    pub incidents: Vec<Incident>,
    pub fetched_at: DateTime<Utc>,
}

impl StatusSnapshot {
    pub fn components(&self) -> &[Component] {
        &self.summary.components
    }
}

/// Issues both queries concurrently and waits for both. If either fails the
/// whole load fails; there is no partial snapshot.
pub async fn load_snapshot<A: StatusApi + ?Sized>(api: &A) -> Result<StatusSnapshot> {
    let (summary, incidents) = tokio::try_join!(api.summary(), api.incidents())
        .context("Failed to load status data")?;

    info!(
        components = summary.components.len(),
        incidents = incidents.len(),
        "Status data loaded"
    );

    Ok(StatusSnapshot {
        summary,
        incidents,
        fetched_at: Utc::now(),
    })
}
