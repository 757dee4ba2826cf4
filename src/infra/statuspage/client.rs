use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::fetch::{HttpClient, fetch_json};
use crate::model::{Incident, IncidentList, Summary};
use crate::services::status_api::StatusApi;

/// Reads a Statuspage v2 API (`/summary.json` and `/incidents.json`).
///
/// Either endpoint can be replaced with a local file path holding the same
/// JSON, which is how offline reports are produced.
pub struct StatuspageClient<C> {
    http: C,
    summary_source: String,
    incidents_source: String,
}

impl<C: HttpClient> StatuspageClient<C> {
    pub fn new(http: C, api_base: &str) -> Self {
        let base = api_base.trim_end_matches('/');
        Self {
            http,
            summary_source: format!("{base}/summary.json"),
            incidents_source: format!("{base}/incidents.json"),
        }
    }

    pub fn with_summary_source(mut self, source: impl Into<String>) -> Self {
        self.summary_source = source.into();
        self
    }

    pub fn with_incidents_source(mut self, source: impl Into<String>) -> Self {
        self.incidents_source = source.into();
        self
    }

    pub fn summary_source(&self) -> &str {
        &self.summary_source
    }

    pub fn incidents_source(&self) -> &str {
        &self.incidents_source
    }
}

#[async_trait]
impl<C: HttpClient> StatusApi for StatuspageClient<C> {
    async fn summary(&self) -> Result<Summary> {
        let summary: Summary = fetch_json(&self.http, &self.summary_source).await?;
        info!(
            source = %self.summary_source,
            components = summary.components.len(),
            "Summary fetched"
        );
        Ok(summary)
    }

    async fn incidents(&self) -> Result<Vec<Incident>> {
        let list: IncidentList = fetch_json(&self.http, &self.incidents_source).await?;
        info!(
            source = %self.incidents_source,
            incidents = list.incidents.len(),
            "Incidents fetched"
        );
        Ok(list.incidents)
    }
}
