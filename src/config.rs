//! Runtime settings, taken from CLI flags with environment fallbacks.
//!
//! `dotenvy` loads a `.env` file before parsing, so any `STATUS_*` variable
//! can live there instead of on the command line.

use chrono::{DateTime, Utc};
use clap::Args;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://status.wasabi.com/api/v2";
pub const DEFAULT_WINDOW_DAYS: u32 = 90;

#[derive(Debug, Clone, Args)]
pub struct SettingsArgs {
    /// Base URL of the Statuspage v2 API
    #[arg(long, env = "STATUS_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Number of trailing days tracked for uptime
    #[arg(long, env = "STATUS_WINDOW_DAYS", default_value_t = DEFAULT_WINDOW_DAYS)]
    pub window_days: u32,

    /// HTTP request timeout in seconds
    #[arg(long, env = "STATUS_HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Evaluate as of this RFC 3339 instant instead of the current time
    #[arg(long, env = "STATUS_NOW")]
    pub now: Option<DateTime<Utc>>,
}

/// Resolved settings consumed by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base: String,
    pub window_days: u32,
    pub timeout: Duration,
    pub now: DateTime<Utc>,
}

impl Settings {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.window_days == 0 {
            anyhow::bail!("window_days must be greater than zero");
        }
        if self.timeout.is_zero() {
            anyhow::bail!("timeout_secs must be greater than zero");
        }
        Ok(())
    }
}

impl From<SettingsArgs> for Settings {
    fn from(args: SettingsArgs) -> Self {
        Self {
            api_base: args.api_base,
            window_days: args.window_days,
            timeout: Duration::from_secs(args.timeout_secs),
            now: args.now.unwrap_or_else(Utc::now),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            window_days: DEFAULT_WINDOW_DAYS,
            timeout: Duration::from_secs(30),
            now: Utc::now(),
        }
    }
}
