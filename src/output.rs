//! Rendering of a [`StatusReport`] for the terminal.
//!
//! Supports a plain-text view, pretty JSON, and one CSV row per component.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use tracing::debug;

use crate::downtime::{DayMap, Target};
use crate::report::{ComponentRow, IncidentCard, StatusReport};

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &StatusReport) {
    debug!("{:#?}", report);
}

/// Writes any serializable value as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(mut out: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Writes a single day map as a JSON object keyed by `YYYY-MM-DD`.
pub fn write_day_map<W: Write>(out: W, day_map: &DayMap) -> Result<()> {
    write_json(out, day_map)
}

#[derive(Debug, Serialize)]
struct UptimeRecord<'a> {
    target: &'a str,
    name: &'a str,
    group: &'a str,
    uptime_percent: f64,
    uptime_class: &'a str,
    downtime_days: usize,
}

impl<'a> From<&'a ComponentRow> for UptimeRecord<'a> {
    fn from(row: &'a ComponentRow) -> Self {
        let target = match &row.target {
            Target::Component(id) => id.as_str(),
            Target::Overall => "overall",
        };
        Self {
            target,
            name: &row.name,
            group: row.group.as_str(),
            uptime_percent: row.uptime_percent,
            uptime_class: row.uptime_class,
            downtime_days: row.downtime_days,
        }
    }
}

/// Writes one CSV row per row of the report, with a header.
pub fn write_csv<W: Write>(out: W, report: &StatusReport) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(true).from_writer(out);
    for row in report.rows() {
        writer.serialize(UptimeRecord::from(row))?;
    }
    writer.flush()?;
    debug!(rows = report.regions.len() + report.services.len() + 1, "CSV written");
    Ok(())
}

/// Compact bar: `.` operational, `-` maintenance, `m` minor, `M` major.
pub fn bar_string(row: &ComponentRow) -> String {
    row.days
        .iter()
        .map(|d| match d.class {
            "major" => 'M',
            "minor" => 'm',
            "maintenance" => '-',
            _ => '.',
        })
        .collect()
}

fn write_row<W: Write>(out: &mut W, row: &ComponentRow) -> Result<()> {
    writeln!(out, "  {:<32} {:>18}  [{}]", row.name, row.uptime_label, row.uptime_class)?;
    writeln!(out, "    {}", bar_string(row))?;
    Ok(())
}

/// Writes the uptime table: overall, regions, then services.
pub fn write_uptime_table<W: Write>(mut out: W, report: &StatusReport) -> Result<()> {
    writeln!(out, "Overall")?;
    write_row(&mut out, &report.overall)?;

    if !report.regions.is_empty() {
        writeln!(out, "\nRegions")?;
        for row in &report.regions {
            write_row(&mut out, row)?;
        }
    }

    if !report.services.is_empty() {
        writeln!(out, "\nServices")?;
        for row in &report.services {
            write_row(&mut out, row)?;
        }
    }
    Ok(())
}

fn write_card<W: Write>(out: &mut W, card: &IncidentCard) -> Result<()> {
    writeln!(out, "* {} [{}]", card.name, card.impact)?;

    let mut meta = Vec::new();
    if let Some(date) = &card.date {
        meta.push(date.clone());
    }
    if let Some(duration) = &card.duration {
        meta.push(duration.clone());
    }
    if !meta.is_empty() {
        writeln!(out, "  {}", meta.join(" · "))?;
    }
    if let Some(link) = &card.shortlink {
        writeln!(out, "  {link}")?;
    }
    if !card.components.is_empty() {
        writeln!(out, "  Affected: {}", card.components.join(", "))?;
    }
    for update in &card.updates {
        let time = update.time.as_deref().unwrap_or("");
        writeln!(out, "    {:<14} {:<13} {}", update.status, time, update.body)?;
    }
    Ok(())
}

/// Writes incident cards, or a placeholder when there are none.
pub fn write_incidents<W: Write>(mut out: W, report: &StatusReport) -> Result<()> {
    if report.incidents.is_empty() {
        writeln!(
            out,
            "No incidents in the last {} days.",
            report.window_days
        )?;
        return Ok(());
    }
    for card in &report.incidents {
        write_card(&mut out, card)?;
    }
    Ok(())
}

/// Full text report: banner, uptime table, incidents.
pub fn write_text<W: Write>(mut out: W, report: &StatusReport) -> Result<()> {
    writeln!(out, "{} ({})", report.status.text, report.status.class.as_str())?;
    writeln!(
        out,
        "Uptime over the last {} days, as of {} (fetched {})\n",
        report.window_days,
        report.generated_at.format("%Y-%m-%d %H:%M UTC"),
        report.fetched_at.format("%Y-%m-%d %H:%M UTC")
    )?;
    write_uptime_table(&mut out, report)?;
    writeln!(out, "\nIncidents")?;
    write_incidents(&mut out, report)?;
    Ok(())
}
