//! Report output for CLI
//!
//! Writers take any `Write` so reports can be checked in tests:
//! - time series and release reports: CSV with a header row
//! - data quality: markdown table
//! - gaps: one feature path per line

use std::io::Write;

use crate::interop::{DataQuality, ReleaseAddition, TimeSeries, VersionStats};

use super::errors::CliResult;

/// Write the interop time series as CSV: `date,<keys...>`
pub fn write_time_series<W: Write>(out: &mut W, series: &TimeSeries) -> CliResult<()> {
    writeln!(out, "date,{}", series.permutations.keys().join(","))?;

    for row in &series.rows {
        let cells: Vec<String> = row
            .tally
            .row(&series.permutations)
            .iter()
            .map(u64::to_string)
            .collect();
        writeln!(out, "{},{}", row.date, cells.join(","))?;
    }

    out.flush()?;
    Ok(())
}

/// Write the data-quality markdown table, total row first
pub fn write_quality_table<W: Write>(
    out: &mut W,
    scope: Option<&str>,
    quality: &DataQuality,
) -> CliResult<()> {
    match scope {
        Some(subtree) => writeln!(out, "Status for {}/ directory:", subtree)?,
        None => writeln!(out, "Status for web platform features:")?,
    }
    writeln!(out)?;
    writeln!(
        out,
        "| browser | real values | ranged values | `true` values | `null` values |"
    )?;
    writeln!(out, "| --- | --- | --- | --- | --- |")?;

    write_quality_row(out, "total", &quality.total)?;
    for (browser, stats) in &quality.browsers {
        write_quality_row(out, &browser.replacen('_', " ", 1), stats)?;
    }

    out.flush()?;
    Ok(())
}

fn write_quality_row<W: Write>(out: &mut W, label: &str, stats: &VersionStats) -> CliResult<()> {
    writeln!(
        out,
        "| {} | {:.2}% | {:.2}% | {:.2}% | {:.2}% |",
        label,
        stats.real_percent(),
        stats.ranged_percent(),
        stats.always_percent(),
        stats.unknown_percent()
    )?;
    Ok(())
}

/// Write per-release additions as CSV: `version,date,added,cumulative`
///
/// Undated releases have an empty date cell.
pub fn write_release_additions<W: Write>(out: &mut W, rows: &[ReleaseAddition]) -> CliResult<()> {
    writeln!(out, "version,date,added,cumulative")?;
    for row in rows {
        let date = row.date.map(|d| d.to_string()).unwrap_or_default();
        writeln!(out, "{},{},{},{}", row.version, date, row.added, row.cumulative)?;
    }
    out.flush()?;
    Ok(())
}

/// Write one feature path per line
pub fn write_paths<W: Write>(out: &mut W, paths: &[&str]) -> CliResult<()> {
    for path in paths {
        writeln!(out, "{}", path)?;
    }
    out.flush()?;
    Ok(())
}
