// src/processor.rs

//! The run-once pipeline driver: select the newest dated log file, stream
//! and parse it, aggregate per-endpoint statistics, and render the ranked
//! report.
//!
//! Purely sequential; the stream is consumed to completion before the
//! report is built. All state is local to one [`run`] invocation.

use std::path::Path;

use crate::common::FPath;
use crate::config::Config;
use crate::printer::report::{build_report, load_template, render_report, write_report};
use crate::readers::logfinder::{find_latest_file, SelectedFile};
use crate::readers::logreader::LogReader;
use crate::stats::aggregator::{aggregate, LogSummary, ReportRow};

use ::anyhow::{Context, Result};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::tracing::{info, warn};

/// Outcome of one pipeline run that did not fail.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RunOutcome {
    /// a report was written at the contained path
    Report(FPath),
    /// no dated log file in the log directory; nothing to do, not an error
    NoLogFile,
}

/// Run the pipeline once with `config`.
///
/// Per-line grammar mismatches never surface here; they are contained in
/// the reader. Everything that does surface is fatal to the run and is
/// returned for the caller (the only layer allowed to terminate the
/// process) to report.
pub fn run(config: &Config) -> Result<RunOutcome> {
    defn!("({:?})", config);

    let selected: SelectedFile = match find_latest_file(Path::new(&config.log_dir))
        .with_context(|| format!("failed to scan log directory {:?}", config.log_dir))?
    {
        Some(val) => val,
        None => {
            warn!(log_dir = %config.log_dir, "there is no log file to process");
            defx!("return NoLogFile");
            return Ok(RunOutcome::NoLogFile);
        }
    };
    info!(
        file = %selected.file_path,
        date = %selected.file_date,
        "selected log file"
    );

    let reader: LogReader = LogReader::open(&selected)
        .with_context(|| format!("failed to open log file {:?}", selected.file_path))?;
    let summary: LogSummary = aggregate(reader)
        .with_context(|| format!("failed to analyze log file {:?}", selected.file_path))?;
    info!(
        records = summary.total_records,
        endpoints = summary.endpoints.len(),
        "aggregated log records"
    );

    let rows: Vec<ReportRow> = build_report(summary.into_report_rows(), config.report_size);
    let template: String = load_template(Path::new(&config.template_path))
        .with_context(|| format!("failed to read report template {:?}", config.template_path))?;
    let rendered: String = render_report(&template, &rows)
        .context("failed to render the report table")?;
    let report_path: FPath = write_report(
        Path::new(&config.report_dir),
        &selected.file_date,
        &rendered,
    )
    .with_context(|| format!("failed to write the report under {:?}", config.report_dir))?;
    defx!("return Report({:?})", report_path);

    Ok(RunOutcome::Report(report_path))
}
