// src/printer/report.rs

//! Rank and bound the [`ReportRow`] table, serialize it to JSON, substitute
//! it into the HTML template, and write the report document.
//!
//! Rendering is a pure function of the template text and the table;
//! the file writes here are the only side effects.
//!
//! [`ReportRow`]: crate::stats::aggregator::ReportRow

use std::fs;
use std::io::{Error, ErrorKind, Result};
use std::path::{Path, PathBuf};

use crate::common::{path_to_fpath, FPath};
use crate::stats::aggregator::ReportRow;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::tracing::info;

/// placeholder in the template text replaced with the serialized table
const TABLE_PLACEHOLDER: &str = "$table_json";

/// Sort `rows` descending by the numeric value of the formatted `time_sum`,
/// then truncate to at most `report_size` rows. Order among equal sums is
/// unspecified.
pub fn build_report(
    mut rows: Vec<ReportRow>,
    report_size: usize,
) -> Vec<ReportRow> {
    defn!("({} rows, report_size {})", rows.len(), report_size);
    rows.sort_by(|a, b| time_sum_value(b).total_cmp(&time_sum_value(a)));
    rows.truncate(report_size);
    defx!("return {} rows", rows.len());

    rows
}

/// numeric value of the formatted `time_sum`, the ranking key
fn time_sum_value(row: &ReportRow) -> f64 {
    row.time_sum.parse::<f64>().unwrap_or(0.0)
}

/// Read the HTML template document.
pub fn load_template(template_path: &Path) -> Result<String> {
    defñ!("({:?})", template_path);

    fs::read_to_string(template_path)
}

/// Substitute the serialized `rows` table for the `$table_json` placeholder
/// in `template`. Pure; does not touch the filesystem.
pub fn render_report(
    template: &str,
    rows: &[ReportRow],
) -> Result<String> {
    let table_json: String = match ::serde_json::to_string(rows) {
        Ok(val) => val,
        Err(err) => return Err(Error::new(ErrorKind::Other, err)),
    };

    Ok(template.replace(TABLE_PLACEHOLDER, &table_json))
}

/// Write `rendered` to `report-<file_date>.html` under `report_dir` and
/// return the written path. The report directory must already exist;
/// failures to write are fatal to the run.
pub fn write_report(
    report_dir: &Path,
    file_date: &str,
    rendered: &str,
) -> Result<FPath> {
    defn!("({:?}, {:?})", report_dir, file_date);
    let report_path: PathBuf = report_dir.join(format!("report-{}.html", file_date));
    fs::write(&report_path, rendered)?;
    let report_fpath: FPath = path_to_fpath(&report_path);
    info!(path = %report_fpath, "a report has been created");
    defx!("return {:?}", report_fpath);

    Ok(report_fpath)
}
