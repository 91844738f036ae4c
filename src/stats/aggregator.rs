// src/stats/aggregator.rs

//! Consume the stream of [`LogRecord`] and accumulate per-endpoint timing
//! statistics, then finalize each endpoint bucket into a [`ReportRow`].
//!
//! All accumulation state lives in one [`LogSummary`] value scoped to a
//! single run; nothing is shared across runs.
//!
//! [`LogRecord`]: crate::data::accesslog::LogRecord

use std::collections::HashMap;
use std::io::{Error, ErrorKind, Result};

use crate::data::accesslog::{LogRecord, RequestTime};

use ::serde::Serialize;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Count of aggregated records
pub type RecordCount = u64;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// EndpointStats, LogSummary
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Running accumulation for one distinct endpoint.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EndpointStats {
    /// occurrences of this endpoint
    pub count: RecordCount,
    /// observed durations in encounter order
    pub request_times: Vec<RequestTime>,
}

/// All accumulation for one run: the total record counter and one
/// [`EndpointStats`] bucket per distinct endpoint.
#[derive(Clone, Debug, Default)]
pub struct LogSummary {
    /// records that contributed to a bucket
    pub total_records: RecordCount,
    /// endpoint token → accumulated stats
    pub endpoints: HashMap<String, EndpointStats>,
}

impl LogSummary {
    fn note(
        &mut self,
        endpoint: &str,
        request_time: RequestTime,
    ) {
        self.total_records += 1;
        let stats: &mut EndpointStats = self
            .endpoints
            .entry(endpoint.to_string())
            .or_default();
        stats.count += 1;
        stats.request_times.push(request_time);
    }

    /// Grand total of every duration sample across all endpoints;
    /// the denominator for `time_perc`.
    pub fn total_time(&self) -> f64 {
        self.endpoints
            .values()
            .flat_map(|stats| stats.request_times.iter())
            .sum()
    }

    /// Finalize every endpoint bucket into a [`ReportRow`].
    /// Row order is unspecified here; ranking happens in the report builder.
    pub fn into_report_rows(self) -> Vec<ReportRow> {
        defn!("({} endpoints, {} records)", self.endpoints.len(), self.total_records);
        let total_records: f64 = self.total_records as f64;
        let total_time: f64 = self.total_time();
        let mut rows: Vec<ReportRow> = Vec::with_capacity(self.endpoints.len());
        for (url, stats) in self.endpoints.into_iter() {
            let time_sum: f64 = stats.request_times.iter().sum();
            let time_max: f64 = stats
                .request_times
                .iter()
                .copied()
                .fold(0.0_f64, f64::max);
            let time_perc: f64 = if total_time > 0.0 {
                time_sum * 100.0 / total_time
            } else {
                // every duration was zero; the share is zero, not NaN
                0.0
            };
            rows.push(ReportRow {
                url,
                count: stats.count,
                time_sum: format_3f(time_sum),
                // deliberate: downstream consumers of the report expect
                // time_avg == time_sum / 2, not a mean over the sample count
                time_avg: format_3f(time_sum / 2.0),
                time_max: format_3f(time_max),
                time_med: format_3f(median(&stats.request_times)),
                count_perc: format_3f(stats.count as f64 * 100.0 / total_records),
                time_perc: format_3f(time_perc),
            });
        }
        defx!("return {} rows", rows.len());

        rows
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ReportRow
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One finalized report entry for one endpoint. Immutable.
///
/// The derived timing fields are stored as strings already formatted to
/// exactly 3 decimal digits; that formatted form is the value serialized
/// into the report table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportRow {
    pub url: String,
    pub count: RecordCount,
    pub time_sum: String,
    pub time_avg: String,
    pub time_max: String,
    pub time_med: String,
    pub count_perc: String,
    pub time_perc: String,
}

/// render to exactly 3 decimal digits, the stored representation of every
/// derived numeric field
fn format_3f(value: f64) -> String {
    format!("{:.3}", value)
}

/// Conventional median: the middle sample, or the mean of the two middle
/// samples for even-sized inputs. `samples` must not be empty.
fn median(samples: &[RequestTime]) -> f64 {
    let mut sorted: Vec<RequestTime> = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid: usize = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// aggregate
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Consume `records` to completion and build a [`LogSummary`].
///
/// Records whose request line holds fewer than two tokens carry no endpoint
/// and are silently excluded (they do not count toward `total_records`).
/// An `Err` item from the stream propagates immediately.
/// Zero contributing records leaves every statistic undefined and is an
/// error, so the caller never renders an empty or NaN-ridden report.
pub fn aggregate<I>(records: I) -> Result<LogSummary>
where
    I: IntoIterator<Item = Result<LogRecord>>,
{
    defn!();
    let mut summary = LogSummary::default();
    for record in records.into_iter() {
        let record: LogRecord = record?;
        let endpoint: &str = match record.endpoint() {
            Some(val) => val,
            None => {
                defo!("request line without endpoint {:?}", record.request);
                continue;
            }
        };
        summary.note(endpoint, record.request_time);
    }
    if summary.total_records == 0 {
        defx!("zero records");
        return Err(Error::new(
            ErrorKind::InvalidData,
            "no log line matched the access log format; statistics are undefined",
        ));
    }
    defx!("return {} endpoints, {} records", summary.endpoints.len(), summary.total_records);

    Ok(summary)
}
