// src/data/accesslog.rs

//! Data container for one parsed nginx access log line, a [`LogRecord`],
//! and the fixed-format grammar that produces it.
//!
//! The grammar matches the `log_format ui_short` lines written by the
//! nginx frontends, e.g.
//!
//! ```text
//! 1.196.116.32 -  - [29/Jun/2017:03:50:22 +0300] "GET /api/v1/banners/25019354 HTTP/1.1" 200 927 "-" "Lynx/2.8.8dev.9" "-" "1498697422-2190034393-4708-9752759" "dc7161be3" 0.390
//! ```
//!
//! A line either matches the whole grammar or it does not;
//! there is no partial extraction.

use ::lazy_static::lazy_static;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// request duration in seconds, always non-negative
pub type RequestTime = f64;

lazy_static! {
    /// The grammar for one access log line. Compiled once.
    ///
    /// The trailing `request_time` requires both an integer part and a
    /// fractional part; a duration without a decimal point does not match.
    static ref ACCESSLOG_PATTERN: Regex = Regex::new(
        r#"(?x)
        ^
        (?P<remote_addr>\S+)
        \s+(?P<remote_user>\S+)
        \s+(?P<http_x_real_ip>\S+)
        \s+\[(?P<time_local>[^\]]+)\]
        \s+"(?P<request>[^"]*)"
        \s+(?P<status>\d{3})
        \s+(?P<body_bytes_sent>\d+)
        \s+"(?P<http_referer>[^"]*)"
        \s+"(?P<http_user_agent>[^"]*)"
        \s+(?P<http_x_forwarded_for>\S+)
        \s+"(?P<http_x_request_id>[^"]*)"
        \s+"(?P<http_x_rb_user>[^"]*)"
        \s+(?P<request_time>\d+\.\d+)
        $"#
    )
    .unwrap();
}

/// One parsed access log line.
///
/// Immutable once created by [`parse_accesslog_line`]; consumed by the
/// aggregation stage, never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct LogRecord {
    pub remote_addr: String,
    pub remote_user: String,
    pub http_x_real_ip: String,
    /// raw bracketed timestamp, e.g. `29/Jun/2017:03:50:22 +0300`
    pub time_local: String,
    /// raw request line, e.g. `GET /api/v1/banners/25019354 HTTP/1.1`
    pub request: String,
    pub status: u16,
    pub body_bytes_sent: u64,
    pub http_referer: String,
    pub http_user_agent: String,
    pub http_x_forwarded_for: String,
    pub http_x_request_id: String,
    pub http_x_rb_user: String,
    pub request_time: RequestTime,
}

impl LogRecord {
    /// The endpoint token of the request line; the second of 2+
    /// whitespace-separated tokens, e.g. `/api/v1/banners/25019354`.
    ///
    /// Returns `None` for degenerate request lines with fewer than
    /// two tokens (seen in the wild as `"0"` and similar junk).
    pub fn endpoint(&self) -> Option<&str> {
        let mut tokens = self.request.split_whitespace();
        tokens.next()?;

        tokens.next()
    }
}

/// Attempt to match one stripped, non-empty `line` against the access log
/// grammar. Returns `None` when the line does not match; the caller decides
/// how to report that (a mismatch is recoverable, never fatal).
pub fn parse_accesslog_line(line: &str) -> Option<LogRecord> {
    let captures = match ACCESSLOG_PATTERN.captures(line) {
        Some(val) => val,
        None => {
            defñ!("no grammar match for line len {}", line.len());
            return None;
        }
    };
    // `status`, `body_bytes_sent`, and `request_time` were matched as digit
    // sequences so these `parse` calls only fail on absurd out-of-range values
    let status: u16 = captures["status"].parse::<u16>().ok()?;
    let body_bytes_sent: u64 = captures["body_bytes_sent"].parse::<u64>().ok()?;
    let request_time: RequestTime = captures["request_time"].parse::<RequestTime>().ok()?;

    Some(LogRecord {
        remote_addr: captures["remote_addr"].to_string(),
        remote_user: captures["remote_user"].to_string(),
        http_x_real_ip: captures["http_x_real_ip"].to_string(),
        time_local: captures["time_local"].to_string(),
        request: captures["request"].to_string(),
        status,
        body_bytes_sent,
        http_referer: captures["http_referer"].to_string(),
        http_user_agent: captures["http_user_agent"].to_string(),
        http_x_forwarded_for: captures["http_x_forwarded_for"].to_string(),
        http_x_request_id: captures["http_x_request_id"].to_string(),
        http_x_rb_user: captures["http_x_rb_user"].to_string(),
        request_time,
    })
}
