// src/tests/common.rs

//! Shared fixtures and helpers for _nalalib_ tests.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::common::{path_to_fpath, FPath, File};
use crate::config::Config;
use crate::data::accesslog::{LogRecord, RequestTime};

use ::flate2::write::GzEncoder;
use ::flate2::Compression;
use ::tempfile::TempDir;

/// a well-formed access log line;
/// endpoint `/api/v1/banners/25019354`, duration `0.390`
pub const LINE_BANNERS: &str = r#"1.196.116.32 -  - [29/Jun/2017:03:50:22 +0300] "GET /api/v1/banners/25019354 HTTP/1.1" 200 927 "-" "Lynx/2.8.8dev.9" "-" "1498697422-2190034393-4708-9752759" "dc7161be3" 0.390"#;

/// a line missing the quoted referer and user agent fields;
/// does not match the grammar
pub const LINE_MALFORMED: &str = r#"1.99.174.176 3b81f63526fa8 - [29/Jun/2017:03:50:22 +0300] "GET /api/1/photogenic_banners/list/?server_name=WIN7RB4 HTTP/1.1" 200 12 0.133"#;

/// Render a well-formed line for an arbitrary `endpoint` and duration.
/// `request_time` is passed as text so tests control the exact lexical form.
pub fn build_line(
    endpoint: &str,
    request_time: &str,
) -> String {
    format!(
        r#"1.196.116.32 -  - [29/Jun/2017:03:50:22 +0300] "GET {} HTTP/1.1" 200 927 "-" "-" "-" "-" "-" {}"#,
        endpoint, request_time,
    )
}

/// A `LogRecord` as the parser would produce, with an arbitrary raw
/// request line and duration.
pub fn make_record(
    request: &str,
    request_time: RequestTime,
) -> LogRecord {
    LogRecord {
        remote_addr: String::from("1.196.116.32"),
        remote_user: String::from("-"),
        http_x_real_ip: String::from("-"),
        time_local: String::from("29/Jun/2017:03:50:22 +0300"),
        request: String::from(request),
        status: 200,
        body_bytes_sent: 927,
        http_referer: String::from("-"),
        http_user_agent: String::from("-"),
        http_x_forwarded_for: String::from("\"-\""),
        http_x_request_id: String::from("-"),
        http_x_rb_user: String::from("-"),
        request_time,
    }
}

/// create a plain text file `file_name` under `dir`
pub fn create_file(
    dir: &Path,
    file_name: &str,
    content: &str,
) -> FPath {
    let path = dir.join(file_name);
    fs::write(&path, content).unwrap();

    path_to_fpath(&path)
}

/// create a gzip-compressed text file `file_name` under `dir`
pub fn create_gz_file(
    dir: &Path,
    file_name: &str,
    content: &str,
) -> FPath {
    let path = dir.join(file_name);
    let file: File = File::create(&path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder
        .write_all(content.as_bytes())
        .unwrap();
    encoder.finish().unwrap();

    path_to_fpath(&path)
}

/// Scaffold one pipeline run: a temporary directory holding `log/`,
/// `reports/`, and `templates/report.html`, and a `Config` wired to them.
/// The `TempDir` must be held; dropping it removes the scaffolding.
pub fn setup_pipeline() -> (TempDir, Config) {
    let tmpdir = TempDir::new().unwrap();
    let log_dir = tmpdir.path().join("log");
    let report_dir = tmpdir.path().join("reports");
    let template_dir = tmpdir.path().join("templates");
    fs::create_dir(&log_dir).unwrap();
    fs::create_dir(&report_dir).unwrap();
    fs::create_dir(&template_dir).unwrap();
    let template_path = template_dir.join("report.html");
    fs::write(&template_path, "<html>$table_json</html>").unwrap();
    let config = Config {
        report_size: 5,
        report_dir: path_to_fpath(&report_dir),
        log_dir: path_to_fpath(&log_dir),
        log_file_path: None,
        template_path: path_to_fpath(&template_path),
    };

    (tmpdir, config)
}
