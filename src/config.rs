// src/config.rs

//! Runtime configuration: a static mapping of option names to values,
//! optionally overridden by an external JSON file.
//!
//! Keys present in the override file replace the defaults; absent keys keep
//! them. An unreadable or malformed override file is fatal.

use std::fs;
use std::path::Path;

use crate::common::FPath;

use ::anyhow::{Context, Result};
use ::serde::Deserialize;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defx, defñ};

/// default maximum number of rows in the rendered report
pub const REPORT_SIZE_DEFAULT: usize = 5;
/// default directory receiving `report-<date>.html`
pub const REPORT_DIR_DEFAULT: &str = "./reports";
/// default directory scanned for dated access logs
pub const LOG_DIR_DEFAULT: &str = "./log";
/// path of the HTML template document
pub const TEMPLATE_PATH_DEFAULT: &str = "./templates/report.html";

/// Effective configuration for one run. Owned by the orchestrator.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// maximum rows in the rendered report
    pub report_size: usize,
    /// output directory for the rendered report
    pub report_dir: FPath,
    /// input directory scanned for dated access logs
    pub log_dir: FPath,
    /// when set, diagnostics append to this file instead of the console
    pub log_file_path: Option<FPath>,
    /// the HTML template substituted with the report table
    pub template_path: FPath,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            report_size: REPORT_SIZE_DEFAULT,
            report_dir: FPath::from(REPORT_DIR_DEFAULT),
            log_dir: FPath::from(LOG_DIR_DEFAULT),
            log_file_path: None,
            template_path: FPath::from(TEMPLATE_PATH_DEFAULT),
        }
    }
}

/// Option names accepted in an override file. Unknown keys are ignored;
/// a present key with the wrong shape is an error.
#[derive(Debug, Default, Deserialize)]
struct ConfigOverride {
    #[serde(rename = "REPORT_SIZE")]
    report_size: Option<usize>,
    #[serde(rename = "REPORT_DIR")]
    report_dir: Option<FPath>,
    #[serde(rename = "LOG_DIR")]
    log_dir: Option<FPath>,
    #[serde(rename = "LOG_FILE_PATH")]
    log_file_path: Option<FPath>,
}

impl Config {
    /// The defaults overridden by the JSON file at `config_path`.
    pub fn from_file(config_path: &Path) -> Result<Config> {
        defn!("({:?})", config_path);
        let text: String = fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file {:?}", config_path))?;
        let config_override: ConfigOverride = ::serde_json::from_str(&text)
            .with_context(|| format!("malformed config file {:?}", config_path))?;
        let mut config = Config::default();
        if let Some(report_size) = config_override.report_size {
            config.report_size = report_size;
        }
        if let Some(report_dir) = config_override.report_dir {
            config.report_dir = report_dir;
        }
        if let Some(log_dir) = config_override.log_dir {
            config.log_dir = log_dir;
        }
        if config_override.log_file_path.is_some() {
            config.log_file_path = config_override.log_file_path;
        }
        defx!("return {:?}", config);

        Ok(config)
    }
}
