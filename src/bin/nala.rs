// src/bin/nala.rs

//! Driver program _nala_ drives the [_nalalib_] pipeline.
//!
//! Processes user-passed command-line arguments, loads the effective
//! configuration, installs the diagnostic subscriber (console, or a file
//! when `LOG_FILE_PATH` is configured), then runs the analysis pipeline
//! once: find the newest dated access log, stream and parse it, aggregate
//! per-endpoint statistics, render and write the ranked HTML report.
//!
//! `nala.rs` is the only layer that terminates the process: a run with no
//! processable log file exits cleanly, a fatal failure exits non-zero with
//! a descriptive diagnostic.
//!
//! [_nalalib_]: nalalib

#![allow(non_camel_case_types)]

use std::fs::OpenOptions;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use ::anyhow::{Context, Result};
use ::clap::Parser;
use ::const_format::concatcp;
use ::nalalib::common::FPath;
use ::nalalib::config::Config;
use ::nalalib::processor::{run, RunOutcome};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::tracing::{error, info};
use ::tracing_subscriber::EnvFilter;

const CLI_HELP_AFTER: &str = "\
Configuration defaults:
  REPORT_SIZE    5
  REPORT_DIR     ./reports
  LOG_DIR        ./log
  LOG_FILE_PATH  (unset; diagnostics print to the console)

A passed --config file overrides defaults per present key, e.g.
  {\"REPORT_SIZE\": 100, \"LOG_DIR\": \"/var/log/nginx\"}

DateTime of the report is taken from the name of the newest log file found,
e.g. nginx-access-ui.log-20230215.gz writes report-2023.02.15.html";

#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "nala",
    // write expanded information for the `--version` output
    version = concatcp!(
        "(Nginx Access Log Analyzer)\n",
        "Version: ", env!("CARGO_PKG_VERSION"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
        "Repository: ", env!("CARGO_PKG_REPOSITORY"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Path to a JSON file overriding the configuration defaults.
    #[clap(short = 'c', long)]
    config: Option<String>,
}

/// Install the global diagnostic subscriber. Honors `RUST_LOG`; defaults
/// to `info`. A configured `LOG_FILE_PATH` routes diagnostics to that file
/// (appending), otherwise they print human-readable to stderr.
fn init_diagnostics(log_file_path: Option<&FPath>) -> Result<()> {
    let filter: EnvFilter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(Path::new(path))
                .with_context(|| format!("failed to open diagnostic log file {:?}", path))?;
            ::tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            ::tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
    }

    Ok(())
}

pub fn main() -> ExitCode {
    let args = CLI_Args::parse();

    // failures before the subscriber is installed print bare to stderr
    let config: Config = match args.config.as_deref() {
        Some(config_path) => match Config::from_file(Path::new(config_path)) {
            Ok(val) => val,
            Err(err) => {
                eprintln!("ERROR: {:?}", err);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };
    if let Err(err) = init_diagnostics(config.log_file_path.as_ref()) {
        eprintln!("ERROR: {:?}", err);
        return ExitCode::FAILURE;
    }

    info!(
        report_size = config.report_size,
        report_dir = %config.report_dir,
        log_dir = %config.log_dir,
        log_file_path = config.log_file_path.as_deref().unwrap_or("(unset)"),
        "starting up"
    );
    defn!("config {:?}", config);

    let exitcode: ExitCode = match run(&config) {
        Ok(RunOutcome::Report(_path)) => ExitCode::SUCCESS,
        // a recognized empty-work condition, already logged; not an error
        Ok(RunOutcome::NoLogFile) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:?}", err);
            ExitCode::FAILURE
        }
    };
    defx!("exitcode {:?}", exitcode);

    exitcode
}
