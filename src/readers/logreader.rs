// src/readers/logreader.rs

//! The `logreader` module opens a [`SelectedFile`] and lazily yields one
//! [`LogRecord`] per parseable line.
//!
//! The stream is finite and single-pass; it is not restartable.
//! A line failing the grammar is reported and skipped (recoverable).
//! An I/O failure mid-stream (file vanished, permission denied, corrupt
//! gzip data) is yielded as an `Err` item and is fatal to the run.
//!
//! [`SelectedFile`]: crate::readers::logfinder::SelectedFile
//! [`LogRecord`]: crate::data::accesslog::LogRecord

use std::io::{BufRead, BufReader, Lines, Result};

use crate::common::{fpath_to_path, File, FileType};
use crate::data::accesslog::{parse_accesslog_line, LogRecord};
use crate::readers::logfinder::SelectedFile;

// `flate2` is for gzip files.
use ::flate2::read::GzDecoder;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::tracing::warn;

/// Count of lines, for mismatch accounting
pub type LineCount = u64;

/// Streaming reader over one access log file.
///
/// Created by [`LogReader::open`]. Implements [`Iterator`] over
/// `Result<LogRecord>`; the underlying file handle closes on drop,
/// on every exit path.
pub struct LogReader {
    lines: Lines<Box<dyn BufRead>>,
    /// lines dropped so far for failing the grammar
    mismatches: LineCount,
}

impl LogReader {
    /// Open `selected` for buffered text reading, transparently wrapping
    /// gzip files in a decompressor.
    pub fn open(selected: &SelectedFile) -> Result<LogReader> {
        defn!("({:?}, {:?})", selected.file_path, selected.file_type);
        let file: File = File::open(fpath_to_path(&selected.file_path))?;
        let reader: Box<dyn BufRead> = match selected.file_type {
            FileType::Gz => Box::new(BufReader::new(GzDecoder::new(file))),
            FileType::File | FileType::Unsupported => Box::new(BufReader::new(file)),
        };
        defx!();

        Ok(LogReader {
            lines: reader.lines(),
            mismatches: 0,
        })
    }

    /// How many lines were dropped for failing the grammar so far.
    pub fn mismatch_count(&self) -> LineCount {
        self.mismatches
    }
}

impl Iterator for LogReader {
    type Item = Result<LogRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // a read error here includes corrupt gzip data; pass it through
            let line: String = match self.lines.next()? {
                Ok(val) => val,
                Err(err) => return Some(Err(err)),
            };
            let line: &str = line.trim();
            if line.is_empty() {
                continue;
            }
            match parse_accesslog_line(line) {
                Some(record) => return Some(Ok(record)),
                None => {
                    self.mismatches += 1;
                    warn!(line = %line, "log line does not match the access log format");
                }
            }
        }
    }
}
