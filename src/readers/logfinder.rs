// src/readers/logfinder.rs

//! Search a log directory for the most recently dated access log,
//! and prepare data needed to create a [`LogReader`] instance.
//!
//! [`LogReader`]: crate::readers::logreader::LogReader

use std::fs;
use std::io::Result;
use std::path::Path;

use crate::common::{path_to_fpath, FPath, FileType};

use ::chrono::NaiveDate;
use ::lazy_static::lazy_static;
use ::mime_guess::MimeGuess;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::tracing::debug;

lazy_static! {
    /// a contiguous 8-digit date token embedded in a file name,
    /// e.g. the `20230215` of `nginx-access-ui.log-20230215.gz`
    static ref DATE_TOKEN: Regex = Regex::new(r"(\d{8})").unwrap();
}

/// strftime specifier for the date token in a file name
const FILENAME_DATE_FORMAT: &str = "%Y%m%d";
/// strftime specifier for the normalized date carried in a [`SelectedFile`]
/// and embedded in the report file name
const REPORT_DATE_FORMAT: &str = "%Y.%m.%d";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// SelectedFile
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The log file chosen by [`find_latest_file`]. At most one per run.
/// Computed once at startup, read-only afterward.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectedFile {
    /// file name within the log directory
    pub file_name: FPath,
    /// full path to the file
    pub file_path: FPath,
    /// content encoding guessed from the file name
    pub file_type: FileType,
    /// date from the file name normalized to `YYYY.MM.DD`;
    /// the rendered report's file name embeds this
    pub file_date: String,
}

/// Map a [`MimeGuess`] for a directory entry to a [`FileType`].
///
/// The processable set is pinned deliberately narrow so behavior does not
/// depend on the breadth of the guess table: a name with no recognized
/// extension is presumed plain text, a gzip guess is gzip, and every other
/// recognized media type (`.html`, `.txt`, `.xz`, …) is unsupported.
///
/// [`MimeGuess`]: https://docs.rs/mime_guess/2.0.5/mime_guess/struct.MimeGuess.html
pub fn mimeguess_to_filetype(mimeguess: &MimeGuess) -> FileType {
    // see https://www.rfc-editor.org/rfc/rfc6713.html#section-3
    const APP_GZIP: &str = "application/gzip";
    // see https://superuser.com/a/901963/167043
    const APP_XGZIP: &str = "application/x-gzip";

    if mimeguess.is_empty() {
        defñ!("empty mimeguess; return {:?}", FileType::File);
        return FileType::File;
    }
    for mimeguess_ in mimeguess.iter() {
        defo!("check {:?}", mimeguess_);
        let lower: String = mimeguess_.to_string().to_lowercase();
        match lower.as_str() {
            APP_GZIP | APP_XGZIP => {
                defñ!("return {:?}", FileType::Gz);
                return FileType::Gz;
            }
            _ => {}
        }
    }

    defñ!("return {:?}", FileType::Unsupported);

    FileType::Unsupported
}

/// Extract the first 8-digit token from `file_name` and normalize it to
/// `YYYY.MM.DD`. Returns `None` when there is no token or the token is not
/// a valid calendar date (`20230230`, `20231399`, …).
pub(crate) fn filename_to_filedate(file_name: &str) -> Option<String> {
    let token = DATE_TOKEN.find(file_name)?;
    let date: NaiveDate = match NaiveDate::parse_from_str(token.as_str(), FILENAME_DATE_FORMAT) {
        Ok(val) => val,
        Err(_err) => {
            defñ!("not a calendar date {:?} in {:?}; {}", token.as_str(), file_name, _err);
            return None;
        }
    };

    Some(date.format(REPORT_DATE_FORMAT).to_string())
}

/// Scan `log_dir` (non-recursive) and select the processable file with the
/// greatest date embedded in its name.
///
/// Entries are visited in sorted file name order so the selection is
/// deterministic: among candidates with an identical date the first in
/// sorted order wins (only a strictly greater date replaces the selection).
///
/// Returns `Ok(None)` when no candidate carries a valid date; that is the
/// recognized "no log file to process" outcome, not an error. Failures to
/// list the directory are I/O errors and propagate.
pub fn find_latest_file(log_dir: &Path) -> Result<Option<SelectedFile>> {
    defn!("({:?})", log_dir);

    let mut file_names: Vec<(FPath, FPath)> = Vec::new();
    for entry in fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            defo!("skip non-file {:?}", path);
            continue;
        }
        let file_name: FPath = entry.file_name().to_string_lossy().to_string();
        file_names.push((file_name, path_to_fpath(&path)));
    }
    file_names.sort();

    let mut selected: Option<SelectedFile> = None;
    for (file_name, file_path) in file_names.into_iter() {
        let mimeguess: MimeGuess = MimeGuess::from_path(Path::new(&file_path));
        let file_type: FileType = mimeguess_to_filetype(&mimeguess);
        if !file_type.is_supported() {
            debug!(file = %file_name, "unknown file type found; skipping");
            continue;
        }
        let file_date: String = match filename_to_filedate(&file_name) {
            Some(val) => val,
            None => {
                defo!("no usable date in {:?}", file_name);
                continue;
            }
        };
        let improves: bool = match selected.as_ref() {
            None => true,
            Some(sel) => file_date > sel.file_date,
        };
        if improves {
            defo!("select {:?} dated {}", file_name, file_date);
            selected = Some(SelectedFile {
                file_name,
                file_path,
                file_type,
                file_date,
            });
        }
    }
    defx!("return {:?}", selected);

    Ok(selected)
}
