// src/tests/logfinder_tests.rs

//! tests for `logfinder.rs` functions

#![allow(non_snake_case)]

use std::path::Path;

use crate::common::FileType;
use crate::readers::logfinder::{
    filename_to_filedate, find_latest_file, mimeguess_to_filetype, SelectedFile,
};
use crate::tests::common::create_file;

extern crate mime_guess;
use mime_guess::MimeGuess;

extern crate tempfile;
use tempfile::TempDir;

extern crate test_case;
use test_case::test_case;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test_case("nginx-access-ui.log-20230215", FileType::File; "no recognized extension")]
#[test_case("nginx-access-ui.log-20230215.gz", FileType::Gz)]
#[test_case("SYSLOG.9.GZ", FileType::Gz; "uppercase gz")]
#[test_case("report-2023.02.15.html", FileType::Unsupported; "html")]
#[test_case("notes-20230215.txt", FileType::Unsupported; "txt")]
#[test_case("archive-20230215.tar", FileType::Unsupported; "tar")]
#[test_case("messages", FileType::File; "bare name")]
fn test_mimeguess_to_filetype(
    file_name: &str,
    check: FileType,
) {
    let mimeguess: MimeGuess = MimeGuess::from_path(Path::new(file_name));
    let filetype: FileType = mimeguess_to_filetype(&mimeguess);
    assert_eq!(
        check, filetype,
        "\n  file {:?}\n  expected FileType::{:?}\n  found FileType::{:?}\n",
        file_name, check, filetype,
    );
}

#[test_case("nginx-access-ui.log-20230215.gz", Some("2023.02.15"))]
#[test_case("nginx-access-ui.log-20170630", Some("2017.06.30"))]
#[test_case("20230101", Some("2023.01.01"); "date only")]
#[test_case("nginx-access-ui.log", None; "no date token")]
#[test_case("nginx-access-ui.log-2023", None; "short token")]
#[test_case("nginx-access-ui.log-20231399.gz", None; "month 13")]
#[test_case("nginx-access-ui.log-20230230", None; "february 30")]
fn test_filename_to_filedate(
    file_name: &str,
    check: Option<&str>,
) {
    assert_eq!(filename_to_filedate(file_name).as_deref(), check);
}

// -------------------------------------------------------------------------------------------------

#[test]
fn test_find_latest_file_correctly_selects_latest() {
    let tmpdir = TempDir::new().unwrap();
    create_file(tmpdir.path(), "nginx-access-ui.log-20230101.gz", "dummy");
    create_file(tmpdir.path(), "nginx-access-ui.log-20230215.gz", "dummy");

    let selected: SelectedFile = find_latest_file(tmpdir.path())
        .unwrap()
        .unwrap();
    assert_eq!(selected.file_name, "nginx-access-ui.log-20230215.gz");
    assert_eq!(selected.file_date, "2023.02.15");
    assert_eq!(selected.file_type, FileType::Gz);
}

#[test]
fn test_find_latest_file_newer_plain_beats_older_gz() {
    let tmpdir = TempDir::new().unwrap();
    create_file(tmpdir.path(), "nginx-access-ui.log-20230215.gz", "dummy");
    create_file(tmpdir.path(), "nginx-access-ui.log-20230301", "dummy");

    let selected: SelectedFile = find_latest_file(tmpdir.path())
        .unwrap()
        .unwrap();
    assert_eq!(selected.file_name, "nginx-access-ui.log-20230301");
    assert_eq!(selected.file_date, "2023.03.01");
    assert_eq!(selected.file_type, FileType::File);
}

#[test]
fn test_find_latest_file_excluded_media_type_is_never_selected() {
    let tmpdir = TempDir::new().unwrap();
    create_file(tmpdir.path(), "nginx-access-ui.log-20230101", "dummy");
    // newer date but a recognized non-gzip media type
    create_file(tmpdir.path(), "notes-20240101.txt", "dummy");
    create_file(tmpdir.path(), "report-20240102.html", "dummy");

    let selected: SelectedFile = find_latest_file(tmpdir.path())
        .unwrap()
        .unwrap();
    assert_eq!(selected.file_name, "nginx-access-ui.log-20230101");
}

#[test]
fn test_find_latest_file_identical_dates_first_sorted_wins() {
    let tmpdir = TempDir::new().unwrap();
    create_file(tmpdir.path(), "b-access.log-20230101.gz", "dummy");
    create_file(tmpdir.path(), "a-access.log-20230101", "dummy");

    let selected: SelectedFile = find_latest_file(tmpdir.path())
        .unwrap()
        .unwrap();
    // only a strictly greater date replaces the selection, so the first
    // file name in sorted order keeps it
    assert_eq!(selected.file_name, "a-access.log-20230101");
}

#[test]
fn test_find_latest_file_empty_dir_is_none() {
    let tmpdir = TempDir::new().unwrap();
    assert_eq!(find_latest_file(tmpdir.path()).unwrap(), None);
}

#[test]
fn test_find_latest_file_no_dated_candidate_is_none() {
    let tmpdir = TempDir::new().unwrap();
    create_file(tmpdir.path(), "nginx-access-ui.log", "dummy");
    create_file(tmpdir.path(), "nginx-access-ui.log-20231399.gz", "dummy");

    assert_eq!(find_latest_file(tmpdir.path()).unwrap(), None);
}

#[test]
fn test_find_latest_file_subdirectory_is_ignored() {
    let tmpdir = TempDir::new().unwrap();
    std::fs::create_dir(tmpdir.path().join("subdir-20240101")).unwrap();
    create_file(tmpdir.path(), "nginx-access-ui.log-20230101", "dummy");

    let selected: SelectedFile = find_latest_file(tmpdir.path())
        .unwrap()
        .unwrap();
    assert_eq!(selected.file_name, "nginx-access-ui.log-20230101");
}

#[test]
fn test_find_latest_file_missing_dir_is_err() {
    let tmpdir = TempDir::new().unwrap();
    let no_such = tmpdir.path().join("no-such-dir");
    assert!(find_latest_file(&no_such).is_err());
}
