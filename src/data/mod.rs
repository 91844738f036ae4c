// src/data/mod.rs

//! The `data` module is specialized data containers for parsed
//! access log lines.
//!
//! ## Definitions of data
//!
//! ### LogRecord
//!
//! A [`LogRecord`] is one access log line that matched the fixed grammar:
//! the thirteen named fields nginx writes per request, among them the raw
//! request line and the request duration in seconds.
//!
//! Lines that do not match the grammar produce no `LogRecord`;
//! they are reported and dropped by the reader.
//!
//! [`LogRecord`]: crate::data::accesslog::LogRecord

pub mod accesslog;
