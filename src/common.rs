// src/common.rs
//
// common imports, type aliases, and other globals (avoids circular imports)

pub use std::fs::File;
pub use std::path::Path;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file-handling
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

// TODO: use `std::path::Path` for `FPath`
/// `F`ake `Path` or `F`ile `Path`
pub type FPath = String;

/// Content encoding of a log file, as guessed from its file name.
///
/// Only two encodings can be processed: plain text and gzip.
/// Anything with a recognized non-gzip media type is [`Unsupported`].
///
/// [`Unsupported`]: FileType::Unsupported
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FileType {
    /// an uncompressed text file; file names with no recognized extension
    /// are presumed to be these
    File,
    /// a gzip-compressed text file, e.g. `access.log-20230215.gz`
    Gz,
    /// a recognized media type that is not processed, e.g. `report.html`
    Unsupported,
}

impl FileType {
    /// Can a file of this type be opened and parsed?
    pub const fn is_supported(&self) -> bool {
        matches!(*self, FileType::File | FileType::Gz)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// path helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Helper function for a slightly annoying set of calls.
pub fn path_to_fpath(path: &std::path::Path) -> FPath {
    // `PathBuf` to `String` https://stackoverflow.com/q/37388107/471376
    (*(path.to_string_lossy())).to_string()
}

/// Helper function for completeness.
pub fn fpath_to_path(path: &FPath) -> &std::path::Path {
    std::path::Path::new(path)
}
