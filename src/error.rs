//! Error taxonomy: per-row rejects are recovered, input-source and report
//! failures are fatal to the run.

use thiserror::Error;

/// Why a single input row was rejected. The row is skipped and loading
/// continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("course code malformed (e.g. MEEN 221)")]
    BadCourseCode,
    #[error("days must be a combination of MTWRF")]
    BadDays,
    #[error("start must be HH:MM 24-hour")]
    BadStart,
    #[error("duration must be a positive integer")]
    BadDuration,
    #[error("Lab is set but lab fields are missing (Lab_Days/Lab_Start/Lab_Duration)")]
    IncompleteLab,
}

/// Fatal problems with the input source itself. No partial catalog is used.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not open workbook '{path}': {source}")]
    Workbook {
        path: String,
        #[source]
        source: calamine::Error,
    },
    #[error("file must be .xlsx, .xls, or .csv (got '{0}')")]
    UnsupportedFormat(String),
    #[error("no sheets found in workbook")]
    NoSheet,
    #[error("missing columns: {0}")]
    MissingColumns(String),
}

/// Failure while rendering the output workbook.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write workbook '{path}': {message}")]
    Write { path: String, message: String },
}

/// Top-level failure for a full run.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("no valid section rows loaded; nothing to compute")]
    EmptyCatalog,
    #[error(transparent)]
    Report(#[from] ReportError),
}
