//! I/O error types for shapematch-io.

use std::path::PathBuf;

use shapematch_chi2::MatchError;

/// Errors from file I/O, CSV parsing, resampling, and result serialization.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the CSV parser encounters a malformed record.
    #[error("CSV parse error in {path} at byte offset {offset}")]
    CsvParse {
        /// Path to the CSV file.
        path: PathBuf,
        /// Byte offset where the error occurred.
        offset: u64,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when the file holds no data rows, or only a weight row.
    #[error("empty dataset (no sample rows) in {path}")]
    EmptyDataset {
        /// Path to the CSV file.
        path: PathBuf,
    },

    /// Returned when a row has a different number of fields than the first row.
    #[error("inconsistent row length in {path}: row {row_index} has {got} fields, expected {expected}")]
    InconsistentRowLength {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index.
        row_index: usize,
        /// Field count of the first row.
        expected: usize,
        /// Field count of this row.
        got: usize,
    },

    /// Returned when a cell is NaN, Inf, or not a float.
    #[error("non-finite value in {path}: row {row_index}, column {col_index}, raw value \"{raw}\"")]
    NonFiniteValue {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index.
        row_index: usize,
        /// Zero-based column index.
        col_index: usize,
        /// The raw string that failed to parse.
        raw: String,
    },

    /// Returned when a curve that must be complete has an empty cell.
    #[error("missing value in column {col_index}, row {row_index}")]
    MissingValue {
        /// Zero-based row index.
        row_index: usize,
        /// Zero-based column index.
        col_index: usize,
    },

    /// Returned when a column has no strictly positive sample to resample.
    #[error("column {col_index} has no positive samples")]
    NoPositiveSamples {
        /// Zero-based column index.
        col_index: usize,
    },

    /// Returned when the resampling grid has zero points.
    #[error("resampling grid must have at least one point")]
    InvalidGridLength,

    /// Returned when a column cannot form a valid curve.
    #[error("column {col_index} is not a valid curve")]
    InvalidCurve {
        /// Zero-based column index.
        col_index: usize,
        /// Underlying validation error.
        source: MatchError,
    },

    /// Returned when the experiment name contains characters outside `[a-zA-Z0-9_-]`.
    #[error("invalid experiment name \"{name}\": must match [a-zA-Z0-9_-]+")]
    InvalidExperimentName {
        /// The invalid name.
        name: String,
    },

    /// Returned when the output directory cannot be created.
    #[error("cannot create output directory {path}")]
    OutputDirCreate {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a JSON result file cannot be written.
    #[error("cannot write file {path}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a CSV result file cannot be written.
    #[error("cannot write CSV file {path}")]
    CsvWrite {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when a result cannot be serialized to JSON.
    #[error("cannot serialize result")]
    Serialize(#[from] serde_json::Error),
}
