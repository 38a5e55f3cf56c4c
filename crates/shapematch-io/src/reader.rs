//! Column-oriented CSV curve reader with input validation.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::CurveTable;

/// Reads curves stored one per column from a headerless CSV file.
///
/// Expected format:
/// - No header; row `r` holds sample `r` of every curve
/// - Every row has the same number of fields
/// - A trailing delimiter on the first row marks a trailing empty field that
///   is dropped from every row
/// - Empty interior cells are read as missing samples
/// - Optionally the last row holds one weight per column
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::EmptyDataset`] | No sample rows |
/// | [`IoError::InconsistentRowLength`] | Row has a different field count than the first |
/// | [`IoError::NonFiniteValue`] | Cell is NaN, Inf, or unparseable float |
/// | [`IoError::MissingValue`] | Weight row has an empty cell |
pub struct CurveReader {
    path: PathBuf,
    weight_row: bool,
}

impl CurveReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            weight_row: false,
        }
    }

    /// Treat the last row as per-column weights.
    #[must_use]
    pub fn with_weight_row(mut self, weight_row: bool) -> Self {
        self.weight_row = weight_row;
        self
    }

    /// Read and validate the CSV file, returning a [`CurveTable`].
    #[instrument(skip(self), fields(path = %self.path.display(), weight_row = self.weight_row))]
    pub fn read(&self) -> Result<CurveTable, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) so the row length check below reports the row instead
        // of a generic CsvParse error.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut rows: Vec<Vec<Option<f64>>> = Vec::new();
        let mut expected_cols = 0usize;
        let mut drop_trailing = false;

        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| IoError::CsvParse {
                path: self.path.clone(),
                offset: e.position().map_or(0, |p| p.byte()),
                source: e,
            })?;

            if row_index == 0 {
                drop_trailing = record.len() > 1 && record.get(record.len() - 1) == Some("");
                expected_cols = record.len() - usize::from(drop_trailing);
                debug!(expected_cols, drop_trailing, "read first row");
            }

            let fields = record.len() - usize::from(drop_trailing);
            if fields != expected_cols {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    expected: expected_cols,
                    got: fields,
                });
            }

            let row = record
                .iter()
                .take(fields)
                .enumerate()
                .map(|(col_index, raw)| self.parse_cell(raw, row_index, col_index))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }

        let weights = if self.weight_row {
            let n_rows = rows.len();
            rows.pop()
                .map(|last| {
                    last.into_iter()
                        .enumerate()
                        .map(|(col_index, cell)| {
                            cell.ok_or(IoError::MissingValue {
                                row_index: n_rows - 1,
                                col_index,
                            })
                        })
                        .collect::<Result<Vec<_>, _>>()
                })
                .transpose()?
        } else {
            None
        };

        if rows.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        let columns: Vec<Vec<Option<f64>>> = (0..expected_cols)
            .map(|c| rows.iter().map(|row| row[c]).collect())
            .collect();

        info!(
            n_curves = columns.len(),
            n_rows = rows.len(),
            weighted = weights.is_some(),
            "curve table loaded"
        );

        Ok(CurveTable::new(columns, weights))
    }

    fn parse_cell(&self, raw: &str, row_index: usize, col_index: usize) -> Result<Option<f64>, IoError> {
        if raw.is_empty() {
            return Ok(None);
        }
        let non_finite = || IoError::NonFiniteValue {
            path: self.path.clone(),
            row_index,
            col_index,
            raw: raw.to_string(),
        };
        let value: f64 = raw.parse().map_err(|_| non_finite())?;
        if !value.is_finite() {
            return Err(non_finite());
        }
        Ok(Some(value))
    }
}
