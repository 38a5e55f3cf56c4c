//! Domain types for shapematch-io.

use shapematch_chi2::{MatchError, WeightedCurve};
use shapematch_dtw::Curve;

use crate::IoError;

/// A validated experiment name for output file naming.
///
/// Must match `[a-zA-Z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentName(String);

impl ExperimentName {
    /// Parse and validate an experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidExperimentName`] if the name is empty or
    /// contains characters outside `[a-zA-Z0-9_-]`.
    pub fn new(name: String) -> Result<Self, IoError> {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(IoError::InvalidExperimentName { name });
        }
        Ok(Self(name))
    }

    /// Return the experiment name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExperimentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Column-oriented numeric table: one curve per column.
///
/// Produced by [`CurveReader`](crate::CurveReader). Empty cells are kept as
/// `None` so that ragged exports survive until the caller decides how to
/// treat them.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveTable {
    /// `columns[c][r]` is row `r` of column `c`.
    columns: Vec<Vec<Option<f64>>>,
    /// Per-column weights split from the last row, if requested.
    weights: Option<Vec<f64>>,
}

impl CurveTable {
    pub(crate) fn new(columns: Vec<Vec<Option<f64>>>, weights: Option<Vec<f64>>) -> Self {
        Self { columns, weights }
    }

    /// Return the number of curves.
    #[must_use]
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Return the number of sample rows, excluding any weight row.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Return the cells of column `index`, or `None` past the last column.
    #[must_use]
    pub fn column(&self, index: usize) -> Option<&[Option<f64>]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// Iterate over all columns in file order.
    pub fn columns(&self) -> impl Iterator<Item = &[Option<f64>]> {
        self.columns.iter().map(Vec::as_slice)
    }

    /// Return the weight row, if one was read.
    #[must_use]
    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    /// Convert every column into a weighted curve.
    ///
    /// Columns take their weight from the weight row when present and 1.0
    /// otherwise.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::MissingValue`] | a column has an empty cell |
    /// | [`IoError::InvalidCurve`] | a column fails curve validation |
    pub fn into_weighted_curves(self) -> Result<Vec<WeightedCurve>, IoError> {
        let weights = self.weights;
        self.columns
            .into_iter()
            .enumerate()
            .map(|(col_index, cells)| {
                let values = cells
                    .into_iter()
                    .enumerate()
                    .map(|(row_index, cell)| {
                        cell.ok_or(IoError::MissingValue {
                            row_index,
                            col_index,
                        })
                    })
                    .collect::<Result<Vec<f64>, _>>()?;
                let weight = weights.as_ref().map_or(1.0, |w| w[col_index]);
                Curve::new(values)
                    .map_err(MatchError::from)
                    .and_then(|curve| WeightedCurve::new(curve, weight))
                    .map_err(|source| IoError::InvalidCurve { col_index, source })
            })
            .collect()
    }
}
