//! Stretch the positive part of a raw column onto a fixed-length grid.

use shapematch_chi2::MatchError;
use shapematch_dtw::Curve;

use crate::IoError;

/// A column resampled onto a uniform grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Resampled {
    /// Interpolated samples, one per grid point.
    pub curve: Curve,
    /// Row of the column maximum divided by the number of positive samples.
    pub peak_position: f64,
}

/// Resample the strictly positive samples of `column` onto `grid_len` evenly
/// spaced points.
///
/// The positive samples, in row order, are spread evenly over `[0, 100]` and
/// linearly interpolated at the grid points; missing and non-positive cells are
/// dropped. `col_index` only labels errors.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::InvalidGridLength`] | `grid_len` is zero |
/// | [`IoError::NoPositiveSamples`] | no cell is greater than zero |
pub fn resample(
    column: &[Option<f64>],
    grid_len: usize,
    col_index: usize,
) -> Result<Resampled, IoError> {
    if grid_len == 0 {
        return Err(IoError::InvalidGridLength);
    }
    let positive: Vec<f64> = column.iter().flatten().copied().filter(|&v| v > 0.0).collect();
    if positive.is_empty() {
        return Err(IoError::NoPositiveSamples { col_index });
    }

    // First maximum over the present cells, as a row index.
    let peak_row = column
        .iter()
        .enumerate()
        .filter_map(|(row, cell)| cell.map(|v| (row, v)))
        .fold(None, |best: Option<(usize, f64)>, (row, v)| match best {
            Some((_, bv)) if bv >= v => best,
            _ => Some((row, v)),
        })
        .map_or(0, |(row, _)| row);
    let peak_position = peak_row as f64 / positive.len() as f64;

    let values = interpolate(&positive, grid_len);
    let curve = Curve::new(values).map_err(|e| IoError::InvalidCurve {
        col_index,
        source: MatchError::from(e),
    })?;

    Ok(Resampled {
        curve,
        peak_position,
    })
}

/// Linear interpolation of evenly spaced `samples` at `grid_len` evenly spaced
/// points covering the same span. Endpoints are reproduced exactly.
fn interpolate(samples: &[f64], grid_len: usize) -> Vec<f64> {
    let last = samples.len() - 1;
    if last == 0 || grid_len == 1 {
        return vec![samples[0]; grid_len];
    }
    let scale = last as f64 / (grid_len - 1) as f64;
    (0..grid_len)
        .map(|g| {
            let t = g as f64 * scale;
            let i = (t.floor() as usize).min(last - 1);
            let frac = t - i as f64;
            samples[i] * (1.0 - frac) + samples[i + 1] * frac
        })
        .collect()
}
