//! Intensity curves: the sample sequences every distance in this crate compares.
//!
//! A curve's index is its position axis (for resampled profiles, a point on a
//! uniform grid) and each sample is an intensity. Validation happens once, at
//! construction, so the DTW and envelope code never re-checks its inputs.

use std::ops::Index;

use crate::error::DtwError;

/// Reject empty sample sequences and report the first NaN or infinite sample.
fn check_samples(samples: &[f64]) -> Result<(), DtwError> {
    if samples.is_empty() {
        return Err(DtwError::EmptySeries);
    }
    match samples.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(DtwError::NonFiniteValue { index }),
        None => Ok(()),
    }
}

/// Position and height of a curve's highest sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    /// Index of the first sample holding the maximum.
    pub index: usize,
    /// The maximum intensity.
    pub value: f64,
}

/// Owned intensity curve: at least one sample, every sample finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve(Vec<f64>);

impl Curve {
    /// Build a curve from its samples.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptySeries`] | `samples` is empty |
    /// | [`DtwError::NonFiniteValue`] | a sample is NaN or infinite |
    pub fn new(samples: Vec<f64>) -> Result<Self, DtwError> {
        check_samples(&samples)?;
        Ok(Self(samples))
    }

    /// Borrow the samples as a [`CurveView`] for distance computations.
    #[must_use]
    pub fn as_view(&self) -> CurveView<'_> {
        CurveView(&self.0)
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a constructed curve.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Highest sample and where it first occurs.
    #[must_use]
    pub fn peak(&self) -> Peak {
        let mut peak = Peak {
            index: 0,
            value: self.0[0],
        };
        for (index, &value) in self.0.iter().enumerate().skip(1) {
            if value > peak.value {
                peak = Peak { index, value };
            }
        }
        peak
    }

    /// Height of the peak. Clusters are reported in ascending order of this value.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.peak().value
    }
}

impl AsRef<[f64]> for Curve {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Borrowed curve samples, validated like [`Curve`]. `Copy`, so it can be
/// passed by value into the distance routines.
#[derive(Debug, Clone, Copy)]
pub struct CurveView<'a>(&'a [f64]);

impl<'a> CurveView<'a> {
    /// Validate a borrowed sample slice.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Curve::new`].
    pub fn new(samples: &'a [f64]) -> Result<Self, DtwError> {
        check_samples(samples)?;
        Ok(Self(samples))
    }

    /// The samples, with the lifetime of the borrowed data.
    #[must_use]
    pub fn as_slice(&self) -> &'a [f64] {
        self.0
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a constructed view.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Index<usize> for CurveView<'_> {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}
