use shapematch_dtw::Curve;

use crate::error::MatchError;

/// A curve paired with a scalar weight.
///
/// Centroid files carry each centroid's cluster weight in their last row;
/// [`WeightedCurve::from_trailing`] splits that layout.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedCurve {
    curve: Curve,
    weight: f64,
}

impl WeightedCurve {
    /// Pair `curve` with `weight`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NonFiniteWeight`] if `weight` is NaN or infinite.
    pub fn new(curve: Curve, weight: f64) -> Result<Self, MatchError> {
        if !weight.is_finite() {
            return Err(MatchError::NonFiniteWeight { weight });
        }
        Ok(Self { curve, weight })
    }

    /// Split a vector whose last element is the weight.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`MatchError::MissingWeight`] | fewer than 2 values |
    /// | [`MatchError::NonFiniteWeight`] | the weight is NaN or infinite |
    /// | [`MatchError::Dtw`] | a sample is NaN or infinite |
    pub fn from_trailing(mut values: Vec<f64>) -> Result<Self, MatchError> {
        if values.len() < 2 {
            return Err(MatchError::MissingWeight { len: values.len() });
        }
        let weight = values.pop().unwrap_or_default();
        Self::new(Curve::new(values)?, weight)
    }

    /// Return the curve.
    #[must_use]
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Return the weight.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Return the number of samples, excluding the weight.
    #[must_use]
    pub fn len(&self) -> usize {
        self.curve.len()
    }

    /// Always `false`; curves are non-empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curve.is_empty()
    }
}

impl From<Curve> for WeightedCurve {
    fn from(curve: Curve) -> Self {
        Self { curve, weight: 1.0 }
    }
}
