use std::fmt;

/// Zero-based cluster index attached to each clustered curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClusterLabel(usize);

impl ClusterLabel {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the zero-based cluster index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }

    /// Translate an internal cluster id into its reported position.
    ///
    /// `position_of[id]` is the output slot of internal cluster `id`.
    pub(crate) fn remap(self, position_of: &[usize]) -> Self {
        Self(position_of[self.0])
    }
}

impl fmt::Display for ClusterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
