use crate::support::constraint::{Constrained, StrictlyPositive};

use super::PdfError;

/// A finite window `[left, right]` of the normalized variable.
///
/// Outside the window the presumed density is zero; inside it is the
/// standardized density rescaled to unit mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Truncation {
    left: f64,
    right: f64,
}

impl Truncation {
    /// Creates a truncation window.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::InvalidTruncationBounds`] if either bound is not
    /// finite or if `left >= right`.
    pub fn new(left: f64, right: f64) -> Result<Self, PdfError> {
        if left.is_finite() && right.is_finite() && left < right {
            Ok(Self { left, right })
        } else {
            Err(PdfError::InvalidTruncationBounds { left, right })
        }
    }

    /// Creates the window `[-half_width, half_width]`.
    #[must_use]
    pub fn symmetric(half_width: Constrained<f64, StrictlyPositive>) -> Self {
        let half_width = half_width.into_inner();
        Self {
            left: -half_width,
            right: half_width,
        }
    }

    #[must_use]
    pub fn left(&self) -> f64 {
        self.left
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.right
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Clamps `x` into the window.
    #[must_use]
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.left, self.right)
    }
}
