use thiserror::Error;

/// Errors that can occur while evaluating a presumed distribution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PdfError {
    /// The spread used for normalization is not strictly positive.
    #[error("invalid input: sigma must be strictly positive, got {sigma}")]
    InvalidInput { sigma: f64 },

    /// A target probability lies outside `[0, 1]`.
    #[error("invalid probability {probability}, expected a value in [0, 1]")]
    InvalidProbability { probability: f64 },

    /// The distribution name is not one of the supported families.
    #[error("unsupported distribution '{name}', expected one of {allowed:?}")]
    UnsupportedDistribution {
        name: String,
        allowed: &'static [&'static str],
    },

    /// A truncation window or zone is empty, inverted, or not finite.
    ///
    /// A non-positive zone width is reported as the empty first zone.
    #[error("invalid truncation bounds: left={left}, right={right}")]
    InvalidTruncationBounds { left: f64, right: f64 },

    /// The zone width is so small that the zone count would exceed
    /// [`MAX_ZONES`](super::MAX_ZONES).
    #[error(
        "invalid zone width {span}, expected at least {} for a truncation window of width {width} (at most {} zones)",
        .width / super::MAX_ZONES as f64,
        super::MAX_ZONES
    )]
    InvalidZoneWidth { span: f64, width: f64 },

    /// An evaluation produced a non-finite value or divided by a vanishing mass.
    ///
    /// Zone routines recover from this locally; it only surfaces from the
    /// pointwise functions.
    #[error("numerically degenerate evaluation: {context}")]
    NumericDegenerate { context: String },
}

impl PdfError {
    pub(super) fn degenerate(context: impl Into<String>) -> Self {
        Self::NumericDegenerate {
            context: context.into(),
        }
    }
}
