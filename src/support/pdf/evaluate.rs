//! Pointwise presumed-PDF statistics.
//!
//! Untruncated forms use the standardized density directly. Truncated forms
//! renormalize by the probability mass inside the window, so they fail with
//! [`PdfError::NumericDegenerate`] when the window holds no mass (for
//! example a window lying entirely outside a bounded support).

use crate::support::constraint::{Constrained, StrictlyPositive};

use super::{Distribution, PdfError, StandardDensity, Truncation};

/// Smallest probability mass treated as non-empty when renormalizing.
const MIN_MASS: f64 = 1e-300;

/// Maps a physical scalar onto the standardized variable: `(phi - phi_average) / sigma`.
///
/// # Errors
///
/// Returns [`PdfError::InvalidInput`] if `sigma` is not strictly positive.
pub fn normalize(phi: f64, phi_average: f64, sigma: f64) -> Result<f64, PdfError> {
    let sigma = StrictlyPositive::new(sigma).map_err(|_| PdfError::InvalidInput { sigma })?;
    Ok((phi - phi_average) / sigma.into_inner())
}

/// Maps a standardized value back onto the physical scalar.
#[must_use]
pub fn denormalize(
    norm_phi: f64,
    phi_average: f64,
    sigma: Constrained<f64, StrictlyPositive>,
) -> f64 {
    phi_average + sigma.into_inner() * norm_phi
}

/// Density of the standardized distribution at `norm_phi`.
#[must_use]
pub fn density(norm_phi: f64, distribution: Distribution) -> f64 {
    distribution.pdf(norm_phi)
}

/// Density of the truncated distribution at `norm_phi`, zero outside the window.
///
/// # Errors
///
/// Returns [`PdfError::NumericDegenerate`] if the window holds no probability mass.
pub fn density_truncated(
    norm_phi: f64,
    truncation: Truncation,
    distribution: Distribution,
) -> Result<f64, PdfError> {
    let mass = window_mass(truncation, distribution)?;
    if norm_phi < truncation.left() || norm_phi > truncation.right() {
        return Ok(0.0);
    }
    finite(distribution.pdf(norm_phi) / mass, "truncated density")
}

/// Cumulative probability `P(X ≤ norm_phi)` of the standardized distribution.
#[must_use]
pub fn cumulative(norm_phi: f64, distribution: Distribution) -> f64 {
    distribution.cdf(norm_phi)
}

/// Cumulative probability of the truncated distribution.
///
/// Exactly 0 at the left bound and 1 at the right bound.
///
/// # Errors
///
/// Returns [`PdfError::NumericDegenerate`] if the window holds no probability mass.
pub fn cumulative_truncated(
    norm_phi: f64,
    truncation: Truncation,
    distribution: Distribution,
) -> Result<f64, PdfError> {
    let mass = window_mass(truncation, distribution)?;
    let partial = distribution.mass_between(truncation.left(), truncation.clamp(norm_phi));
    Ok((partial / mass).clamp(0.0, 1.0))
}

/// Conditional mean `E[X | X ≤ norm_phi]` of the standardized distribution.
///
/// # Errors
///
/// Returns [`PdfError::NumericDegenerate`] if no mass lies below `norm_phi`.
pub fn expectation(norm_phi: f64, distribution: Distribution) -> Result<f64, PdfError> {
    let mass = distribution.cdf(norm_phi);
    if mass.is_nan() || mass <= MIN_MASS {
        return Err(PdfError::degenerate(format!(
            "no probability mass below {norm_phi}"
        )));
    }
    let mean = finite(distribution.partial_mean(norm_phi) / mass, "expectation")?;
    Ok(mean.min(norm_phi))
}

/// Conditional mean `E[X | a ≤ X ≤ b]` of the standardized distribution.
///
/// # Errors
///
/// Returns [`PdfError::InvalidTruncationBounds`] if `a > b`, or
/// [`PdfError::NumericDegenerate`] if `[a, b]` holds no probability mass.
pub fn expectation_between(a: f64, b: f64, distribution: Distribution) -> Result<f64, PdfError> {
    if a.is_nan() || b.is_nan() || a > b {
        return Err(PdfError::InvalidTruncationBounds { left: a, right: b });
    }
    let mass = distribution.mass_between(a, b);
    if mass.is_nan() || mass <= MIN_MASS {
        return Err(PdfError::degenerate(format!(
            "no probability mass in [{a}, {b}]"
        )));
    }
    let moment = distribution.partial_mean(b) - distribution.partial_mean(a);
    let mean = finite(moment / mass, "conditional mean")?;
    Ok(mean.clamp(a, b))
}

/// Conditional mean of the truncated distribution below `norm_phi`.
///
/// # Errors
///
/// Returns [`PdfError::NumericDegenerate`] if no window mass lies below `norm_phi`.
pub fn expectation_truncated(
    norm_phi: f64,
    truncation: Truncation,
    distribution: Distribution,
) -> Result<f64, PdfError> {
    expectation_between(truncation.left(), truncation.clamp(norm_phi), distribution)
}

/// Conditional mean of the truncated distribution restricted to `[a, b]`.
///
/// The zone is intersected with the window first.
///
/// # Errors
///
/// Returns [`PdfError::NumericDegenerate`] if the intersection holds no mass.
pub fn expectation_between_truncated(
    a: f64,
    b: f64,
    truncation: Truncation,
    distribution: Distribution,
) -> Result<f64, PdfError> {
    let a = truncation.clamp(a);
    let b = truncation.clamp(b);
    expectation_between(a.min(b), b, distribution)
}

/// Probability mass of the standardized distribution inside the window.
fn window_mass(truncation: Truncation, distribution: Distribution) -> Result<f64, PdfError> {
    let mass = distribution.mass_between(truncation.left(), truncation.right());
    if mass > MIN_MASS && mass.is_finite() {
        Ok(mass)
    } else {
        Err(PdfError::degenerate(format!(
            "{distribution} holds no mass in [{}, {}]",
            truncation.left(),
            truncation.right()
        )))
    }
}

fn finite(value: f64, what: &str) -> Result<f64, PdfError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PdfError::degenerate(format!("{what} evaluated to {value}")))
    }
}
