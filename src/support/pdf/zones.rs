//! Zone partitioning of a truncation window.
//!
//! Zones approximate the integral over the presumed distribution by a finite
//! sum: each zone contributes its probability and is represented by its
//! conditional mean. A zone whose statistics cannot be evaluated (no mass,
//! non-finite result) is kept with probability zero and its midpoint as
//! representative value, and is counted as degenerate.

use serde::{Deserialize, Serialize};

use super::{
    Distribution, PdfError, StandardDensity, Truncation, evaluate::expectation_between_truncated,
    quantile::quantile_truncated,
};

/// Upper limit on the number of zones a single partition may produce.
pub const MAX_ZONES: usize = 4096;

/// Relative slack when deciding whether a span divides the window exactly.
const DIVISIBILITY_TOL: f64 = 1e-9;

/// How zone edges are placed inside the truncation window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ZoneLayout {
    /// Zones of equal width in the normalized variable; the last zone is
    /// clipped to the right bound.
    #[default]
    EqualWidth,

    /// Same zone count as [`ZoneLayout::EqualWidth`], with edges at quantiles
    /// of the truncated distribution so every zone holds equal probability.
    EqualProbability,
}

/// Probability and representative normalized value of one zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub probability: f64,
    pub value: f64,
}

/// Ordered zone statistics spanning a truncation window.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneStatistics {
    zones: Vec<Zone>,
    degenerate: usize,
}

impl ZoneStatistics {
    #[must_use]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Number of zones that fell back to zero probability.
    #[must_use]
    pub fn degenerate_zones(&self) -> usize {
        self.degenerate
    }

    #[must_use]
    pub fn total_probability(&self) -> f64 {
        self.zones.iter().map(|zone| zone.probability).sum()
    }
}

/// Returns the zone count for `span` over `truncation`.
fn zone_count(span: f64, truncation: Truncation) -> Result<usize, PdfError> {
    // A non-positive span gives an empty first zone `[left, left + span]`.
    if !(span.is_finite() && span > 0.0) {
        let left = truncation.left();
        return Err(PdfError::InvalidTruncationBounds {
            left,
            right: left + span,
        });
    }

    let width = truncation.width();
    let ratio = width / span;
    let count = (ratio - DIVISIBILITY_TOL * ratio.max(1.0)).ceil().max(1.0);
    if count > MAX_ZONES as f64 {
        return Err(PdfError::InvalidZoneWidth { span, width });
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(count as usize)
}

/// Equal-width zone edges `[left, left + span, ..., right]`.
///
/// # Errors
///
/// Returns [`PdfError::InvalidTruncationBounds`] if `span` is not strictly
/// positive, and [`PdfError::InvalidZoneWidth`] if it would produce more than
/// [`MAX_ZONES`] zones.
pub fn zone_edges(span: f64, truncation: Truncation) -> Result<Vec<f64>, PdfError> {
    let count = zone_count(span, truncation)?;
    let left = truncation.left();

    #[allow(clippy::cast_precision_loss)]
    let mut edges: Vec<f64> = (0..count).map(|i| left + i as f64 * span).collect();
    edges.push(truncation.right());
    Ok(edges)
}

/// Zone edges at equal-probability quantiles, falling back to equal width
/// when a quantile cannot be resolved.
fn quantile_edges(
    span: f64,
    truncation: Truncation,
    distribution: Distribution,
) -> Result<Vec<f64>, PdfError> {
    let count = zone_count(span, truncation)?;
    let mut edges = Vec::with_capacity(count + 1);
    edges.push(truncation.left());

    for i in 1..count {
        #[allow(clippy::cast_precision_loss)]
        let target = i as f64 / count as f64;
        match quantile_truncated(target, truncation, distribution) {
            Ok(x) => edges.push(x.max(edges[i - 1])),
            Err(err) => {
                log::warn!(
                    "equal-probability zoning of {distribution} fell back to equal width: {err}"
                );
                return zone_edges(span, truncation);
            }
        }
    }

    edges.push(truncation.right());
    Ok(edges)
}

/// Probability of each equal-width zone of the truncated distribution.
///
/// Degenerate zones report probability zero.
///
/// # Errors
///
/// Returns [`PdfError::InvalidTruncationBounds`] or
/// [`PdfError::InvalidZoneWidth`] for an unusable `span`.
pub fn zone_probabilities(
    span: f64,
    truncation: Truncation,
    distribution: Distribution,
) -> Result<Vec<f64>, PdfError> {
    let stats = zone_statistics(span, truncation, distribution, ZoneLayout::EqualWidth)?;
    Ok(stats.iter().map(|zone| zone.probability).collect())
}

/// Conditional mean of each equal-width zone of the truncated distribution.
///
/// Degenerate zones report their midpoint.
///
/// # Errors
///
/// Returns [`PdfError::InvalidTruncationBounds`] or
/// [`PdfError::InvalidZoneWidth`] for an unusable `span`.
pub fn zone_values(
    span: f64,
    truncation: Truncation,
    distribution: Distribution,
) -> Result<Vec<f64>, PdfError> {
    let stats = zone_statistics(span, truncation, distribution, ZoneLayout::EqualWidth)?;
    Ok(stats.iter().map(|zone| zone.value).collect())
}

/// Probabilities and conditional means of every zone, in order.
///
/// # Errors
///
/// Returns [`PdfError::InvalidTruncationBounds`] or
/// [`PdfError::InvalidZoneWidth`] for an unusable `span`.
pub fn zone_statistics(
    span: f64,
    truncation: Truncation,
    distribution: Distribution,
    layout: ZoneLayout,
) -> Result<ZoneStatistics, PdfError> {
    let edges = match layout {
        ZoneLayout::EqualWidth => zone_edges(span, truncation)?,
        ZoneLayout::EqualProbability => quantile_edges(span, truncation, distribution)?,
    };

    let window_mass = distribution.mass_between(truncation.left(), truncation.right());
    let mut degenerate = 0;

    let zones = edges
        .windows(2)
        .map(|edge| {
            let (a, b) = (edge[0], edge[1]);
            let probability = distribution.mass_between(a, b) / window_mass;
            let value = expectation_between_truncated(a, b, truncation, distribution);

            match value {
                Ok(value) if probability.is_finite() && probability >= 0.0 => Zone {
                    probability,
                    value,
                },
                _ => {
                    degenerate += 1;
                    Zone {
                        probability: 0.0,
                        value: 0.5 * (a + b),
                    }
                }
            }
        })
        .collect();

    Ok(ZoneStatistics { zones, degenerate })
}
