use crate::support::constraint::{Constrained, StrictlyPositive};

use super::{
    Distribution, PdfError, Truncation, Zone, ZoneStatistics, cumulative_truncated,
    density_truncated, denormalize,
};

/// A presumed distribution of a physical scalar.
///
/// The standardized `distribution` is shifted to `mean`, scaled by `sigma`,
/// and truncated to `truncation` in the normalized variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionSpec {
    pub distribution: Distribution,
    pub mean: f64,
    pub sigma: Constrained<f64, StrictlyPositive>,
    pub truncation: Truncation,
}

impl DistributionSpec {
    /// # Errors
    ///
    /// Returns [`PdfError::InvalidInput`] if `sigma` is not strictly positive
    /// and finite, or if `mean` is not finite.
    pub fn new(
        distribution: Distribution,
        mean: f64,
        sigma: f64,
        truncation: Truncation,
    ) -> Result<Self, PdfError> {
        let invalid = PdfError::InvalidInput { sigma };
        if !(mean.is_finite() && sigma.is_finite()) {
            return Err(invalid);
        }
        let sigma = StrictlyPositive::new(sigma).map_err(|_| invalid)?;

        Ok(Self {
            distribution,
            mean,
            sigma,
            truncation,
        })
    }

    /// Normalized value of `phi`.
    #[must_use]
    pub fn normalize(&self, phi: f64) -> f64 {
        (phi - self.mean) / self.sigma.into_inner()
    }

    /// Physical value of the normalized `x`.
    #[must_use]
    pub fn denormalize(&self, x: f64) -> f64 {
        denormalize(x, self.mean, self.sigma)
    }

    /// Physical bounds of the truncation window.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        (
            self.denormalize(self.truncation.left()),
            self.denormalize(self.truncation.right()),
        )
    }

    /// Density per unit of the physical scalar.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::NumericDegenerate`] if the window holds no mass.
    pub fn density(&self, phi: f64) -> Result<f64, PdfError> {
        let x = self.normalize(phi);
        Ok(density_truncated(x, self.truncation, self.distribution)? / self.sigma.into_inner())
    }

    /// Probability that the scalar does not exceed `phi`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::NumericDegenerate`] if the window holds no mass.
    pub fn cumulative(&self, phi: f64) -> Result<f64, PdfError> {
        cumulative_truncated(self.normalize(phi), self.truncation, self.distribution)
    }

    /// The same distribution with its window raised so that no value lies
    /// below `floor`.
    ///
    /// Returns `self` unchanged when the window already lies above `floor`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::InvalidTruncationBounds`] if the whole window lies
    /// below `floor`.
    pub fn clipped_below(&self, floor: f64) -> Result<Self, PdfError> {
        let left = self.normalize(floor);
        if left <= self.truncation.left() {
            return Ok(*self);
        }

        Ok(Self {
            truncation: Truncation::new(left, self.truncation.right())?,
            ..*self
        })
    }

    /// Maps normalized zone values onto the physical scalar.
    ///
    /// Probabilities are unchanged.
    #[must_use]
    pub fn physical_zones(&self, zones: &ZoneStatistics) -> Vec<Zone> {
        zones
            .iter()
            .map(|zone| Zone {
                probability: zone.probability,
                value: self.denormalize(zone.value),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::pdf::{Uniform, ZoneLayout, zone_statistics};

    fn temperature_spec() -> DistributionSpec {
        DistributionSpec::new(
            Distribution::default(),
            1500.0,
            200.0,
            Truncation::new(-3.0, 3.0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn physical_round_trip() {
        let presumed = temperature_spec();
        assert_relative_eq!(presumed.normalize(1700.0), 1.0);
        assert_relative_eq!(presumed.denormalize(-1.5), 1200.0);
        assert_eq!(presumed.bounds(), (900.0, 2100.0));
    }

    #[test]
    fn cumulative_spans_the_window() {
        let presumed = temperature_spec();
        assert_relative_eq!(presumed.cumulative(900.0).unwrap(), 0.0);
        assert_relative_eq!(presumed.cumulative(1500.0).unwrap(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(presumed.cumulative(2100.0).unwrap(), 1.0);
        assert_relative_eq!(presumed.cumulative(5000.0).unwrap(), 1.0);
    }

    #[test]
    fn density_scales_with_sigma() {
        let uniform = DistributionSpec::new(
            Distribution::Uniform(Uniform),
            0.0,
            2.0,
            Truncation::new(-1.0, 1.0).unwrap(),
        )
        .unwrap();

        // Window [-2, 2] in physical units with flat density.
        assert_relative_eq!(uniform.density(0.5).unwrap(), 0.25, epsilon = 1e-12);
        assert_relative_eq!(uniform.density(3.0).unwrap(), 0.0);
    }

    #[test]
    fn zones_in_physical_units() {
        let presumed = temperature_spec();
        let stats =
            zone_statistics(1.0, presumed.truncation, presumed.distribution, ZoneLayout::EqualWidth)
                .unwrap();

        let zones = presumed.physical_zones(&stats);
        assert_eq!(zones.len(), 6);
        let mean: f64 = zones.iter().map(|z| z.probability * z.value).sum();
        assert_relative_eq!(mean, 1500.0, epsilon = 1e-6);
        assert!(zones.iter().all(|z| (900.0..=2100.0).contains(&z.value)));
    }

    #[test]
    fn clipping_raises_the_lower_bound() {
        let presumed = temperature_spec();
        assert_eq!(presumed.clipped_below(500.0).unwrap(), presumed);

        let clipped = presumed.clipped_below(1100.0).unwrap();
        assert_relative_eq!(clipped.truncation.left(), -2.0);
        assert_relative_eq!(clipped.bounds().0, 1100.0);
        assert_relative_eq!(clipped.bounds().1, 2100.0);
        assert_relative_eq!(clipped.cumulative(1100.0).unwrap(), 0.0);

        assert!(matches!(
            presumed.clipped_below(2500.0),
            Err(PdfError::InvalidTruncationBounds { .. })
        ));
    }

    #[test]
    fn rejects_bad_spread() {
        let window = Truncation::new(-1.0, 1.0).unwrap();
        for sigma in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                DistributionSpec::new(Distribution::default(), 0.0, sigma, window),
                Err(PdfError::InvalidInput { .. })
            ));
        }
        assert!(DistributionSpec::new(Distribution::default(), f64::NAN, 1.0, window).is_err());
    }
}
