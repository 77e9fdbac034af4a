//! Presumed-PDF statistics engine.
//!
//! The sub-grid temperature in a cell is not resolved, so its distribution is
//! presumed: a standardized shape ([`Distribution`]) shifted and scaled by the
//! cell's mean and spread, and truncated to a window of the normalized
//! variable ([`Truncation`]). The closure integrates reaction rates over that
//! distribution by splitting the window into zones and evaluating chemistry
//! once per zone at the zone's conditional mean.
//!
//! # Overview
//!
//! - **Normalization**: [`normalize`] and [`denormalize`] map between a
//!   physical scalar and the standardized variable. [`DistributionSpec`]
//!   bundles a family with its mean, spread and truncation.
//! - **Pointwise statistics**: [`density`], [`cumulative`], [`expectation`]
//!   and their truncated forms.
//! - **Zones**: [`zone_probabilities`], [`zone_values`], and the paired
//!   [`zone_statistics`] that also reports recovered degeneracies.
//!
//! # Example
//!
//! ```
//! use twine_edc::support::pdf::{Distribution, Truncation, ZoneLayout, zone_statistics};
//!
//! let uniform: Distribution = "uniform".parse().unwrap();
//! let window = Truncation::new(0.0, 1.0).unwrap();
//!
//! let stats = zone_statistics(0.25, window, uniform, ZoneLayout::EqualWidth).unwrap();
//! assert_eq!(stats.len(), 4);
//! assert!((stats.total_probability() - 1.0).abs() < 1e-12);
//! ```

mod distribution;
mod error;
mod evaluate;
mod presumed;
mod quantile;
mod truncation;
mod zones;

pub use distribution::{Distribution, Normal, StandardDensity, Triangular, Uniform};
pub use error::PdfError;
pub use evaluate::{
    cumulative, cumulative_truncated, denormalize, density, density_truncated, expectation,
    expectation_between, expectation_between_truncated, expectation_truncated, normalize,
};
pub use presumed::DistributionSpec;
pub use quantile::quantile_truncated;
pub use truncation::Truncation;
pub use zones::{
    MAX_ZONES, Zone, ZoneLayout, ZoneStatistics, zone_edges, zone_probabilities,
    zone_statistics, zone_values,
};
