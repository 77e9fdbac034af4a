//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical quantities crossing a public
//! boundary (temperatures, turbulence fields, reaction rates, heat release).
//! This module provides the quantities the closure needs that aren't included
//! in [`uom`], plus a couple of helpers.
//!
//! ## Temperature differences
//!
//! The [`TemperatureDifference`] trait provides a [`minus`](TemperatureDifference::minus)
//! method for subtracting one absolute temperature from another, which is how
//! the closure measures the resolved-minus-filtered temperature deviation:
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::thermodynamic_temperature::kelvin;
//! use twine_edc::support::units::TemperatureDifference;
//!
//! let resolved = ThermodynamicTemperature::new::<kelvin>(1800.0);
//! let filtered = ThermodynamicTemperature::new::<kelvin>(1750.0);
//! let deviation = resolved.minus(filtered);
//! // deviation is a TemperatureInterval, not a ThermodynamicTemperature
//! ```
//!
//! ## Raw SI values
//!
//! Quantities defined here have no named units in [`uom`], so they are built
//! from SI values with [`FromSi::from_si`] and read back through `.value`.

mod quantities;
mod temperature_difference;

pub use quantities::{
    DissipationRate, FromSi, KinematicViscosity, MassReactionRate, SpecificEnthalpy,
    SpecificKineticEnergy, VolumetricHeatRelease,
};
pub use temperature_difference::TemperatureDifference;
