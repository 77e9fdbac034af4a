//! Turbulent combustion closures.
//!
//! This module contains closures that turn resolved flow and thermo fields
//! into species reaction rates and heat release for a host solver.

pub mod edc;
