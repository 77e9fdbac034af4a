//! # Twine EDC
//!
//! Eddy Dissipation Concept (EDC) combustion closure with presumed-PDF
//! sub-grid temperature statistics.
//!
//! The closure estimates, per computational cell, the fraction of fluid
//! occupied by fine turbulent structures, and combines it with a presumed
//! distribution of the sub-grid temperature to produce linearized species
//! reaction rates and a heat release field.
//!
//! ## Crate layout
//!
//! - [`models`]: The combustion closure itself ([`models::combustion::edc`]).
//! - [`support`]: Numerical building blocks used by the closure: the
//!   fine-structure mixing model, the presumed-PDF engine, the spatial filter,
//!   numeric constraints, and unit extensions.
//!
//! ## Host collaborators
//!
//! Mesh storage, turbulence fields, thermo data and chemistry-rate evaluation
//! belong to the host solver. The closure reaches them through the traits in
//! [`models::combustion::edc`].
//!
//! Note: Only utilities in [`support`] and the closure types re-exported from
//! [`models::combustion::edc`] are part of the public API.

pub mod models;
pub mod support;
