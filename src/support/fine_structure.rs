//! Fine-structure mixing model of the Eddy Dissipation Concept.
//!
//! The energy cascade concentrates dissipation in fine structures occupying a
//! mass fraction `gammaL` of the fluid, with mean residence time `tau`. Their
//! reacting fraction enters the closure through the factor
//! `kappa = gammaL^exp1 / (1 - gammaL^exp2)`.
//!
//! Four published variants are supported ([`ModelVersion`]); they differ in
//! the exponents and, for v2016, in computing the cascade constants from the
//! local turbulent Damköhler and Reynolds numbers.
//!
//! # Example
//!
//! ```
//! use twine_edc::support::fine_structure::{FineStructureModel, ModelVersion, Turbulence};
//! use twine_edc::support::units::{
//!     DissipationRate, FromSi, KinematicViscosity, SpecificKineticEnergy,
//! };
//! use uom::si::diffusion_coefficient::square_meter_per_second;
//!
//! let model = FineStructureModel::new(ModelVersion::V2005);
//! let mixing = model.compute(&Turbulence {
//!     dissipation_rate: DissipationRate::from_si(100.0),
//!     kinetic_energy: SpecificKineticEnergy::from_si(1.0),
//!     kinematic_viscosity: KinematicViscosity::new::<square_meter_per_second>(1.5e-5),
//!     chemical_time_scale: None,
//! });
//!
//! assert!(mixing.gamma_l() > 0.0 && mixing.gamma_l() < 1.0);
//! assert!(mixing.kappa() > 0.0);
//! ```

mod model;
mod state;
mod version;

pub use model::{FineStructureModel, GAMMA_EPSILON, compute_mixing, kappa};
pub use state::{MixingState, Turbulence};
pub use version::{Exponents, ModelVersion, UnknownVersion};
