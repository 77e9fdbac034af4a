//! Traits through which the host solver supplies fields and chemistry.
//!
//! All traits are object safe and `Send + Sync`: cells are evaluated in
//! parallel and every worker reads the same host objects.

use std::sync::Arc;

use uom::si::f64::{MassDensity, ThermodynamicTemperature, Time};

use crate::support::units::{
    DissipationRate, KinematicViscosity, MassReactionRate, SpecificEnthalpy,
    SpecificKineticEnergy,
};

use super::ChemistryError;

/// Turbulence fields, one value per cell.
pub trait TurbulenceFields: Send + Sync {
    fn dissipation_rate(&self) -> &[DissipationRate];
    fn turbulent_kinetic_energy(&self) -> &[SpecificKineticEnergy];
    fn kinematic_viscosity(&self) -> &[KinematicViscosity];
}

/// Mixture thermo fields and species data.
///
/// Species are addressed by their index in [`ReactionThermo::species`].
pub trait ReactionThermo: Send + Sync {
    fn species(&self) -> &[String];
    fn temperature(&self) -> &[ThermodynamicTemperature];
    fn density(&self) -> &[MassDensity];
    fn mass_fraction(&self, species: usize) -> &[f64];

    /// Enthalpy of formation per unit mass of species `species`.
    fn formation_enthalpy(&self, species: usize) -> SpecificEnthalpy;
}

/// Thermochemical state handed to the chemistry model.
///
/// `temperature` is the zone temperature being evaluated, not necessarily the
/// cell mean. Mass fractions are clamped to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellState<'a> {
    pub cell: usize,
    pub temperature: ThermodynamicTemperature,
    pub density: MassDensity,
    pub mass_fractions: &'a [f64],
}

/// Reaction-rate evaluation supplied by the host.
pub trait ChemistryModel: Send + Sync {
    /// Writes the net mass production rate of every species for `state`
    /// reacting over `residence_time` into `rates`.
    ///
    /// `rates` has one entry per species and is zeroed before each call.
    ///
    /// # Errors
    ///
    /// Returns a [`ChemistryError`] if the rates cannot be evaluated.
    fn reaction_rates(
        &self,
        state: &CellState<'_>,
        residence_time: Time,
        rates: &mut [MassReactionRate],
    ) -> Result<(), ChemistryError>;

    /// Characteristic chemical time of `state`, if the model defines one.
    ///
    /// Only the v2016 mixing model asks for it.
    fn chemical_time_scale(&self, state: &CellState<'_>) -> Option<Time>;
}

impl<T: ReactionThermo + ?Sized> ReactionThermo for Box<T> {
    fn species(&self) -> &[String] {
        (**self).species()
    }

    fn temperature(&self) -> &[ThermodynamicTemperature] {
        (**self).temperature()
    }

    fn density(&self) -> &[MassDensity] {
        (**self).density()
    }

    fn mass_fraction(&self, species: usize) -> &[f64] {
        (**self).mass_fraction(species)
    }

    fn formation_enthalpy(&self, species: usize) -> SpecificEnthalpy {
        (**self).formation_enthalpy(species)
    }
}

impl<T: ChemistryModel + ?Sized> ChemistryModel for Arc<T> {
    fn reaction_rates(
        &self,
        state: &CellState<'_>,
        residence_time: Time,
        rates: &mut [MassReactionRate],
    ) -> Result<(), ChemistryError> {
        (**self).reaction_rates(state, residence_time, rates)
    }

    fn chemical_time_scale(&self, state: &CellState<'_>) -> Option<Time> {
        (**self).chemical_time_scale(state)
    }
}
