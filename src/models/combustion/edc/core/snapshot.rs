use uom::si::f64::ThermodynamicTemperature;

use crate::support::{
    fine_structure::MixingState,
    units::{FromSi, MassReactionRate, VolumetricHeatRelease},
};

use super::UnknownSpecies;

/// Heat release rate of one cell.
pub type HeatRelease = VolumetricHeatRelease;

/// Linearized reaction source of one species.
///
/// The source in cell `i` is `implicit[i] * Y[i] + explicit[i]`, where `Y` is
/// the species mass fraction. Consumption is carried by the implicit part
/// so the host can treat it as a sink proportional to `Y`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionRateContribution {
    implicit: Vec<MassReactionRate>,
    explicit: Vec<MassReactionRate>,
}

impl ReactionRateContribution {
    pub(super) fn zeros(n_cells: usize) -> Self {
        Self {
            implicit: vec![MassReactionRate::from_si(0.0); n_cells],
            explicit: vec![MassReactionRate::from_si(0.0); n_cells],
        }
    }

    pub(super) fn from_parts(
        implicit: Vec<MassReactionRate>,
        explicit: Vec<MassReactionRate>,
    ) -> Self {
        debug_assert_eq!(implicit.len(), explicit.len());
        Self { implicit, explicit }
    }

    /// Coefficient multiplying the mass fraction, per cell.
    #[must_use]
    pub fn implicit(&self) -> &[MassReactionRate] {
        &self.implicit
    }

    /// Source independent of the mass fraction, per cell.
    #[must_use]
    pub fn explicit(&self) -> &[MassReactionRate] {
        &self.explicit
    }

    /// Net source in `cell` at mass fraction `mass_fraction`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is out of range.
    #[must_use]
    pub fn evaluate(&self, cell: usize, mass_fraction: f64) -> MassReactionRate {
        self.implicit[cell] * mass_fraction + self.explicit[cell]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.implicit.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.implicit.is_empty()
    }
}

/// Counters describing how a `correct` call went.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Cells with fine structures and non-zero reacting fraction.
    pub reacting_cells: usize,

    /// Reacting cells whose temperature spread vanished.
    pub point_mass_cells: usize,

    /// Cells where a numeric degeneracy was recovered: invalid turbulence
    /// input or a zone temperature clamped at the floor.
    pub degenerate_cells: usize,

    /// Zones of the shared partition that fell back to zero probability.
    pub degenerate_zones: usize,
}

/// Results of one completed `correct` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub(super) species: Vec<String>,
    pub(super) contributions: Vec<ReactionRateContribution>,
    pub(super) heat_release: Vec<HeatRelease>,
    pub(super) filtered_temperature: Vec<ThermodynamicTemperature>,
    pub(super) mixing: Vec<MixingState>,
    pub(super) diagnostics: Diagnostics,
}

impl Snapshot {
    /// A snapshot with every source zero, published before the first `correct`.
    pub(super) fn empty(species: &[String], n_cells: usize) -> Self {
        Self {
            species: species.to_vec(),
            contributions: vec![ReactionRateContribution::zeros(n_cells); species.len()],
            heat_release: vec![HeatRelease::from_si(0.0); n_cells],
            filtered_temperature: Vec::new(),
            mixing: vec![MixingState::none(); n_cells],
            diagnostics: Diagnostics::default(),
        }
    }

    #[must_use]
    pub fn species(&self) -> &[String] {
        &self.species
    }

    /// Contribution of the species named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownSpecies`] if no species has that name.
    pub fn r(&self, name: &str) -> Result<&ReactionRateContribution, UnknownSpecies> {
        self.species
            .iter()
            .position(|species| species == name)
            .map(|index| &self.contributions[index])
            .ok_or_else(|| UnknownSpecies {
                name: name.to_owned(),
                known: self.species.clone(),
            })
    }

    /// Contribution of the species at `index`, if it exists.
    #[must_use]
    pub fn r_index(&self, index: usize) -> Option<&ReactionRateContribution> {
        self.contributions.get(index)
    }

    #[must_use]
    pub fn q_dot(&self) -> &[HeatRelease] {
        &self.heat_release
    }

    /// Filtered temperature used for the similarity spread.
    ///
    /// Empty until the first `correct`.
    #[must_use]
    pub fn filtered_temperature(&self) -> &[ThermodynamicTemperature] {
        &self.filtered_temperature
    }

    /// Fine-structure state of every cell.
    #[must_use]
    pub fn mixing(&self) -> &[MixingState] {
        &self.mixing
    }

    #[must_use]
    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }
}
