//! Cell-wise EDC closure over a host mesh.
//!
//! [`EdcClosure`] owns the validated settings, the normalized zone table
//! derived from them, and the most recent [`Snapshot`]. A `correct` call
//! reads the host fields, filters the temperature, evaluates every cell in
//! parallel and publishes a new snapshot only if every cell succeeded.

mod cell;
mod coeffs;
mod error;
mod host;
mod snapshot;

#[cfg(test)]
mod test_support;

pub use coeffs::{EdcCoeffs, EdcSettings, FilterCoeffs};
pub use error::{ChemistryError, ConfigError, CorrectError, UnknownSpecies};
pub use host::{CellState, ChemistryModel, ReactionThermo, TurbulenceFields};
pub use snapshot::{Diagnostics, HeatRelease, ReactionRateContribution, Snapshot};

use std::sync::Arc;

use log::{debug, info, warn};
use rayon::prelude::*;
use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

use crate::support::{
    filter::{Connectivity, LaplaceFilter},
    fine_structure::FineStructureModel,
    pdf::{ZoneStatistics, zone_statistics},
};

use cell::{CellContext, CellOutcome};

/// The EDC reaction-rate closure.
///
/// `T` supplies mixture fields and `C` evaluates chemistry. Both are owned;
/// the host updates fields between calls through [`EdcClosure::thermo_mut`].
#[derive(Debug)]
pub struct EdcClosure<T, C> {
    thermo: T,
    chemistry: C,
    connectivity: Connectivity,
    settings: EdcSettings,
    filter: LaplaceFilter,
    zones: ZoneStatistics,
    snapshot: Arc<Snapshot>,
}

impl<T: ReactionThermo, C: ChemistryModel> EdcClosure<T, C> {
    /// Creates a closure with every source zero until the first `correct`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `coeffs` is invalid.
    pub fn new(
        thermo: T,
        chemistry: C,
        connectivity: Connectivity,
        coeffs: &EdcCoeffs,
    ) -> Result<Self, ConfigError> {
        let (settings, zones) = configure(coeffs)?;
        let snapshot = Arc::new(Snapshot::empty(thermo.species(), connectivity.n_cells()));

        info!(
            "EDC closure {} with {} pdf, {} zones over {} cells",
            settings.version,
            settings.distribution,
            zones.len(),
            connectivity.n_cells()
        );

        Ok(Self {
            thermo,
            chemistry,
            connectivity,
            filter: LaplaceFilter::new(settings.filter),
            settings,
            zones,
            snapshot,
        })
    }

    /// Re-reads the coefficients.
    ///
    /// Returns `true` if the active settings changed. On error the previous
    /// settings stay in place.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `coeffs` is invalid.
    pub fn read(&mut self, coeffs: &EdcCoeffs) -> Result<bool, ConfigError> {
        let (settings, zones) = configure(coeffs)?;

        if settings == self.settings {
            debug!("EDC coefficients unchanged");
            return Ok(false);
        }

        info!(
            "EDC settings changed: version {} -> {}, pdf {} -> {}, {} zones",
            self.settings.version,
            settings.version,
            self.settings.distribution,
            settings.distribution,
            zones.len()
        );

        self.filter = LaplaceFilter::new(settings.filter);
        self.settings = settings;
        self.zones = zones;
        Ok(true)
    }

    /// Recomputes reaction rates and heat release from the current fields.
    ///
    /// # Errors
    ///
    /// - [`CorrectError::FieldSize`] if a field does not match the mesh.
    /// - [`CorrectError::Filter`] if the temperature cannot be filtered.
    /// - [`CorrectError::Chemistry`] for the lowest-numbered failing cell.
    pub fn correct(
        &mut self,
        turbulence: &(impl TurbulenceFields + ?Sized),
    ) -> Result<(), CorrectError> {
        let n_cells = self.connectivity.n_cells();
        let thermo = &self.thermo;
        let species = thermo.species();

        check_size("dissipation rate", turbulence.dissipation_rate().len(), n_cells)?;
        check_size(
            "turbulent kinetic energy",
            turbulence.turbulent_kinetic_energy().len(),
            n_cells,
        )?;
        check_size("kinematic viscosity", turbulence.kinematic_viscosity().len(), n_cells)?;
        check_size("temperature", thermo.temperature().len(), n_cells)?;
        check_size("density", thermo.density().len(), n_cells)?;

        let mut mass_fractions = Vec::with_capacity(species.len());
        for (index, name) in species.iter().enumerate() {
            let field = thermo.mass_fraction(index);
            check_size(&format!("mass fraction {name}"), field.len(), n_cells)?;
            mass_fractions.push(field);
        }

        let temperature: Vec<f64> = thermo
            .temperature()
            .iter()
            .map(|t| t.get::<kelvin>())
            .collect();
        let filtered: Vec<ThermodynamicTemperature> = self
            .filter
            .apply(&self.connectivity, &temperature)?
            .into_iter()
            .map(ThermodynamicTemperature::new::<kelvin>)
            .collect();

        let outcomes = {
            let context = CellContext {
                mixing_model: FineStructureModel::new(self.settings.version),
                deviation_similar_coeff: self.settings.deviation_similar_coeff.into_inner(),
                distribution: self.settings.distribution,
                truncation: self.settings.truncation,
                span: self.settings.span.into_inner(),
                zone_layout: self.settings.zone_layout,
                zones: &self.zones,
                chemistry: &self.chemistry,
                species,
                dissipation_rate: turbulence.dissipation_rate(),
                kinetic_energy: turbulence.turbulent_kinetic_energy(),
                viscosity: turbulence.kinematic_viscosity(),
                temperature: thermo.temperature(),
                filtered_temperature: &filtered,
                density: thermo.density(),
                mass_fractions,
                formation_enthalpy: (0..species.len())
                    .map(|index| thermo.formation_enthalpy(index))
                    .collect(),
            };

            (0..n_cells)
                .into_par_iter()
                .map(|index| cell::evaluate(&context, index))
                .collect::<Vec<Result<CellOutcome, CorrectError>>>()
        };
        let outcomes = outcomes.into_iter().collect::<Result<Vec<_>, _>>()?;

        let snapshot = assemble(species, outcomes, filtered, self.zones.degenerate_zones());
        let diagnostics = snapshot.diagnostics;

        debug!(
            "EDC correct: {n_cells} cells, {} reacting, {} at point mass",
            diagnostics.reacting_cells, diagnostics.point_mass_cells
        );
        if diagnostics.degenerate_cells > 0 {
            warn!(
                "EDC correct recovered {} degenerate cells",
                diagnostics.degenerate_cells
            );
        }

        self.snapshot = Arc::new(snapshot);
        Ok(())
    }

    /// Contribution of the species named `name` from the last `correct`.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownSpecies`] if no species has that name.
    pub fn r(&self, name: &str) -> Result<&ReactionRateContribution, UnknownSpecies> {
        self.snapshot.r(name)
    }

    #[must_use]
    pub fn r_index(&self, index: usize) -> Option<&ReactionRateContribution> {
        self.snapshot.r_index(index)
    }

    /// Heat release rate per cell from the last `correct`.
    #[must_use]
    pub fn q_dot(&self) -> &[HeatRelease] {
        self.snapshot.q_dot()
    }

    /// Shared handle to the last published results.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    #[must_use]
    pub fn settings(&self) -> &EdcSettings {
        &self.settings
    }

    /// Normalized zone table shared by all cells with a temperature spread.
    #[must_use]
    pub fn zones(&self) -> &ZoneStatistics {
        &self.zones
    }

    #[must_use]
    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    #[must_use]
    pub fn thermo(&self) -> &T {
        &self.thermo
    }

    pub fn thermo_mut(&mut self) -> &mut T {
        &mut self.thermo
    }

    #[must_use]
    pub fn chemistry(&self) -> &C {
        &self.chemistry
    }
}

/// Validates coefficients and builds the zone table they imply.
fn configure(coeffs: &EdcCoeffs) -> Result<(EdcSettings, ZoneStatistics), ConfigError> {
    let settings = EdcSettings::from_coeffs(coeffs)?;
    let zones = zone_statistics(
        settings.span.into_inner(),
        settings.truncation,
        settings.distribution,
        settings.zone_layout,
    )?;

    if zones.degenerate_zones() > 0 {
        warn!(
            "{} of {} zones carry no probability",
            zones.degenerate_zones(),
            zones.len()
        );
    }

    Ok((settings, zones))
}

fn check_size(field: &str, found: usize, expected: usize) -> Result<(), CorrectError> {
    if found == expected {
        Ok(())
    } else {
        Err(CorrectError::FieldSize {
            field: field.to_owned(),
            expected,
            found,
        })
    }
}

/// Transposes per-cell outcomes into per-species fields.
fn assemble(
    species: &[String],
    outcomes: Vec<CellOutcome>,
    filtered_temperature: Vec<ThermodynamicTemperature>,
    degenerate_zones: usize,
) -> Snapshot {
    let n_cells = outcomes.len();
    let mut implicit = vec![Vec::with_capacity(n_cells); species.len()];
    let mut explicit = vec![Vec::with_capacity(n_cells); species.len()];
    let mut heat_release = Vec::with_capacity(n_cells);
    let mut mixing = Vec::with_capacity(n_cells);
    let mut diagnostics = Diagnostics {
        degenerate_zones,
        ..Diagnostics::default()
    };

    for outcome in outcomes {
        for (index, (imp, exp)) in outcome.sources.into_iter().enumerate() {
            implicit[index].push(imp);
            explicit[index].push(exp);
        }
        heat_release.push(outcome.heat_release);
        mixing.push(outcome.mixing);

        diagnostics.reacting_cells += usize::from(outcome.reacting);
        diagnostics.point_mass_cells += usize::from(outcome.point_mass);
        diagnostics.degenerate_cells += usize::from(outcome.degenerate);
    }

    Snapshot {
        species: species.to_vec(),
        contributions: implicit
            .into_iter()
            .zip(explicit)
            .map(|(imp, exp)| ReactionRateContribution::from_parts(imp, exp))
            .collect(),
        heat_release,
        filtered_temperature,
        mixing,
        diagnostics,
    }
}
