use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use uom::si::{
    diffusion_coefficient::square_meter_per_second,
    f64::{MassDensity, ThermodynamicTemperature, Time},
    mass_density::kilogram_per_cubic_meter,
    thermodynamic_temperature::kelvin,
    time::second,
};

use crate::support::units::{
    DissipationRate, FromSi, KinematicViscosity, MassReactionRate, SpecificEnthalpy,
    SpecificKineticEnergy,
};

use super::{CellState, ChemistryError, ChemistryModel, ReactionThermo, TurbulenceFields};

pub(super) const FUEL: usize = 0;
pub(super) const PRODUCT: usize = 1;

/// Formation enthalpy of the product, J/kg. The fuel is the reference.
pub(super) const PRODUCT_FORMATION_ENTHALPY: f64 = -5.0e6;

#[derive(Debug, Clone)]
pub(super) struct TestTurbulence {
    dissipation_rate: Vec<DissipationRate>,
    kinetic_energy: Vec<SpecificKineticEnergy>,
    viscosity: Vec<KinematicViscosity>,
}

impl TestTurbulence {
    /// Same `epsilon` (m²/s³), `k` (m²/s²) and `nu` (m²/s) in every cell.
    pub(super) fn uniform(n_cells: usize, epsilon: f64, k: f64, nu: f64) -> Self {
        Self {
            dissipation_rate: vec![DissipationRate::from_si(epsilon); n_cells],
            kinetic_energy: vec![SpecificKineticEnergy::from_si(k); n_cells],
            viscosity: vec![KinematicViscosity::new::<square_meter_per_second>(nu); n_cells],
        }
    }

    /// Moderately strong turbulence typical of a jet flame.
    pub(super) fn jet(n_cells: usize) -> Self {
        Self::uniform(n_cells, 100.0, 1.0, 1.5e-5)
    }

    pub(super) fn with_dissipation_rate(mut self, cell: usize, epsilon: f64) -> Self {
        self.dissipation_rate[cell] = DissipationRate::from_si(epsilon);
        self
    }
}

impl TurbulenceFields for TestTurbulence {
    fn dissipation_rate(&self) -> &[DissipationRate] {
        &self.dissipation_rate
    }

    fn turbulent_kinetic_energy(&self) -> &[SpecificKineticEnergy] {
        &self.kinetic_energy
    }

    fn kinematic_viscosity(&self) -> &[KinematicViscosity] {
        &self.viscosity
    }
}

/// A fuel/product mixture with uniform density and composition.
#[derive(Debug, Clone)]
pub(super) struct TestThermo {
    species: Vec<String>,
    temperature: Vec<ThermodynamicTemperature>,
    density: Vec<MassDensity>,
    mass_fractions: Vec<Vec<f64>>,
}

impl TestThermo {
    pub(super) const DENSITY: f64 = 0.3;
    pub(super) const FUEL_FRACTION: f64 = 0.2;

    /// Temperatures in K, one per cell.
    pub(super) fn new(temperatures: &[f64]) -> Self {
        let n_cells = temperatures.len();
        Self {
            species: vec!["FUEL".to_owned(), "PROD".to_owned()],
            temperature: temperatures
                .iter()
                .map(|&t| ThermodynamicTemperature::new::<kelvin>(t))
                .collect(),
            density: vec![MassDensity::new::<kilogram_per_cubic_meter>(Self::DENSITY); n_cells],
            mass_fractions: vec![
                vec![Self::FUEL_FRACTION; n_cells],
                vec![1.0 - Self::FUEL_FRACTION; n_cells],
            ],
        }
    }

    pub(super) fn set_temperature(&mut self, cell: usize, kelvins: f64) {
        self.temperature[cell] = ThermodynamicTemperature::new::<kelvin>(kelvins);
    }

    pub(super) fn set_mass_fraction(&mut self, species: usize, cell: usize, value: f64) {
        self.mass_fractions[species][cell] = value;
    }
}

impl ReactionThermo for TestThermo {
    fn species(&self) -> &[String] {
        &self.species
    }

    fn temperature(&self) -> &[ThermodynamicTemperature] {
        &self.temperature
    }

    fn density(&self) -> &[MassDensity] {
        &self.density
    }

    fn mass_fraction(&self, species: usize) -> &[f64] {
        &self.mass_fractions[species]
    }

    fn formation_enthalpy(&self, species: usize) -> SpecificEnthalpy {
        if species == PRODUCT {
            SpecificEnthalpy::from_si(PRODUCT_FORMATION_ENTHALPY)
        } else {
            SpecificEnthalpy::from_si(0.0)
        }
    }
}

/// Single-step `FUEL -> PROD` with an Arrhenius rate constant.
///
/// Over a residence time `tau` the fuel reacts as a first-order batch
/// reactor, so the mean rate is `-rho * Y * (1 - exp(-k tau)) / tau`.
#[derive(Debug)]
pub(super) struct ArrheniusChemistry {
    pre_exponential: f64,
    activation_temperature: f64,
    max_temperature: f64,
    time_scale_queries: AtomicUsize,
}

impl ArrheniusChemistry {
    pub(super) fn new() -> Self {
        Self {
            pre_exponential: 1.0e8,
            activation_temperature: 15_000.0,
            max_temperature: 5_000.0,
            time_scale_queries: AtomicUsize::new(0),
        }
    }

    fn rate_constant(&self, temperature: f64) -> f64 {
        self.pre_exponential * (-self.activation_temperature / temperature).exp()
    }

    /// Fuel production rate in kg/m³·s (negative).
    pub(super) fn fuel_rate(&self, temperature: f64, density: f64, fuel: f64, tau: f64) -> f64 {
        let k = self.rate_constant(temperature);
        -density * fuel * (-(k * tau)).exp_m1().abs() / tau
    }

    pub(super) fn time_scale_queries(&self) -> usize {
        self.time_scale_queries.load(Ordering::Relaxed)
    }
}

impl ChemistryModel for ArrheniusChemistry {
    fn reaction_rates(
        &self,
        state: &CellState<'_>,
        residence_time: Time,
        rates: &mut [MassReactionRate],
    ) -> Result<(), ChemistryError> {
        let temperature = state.temperature.get::<kelvin>();
        if temperature > self.max_temperature {
            return Err(ChemistryError::new(format!(
                "temperature {temperature} K outside the mechanism range"
            )));
        }

        let fuel = self.fuel_rate(
            temperature,
            state.density.get::<kilogram_per_cubic_meter>(),
            state.mass_fractions[FUEL],
            residence_time.get::<second>(),
        );
        rates[FUEL] = MassReactionRate::from_si(fuel);
        rates[PRODUCT] = MassReactionRate::from_si(-fuel);
        Ok(())
    }

    fn chemical_time_scale(&self, state: &CellState<'_>) -> Option<Time> {
        self.time_scale_queries.fetch_add(1, Ordering::Relaxed);
        let k = self.rate_constant(state.temperature.get::<kelvin>());
        (k > 0.0).then(|| Time::new::<second>(1.0 / k))
    }
}

/// Chemistry that produces nothing and records every zone temperature it sees.
#[derive(Debug, Default)]
pub(super) struct ZoneRecorder {
    seen: Mutex<Vec<(usize, f64)>>,
}

impl ZoneRecorder {
    /// Zone temperatures evaluated in `cell`, in K, in call order.
    pub(super) fn temperatures(&self, cell: usize) -> Vec<f64> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter(|(seen_cell, _)| *seen_cell == cell)
            .map(|(_, temperature)| *temperature)
            .collect()
    }
}

impl ChemistryModel for ZoneRecorder {
    fn reaction_rates(
        &self,
        state: &CellState<'_>,
        _residence_time: Time,
        _rates: &mut [MassReactionRate],
    ) -> Result<(), ChemistryError> {
        self.seen
            .lock()
            .unwrap()
            .push((state.cell, state.temperature.get::<kelvin>()));
        Ok(())
    }

    fn chemical_time_scale(&self, _state: &CellState<'_>) -> Option<Time> {
        None
    }
}
