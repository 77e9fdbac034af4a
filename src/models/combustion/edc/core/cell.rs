//! Closure evaluation for a single cell.

use uom::si::{
    f64::{MassDensity, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    fine_structure::{FineStructureModel, MixingState, Turbulence},
    pdf::{
        Distribution, DistributionSpec, Truncation, Zone, ZoneLayout, ZoneStatistics,
        zone_statistics,
    },
    units::{
        DissipationRate, FromSi, KinematicViscosity, MassReactionRate, SpecificEnthalpy,
        SpecificKineticEnergy, TemperatureDifference,
    },
};

use super::{CellState, ChemistryError, ChemistryModel, CorrectError, HeatRelease};

/// Spread below which a cell is evaluated at its mean temperature only, in K.
const SIGMA_MIN: f64 = 1e-8;

/// Lowest zone temperature handed to the chemistry model, in K.
const TEMPERATURE_FLOOR: f64 = 1.0;

/// Mass fraction above which consumption is treated implicitly.
const IMPLICIT_MIN_FRACTION: f64 = 1e-12;

/// Read-only inputs shared by all cells of one `correct` call.
pub(super) struct CellContext<'a> {
    pub mixing_model: FineStructureModel,
    pub deviation_similar_coeff: f64,
    pub distribution: Distribution,
    pub truncation: Truncation,
    pub span: f64,
    pub zone_layout: ZoneLayout,
    pub zones: &'a ZoneStatistics,
    pub chemistry: &'a dyn ChemistryModel,
    pub species: &'a [String],
    pub dissipation_rate: &'a [DissipationRate],
    pub kinetic_energy: &'a [SpecificKineticEnergy],
    pub viscosity: &'a [KinematicViscosity],
    pub temperature: &'a [ThermodynamicTemperature],
    pub filtered_temperature: &'a [ThermodynamicTemperature],
    pub density: &'a [MassDensity],
    pub mass_fractions: Vec<&'a [f64]>,
    pub formation_enthalpy: Vec<SpecificEnthalpy>,
}

/// Closure result of one cell.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct CellOutcome {
    pub mixing: MixingState,
    /// `(implicit, explicit)` per species.
    pub sources: Vec<(MassReactionRate, MassReactionRate)>,
    pub heat_release: HeatRelease,
    pub reacting: bool,
    pub point_mass: bool,
    pub degenerate: bool,
}

impl CellOutcome {
    fn inert(mixing: MixingState, n_species: usize, degenerate: bool) -> Self {
        let zero = MassReactionRate::from_si(0.0);
        Self {
            mixing,
            sources: vec![(zero, zero); n_species],
            heat_release: HeatRelease::from_si(0.0),
            reacting: false,
            point_mass: false,
            degenerate,
        }
    }
}

/// Evaluates the closure in `cell`.
///
/// # Errors
///
/// Returns [`CorrectError::Chemistry`] if the chemistry model fails at any
/// zone or the weighted rate of a species is not finite.
pub(super) fn evaluate(ctx: &CellContext<'_>, cell: usize) -> Result<CellOutcome, CorrectError> {
    let n_species = ctx.species.len();
    let mass_fractions: Vec<f64> = ctx
        .mass_fractions
        .iter()
        .map(|field| clamp_fraction(field[cell]))
        .collect();

    let state = CellState {
        cell,
        temperature: ctx.temperature[cell],
        density: ctx.density[cell],
        mass_fractions: &mass_fractions,
    };

    let mut turbulence = Turbulence {
        dissipation_rate: ctx.dissipation_rate[cell],
        kinetic_energy: ctx.kinetic_energy[cell],
        kinematic_viscosity: ctx.viscosity[cell],
        chemical_time_scale: None,
    };
    let mut degenerate = !is_admissible(&turbulence);

    if ctx.mixing_model.version().uses_local_constants() {
        turbulence.chemical_time_scale = ctx.chemistry.chemical_time_scale(&state);
    }

    let mixing = ctx.mixing_model.compute(&turbulence);
    if !mixing.has_fine_structure() {
        return Ok(CellOutcome::inert(mixing, n_species, degenerate));
    }

    let TemperatureZones {
        zones,
        point_mass,
        degenerate: zoning_degenerate,
    } = temperature_zones(ctx, cell);
    degenerate |= zoning_degenerate;

    let zero = MassReactionRate::from_si(0.0);
    let mut rates = vec![zero; n_species];
    let mut weighted = vec![zero; n_species];

    for zone in zones.iter().filter(|zone| zone.probability > 0.0) {
        let mut temperature = zone.value;
        if temperature < TEMPERATURE_FLOOR {
            temperature = TEMPERATURE_FLOOR;
            degenerate = true;
        }

        let zone_state = CellState {
            temperature: ThermodynamicTemperature::new::<kelvin>(temperature),
            ..state
        };

        rates.fill(zero);
        ctx.chemistry
            .reaction_rates(&zone_state, mixing.tau(), &mut rates)
            .map_err(|source| CorrectError::Chemistry { cell, source })?;

        for (total, rate) in weighted.iter_mut().zip(&rates) {
            *total += *rate * zone.probability;
        }
    }

    let kappa = mixing.kappa();
    let mut heat_release = HeatRelease::from_si(0.0);
    let mut sources = Vec::with_capacity(n_species);

    for (species, rate) in weighted.into_iter().enumerate() {
        let rate = rate * kappa;
        if !rate.value.is_finite() {
            return Err(CorrectError::Chemistry {
                cell,
                source: ChemistryError::new(format!(
                    "non-finite rate for species {}",
                    ctx.species[species]
                )),
            });
        }

        let released: HeatRelease = ctx.formation_enthalpy[species] * rate;
        heat_release -= released;
        sources.push(linearize(rate, mass_fractions[species]));
    }

    Ok(CellOutcome {
        mixing,
        sources,
        heat_release,
        reacting: true,
        point_mass,
        degenerate,
    })
}

/// Presumed temperature zones of one cell in kelvin.
struct TemperatureZones {
    zones: Vec<Zone>,
    point_mass: bool,
    degenerate: bool,
}

/// Maps the zone table onto the presumed temperature distribution of `cell`.
///
/// The spread is `deviation_similar_coeff * |T - Tsgs|`; the mixing state does
/// not enter it. A window reaching below [`TEMPERATURE_FLOOR`] is clipped
/// there and zoned again, so no probability is assigned below the floor.
fn temperature_zones(ctx: &CellContext<'_>, cell: usize) -> TemperatureZones {
    let temperature = ctx.temperature[cell];
    let mean = temperature.get::<kelvin>();
    let deviation = temperature.minus(ctx.filtered_temperature[cell]);
    let sigma = ctx.deviation_similar_coeff * deviation.abs().get::<delta_kelvin>();

    let at_mean = |degenerate| TemperatureZones {
        zones: vec![Zone {
            probability: 1.0,
            value: mean,
        }],
        point_mass: true,
        degenerate,
    };

    if sigma <= SIGMA_MIN {
        return at_mean(false);
    }
    let Ok(presumed) = DistributionSpec::new(ctx.distribution, mean, sigma, ctx.truncation)
    else {
        return at_mean(true);
    };

    let zones = match presumed.clipped_below(TEMPERATURE_FLOOR) {
        Ok(clipped) if clipped.truncation == presumed.truncation => {
            presumed.physical_zones(ctx.zones)
        }
        Ok(clipped) => match zone_statistics(
            ctx.span,
            clipped.truncation,
            clipped.distribution,
            ctx.zone_layout,
        ) {
            Ok(stats) => clipped.physical_zones(&stats),
            Err(_) => return at_mean(true),
        },
        Err(_) => return at_mean(true),
    };

    TemperatureZones {
        zones,
        point_mass: false,
        degenerate: false,
    }
}

/// Splits a net rate into `(implicit, explicit)` parts.
///
/// Consumption of a species that is present becomes an implicit coefficient
/// `rate / Y`; everything else stays explicit.
pub(super) fn linearize(
    rate: MassReactionRate,
    mass_fraction: f64,
) -> (MassReactionRate, MassReactionRate) {
    let zero = MassReactionRate::from_si(0.0);
    if rate.value < 0.0 && mass_fraction > IMPLICIT_MIN_FRACTION {
        (rate / mass_fraction, zero)
    } else {
        (zero, rate)
    }
}

fn clamp_fraction(y: f64) -> f64 {
    if y.is_nan() { 0.0 } else { y.clamp(0.0, 1.0) }
}

/// Negative or non-finite turbulence inputs are recovered as "no fine
/// structure" but flagged.
fn is_admissible(turbulence: &Turbulence) -> bool {
    [
        turbulence.dissipation_rate.value,
        turbulence.kinetic_energy.value,
        turbulence.kinematic_viscosity.value,
    ]
    .iter()
    .all(|value| value.is_finite() && *value >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use super::super::{
        EdcCoeffs, EdcSettings, ReactionThermo, TurbulenceFields,
        test_support::{TestThermo, TestTurbulence, ZoneRecorder},
    };

    fn settings() -> EdcSettings {
        EdcSettings::from_coeffs(&EdcCoeffs::default()).unwrap()
    }

    fn default_zones() -> ZoneStatistics {
        let settings = settings();
        zone_statistics(
            settings.span.into_inner(),
            settings.truncation,
            settings.distribution,
            settings.zone_layout,
        )
        .unwrap()
    }

    fn kelvins(values: &[f64]) -> Vec<ThermodynamicTemperature> {
        values
            .iter()
            .map(|t| ThermodynamicTemperature::new::<kelvin>(*t))
            .collect()
    }

    fn context<'a>(
        thermo: &'a TestThermo,
        filtered: &'a [ThermodynamicTemperature],
        turbulence: &'a TestTurbulence,
        zones: &'a ZoneStatistics,
        chemistry: &'a ZoneRecorder,
    ) -> CellContext<'a> {
        let settings = settings();
        let n_species = thermo.species().len();
        CellContext {
            mixing_model: FineStructureModel::new(settings.version),
            deviation_similar_coeff: settings.deviation_similar_coeff.into_inner(),
            distribution: settings.distribution,
            truncation: settings.truncation,
            span: settings.span.into_inner(),
            zone_layout: settings.zone_layout,
            zones,
            chemistry,
            species: thermo.species(),
            dissipation_rate: turbulence.dissipation_rate(),
            kinetic_energy: turbulence.turbulent_kinetic_energy(),
            viscosity: turbulence.kinematic_viscosity(),
            temperature: thermo.temperature(),
            filtered_temperature: filtered,
            density: thermo.density(),
            mass_fractions: (0..n_species).map(|i| thermo.mass_fraction(i)).collect(),
            formation_enthalpy: (0..n_species)
                .map(|i| thermo.formation_enthalpy(i))
                .collect(),
        }
    }

    #[test]
    fn zone_temperatures_depend_only_on_the_deviation() {
        let thermo = TestThermo::new(&[1500.0, 1500.0]);
        let filtered = kelvins(&[1400.0, 1400.0]);
        let turbulence = TestTurbulence::jet(2).with_dissipation_rate(1, 10.0);
        let zones = default_zones();
        let chemistry = ZoneRecorder::default();
        let ctx = context(&thermo, &filtered, &turbulence, &zones, &chemistry);

        let strong = evaluate(&ctx, 0).unwrap();
        let weak = evaluate(&ctx, 1).unwrap();
        assert_ne!(strong.mixing, weak.mixing);
        assert!(!strong.point_mass && !weak.point_mass);

        // sigma = 100 K over the +-3 sigma window in 0.5 sigma zones.
        let temperatures = chemistry.temperatures(0);
        assert_eq!(temperatures.len(), 12);
        assert_eq!(temperatures, chemistry.temperatures(1));
        assert!(temperatures.iter().all(|t| (1200.0..=1800.0).contains(t)));
    }

    #[test]
    fn cold_tail_is_clipped_at_the_floor() {
        // sigma = 700 K puts the lower window edge at -1800 K.
        let thermo = TestThermo::new(&[300.0]);
        let filtered = kelvins(&[1000.0]);
        let turbulence = TestTurbulence::jet(1);
        let zones = default_zones();
        let chemistry = ZoneRecorder::default();
        let ctx = context(&thermo, &filtered, &turbulence, &zones, &chemistry);

        let outcome = evaluate(&ctx, 0).unwrap();
        assert!(!outcome.point_mass);
        assert!(!outcome.degenerate);

        let temperatures = chemistry.temperatures(0);
        assert!(!temperatures.is_empty() && temperatures.len() < 12);
        assert!(temperatures.iter().all(|t| *t > TEMPERATURE_FLOOR));
        assert!(temperatures.iter().all(|t| *t <= 2400.0));
    }

    #[test]
    fn small_deviation_is_a_point_mass() {
        let thermo = TestThermo::new(&[1500.0]);
        let filtered = kelvins(&[1500.0]);
        let turbulence = TestTurbulence::jet(1);
        let zones = default_zones();
        let chemistry = ZoneRecorder::default();
        let ctx = context(&thermo, &filtered, &turbulence, &zones, &chemistry);

        let outcome = evaluate(&ctx, 0).unwrap();
        assert!(outcome.point_mass);
        assert_eq!(chemistry.temperatures(0), vec![1500.0]);
    }

    #[test]
    fn consumption_is_implicit() {
        let (implicit, explicit) = linearize(MassReactionRate::from_si(-2.0), 0.5);
        assert_relative_eq!(implicit.value, -4.0);
        assert_relative_eq!(explicit.value, 0.0);
    }

    #[test]
    fn production_is_explicit() {
        let (implicit, explicit) = linearize(MassReactionRate::from_si(3.0), 0.5);
        assert_relative_eq!(implicit.value, 0.0);
        assert_relative_eq!(explicit.value, 3.0);
    }

    #[test]
    fn consumption_of_absent_species_is_explicit() {
        let (implicit, explicit) = linearize(MassReactionRate::from_si(-1.0), 0.0);
        assert_relative_eq!(implicit.value, 0.0);
        assert_relative_eq!(explicit.value, -1.0);

        let (implicit, _) = linearize(MassReactionRate::from_si(-1.0), 1e-13);
        assert_relative_eq!(implicit.value, 0.0);
    }

    #[test]
    fn mass_fractions_are_clamped() {
        assert_relative_eq!(clamp_fraction(-0.1), 0.0);
        assert_relative_eq!(clamp_fraction(1.2), 1.0);
        assert_relative_eq!(clamp_fraction(f64::NAN), 0.0);
        assert_relative_eq!(clamp_fraction(0.3), 0.3);
    }
}
