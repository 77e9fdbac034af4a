use uom::si::{f64::Time, time::second};

use crate::support::{
    constraint::{Constrained, NonNegative, UnitIntervalUpperOpen},
    units::{DissipationRate, KinematicViscosity, SpecificKineticEnergy},
};

/// Local turbulence quantities of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Turbulence {
    pub dissipation_rate: DissipationRate,
    pub kinetic_energy: SpecificKineticEnergy,
    pub kinematic_viscosity: KinematicViscosity,

    /// Chemical time scale, used only by v2016.
    ///
    /// `None` is read as infinitely fast chemistry, which saturates the
    /// Damköhler number at its upper clamp.
    pub chemical_time_scale: Option<Time>,
}

/// Fine-structure state of one cell.
///
/// `gamma_l` lies in `[0, 1)`, `tau` is non-negative (infinite when there is
/// no fine structure), and `kappa` is non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixingState {
    gamma_l: Constrained<f64, UnitIntervalUpperOpen>,
    tau: Time,
    kappa: Constrained<f64, NonNegative>,
}

impl MixingState {
    pub(super) fn new(
        gamma_l: Constrained<f64, UnitIntervalUpperOpen>,
        tau: Time,
        kappa: Constrained<f64, NonNegative>,
    ) -> Self {
        debug_assert!(tau.value >= 0.0);
        Self {
            gamma_l,
            tau,
            kappa,
        }
    }

    /// The state of a cell without fine structures: nothing reacts.
    #[must_use]
    pub fn none() -> Self {
        Self {
            gamma_l: UnitIntervalUpperOpen::zero(),
            tau: Time::new::<second>(f64::INFINITY),
            kappa: NonNegative::zero(),
        }
    }

    /// Fine-structure mass fraction.
    #[must_use]
    pub fn gamma_l(&self) -> f64 {
        *self.gamma_l.as_ref()
    }

    /// Mean residence time in the fine structures.
    #[must_use]
    pub fn tau(&self) -> Time {
        self.tau
    }

    /// Reacting fraction factor.
    #[must_use]
    pub fn kappa(&self) -> f64 {
        self.kappa.into_inner()
    }

    #[must_use]
    pub fn has_fine_structure(&self) -> bool {
        self.kappa() > 0.0 && self.tau.value.is_finite()
    }
}
