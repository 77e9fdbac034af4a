use std::convert::Infallible;

use twine_core::Model;
use uom::si::{f64::Time, time::second};

use crate::support::constraint::{NonNegative, UnitIntervalUpperOpen};

use super::{Exponents, MixingState, ModelVersion, Turbulence};

/// Distance from one at which `gammaL` is clamped before evaluating `kappa`.
///
/// Keeps `1 - gammaL^exp2` at least about `1e-6`, so `kappa` stays finite.
pub const GAMMA_EPSILON: f64 = 1e-6;

/// Fixed cascade constants of v1981, v1996 and v2005.
const C_GAMMA: f64 = 2.1377;
const C_TAU: f64 = 0.4083;

/// Coefficients of the v2016 local-constant correlations.
const C1: f64 = 0.05774;
const C2: f64 = 0.5;
const C_GAMMA_MIN: f64 = 0.4082;
const C_GAMMA_MAX: f64 = 5.0;
const DA_MIN: f64 = 1e-10;
const DA_MAX: f64 = 10.0;

/// Returns `gammaL^exp1 / (1 - gammaL^exp2)` with `gammaL` clamped to
/// `[0, 1 - GAMMA_EPSILON]`.
#[must_use]
pub fn kappa(gamma_l: f64, exponents: Exponents) -> f64 {
    let gamma_l = if gamma_l.is_nan() {
        0.0
    } else {
        gamma_l.clamp(0.0, 1.0 - GAMMA_EPSILON)
    };
    gamma_l.powi(exponents.exp1) / (1.0 - gamma_l.powi(exponents.exp2))
}

/// Computes the fine-structure state of one cell for `version`.
#[must_use]
pub fn compute_mixing(turbulence: &Turbulence, version: ModelVersion) -> MixingState {
    FineStructureModel::new(version).compute(turbulence)
}

/// The fine-structure model for a fixed [`ModelVersion`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FineStructureModel {
    version: ModelVersion,
}

impl FineStructureModel {
    #[must_use]
    pub fn new(version: ModelVersion) -> Self {
        Self { version }
    }

    #[must_use]
    pub fn version(&self) -> ModelVersion {
        self.version
    }

    /// Computes `gammaL`, `tau` and `kappa` from the local turbulence.
    ///
    /// Non-positive or non-finite dissipation rate, kinetic energy or
    /// viscosity yields [`MixingState::none`].
    #[must_use]
    pub fn compute(&self, turbulence: &Turbulence) -> MixingState {
        let epsilon = turbulence.dissipation_rate.value;
        let k = turbulence.kinetic_energy.value;
        let nu = turbulence.kinematic_viscosity.value;

        let usable = |x: f64| x.is_finite() && x > 0.0;
        if !(usable(epsilon) && usable(k) && usable(nu)) {
            return MixingState::none();
        }

        let kolmogorov_time = (nu / epsilon).sqrt();
        let (c_gamma, c_tau) = if self.version.uses_local_constants() {
            let chemical_time = turbulence.chemical_time_scale.map(|tc| tc.get::<second>());
            local_constants(kolmogorov_time, k * k / (nu * epsilon), chemical_time)
        } else {
            (C_GAMMA, C_TAU)
        };

        let gamma_l = c_gamma * (nu * epsilon / (k * k)).powf(0.25);
        let gamma_l = gamma_l.clamp(0.0, 1.0 - GAMMA_EPSILON);
        let tau = c_tau * kolmogorov_time;
        let kappa = kappa(gamma_l, self.version.exponents());

        match (UnitIntervalUpperOpen::new(gamma_l), NonNegative::new(kappa)) {
            (Ok(gamma_l), Ok(kappa)) if tau.is_finite() && kappa.into_inner().is_finite() => {
                MixingState::new(gamma_l, Time::new::<second>(tau), kappa)
            }
            _ => MixingState::none(),
        }
    }
}

/// Cascade constants `(C_gamma, C_tau)` from the turbulent Damköhler and
/// Reynolds numbers.
fn local_constants(
    kolmogorov_time: f64,
    reynolds: f64,
    chemical_time: Option<f64>,
) -> (f64, f64) {
    let damkohler = match chemical_time {
        Some(tc) if tc > 0.0 => kolmogorov_time / tc,
        _ => DA_MAX,
    };
    let damkohler = if damkohler.is_nan() {
        DA_MAX
    } else {
        damkohler.clamp(DA_MIN, DA_MAX)
    };

    let c_tau = (C1 / (damkohler * (reynolds + 1.0).sqrt())).min(C_GAMMA);
    let c_gamma = (C2 * (damkohler * (reynolds + 1.0)).sqrt()).clamp(C_GAMMA_MIN, C_GAMMA_MAX);
    (c_gamma, c_tau)
}

impl Model for FineStructureModel {
    type Input = Turbulence;
    type Output = MixingState;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.compute(input))
    }
}
