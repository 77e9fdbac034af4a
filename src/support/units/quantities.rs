use std::marker::PhantomData;

use uom::{
    si::{Dimension, ISQ, Quantity, SI},
    typenum::{N1, N2, N3, P1, P2, Z0},
};

/// Turbulence dissipation rate, m²/s³ in SI.
pub type DissipationRate = Quantity<ISQ<P2, Z0, N3, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Kinematic viscosity, m²/s in SI.
///
/// Shares its dimension with [`DiffusionCoefficient`](uom::si::f64::DiffusionCoefficient),
/// so values are built with `diffusion_coefficient::square_meter_per_second`.
pub type KinematicViscosity = uom::si::f64::DiffusionCoefficient;

/// Turbulent kinetic energy per unit mass, m²/s² in SI.
pub type SpecificKineticEnergy = Quantity<ISQ<P2, Z0, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Specific enthalpy, J/kg in SI.
pub type SpecificEnthalpy = Quantity<ISQ<P2, Z0, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Mass production rate per unit volume, kg/m³·s in SI.
pub type MassReactionRate = Quantity<ISQ<N3, P1, N1, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Heat release rate per unit volume, W/m³ in SI.
pub type VolumetricHeatRelease = Quantity<ISQ<N1, P1, N3, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Builds a quantity directly from its SI value.
pub trait FromSi {
    fn from_si(value: f64) -> Self;
}

impl<D> FromSi for Quantity<D, SI<f64>, f64>
where
    D: Dimension + ?Sized,
{
    fn from_si(value: f64) -> Self {
        Quantity {
            dimension: PhantomData,
            units: PhantomData,
            value,
        }
    }
}
