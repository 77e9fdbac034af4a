mod closed;
mod lower_open;
mod upper_open;

pub use closed::UnitInterval;
pub use lower_open::UnitIntervalLowerOpen;
pub use upper_open::UnitIntervalUpperOpen;

/// Supplies 0 and 1 for types used with the unit-interval constraints.
///
/// Implementations should ensure that `zero() ≤ one()` under the type's
/// `PartialOrd` so the interval is well-formed.
pub trait UnitBounds: PartialOrd {
    fn zero() -> Self;
    fn one() -> Self;
}

impl UnitBounds for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
}
