use std::{cmp::Ordering, marker::PhantomData};

use num_traits::{One, Zero};

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is strictly positive (greater than zero).
///
/// # Examples
///
/// ```
/// use twine_edc::support::constraint::StrictlyPositive;
///
/// let sigma = StrictlyPositive::new(35.0).unwrap();
/// assert_eq!(sigma.into_inner(), 35.0);
///
/// assert!(StrictlyPositive::new(0.0).is_err());
/// assert!(StrictlyPositive::new(-0.5).is_err());
/// assert!(StrictlyPositive::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`] if the value is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::<T, StrictlyPositive>::new(value)
    }

    /// Returns one as a constrained value.
    #[must_use]
    pub fn one<T: PartialOrd + Zero + One>() -> Constrained<T, StrictlyPositive> {
        Constrained::<T, StrictlyPositive> {
            value: T::one(),
            _marker: PhantomData,
        }
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::TemperatureInterval, temperature_interval::kelvin};

    #[test]
    fn floats() {
        assert!(StrictlyPositive::new(1.0e-12).is_ok());
        assert!(matches!(
            StrictlyPositive::new(0.0),
            Err(ConstraintError::Zero)
        ));
        assert!(matches!(
            StrictlyPositive::new(-5.0),
            Err(ConstraintError::Negative)
        ));
    }

    #[test]
    fn temperature_spreads() {
        assert!(StrictlyPositive::new(TemperatureInterval::new::<kelvin>(40.0)).is_ok());
        assert!(StrictlyPositive::new(TemperatureInterval::new::<kelvin>(0.0)).is_err());
    }
}
