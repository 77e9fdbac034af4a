use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::support::constraint::{Constrained, StrictlyPositive, UnitIntervalLowerOpen};

use super::{Connectivity, FilterError};

/// How cells on the domain boundary are filtered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoundaryTreatment {
    /// Boundary faces carry the value of the cell they belong to.
    #[default]
    ZeroGradient,
    /// Cells with at least one boundary face keep their unfiltered value.
    FixedValue,
}

/// Validated filter parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSettings {
    width_coeff: Constrained<f64, UnitIntervalLowerOpen>,
    passes: Constrained<usize, StrictlyPositive>,
    boundary: BoundaryTreatment,
}

impl FilterSettings {
    /// Validates the relaxation coefficient and pass count.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidCoefficient`] if `width_coeff` is not in
    /// `(0, 1]` or `passes` is zero.
    pub fn new(
        width_coeff: f64,
        passes: usize,
        boundary: BoundaryTreatment,
    ) -> Result<Self, FilterError> {
        let width_coeff =
            UnitIntervalLowerOpen::new(width_coeff).map_err(|_| FilterError::InvalidCoefficient {
                name: "widthCoeff",
                value: width_coeff,
                expected: "0 < widthCoeff <= 1",
            })?;

        #[allow(clippy::cast_precision_loss)]
        let passes = StrictlyPositive::new(passes).map_err(|_| FilterError::InvalidCoefficient {
            name: "passes",
            value: passes as f64,
            expected: "passes >= 1",
        })?;

        Ok(Self {
            width_coeff,
            passes,
            boundary,
        })
    }

    #[must_use]
    pub fn width_coeff(&self) -> f64 {
        self.width_coeff.into_inner()
    }

    #[must_use]
    pub fn passes(&self) -> usize {
        self.passes.into_inner()
    }

    #[must_use]
    pub fn boundary(&self) -> BoundaryTreatment {
        self.boundary
    }
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            width_coeff: UnitIntervalLowerOpen::one(),
            passes: StrictlyPositive::one(),
            boundary: BoundaryTreatment::default(),
        }
    }
}

/// Diffusion-type low-pass filter over a cell graph.
///
/// A pass replaces every cell value with
/// `φ + α · mean_faces(φ_face − φ)`, so each result is a convex combination
/// of the cell and its neighbours. Passes are Jacobi sweeps: every cell reads
/// the previous pass, which keeps the output independent of thread count.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LaplaceFilter {
    settings: FilterSettings,
}

impl LaplaceFilter {
    #[must_use]
    pub fn new(settings: FilterSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &FilterSettings {
        &self.settings
    }

    /// Returns the filtered copy of `field`.
    ///
    /// # Errors
    ///
    /// - [`FilterError::FieldSize`] if `field` and `mesh` disagree on the cell count.
    /// - [`FilterError::NonFinite`] if `field` contains NaN or an infinity.
    pub fn apply(&self, mesh: &Connectivity, field: &[f64]) -> Result<Vec<f64>, FilterError> {
        if field.len() != mesh.n_cells() {
            return Err(FilterError::FieldSize {
                expected: mesh.n_cells(),
                found: field.len(),
            });
        }
        if let Some((cell, &value)) = field.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(FilterError::NonFinite { cell, value });
        }

        let alpha = self.settings.width_coeff();
        let fixed_boundary = self.settings.boundary == BoundaryTreatment::FixedValue;

        let mut current = field.to_vec();
        let mut next = Vec::with_capacity(field.len());

        for _ in 0..self.settings.passes() {
            (0..field.len())
                .into_par_iter()
                .map(|cell| {
                    if fixed_boundary && mesh.is_boundary(cell) {
                        return field[cell];
                    }
                    relax(mesh, &current, cell, alpha)
                })
                .collect_into_vec(&mut next);
            std::mem::swap(&mut current, &mut next);
        }

        Ok(current)
    }
}

/// One relaxation step for a single cell.
///
/// Zero-gradient boundary faces contribute nothing to the difference sum but
/// still count toward the face mean.
fn relax(mesh: &Connectivity, field: &[f64], cell: usize, alpha: f64) -> f64 {
    let value = field[cell];
    let neighbours = mesh.neighbours(cell);
    let faces = neighbours.len() + mesh.boundary_faces(cell);
    if faces == 0 {
        return value;
    }

    let difference: f64 = neighbours.iter().map(|&n| field[n] - value).sum();

    #[allow(clippy::cast_precision_loss)]
    let mean = difference / faces as f64;

    value + alpha * mean
}
