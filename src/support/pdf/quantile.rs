//! Quantiles of a truncated distribution by bisection on its cumulative.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;

use crate::support::constraint::UnitInterval;

use super::{Distribution, PdfError, Truncation, evaluate::cumulative_truncated};

/// Evaluates the truncated cumulative at a trial point.
struct CumulativeModel {
    truncation: Truncation,
    distribution: Distribution,
}

/// A trial point and its cumulative probability.
#[derive(Debug, Clone, Copy)]
struct Trial {
    x: f64,
    cumulative: f64,
}

impl Model for CumulativeModel {
    type Input = f64;
    type Output = Trial;
    type Error = PdfError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let cumulative = cumulative_truncated(*input, self.truncation, self.distribution)?;
        Ok(Trial {
            x: *input,
            cumulative,
        })
    }
}

/// Residual `cumulative(x) - target`.
struct QuantileProblem {
    target: f64,
}

impl EquationProblem<1> for QuantileProblem {
    type Input = f64;
    type Output = Trial;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(x[0])
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.cumulative - self.target])
    }
}

/// Returns the point where the truncated cumulative reaches `probability`.
///
/// The endpoints map straight to the window bounds.
///
/// # Errors
///
/// Returns [`PdfError::InvalidProbability`] if `probability` is outside `[0, 1]`,
/// or [`PdfError::NumericDegenerate`] if the window holds no mass or the
/// bisection does not converge.
pub fn quantile_truncated(
    probability: f64,
    truncation: Truncation,
    distribution: Distribution,
) -> Result<f64, PdfError> {
    let target = UnitInterval::new(probability)
        .map_err(|_| PdfError::InvalidProbability { probability })?
        .into_inner();

    // Surfaces an empty window before bisecting on a flat cumulative.
    cumulative_truncated(truncation.left(), truncation, distribution)?;

    if target <= 0.0 {
        return Ok(truncation.left());
    }
    if target >= 1.0 {
        return Ok(truncation.right());
    }

    let model = CumulativeModel {
        truncation,
        distribution,
    };
    let problem = QuantileProblem { target };
    let config = bisection::Config {
        max_iters: 200,
        x_abs_tol: 1e-13,
        x_rel_tol: 0.0,
        residual_tol: 1e-13,
    };

    let solution = bisection::solve(
        &model,
        &problem,
        [truncation.left(), truncation.right()],
        &config,
        |event: &bisection::Event<'_, _, _>| {
            // The cumulative is only undefined for an empty window, which was
            // ruled out above; keep bisecting toward the left if it happens.
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )
    .map_err(|err| PdfError::degenerate(format!("quantile bisection failed: {err}")))?;

    if solution.status != bisection::Status::Converged {
        return Err(PdfError::degenerate(format!(
            "quantile {target} of {distribution} did not converge: residual={}",
            solution.residual
        )));
    }

    Ok(solution.snapshot.output.x)
}
