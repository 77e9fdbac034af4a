//! Standardized distribution families.
//!
//! Every family here has zero mean and unit variance, so a single affine map
//! ([`normalize`](super::normalize)) relates the physical scalar to the
//! standardized variable regardless of the family chosen.

use std::{
    f64::consts::{FRAC_1_SQRT_2, PI},
    fmt,
    str::FromStr,
};

use enum_dispatch::enum_dispatch;
use statrs::function::erf::erfc;

use super::PdfError;

/// Statistics of a standardized (zero-mean, unit-variance) density.
#[enum_dispatch]
pub trait StandardDensity {
    /// Probability density at `x`.
    fn pdf(&self, x: f64) -> f64;

    /// Cumulative probability `P(X ≤ x)`.
    fn cdf(&self, x: f64) -> f64;

    /// Partial first moment `∫ t f(t) dt` from the lower end of the support to `x`.
    fn partial_mean(&self, x: f64) -> f64;

    /// Lower and upper ends of the support, possibly infinite.
    fn support(&self) -> (f64, f64);

    /// Probability mass in `[a, b]`, assuming `a ≤ b`.
    fn mass_between(&self, a: f64, b: f64) -> f64 {
        self.cdf(b) - self.cdf(a)
    }
}

/// Standard normal density.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normal;

impl Normal {
    /// Upper tail probability `P(X > x)`.
    fn sf(x: f64) -> f64 {
        0.5 * erfc(x * FRAC_1_SQRT_2)
    }
}

impl StandardDensity for Normal {
    fn pdf(&self, x: f64) -> f64 {
        (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
    }

    fn cdf(&self, x: f64) -> f64 {
        0.5 * erfc(-x * FRAC_1_SQRT_2)
    }

    fn partial_mean(&self, x: f64) -> f64 {
        -self.pdf(x)
    }

    fn support(&self) -> (f64, f64) {
        (f64::NEG_INFINITY, f64::INFINITY)
    }

    // Differences of upper tails keep precision for zones far right of the mean.
    fn mass_between(&self, a: f64, b: f64) -> f64 {
        if a >= 0.0 {
            Self::sf(a) - Self::sf(b)
        } else {
            self.cdf(b) - self.cdf(a)
        }
    }
}

/// Uniform density on `[-√3, √3]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Uniform;

impl Uniform {
    const HALF_WIDTH: f64 = 1.732_050_807_568_877_2;
}

impl StandardDensity for Uniform {
    fn pdf(&self, x: f64) -> f64 {
        let a = Self::HALF_WIDTH;
        if (-a..=a).contains(&x) {
            0.5 / a
        } else {
            0.0
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        let a = Self::HALF_WIDTH;
        let x = x.clamp(-a, a);
        (x + a) / (2.0 * a)
    }

    fn partial_mean(&self, x: f64) -> f64 {
        let a = Self::HALF_WIDTH;
        let x = x.clamp(-a, a);
        (x * x - a * a) / (4.0 * a)
    }

    fn support(&self) -> (f64, f64) {
        (-Self::HALF_WIDTH, Self::HALF_WIDTH)
    }
}

/// Symmetric triangular density on `[-√6, √6]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Triangular;

impl Triangular {
    const HALF_WIDTH: f64 = 2.449_489_742_783_178;
}

impl StandardDensity for Triangular {
    fn pdf(&self, x: f64) -> f64 {
        let a = Self::HALF_WIDTH;
        ((a - x.abs()) / (a * a)).max(0.0)
    }

    fn cdf(&self, x: f64) -> f64 {
        let a = Self::HALF_WIDTH;
        let x = x.clamp(-a, a);
        if x <= 0.0 {
            (a + x).powi(2) / (2.0 * a * a)
        } else {
            1.0 - (a - x).powi(2) / (2.0 * a * a)
        }
    }

    fn partial_mean(&self, x: f64) -> f64 {
        let a = Self::HALF_WIDTH;
        let x = x.clamp(-a, a);
        let a2 = a * a;
        if x <= 0.0 {
            (0.5 * a * x * x + x.powi(3) / 3.0 - a.powi(3) / 6.0) / a2
        } else {
            -a / 6.0 + (0.5 * a * x * x - x.powi(3) / 3.0) / a2
        }
    }

    fn support(&self) -> (f64, f64) {
        (-Self::HALF_WIDTH, Self::HALF_WIDTH)
    }
}

/// A presumed distribution family, selected by name.
///
/// Names are matched case-insensitively: `normal` (also `gaussian` and
/// `truncatedNormal`), `uniform`, and `triangular`.
#[enum_dispatch(StandardDensity)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distribution {
    Normal(Normal),
    Uniform(Uniform),
    Triangular(Triangular),
}

impl Distribution {
    /// Canonical names of the supported families.
    pub const NAMES: &'static [&'static str] = &["normal", "uniform", "triangular"];

    /// Returns the canonical name of this family.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal(_) => "normal",
            Self::Uniform(_) => "uniform",
            Self::Triangular(_) => "triangular",
        }
    }
}

impl Default for Distribution {
    fn default() -> Self {
        Self::Normal(Normal)
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Distribution {
    type Err = PdfError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "normal" | "gaussian" | "truncatednormal" => Ok(Self::Normal(Normal)),
            "uniform" => Ok(Self::Uniform(Uniform)),
            "triangular" => Ok(Self::Triangular(Triangular)),
            _ => Err(PdfError::UnsupportedDistribution {
                name: name.to_owned(),
                allowed: Self::NAMES,
            }),
        }
    }
}
