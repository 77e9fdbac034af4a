use std::{fmt, str::FromStr};

use thiserror::Error;

/// Published variant of the EDC fine-structure model.
///
/// - v1981: Magnussen (1981), `exp1 = 3`, `exp2 = 3`.
/// - v1996: Gran & Magnussen (1996), `exp1 = 2`, `exp2 = 3`.
/// - v2005: Magnussen (2005), `exp1 = 2`, `exp2 = 2`.
/// - v2016: Parente et al. (2016), `exp1 = 2`, `exp2 = 2`, with cascade
///   constants computed from the local turbulent Damköhler and Reynolds numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ModelVersion {
    V1981,
    V1996,
    #[default]
    V2005,
    V2016,
}

/// Exponents of `kappa = gammaL^exp1 / (1 - gammaL^exp2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exponents {
    pub exp1: i32,
    pub exp2: i32,
}

/// A version name that is not one of [`ModelVersion::NAMES`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown EDC version '{name}', expected one of {allowed:?}")]
pub struct UnknownVersion {
    pub name: String,
    pub allowed: &'static [&'static str],
}

impl ModelVersion {
    pub const NAMES: &'static [&'static str] = &["v1981", "v1996", "v2005", "v2016"];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::V1981 => "v1981",
            Self::V1996 => "v1996",
            Self::V2005 => "v2005",
            Self::V2016 => "v2016",
        }
    }

    #[must_use]
    pub fn exponents(self) -> Exponents {
        let (exp1, exp2) = match self {
            Self::V1981 => (3, 3),
            Self::V1996 => (2, 3),
            Self::V2005 | Self::V2016 => (2, 2),
        };
        Exponents { exp1, exp2 }
    }

    /// True if the cascade constants are computed per cell.
    #[must_use]
    pub fn uses_local_constants(self) -> bool {
        self == Self::V2016
    }
}

impl fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelVersion {
    type Err = UnknownVersion;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim() {
            "v1981" => Ok(Self::V1981),
            "v1996" => Ok(Self::V1996),
            "v2005" => Ok(Self::V2005),
            "v2016" => Ok(Self::V2016),
            _ => Err(UnknownVersion {
                name: name.to_owned(),
                allowed: Self::NAMES,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponent_table() {
        let table: Vec<_> = ModelVersion::NAMES
            .iter()
            .map(|name| {
                let e = name.parse::<ModelVersion>().unwrap().exponents();
                (e.exp1, e.exp2)
            })
            .collect();
        assert_eq!(table, [(3, 3), (2, 3), (2, 2), (2, 2)]);
    }

    #[test]
    fn only_v2016_uses_local_constants() {
        assert!(ModelVersion::V2016.uses_local_constants());
        assert!(!ModelVersion::V2005.uses_local_constants());
        assert_eq!(ModelVersion::default(), ModelVersion::V2005);
    }

    #[test]
    fn rejects_unlisted_versions() {
        for name in ["v1999", "v2015", "V2005", ""] {
            let err = name.parse::<ModelVersion>().unwrap_err();
            assert_eq!(err.name, name);
            assert_eq!(err.allowed, ModelVersion::NAMES);
        }
    }
}
