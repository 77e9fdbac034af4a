use thiserror::Error;

use crate::support::{filter::FilterError, pdf::PdfError};

/// Errors raised while validating closure coefficients.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A coefficient has a value outside its allowed set.
    #[error("invalid {key} `{value}`, expected {}", .allowed.join(" | "))]
    InvalidConfiguration {
        key: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },

    /// The zone partition cannot be built from the span and truncation.
    #[error("invalid presumed distribution settings: {0}")]
    Pdf(#[from] PdfError),

    /// The filter coefficients are invalid.
    #[error("invalid filter settings: {0}")]
    Filter(#[from] FilterError),

    /// The coefficient document could not be parsed.
    #[error("malformed coefficients: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Error reported by a host chemistry model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ChemistryError {
    message: String,
}

impl ChemistryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that abort a `correct` call.
///
/// The previously published snapshot stays in place when one is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CorrectError {
    /// A host field does not have one value per cell.
    #[error("{field} has {found} values but the mesh has {expected} cells")]
    FieldSize {
        field: String,
        expected: usize,
        found: usize,
    },

    /// Filtering the temperature field failed.
    #[error("temperature filter failed")]
    Filter(#[from] FilterError),

    /// The chemistry model failed or returned a non-finite rate.
    #[error("chemistry failed in cell {cell}")]
    Chemistry {
        cell: usize,
        #[source]
        source: ChemistryError,
    },
}

/// A species name that the thermo model does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown species `{name}`, known species: {}", .known.join(", "))]
pub struct UnknownSpecies {
    pub name: String,
    pub known: Vec<String>,
}
