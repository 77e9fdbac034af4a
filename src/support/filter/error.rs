use thiserror::Error;

/// Errors that can occur while building or applying a spatial filter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// The field length does not match the cell count.
    #[error("field has {found} values but the mesh has {expected} cells")]
    FieldSize { expected: usize, found: usize },

    /// A face references a cell that does not exist, or a face list is malformed.
    #[error("invalid connectivity: {context}")]
    InvalidConnectivity { context: String },

    /// A filter coefficient is outside its allowed range.
    #[error("invalid filter coefficient {name}={value}, expected {expected}")]
    InvalidCoefficient {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    /// The input field holds a NaN or infinite value.
    #[error("non-finite value {value} in cell {cell}")]
    NonFinite { cell: usize, value: f64 },
}
