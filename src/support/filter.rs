//! Low-pass spatial filtering of cell fields.
//!
//! The closure compares a resolved field with its filtered companion to
//! estimate sub-grid fluctuations. [`LaplaceFilter`] is a diffusion-type
//! smoother: each pass relaxes every cell toward the mean of its face
//! neighbours. The mesh enters only as a [`Connectivity`] graph.
//!
//! # Example
//!
//! ```
//! use twine_edc::support::filter::{BoundaryTreatment, Connectivity, FilterSettings, LaplaceFilter};
//!
//! let mesh = Connectivity::cartesian(5, 1, 1);
//! let filter = LaplaceFilter::new(FilterSettings::new(0.5, 1, BoundaryTreatment::ZeroGradient)?);
//!
//! let smoothed = filter.apply(&mesh, &[0.0, 0.0, 4.0, 0.0, 0.0])?;
//! assert_eq!(smoothed, vec![0.0, 1.0, 2.0, 1.0, 0.0]);
//! # Ok::<(), twine_edc::support::filter::FilterError>(())
//! ```

mod connectivity;
mod error;
mod laplace;

pub use connectivity::Connectivity;
pub use error::FilterError;
pub use laplace::{BoundaryTreatment, FilterSettings, LaplaceFilter};
