//! Eddy Dissipation Concept closure with presumed sub-grid temperature
//! statistics.
//!
//! [`EdcClosure`] combines the fine-structure mixing model with a presumed
//! distribution of the sub-grid temperature. The spread of that distribution
//! comes from a scale-similarity estimate: the difference between the
//! resolved temperature and its spatially filtered companion. Reaction rates
//! are evaluated by the host's chemistry at the conditional mean temperature
//! of each zone, weighted by the zone probability and scaled by the reacting
//! fraction `kappa`. The result is a linearized source per species plus the
//! heat release field.
//!
//! The host provides fields and chemistry through the [`TurbulenceFields`],
//! [`ReactionThermo`] and [`ChemistryModel`] traits.
//!
//! # Example
//!
//! ```
//! use twine_edc::models::combustion::edc::EdcCoeffs;
//!
//! let coeffs = EdcCoeffs::from_json_str(r#"{
//!     "version": "v2005",
//!     "PDF_Name": "normal",
//!     "spanZoneForPDF": 0.5,
//!     "truncationForPDF": 3.0,
//!     "filter": { "widthCoeff": 0.5, "passes": 2, "boundary": "zeroGradient" },
//!     "deviationSimilarCoeff": 1.0
//! }"#)?;
//!
//! assert_eq!(coeffs.pdf_name, "normal");
//! # Ok::<(), twine_edc::models::combustion::edc::ConfigError>(())
//! ```

mod core;

pub use self::core::{
    CellState, ChemistryError, ChemistryModel, ConfigError, CorrectError, Diagnostics, EdcClosure,
    EdcCoeffs, EdcSettings, FilterCoeffs, HeatRelease, ReactionRateContribution, ReactionThermo,
    Snapshot, TurbulenceFields, UnknownSpecies,
};
