use log::info;
use serde::{Deserialize, Serialize};

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    filter::{BoundaryTreatment, FilterSettings},
    fine_structure::ModelVersion,
    pdf::{Distribution, Truncation, ZoneLayout},
};

use super::ConfigError;

const POSITIVE: &[&str] = &["a finite number > 0"];

/// Closure coefficients as written by the user.
///
/// Key names follow the solver dictionary the closure is configured from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EdcCoeffs {
    /// Model variant name. Absent means `v2005`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(rename = "PDF_Name")]
    pub pdf_name: String,

    /// Zone width in the normalized variable.
    #[serde(rename = "spanZoneForPDF")]
    pub span_zone_for_pdf: f64,

    /// Half-width `t` of the truncation window `[-t, t]`.
    #[serde(rename = "truncationForPDF")]
    pub truncation_for_pdf: f64,

    #[serde(default)]
    pub zone_layout: ZoneLayout,

    #[serde(default)]
    pub filter: FilterCoeffs,

    pub deviation_similar_coeff: f64,
}

/// Laplace filter coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FilterCoeffs {
    pub width_coeff: f64,
    pub passes: usize,
    #[serde(default)]
    pub boundary: BoundaryTreatment,
}

impl Default for FilterCoeffs {
    fn default() -> Self {
        Self {
            width_coeff: 0.5,
            passes: 1,
            boundary: BoundaryTreatment::ZeroGradient,
        }
    }
}

impl Default for EdcCoeffs {
    fn default() -> Self {
        Self {
            version: None,
            pdf_name: Distribution::default().name().to_owned(),
            span_zone_for_pdf: 0.5,
            truncation_for_pdf: 3.0,
            zone_layout: ZoneLayout::default(),
            filter: FilterCoeffs::default(),
            deviation_similar_coeff: 1.0,
        }
    }
}

impl EdcCoeffs {
    /// Parses coefficients from a JSON document.
    ///
    /// Only the document shape is checked here; values are validated by
    /// [`EdcSettings::from_coeffs`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, unknown keys, or
    /// missing required keys.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Validated closure settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdcSettings {
    pub version: ModelVersion,
    pub distribution: Distribution,
    pub span: Constrained<f64, StrictlyPositive>,
    pub truncation: Truncation,
    pub zone_layout: ZoneLayout,
    pub filter: FilterSettings,
    pub deviation_similar_coeff: Constrained<f64, StrictlyPositive>,
}

impl EdcSettings {
    /// Validates user coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfiguration`] naming the first
    /// offending key, or [`ConfigError::Filter`] for bad filter coefficients.
    pub fn from_coeffs(coeffs: &EdcCoeffs) -> Result<Self, ConfigError> {
        let version = match coeffs.version.as_deref() {
            Some(name) => name
                .parse::<ModelVersion>()
                .map_err(|err| ConfigError::InvalidConfiguration {
                    key: "version",
                    value: err.name,
                    allowed: ModelVersion::NAMES,
                })?,
            None => {
                let version = ModelVersion::default();
                info!("EDC version not set, using {version}");
                version
            }
        };

        let distribution = coeffs.pdf_name.parse::<Distribution>().map_err(|_| {
            ConfigError::InvalidConfiguration {
                key: "PDF_Name",
                value: coeffs.pdf_name.clone(),
                allowed: Distribution::NAMES,
            }
        })?;

        let span = positive("spanZoneForPDF", coeffs.span_zone_for_pdf)?;
        let truncation = Truncation::symmetric(positive(
            "truncationForPDF",
            coeffs.truncation_for_pdf,
        )?);
        let deviation_similar_coeff =
            positive("deviationSimilarCoeff", coeffs.deviation_similar_coeff)?;

        let filter = FilterSettings::new(
            coeffs.filter.width_coeff,
            coeffs.filter.passes,
            coeffs.filter.boundary,
        )?;

        Ok(Self {
            version,
            distribution,
            span,
            truncation,
            zone_layout: coeffs.zone_layout,
            filter,
            deviation_similar_coeff,
        })
    }
}

fn positive(
    key: &'static str,
    value: f64,
) -> Result<Constrained<f64, StrictlyPositive>, ConfigError> {
    let invalid = || ConfigError::InvalidConfiguration {
        key,
        value: value.to_string(),
        allowed: POSITIVE,
    };
    if !value.is_finite() {
        return Err(invalid());
    }
    StrictlyPositive::new(value).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn parses_full_document() {
        let coeffs = EdcCoeffs::from_json_str(
            r#"{
                "version": "v2016",
                "PDF_Name": "triangular",
                "spanZoneForPDF": 0.25,
                "truncationForPDF": 2.0,
                "zoneLayout": "equalProbability",
                "filter": { "widthCoeff": 0.8, "passes": 3, "boundary": "fixedValue" },
                "deviationSimilarCoeff": 1.5
            }"#,
        )
        .unwrap();

        let settings = EdcSettings::from_coeffs(&coeffs).unwrap();
        assert_eq!(settings.version, ModelVersion::V2016);
        assert_eq!(settings.distribution.name(), "triangular");
        assert_eq!(settings.zone_layout, ZoneLayout::EqualProbability);
        assert_relative_eq!(settings.truncation.left(), -2.0);
        assert_relative_eq!(settings.truncation.right(), 2.0);
        assert_eq!(settings.filter.passes(), 3);
        assert_eq!(settings.filter.boundary(), BoundaryTreatment::FixedValue);
        assert_relative_eq!(settings.deviation_similar_coeff.into_inner(), 1.5);
    }

    #[test]
    fn optional_keys_take_defaults() {
        let coeffs = EdcCoeffs::from_json_str(
            r#"{
                "PDF_Name": "normal",
                "spanZoneForPDF": 0.5,
                "truncationForPDF": 3.0,
                "deviationSimilarCoeff": 1.0
            }"#,
        )
        .unwrap();

        assert_eq!(coeffs, EdcCoeffs::default());

        let settings = EdcSettings::from_coeffs(&coeffs).unwrap();
        assert_eq!(settings.version, ModelVersion::V2005);
        assert_eq!(settings.zone_layout, ZoneLayout::EqualWidth);
    }

    #[test]
    fn rejects_unknown_keys() {
        let result = EdcCoeffs::from_json_str(
            r#"{
                "PDF_Name": "normal",
                "spanZoneForPDF": 0.5,
                "truncationForPDF": 3.0,
                "deviationSimilarCoeff": 1.0,
                "spanZone": 0.1
            }"#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn unknown_version_lists_allowed() {
        let coeffs = EdcCoeffs {
            version: Some("v1999".into()),
            ..EdcCoeffs::default()
        };

        let err = EdcSettings::from_coeffs(&coeffs).unwrap_err();
        match &err {
            ConfigError::InvalidConfiguration {
                key,
                value,
                allowed,
            } => {
                assert_eq!(*key, "version");
                assert_eq!(value, "v1999");
                assert_eq!(*allowed, ModelVersion::NAMES);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "invalid version `v1999`, expected v1981 | v1996 | v2005 | v2016"
        );
    }

    #[test]
    fn unknown_distribution() {
        let coeffs = EdcCoeffs {
            pdf_name: "beta".into(),
            ..EdcCoeffs::default()
        };
        assert!(matches!(
            EdcSettings::from_coeffs(&coeffs),
            Err(ConfigError::InvalidConfiguration { key: "PDF_Name", .. })
        ));
    }

    #[test]
    fn non_positive_scalars() {
        let cases = [
            EdcCoeffs {
                span_zone_for_pdf: 0.0,
                ..EdcCoeffs::default()
            },
            EdcCoeffs {
                truncation_for_pdf: -1.0,
                ..EdcCoeffs::default()
            },
            EdcCoeffs {
                deviation_similar_coeff: f64::NAN,
                ..EdcCoeffs::default()
            },
            EdcCoeffs {
                span_zone_for_pdf: f64::INFINITY,
                ..EdcCoeffs::default()
            },
        ];

        for coeffs in cases {
            assert!(matches!(
                EdcSettings::from_coeffs(&coeffs),
                Err(ConfigError::InvalidConfiguration { .. })
            ));
        }
    }

    #[test]
    fn bad_filter() {
        let coeffs = EdcCoeffs {
            filter: FilterCoeffs {
                width_coeff: 2.0,
                ..FilterCoeffs::default()
            },
            ..EdcCoeffs::default()
        };
        assert!(matches!(
            EdcSettings::from_coeffs(&coeffs),
            Err(ConfigError::Filter(_))
        ));
    }
}
