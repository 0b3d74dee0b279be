//! Error types produced while validating inputs or computing consolidation profiles.

use thiserror::Error;

use crate::soil::LayerKind;

/// Error returned when a consolidation profile cannot be computed.
#[derive(Debug, Error, PartialEq)]
pub enum ConsolidationError {
    /// Returned when one of the supplied parameters is not physically meaningful.
    #[error("invalid parameter: {source}")]
    InvalidParameter {
        /// Description of the rejected parameter.
        #[from]
        source: ParameterError,
    },
    /// Returned when the layer stack has no depth to sample.
    #[error("layer stack has no depth (total depth = {total_depth} m)")]
    DegenerateGeometry {
        /// Sum of the layer thicknesses in metres.
        total_depth: f64,
    },
}

/// Error returned when an input parameter is rejected.
///
/// The variants describe the reason the supplied value is rejected so callers can
/// present actionable feedback to users, for example next to the slider that
/// produced the value.
///
/// # Examples
///
/// ```
/// use terzaghi::{ConsolidationEngine, ConsolidationError, ConsolidationParams, ParameterError};
///
/// let mut params = ConsolidationParams::default();
/// params.layers.clay.consolidation_coefficient = 0.0;
/// let error = ConsolidationEngine::default()
///     .compute(&params)
///     .expect_err("zero c_v is rejected");
/// assert_eq!(
///     error,
///     ConsolidationError::from(ParameterError::NonPositiveConsolidationCoefficient { value: 0.0 })
/// );
/// ```
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ParameterError {
    /// Returned when a layer thickness is negative.
    #[error("{layer} thickness must not be negative (received {thickness})")]
    NegativeThickness {
        /// Layer carrying the rejected thickness.
        layer: LayerKind,
        /// Rejected thickness in metres.
        thickness: f64,
    },
    /// Returned when a dry or saturated unit weight is zero or negative.
    #[error("{layer} unit weight must be positive (received {unit_weight})")]
    NonPositiveUnitWeight {
        /// Layer carrying the rejected unit weight.
        layer: LayerKind,
        /// Rejected unit weight in kN/m³.
        unit_weight: f64,
    },
    /// Returned when the clay coefficient of consolidation is zero or negative.
    #[error("coefficient of consolidation must be positive (received {value})")]
    NonPositiveConsolidationCoefficient {
        /// Rejected coefficient in m²/day.
        value: f64,
    },
    /// Returned when the water table lies outside the upper sand layer.
    #[error("water table must lie within [0, {max}] m (received {depth})")]
    WaterTableOutOfRange {
        /// Rejected water table depth in metres.
        depth: f64,
        /// Thickness of the upper sand layer in metres.
        max: f64,
    },
    /// Returned when the normalized time is outside `[0, 100]`.
    #[error("normalized time must lie within [0, 100] (received {time})")]
    TimeOutOfRange {
        /// Rejected normalized time.
        time: f64,
    },
    /// Returned when a value is NaN or infinite.
    #[error("{name} must be finite (received {value})")]
    NonFinite {
        /// Name of the offending quantity.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Returned when a numerical engine setting is unusable.
    #[error("engine setting {name} must be positive (received {value})")]
    InvalidSetting {
        /// Name of the offending setting.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Returned when the depth step would produce more samples than the engine allows.
    #[error("depth step {depth_step} m needs {requested} samples, more than the limit of {max}")]
    TooManySamples {
        /// Sampling step in metres.
        depth_step: f64,
        /// Samples the column would need.
        requested: f64,
        /// Configured `max_samples`.
        max: usize,
    },
}

impl ParameterError {
    /// Reject `value` unless it is a finite number.
    pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<f64, ParameterError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ParameterError::NonFinite { name, value })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_errors_convert_into_consolidation_errors() {
        let source = ParameterError::TimeOutOfRange { time: 120.0 };
        let error: ConsolidationError = source.into();
        assert_eq!(error, ConsolidationError::InvalidParameter { source });
        assert_eq!(
            error.to_string(),
            "invalid parameter: normalized time must lie within [0, 100] (received 120)"
        );
    }

    #[test]
    fn finite_values_pass_through() {
        assert_eq!(ParameterError::require_finite("load", 12.5), Ok(12.5));
        let error = ParameterError::require_finite("load", f64::NAN).expect_err("NaN rejected");
        assert!(matches!(error, ParameterError::NonFinite { name: "load", .. }));
    }

    #[test]
    fn messages_name_the_layer() {
        let error = ParameterError::NegativeThickness {
            layer: LayerKind::Clay,
            thickness: -1.0,
        };
        assert_eq!(
            error.to_string(),
            "clay thickness must not be negative (received -1)"
        );
    }
}
