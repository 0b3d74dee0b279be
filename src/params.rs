//! Input parameters and numerical settings for the consolidation engine.

use serde::{Deserialize, Serialize};

use crate::errors::ParameterError;
use crate::soil::{LayerKind, LayerStack};

/// Uniform surface load applied instantaneously at `t = 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadCondition {
    /// Load increment `Δσ` in kPa. It does not attenuate with depth.
    pub surface_load: f64,
}

impl LoadCondition {
    /// Create a [`LoadCondition`] from a load in kPa.
    #[must_use]
    pub const fn new(surface_load: f64) -> Self {
        Self { surface_load }
    }
}

/// Depth of the phreatic surface below ground level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaterTable {
    /// Depth in metres. Zero places the water table at the surface.
    pub depth: f64,
}

impl WaterTable {
    /// Create a [`WaterTable`] at `depth` metres.
    #[must_use]
    pub const fn new(depth: f64) -> Self {
        Self { depth }
    }

    /// Water table at ground level, used when no water table control is exposed.
    #[must_use]
    pub const fn at_surface() -> Self {
        Self { depth: 0.0 }
    }
}

/// Normalized elapsed time on a `[0, 100]` scale.
///
/// `0` is the instant after loading and `100` stands for `t → ∞`. Both ends are
/// evaluated with exact closed forms rather than the Fourier series.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeState {
    /// Position on the normalized time scale.
    pub time: f64,
}

impl TimeState {
    /// Instant after the load is applied.
    pub const START: TimeState = TimeState { time: 0.0 };
    /// Sentinel for fully drained conditions.
    pub const COMPLETE: TimeState = TimeState { time: 100.0 };

    /// Create a [`TimeState`].
    #[must_use]
    pub const fn new(time: f64) -> Self {
        Self { time }
    }

    /// Return `true` at the instant of loading.
    #[must_use]
    pub fn is_start(self) -> bool {
        self.time <= Self::START.time
    }

    /// Return `true` at the fully drained sentinel.
    #[must_use]
    pub fn is_complete(self) -> bool {
        self.time >= Self::COMPLETE.time
    }

    /// Elapsed fraction `t / 100` of the time needed for 99 % consolidation.
    #[must_use]
    pub fn fraction(self) -> f64 {
        self.time / Self::COMPLETE.time
    }

    /// Check that the time lies on the normalized scale.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::TimeOutOfRange`] outside `[0, 100]`, including NaN.
    pub fn validate(self) -> Result<(), ParameterError> {
        if (Self::START.time..=Self::COMPLETE.time).contains(&self.time) {
            Ok(())
        } else {
            Err(ParameterError::TimeOutOfRange { time: self.time })
        }
    }
}

/// How the surface load translates into initial excess pore pressure in the clay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadResponse {
    /// The full load increment `Δσ` becomes excess pore pressure.
    #[default]
    Direct,
    /// A footing influence factor of `3/2` scales the stress increment.
    FootingInfluence,
}

impl LoadResponse {
    /// Multiplier applied to `Δσ` to obtain the initial excess pore pressure.
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            LoadResponse::Direct => 1.0,
            LoadResponse::FootingInfluence => 1.5,
        }
    }
}

/// Drainage length used to build the time factor `T_v`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrainagePath {
    /// Half the clay thickness, for double drainage through both sands.
    #[default]
    HalfThickness,
    /// Distance from each point to the nearer drained boundary.
    NearestBoundary,
}

/// Numerical settings of the engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Sampling step along depth in metres.
    pub depth_step: f64,
    /// Upper bound on the number of Fourier modes summed per point.
    pub max_modes: usize,
    /// Summation stops once the bound on the next term drops below this value (kPa).
    pub series_tolerance: f64,
    /// Initial excess pore pressure convention.
    pub load_response: LoadResponse,
    /// Drainage length convention for the time factor.
    pub drainage_path: DrainagePath,
    /// Upper bound on the number of depth samples in one profile.
    pub max_samples: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            depth_step: 0.05,
            max_modes: 1_000,
            series_tolerance: 1.0e-9,
            load_response: LoadResponse::Direct,
            drainage_path: DrainagePath::HalfThickness,
            max_samples: 1_000_000,
        }
    }
}

impl EngineSettings {
    /// Check the numerical settings.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidSetting`] when the step or tolerance is not a
    /// positive finite number or when no Fourier mode or depth sample is allowed.
    pub fn validate(&self) -> Result<(), ParameterError> {
        let checks = [
            ("depth_step", self.depth_step),
            ("series_tolerance", self.series_tolerance),
            ("max_modes", self.max_modes as f64),
            ("max_samples", self.max_samples as f64),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(ParameterError::InvalidSetting { name, value });
            }
        }
        Ok(())
    }
}

/// Complete set of scalar inputs for one profile evaluation.
///
/// The default reproduces the reference teaching scenario: 2 m sand over 4 m clay
/// over 2 m sand, a 100 kPa surface load and the water table at the surface.
///
/// # Examples
/// ```
/// use terzaghi::ConsolidationParams;
///
/// let params: ConsolidationParams = serde_json::from_str(r#"{ "load": 50.0, "time": 25.0 }"#)
///     .expect("partial documents fall back to defaults");
/// assert_eq!(params.load.surface_load, 50.0);
/// assert_eq!(params.layers.clay.thickness, 4.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidationParams {
    /// Soil layers, top-down.
    pub layers: LayerStack,
    /// Surface load.
    pub load: LoadCondition,
    /// Water table depth.
    pub water_table: WaterTable,
    /// Normalized elapsed time.
    pub time: TimeState,
}

impl Default for ConsolidationParams {
    fn default() -> Self {
        Self {
            layers: LayerStack::default(),
            load: LoadCondition::new(100.0),
            water_table: WaterTable::at_surface(),
            time: TimeState::START,
        }
    }
}

impl ConsolidationParams {
    /// Return a copy evaluated at another normalized time.
    #[must_use]
    pub fn at_time(mut self, time: TimeState) -> Self {
        self.time = time;
        self
    }

    /// Check every input, layers first.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParameterError`] found.
    pub fn validate(&self) -> Result<(), ParameterError> {
        self.layers.validate()?;
        ParameterError::require_finite("surface load", self.load.surface_load)?;
        let depth = ParameterError::require_finite("water table", self.water_table.depth)?;
        let max = self.layers.layer(LayerKind::UpperSand).thickness;
        if !(0.0..=max).contains(&depth) {
            return Err(ParameterError::WaterTableOutOfRange { depth, max });
        }
        self.time.validate()
    }
}
