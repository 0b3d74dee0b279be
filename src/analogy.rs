//! Piston–spring analogy of consolidation.
//!
//! A loaded piston rests on a spring inside a water-filled cylinder. The spring stands
//! for the soil skeleton and the water for the pore fluid; a tap controls drainage. At
//! the instant of loading the water carries the whole load. As water escapes through
//! the open tap the spring takes over, slowly for a cohesive soil and at once for a
//! cohesionless one. See
//! <https://en.wikipedia.org/wiki/Consolidation_(soil)>.

use serde::{Deserialize, Serialize};

use crate::errors::ParameterError;
use crate::params::{LoadCondition, TimeState};
use crate::terzaghi::{average_degree_of_consolidation, TIME_FACTOR_99};

/// Soil family shown by the analogy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilType {
    /// Sands and gravels; permeable enough to drain instantly.
    #[default]
    Cohesionless,
    /// Clays; drain over time following Terzaghi's theory.
    Cohesive,
}

/// State of the drainage tap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tap {
    /// No water can leave; the load stays on the water.
    #[default]
    Closed,
    /// Water drains and the spring picks up the load.
    Open,
}

impl Tap {
    /// Flip the tap, as a toggle button does.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Tap::Closed => Tap::Open,
            Tap::Open => Tap::Closed,
        }
    }
}

/// Split of the applied load between pore water and soil skeleton, in kPa.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LoadShare {
    /// Load carried by the water (excess pore pressure).
    pub water: f64,
    /// Load carried by the spring (effective stress increment).
    pub spring: f64,
}

impl LoadShare {
    /// Fraction of the load carried by the spring, or `1` when there is no load.
    #[must_use]
    pub fn spring_fraction(&self) -> f64 {
        let total = self.water + self.spring;
        if total == 0.0 {
            1.0
        } else {
            self.spring / total
        }
    }
}

/// Load carried by water and spring at normalized `time`.
///
/// # Errors
///
/// Returns [`ParameterError`] when the load is not finite or the time lies outside
/// `[0, 100]`.
///
/// # Examples
/// ```
/// use terzaghi::{piston_state, LoadCondition, SoilType, Tap, TimeState};
///
/// let load = LoadCondition::new(100.0);
/// let closed = piston_state(load, SoilType::Cohesive, Tap::Closed, TimeState::new(60.0))
///     .expect("valid inputs");
/// assert_eq!(closed.water, 100.0);
///
/// let sand = piston_state(load, SoilType::Cohesionless, Tap::Open, TimeState::new(1.0))
///     .expect("valid inputs");
/// assert_eq!(sand.spring, 100.0);
/// ```
pub fn piston_state(
    load: LoadCondition,
    soil: SoilType,
    tap: Tap,
    time: TimeState,
) -> Result<LoadShare, ParameterError> {
    let total = ParameterError::require_finite("surface load", load.surface_load)?;
    time.validate()?;
    let drained = match (tap, soil) {
        (Tap::Closed, _) => 0.0,
        _ if time.is_start() => 0.0,
        _ if time.is_complete() => 1.0,
        (Tap::Open, SoilType::Cohesionless) => 1.0,
        (Tap::Open, SoilType::Cohesive) => {
            average_degree_of_consolidation(time.fraction() * TIME_FACTOR_99)
        }
    };
    let spring = total * drained;
    Ok(LoadShare {
        water: total - spring,
        spring,
    })
}
