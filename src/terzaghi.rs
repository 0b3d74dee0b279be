//! Terzaghi's one-dimensional consolidation theory.
//!
//! The clay drains through both sands, so the longest drainage path is half the clay
//! thickness `H`. Excess pore pressure at depth `τ` below the top of the clay follows the
//! isochrone series
//!
//! ```text
//! u_e(τ, T_v) = Σ (2·u₀/M)·sin(M·τ/H)·exp(−M²·T_v),   M = (π/2)(2m + 1)
//! ```
//!
//! with the dimensionless time factor `T_v = c_v·t/H²`. See
//! <https://en.wikipedia.org/wiki/Consolidation_(soil)>.

use std::f64::consts::FRAC_PI_2;

use serde::Serialize;

use crate::params::TimeState;

/// Time factor at which the average degree of consolidation reaches 99 %.
pub const TIME_FACTOR_99: f64 = 1.4832;

/// Converts the normalized time scale into days and time factors for one clay layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClayTimeScale {
    /// Half the clay thickness, the drainage path for double drainage, in metres.
    pub half_thickness: f64,
    /// Coefficient of consolidation in m²/day.
    pub consolidation_coefficient: f64,
}

impl ClayTimeScale {
    /// Create the time scale of a doubly drained clay layer of `thickness` metres.
    #[must_use]
    pub fn new(thickness: f64, consolidation_coefficient: f64) -> Self {
        Self {
            half_thickness: thickness / 2.0,
            consolidation_coefficient,
        }
    }

    /// Days needed for 99 % consolidation, `t₉₉ = 1.4832·H²/c_v`.
    #[must_use]
    pub fn days_to_99_percent(&self) -> f64 {
        TIME_FACTOR_99 * self.half_thickness.powi(2) / self.consolidation_coefficient
    }

    /// Physical time in days represented by `time`, which spans `[0, t₉₉]`.
    #[must_use]
    pub fn elapsed_days(&self, time: TimeState) -> f64 {
        time.fraction() * self.days_to_99_percent()
    }

    /// Time factor `T_v = c_v·t/L²` for a drainage length `L` in metres.
    ///
    /// A point on a drained boundary (`L = 0`) has an infinite time factor once any
    /// time has elapsed.
    ///
    /// # Examples
    /// ```
    /// use terzaghi::{ClayTimeScale, TimeState, TIME_FACTOR_99};
    ///
    /// let scale = ClayTimeScale::new(4.0, 0.05);
    /// let tv = scale.time_factor(TimeState::new(50.0), scale.half_thickness);
    /// assert!((tv - 0.5 * TIME_FACTOR_99).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn time_factor(&self, time: TimeState, drainage_length: f64) -> f64 {
        let elapsed = self.elapsed_days(time);
        if elapsed <= 0.0 {
            return 0.0;
        }
        if drainage_length <= 0.0 {
            return f64::INFINITY;
        }
        elapsed * self.consolidation_coefficient / drainage_length.powi(2)
    }
}

/// Average degree of consolidation `U(T_v)`.
///
/// Uses the closed-form fit `sqrt(4·T_v/3)` below `T_v = 1/12` and
/// `1 − (2/3)·exp(1/4 − 3·T_v)` above it. The two branches meet at `U = 1/3`.
///
/// # Examples
/// ```
/// use terzaghi::average_degree_of_consolidation;
///
/// assert_eq!(average_degree_of_consolidation(0.0), 0.0);
/// assert!((average_degree_of_consolidation(1.0 / 12.0) - 1.0 / 3.0).abs() < 1e-12);
/// assert_eq!(average_degree_of_consolidation(f64::INFINITY), 1.0);
/// ```
#[must_use]
pub fn average_degree_of_consolidation(time_factor: f64) -> f64 {
    if time_factor <= 0.0 {
        0.0
    } else if time_factor < 1.0 / 12.0 {
        (4.0 * time_factor / 3.0).sqrt()
    } else {
        1.0 - 2.0 / 3.0 * (0.25 - 3.0 * time_factor).exp()
    }
}

/// Result of summing the isochrone series at one point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SeriesSum {
    /// Excess pore pressure in kPa.
    pub value: f64,
    /// Number of modes added.
    pub modes: usize,
    /// Whether the bound on the next omitted term fell below the tolerance.
    pub converged: bool,
}

/// Truncation controls for the isochrone series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesControl {
    /// Maximum number of modes to add.
    pub max_modes: usize,
    /// Absolute tolerance on the next term in kPa.
    pub tolerance: f64,
}

/// Mode number `M = (π/2)(2m + 1)`.
fn mode_number(m: usize) -> f64 {
    FRAC_PI_2 * (2 * m + 1) as f64
}

/// Magnitude bound `|2·u₀/M|·exp(−M²·T_v)` of mode `m`.
fn mode_amplitude(initial: f64, m: usize, time_factor: f64) -> f64 {
    let big_m = mode_number(m);
    (2.0 * initial / big_m).abs() * (-big_m * big_m * time_factor).exp()
}

/// Excess pore pressure from the isochrone series.
///
/// `depth_ratio` is `τ/H`, spanning `[0, 2]` across a doubly drained layer. The sum stops
/// as soon as the amplitude of the next mode drops below `control.tolerance`, or after
/// `control.max_modes` modes.
///
/// The series converges poorly as `T_v → 0`; callers evaluate the instant of loading
/// with the closed form `u_e = u₀` instead.
///
/// # Examples
/// ```
/// use terzaghi::{excess_pore_pressure, SeriesControl};
///
/// let control = SeriesControl { max_modes: 1_000, tolerance: 1e-9 };
/// let mid = excess_pore_pressure(100.0, 1.0, 0.2, control);
/// assert!(mid.converged);
/// assert!(mid.value > 0.0 && mid.value < 100.0);
/// ```
#[must_use]
pub fn excess_pore_pressure(
    initial: f64,
    depth_ratio: f64,
    time_factor: f64,
    control: SeriesControl,
) -> SeriesSum {
    if initial == 0.0 || time_factor.is_infinite() {
        return SeriesSum {
            value: 0.0,
            modes: 0,
            converged: true,
        };
    }
    let mut value = 0.0;
    for m in 0..control.max_modes {
        let big_m = mode_number(m);
        value += 2.0 * initial / big_m
            * (big_m * depth_ratio).sin()
            * (-big_m * big_m * time_factor).exp();
        if mode_amplitude(initial, m + 1, time_factor) < control.tolerance {
            return SeriesSum {
                value,
                modes: m + 1,
                converged: true,
            };
        }
    }
    SeriesSum {
        value,
        modes: control.max_modes,
        converged: false,
    }
}
