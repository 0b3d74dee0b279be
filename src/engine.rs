//! Depth profiles of total stress, pore pressure and effective stress.

use std::ops::Range;

use ndarray::Array1;
use serde::Serialize;

use crate::errors::{ConsolidationError, ParameterError};
use crate::params::{ConsolidationParams, DrainagePath, EngineSettings, TimeState};
use crate::soil::{LayerBounds, LayerKind, SoilLayer, UNIT_WEIGHT_OF_WATER};
use crate::terzaghi::{
    average_degree_of_consolidation, excess_pore_pressure, ClayTimeScale, SeriesControl,
};

/// Height of the load arrows drawn above the surface, as a fraction of the total depth.
pub const LOAD_ARROW_MARGIN: f64 = 0.1;

/// Guards `floor(thickness / step)` against steps that divide the thickness up to rounding.
const SAMPLE_COUNT_SLACK: f64 = 1.0e-9;

/// Convergence summary of the excess pore pressure series over a whole profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SeriesDiagnostics {
    /// Largest number of modes summed at any clay sample.
    pub max_modes_used: usize,
    /// `false` when any clay sample hit the mode cap before meeting the tolerance.
    pub converged: bool,
}

/// Values at a single sample of a [`DepthProfile`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ProfileSample {
    /// Depth below the surface in metres.
    pub depth: f64,
    /// Layer the sample belongs to.
    pub layer: LayerKind,
    /// Total vertical stress in kPa.
    pub total_stress: f64,
    /// Pore-water pressure in kPa.
    pub pore_pressure: f64,
    /// Effective vertical stress in kPa.
    pub effective_stress: f64,
    /// Pore pressure in excess of hydrostatic in kPa.
    pub excess_pore_pressure: f64,
    /// Local degree of consolidation in `[0, 1]`.
    pub local_consolidation: f64,
}

/// Depth-sampled output of the [`ConsolidationEngine`].
///
/// All arrays are co-indexed with `depths`. Depths never decrease; a boundary between two
/// non-empty layers appears twice, once as the last sample of the upper layer and once
/// as the first sample of the lower one, so that pore pressure jumps at the clay
/// boundaries stay visible.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DepthProfile {
    /// Sample depths in metres.
    pub depths: Array1<f64>,
    /// Layer of each sample.
    pub layers: Vec<LayerKind>,
    /// Total vertical stress in kPa.
    pub total_stress: Array1<f64>,
    /// Pore-water pressure in kPa.
    pub pore_pressure: Array1<f64>,
    /// Effective vertical stress in kPa.
    pub effective_stress: Array1<f64>,
    /// Pore pressure in excess of hydrostatic in kPa.
    pub excess_pore_pressure: Array1<f64>,
    /// Local degree of consolidation; sands are always fully drained.
    pub local_consolidation: Array1<f64>,
    /// Average degree of consolidation of the clay.
    pub average_consolidation: f64,
    /// Time factor `T_v` over the half-thickness drainage path.
    pub time_factor: f64,
    /// Physical time in days represented by the normalized time.
    pub elapsed_days: f64,
    /// Sum of the layer thicknesses in metres.
    pub total_depth: f64,
    /// Space above the surface reserved for load arrows in metres.
    pub load_arrow_offset: f64,
    /// Submerged unit weight of each layer, top-down, rounded for display.
    pub submerged_unit_weights: [f64; 3],
    /// Convergence of the excess pore pressure series.
    pub series: SeriesDiagnostics,
}

impl DepthProfile {
    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    /// Return `true` when the profile has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// Values at sample `index`.
    #[must_use]
    pub fn sample(&self, index: usize) -> Option<ProfileSample> {
        Some(ProfileSample {
            depth: *self.depths.get(index)?,
            layer: *self.layers.get(index)?,
            total_stress: *self.total_stress.get(index)?,
            pore_pressure: *self.pore_pressure.get(index)?,
            effective_stress: *self.effective_stress.get(index)?,
            excess_pore_pressure: *self.excess_pore_pressure.get(index)?,
            local_consolidation: *self.local_consolidation.get(index)?,
        })
    }

    /// Iterate over every sample, top-down.
    pub fn samples(&self) -> impl Iterator<Item = ProfileSample> + '_ {
        (0..self.len()).filter_map(move |index| self.sample(index))
    }

    /// Indices of the samples belonging to `layer`. Empty when the layer has no thickness.
    #[must_use]
    pub fn layer_range(&self, layer: LayerKind) -> Range<usize> {
        let start = self.layers.iter().position(|kind| *kind == layer);
        match start {
            Some(start) => {
                let count = self.layers[start..]
                    .iter()
                    .take_while(|kind| **kind == layer)
                    .count();
                start..start + count
            }
            None => 0..0,
        }
    }

    /// Sample of `layer` closest to `depth`.
    ///
    /// # Examples
    /// ```
    /// use terzaghi::{ConsolidationEngine, ConsolidationParams, LayerKind};
    ///
    /// let profile = ConsolidationEngine::default()
    ///     .compute(&ConsolidationParams::default())
    ///     .expect("reference scenario is valid");
    /// let mid_clay = profile.sample_near(LayerKind::Clay, 4.0).expect("clay is sampled");
    /// assert!((mid_clay.pore_pressure - 140.0).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn sample_near(&self, layer: LayerKind, depth: f64) -> Option<ProfileSample> {
        self.layer_range(layer)
            .min_by(|&a, &b| {
                let da = (self.depths[a] - depth).abs();
                let db = (self.depths[b] - depth).abs();
                da.total_cmp(&db)
            })
            .and_then(|index| self.sample(index))
    }
}

/// Evaluates one-dimensional consolidation profiles for a sand–clay–sand stack.
///
/// The engine holds only numerical settings. Every call to [`compute`](Self::compute)
/// is independent, so one engine can serve any number of callers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConsolidationEngine {
    /// Sampling and series settings.
    settings: EngineSettings,
}

impl ConsolidationEngine {
    /// Create an engine with explicit settings.
    #[must_use]
    pub const fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    /// Numerical settings in use.
    #[must_use]
    pub const fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Compute the depth profile for `params`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsolidationError::InvalidParameter`] when a parameter or engine setting
    /// is rejected, including a depth step that would need more than
    /// [`EngineSettings::max_samples`] samples, and
    /// [`ConsolidationError::DegenerateGeometry`] when the layers have no combined
    /// thickness. Nothing is computed before validation passes.
    ///
    /// # Examples
    /// ```
    /// use terzaghi::{ConsolidationEngine, ConsolidationParams, TimeState};
    ///
    /// let engine = ConsolidationEngine::default();
    /// let params = ConsolidationParams::default().at_time(TimeState::new(30.0));
    /// let profile = engine.compute(&params).expect("valid parameters");
    /// assert_eq!(profile.total_depth, 8.0);
    /// assert!(profile.average_consolidation > 0.0 && profile.average_consolidation < 1.0);
    /// ```
    pub fn compute(
        &self,
        params: &ConsolidationParams,
    ) -> Result<DepthProfile, ConsolidationError> {
        self.settings.validate()?;
        params.validate()?;
        let total_depth = params.layers.total_depth();
        if total_depth <= 0.0 {
            return Err(ConsolidationError::DegenerateGeometry { total_depth });
        }
        self.check_sample_budget(params)?;

        let pressures = ClayPressures::new(params, &self.settings);
        let mut columns = Columns::default();
        let mut stress_at_top = params.load.surface_load;
        for (kind, layer, bounds) in params.layers.iter() {
            if bounds.thickness() <= 0.0 {
                continue;
            }
            for depth in self.sample_depths(bounds) {
                let total_stress = stress_at_top
                    + overburden(&layer, bounds.top, depth, params.water_table.depth);
                let hydrostatic = hydrostatic_pressure(depth, params.water_table.depth);
                let (excess, local_consolidation) = match kind {
                    LayerKind::Clay => pressures.at(depth - bounds.top, &mut columns.series),
                    LayerKind::UpperSand | LayerKind::LowerSand => (0.0, 1.0),
                };
                columns.push(
                    kind,
                    depth,
                    total_stress,
                    hydrostatic + excess,
                    excess,
                    local_consolidation,
                );
            }
            stress_at_top +=
                overburden(&layer, bounds.top, bounds.bottom, params.water_table.depth);
        }

        Ok(columns.into_profile(params, pressures, total_depth))
    }

    /// Compute profiles at several normalized times, in the order given.
    ///
    /// Mirrors stepping a time slider: only the time changes between profiles.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConsolidationError`] met; no profiles are returned in that case.
    pub fn time_history(
        &self,
        params: &ConsolidationParams,
        times: &[TimeState],
    ) -> Result<Vec<DepthProfile>, ConsolidationError> {
        times
            .iter()
            .map(|&time| self.compute(&params.at_time(time)))
            .collect()
    }

    /// Evenly spaced depths spanning `bounds`, both ends included exactly.
    ///
    /// The count is `floor(thickness / step) + 1`, but never fewer than two so that a
    /// layer thinner than one step still reports both boundaries.
    fn sample_depths(&self, bounds: LayerBounds) -> impl Iterator<Item = f64> {
        let thickness = bounds.thickness();
        let intervals = self.interval_count(thickness) as usize;
        (0..=intervals).map(move |i| {
            if i == intervals {
                bounds.bottom
            } else {
                bounds.top + thickness * i as f64 / intervals as f64
            }
        })
    }

    /// Number of sampling intervals across a layer of `thickness` metres, at least one.
    fn interval_count(&self, thickness: f64) -> f64 {
        (thickness / self.settings.depth_step + SAMPLE_COUNT_SLACK)
            .floor()
            .max(1.0)
    }

    /// Reject columns that would need more than `max_samples` samples.
    fn check_sample_budget(&self, params: &ConsolidationParams) -> Result<(), ParameterError> {
        let requested: f64 = params
            .layers
            .iter()
            .filter(|(_, _, bounds)| bounds.thickness() > 0.0)
            .map(|(_, _, bounds)| self.interval_count(bounds.thickness()) + 1.0)
            .sum();
        if requested > self.settings.max_samples as f64 {
            return Err(ParameterError::TooManySamples {
                depth_step: self.settings.depth_step,
                requested,
                max: self.settings.max_samples,
            });
        }
        Ok(())
    }
}

/// Weight of `layer` between depths `from` and `to`, dry above the water table and
/// saturated below it.
fn overburden(layer: &SoilLayer, from: f64, to: f64, water_table: f64) -> f64 {
    let dry = (to.min(water_table) - from).max(0.0);
    let saturated = (to - from) - dry;
    dry * layer.dry_unit_weight + saturated * layer.saturated_unit_weight
}

/// Hydrostatic pore pressure, zero above the water table.
fn hydrostatic_pressure(depth: f64, water_table: f64) -> f64 {
    (depth - water_table).max(0.0) * UNIT_WEIGHT_OF_WATER
}

/// Excess pore pressure rules for the clay at one instant.
#[derive(Clone, Copy, Debug)]
struct ClayPressures {
    /// Clay thickness in metres.
    thickness: f64,
    /// Excess pore pressure just after loading in kPa.
    initial: f64,
    /// Normalized time of the evaluation.
    time: TimeState,
    /// Time scale of the clay.
    scale: ClayTimeScale,
    /// Drainage length convention.
    drainage_path: DrainagePath,
    /// Series truncation.
    control: SeriesControl,
}

impl ClayPressures {
    /// Capture the clay state for `params`.
    fn new(params: &ConsolidationParams, settings: &EngineSettings) -> Self {
        let clay = params.layers.clay;
        Self {
            thickness: clay.thickness,
            initial: params.load.surface_load * settings.load_response.factor(),
            time: params.time,
            scale: ClayTimeScale::new(clay.thickness, clay.consolidation_coefficient),
            drainage_path: settings.drainage_path,
            control: SeriesControl {
                max_modes: settings.max_modes,
                tolerance: settings.series_tolerance,
            },
        }
    }

    /// Excess pore pressure and local degree of consolidation at `offset` metres below
    /// the top of the clay.
    fn at(&self, offset: f64, diagnostics: &mut SeriesDiagnostics) -> (f64, f64) {
        let excess = if self.time.is_start() {
            self.initial
        } else if self.time.is_complete() {
            0.0
        } else {
            let half = self.scale.half_thickness;
            let drainage_length = match self.drainage_path {
                DrainagePath::HalfThickness => half,
                DrainagePath::NearestBoundary => offset.min(self.thickness - offset),
            };
            let time_factor = self.scale.time_factor(self.time, drainage_length);
            let sum = excess_pore_pressure(self.initial, offset / half, time_factor, self.control);
            diagnostics.max_modes_used = diagnostics.max_modes_used.max(sum.modes);
            diagnostics.converged &= sum.converged;
            sum.value
        };
        let local = if self.initial == 0.0 {
            1.0
        } else {
            1.0 - excess / self.initial
        };
        (excess, local)
    }

    /// Average degree of consolidation of the clay.
    fn average_consolidation(&self) -> f64 {
        if self.thickness <= 0.0 || self.time.is_complete() {
            1.0
        } else if self.time.is_start() {
            0.0
        } else {
            average_degree_of_consolidation(self.time_factor())
        }
    }

    /// Time factor over the half-thickness drainage path, zero without clay.
    fn time_factor(&self) -> f64 {
        if self.thickness <= 0.0 {
            return 0.0;
        }
        self.scale.time_factor(self.time, self.scale.half_thickness)
    }
}

/// Column buffers filled while walking down the layers.
#[derive(Debug)]
struct Columns {
    /// Sample depths.
    depths: Vec<f64>,
    /// Layer of each sample.
    layers: Vec<LayerKind>,
    /// Total stress.
    total_stress: Vec<f64>,
    /// Pore pressure.
    pore_pressure: Vec<f64>,
    /// Excess pore pressure.
    excess: Vec<f64>,
    /// Local degree of consolidation.
    local_consolidation: Vec<f64>,
    /// Series convergence across the clay samples.
    series: SeriesDiagnostics,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            depths: Vec::new(),
            layers: Vec::new(),
            total_stress: Vec::new(),
            pore_pressure: Vec::new(),
            excess: Vec::new(),
            local_consolidation: Vec::new(),
            series: SeriesDiagnostics {
                max_modes_used: 0,
                converged: true,
            },
        }
    }
}

impl Columns {
    /// Append one sample.
    fn push(
        &mut self,
        layer: LayerKind,
        depth: f64,
        total_stress: f64,
        pore_pressure: f64,
        excess: f64,
        local_consolidation: f64,
    ) {
        self.depths.push(depth);
        self.layers.push(layer);
        self.total_stress.push(total_stress);
        self.pore_pressure.push(pore_pressure);
        self.excess.push(excess);
        self.local_consolidation.push(local_consolidation);
    }

    /// Freeze the buffers into a [`DepthProfile`].
    fn into_profile(
        self,
        params: &ConsolidationParams,
        pressures: ClayPressures,
        total_depth: f64,
    ) -> DepthProfile {
        let total_stress = Array1::from_vec(self.total_stress);
        let pore_pressure = Array1::from_vec(self.pore_pressure);
        let effective_stress = &total_stress - &pore_pressure;
        DepthProfile {
            depths: Array1::from_vec(self.depths),
            layers: self.layers,
            total_stress,
            pore_pressure,
            effective_stress,
            excess_pore_pressure: Array1::from_vec(self.excess),
            local_consolidation: Array1::from_vec(self.local_consolidation),
            average_consolidation: pressures.average_consolidation(),
            time_factor: pressures.time_factor(),
            elapsed_days: pressures.scale.elapsed_days(pressures.time),
            total_depth,
            load_arrow_offset: LOAD_ARROW_MARGIN * total_depth,
            submerged_unit_weights: params.layers.submerged_unit_weights(),
            series: self.series,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::params::{LoadResponse, WaterTable};

    fn compute(params: &ConsolidationParams) -> DepthProfile {
        ConsolidationEngine::default()
            .compute(params)
            .expect("parameters are valid")
    }

    #[test]
    fn layer_sample_counts_follow_step() {
        let profile = compute(&ConsolidationParams::default());
        assert_eq!(profile.layer_range(LayerKind::UpperSand), 0..41);
        assert_eq!(profile.layer_range(LayerKind::Clay), 41..122);
        assert_eq!(profile.layer_range(LayerKind::LowerSand), 122..163);
        assert_eq!(profile.len(), 163);
        assert_eq!(profile.depths[0], 0.0);
        assert_eq!(profile.depths[40], 2.0);
        assert_eq!(profile.depths[41], 2.0);
        assert_eq!(profile.depths[162], 8.0);
    }

    #[test]
    fn thin_layer_keeps_both_boundaries() {
        let mut params = ConsolidationParams::default();
        params.layers.lower_sand.thickness = 0.01;
        let profile = compute(&params);
        let range = profile.layer_range(LayerKind::LowerSand);
        assert_eq!(range.len(), 2);
        assert_eq!(profile.depths[range.start], 6.0);
        assert_relative_eq!(profile.depths[range.end - 1], 6.01, epsilon = 1.0e-12);
    }

    #[test]
    fn uneven_thickness_ends_on_the_boundary() {
        let mut params = ConsolidationParams::default();
        params.layers.upper_sand.thickness = 1.23;
        let profile = compute(&params);
        let range = profile.layer_range(LayerKind::UpperSand);
        assert_eq!(range.len(), 25);
        assert_eq!(profile.depths[range.end - 1], 1.23);
    }

    #[test]
    fn total_stress_uses_dry_weight_above_water_table() {
        let mut params = ConsolidationParams::default();
        params.water_table = WaterTable::new(1.0);
        let profile = compute(&params);
        let surface = profile.sample_near(LayerKind::UpperSand, 0.0).expect("sampled");
        let water_table = profile.sample_near(LayerKind::UpperSand, 1.0).expect("sampled");
        let clay_top = profile.sample_near(LayerKind::Clay, 2.0).expect("sampled");
        assert_relative_eq!(surface.total_stress, 100.0);
        assert_relative_eq!(water_table.total_stress, 118.0, epsilon = 1.0e-9);
        assert_relative_eq!(clay_top.total_stress, 137.0, epsilon = 1.0e-9);
        assert_eq!(water_table.pore_pressure, 0.0);
        assert_relative_eq!(clay_top.pore_pressure - clay_top.excess_pore_pressure, 10.0);
    }

    #[test]
    fn total_stress_is_continuous_across_boundaries() {
        let profile = compute(&ConsolidationParams::default().at_time(TimeState::new(40.0)));
        for (upper, lower) in [
            (LayerKind::UpperSand, LayerKind::Clay),
            (LayerKind::Clay, LayerKind::LowerSand),
        ] {
            let last = profile.layer_range(upper).end - 1;
            let first = profile.layer_range(lower).start;
            assert_eq!(profile.depths[last], profile.depths[first]);
            assert_eq!(profile.total_stress[last], profile.total_stress[first]);
        }
    }

    #[test]
    fn effective_stress_is_total_minus_pore_pressure() {
        let profile = compute(&ConsolidationParams::default().at_time(TimeState::new(12.0)));
        for sample in profile.samples() {
            assert_eq!(
                sample.effective_stress,
                sample.total_stress - sample.pore_pressure
            );
        }
    }

    #[test]
    fn loading_instant_is_exact() {
        let profile = compute(&ConsolidationParams::default());
        for index in profile.layer_range(LayerKind::Clay) {
            let sample = profile.sample(index).expect("in range");
            assert_eq!(sample.excess_pore_pressure, 100.0);
            assert_eq!(sample.local_consolidation, 0.0);
            assert_relative_eq!(sample.pore_pressure, sample.depth * 10.0 + 100.0);
        }
        assert_eq!(profile.average_consolidation, 0.0);
        assert_eq!(profile.time_factor, 0.0);
    }

    #[test]
    fn full_drainage_is_exact() {
        let profile = compute(&ConsolidationParams::default().at_time(TimeState::COMPLETE));
        for index in profile.layer_range(LayerKind::Clay) {
            assert_eq!(profile.excess_pore_pressure[index], 0.0);
            assert_relative_eq!(profile.pore_pressure[index], profile.depths[index] * 10.0);
        }
        assert_eq!(profile.average_consolidation, 1.0);
        assert_eq!(profile.series.max_modes_used, 0);
    }

    #[test]
    fn intermediate_time_dissipates_from_the_boundaries() {
        let profile = compute(&ConsolidationParams::default().at_time(TimeState::new(20.0)));
        let top = profile.sample_near(LayerKind::Clay, 2.0).expect("sampled");
        let mid = profile.sample_near(LayerKind::Clay, 4.0).expect("sampled");
        assert_relative_eq!(top.excess_pore_pressure, 0.0, epsilon = 1.0e-9);
        assert!(mid.excess_pore_pressure > 0.0 && mid.excess_pore_pressure < 100.0);
        assert!(profile.series.converged);
        assert!(profile.series.max_modes_used > 0);
        assert_relative_eq!(profile.time_factor, 0.2 * 1.4832, epsilon = 1.0e-12);
    }

    #[test]
    fn footing_influence_scales_excess_pressure() {
        let settings = EngineSettings {
            load_response: LoadResponse::FootingInfluence,
            ..EngineSettings::default()
        };
        let profile = ConsolidationEngine::new(settings)
            .compute(&ConsolidationParams::default())
            .expect("valid parameters");
        let mid = profile.sample_near(LayerKind::Clay, 4.0).expect("sampled");
        assert_relative_eq!(mid.excess_pore_pressure, 150.0);
        assert_relative_eq!(mid.total_stress, 100.0 + 2.0 * 19.0 + 2.0 * 21.0);
    }

    #[test]
    fn nearest_boundary_drains_faster_off_centre() {
        let params = ConsolidationParams::default().at_time(TimeState::new(10.0));
        let canonical = compute(&params);
        let nearest = ConsolidationEngine::new(EngineSettings {
            drainage_path: DrainagePath::NearestBoundary,
            ..EngineSettings::default()
        })
        .compute(&params)
        .expect("valid parameters");

        let mid_a = canonical.sample_near(LayerKind::Clay, 4.0).expect("sampled");
        let mid_b = nearest.sample_near(LayerKind::Clay, 4.0).expect("sampled");
        assert_relative_eq!(mid_a.excess_pore_pressure, mid_b.excess_pore_pressure);

        let off_a = canonical.sample_near(LayerKind::Clay, 2.5).expect("sampled");
        let off_b = nearest.sample_near(LayerKind::Clay, 2.5).expect("sampled");
        assert!(off_b.excess_pore_pressure < off_a.excess_pore_pressure);

        let edge = nearest.sample_near(LayerKind::Clay, 2.0).expect("sampled");
        assert_eq!(edge.excess_pore_pressure, 0.0);
    }

    #[test]
    fn missing_clay_introduces_no_discontinuity() {
        let mut params = ConsolidationParams::default();
        params.layers.clay.thickness = 0.0;
        let profile = compute(&params.at_time(TimeState::new(50.0)));
        assert!(profile.layer_range(LayerKind::Clay).is_empty());
        let last = profile.layer_range(LayerKind::UpperSand).end - 1;
        let first = profile.layer_range(LayerKind::LowerSand).start;
        assert_eq!(profile.total_stress[last], profile.total_stress[first]);
        assert_eq!(profile.pore_pressure[last], profile.pore_pressure[first]);
        assert_eq!(profile.average_consolidation, 1.0);
    }

    #[test]
    fn degenerate_geometry_is_rejected() {
        let mut params = ConsolidationParams::default();
        params.layers.upper_sand.thickness = 0.0;
        params.layers.clay.thickness = 0.0;
        params.layers.lower_sand.thickness = 0.0;
        let error = ConsolidationEngine::default()
            .compute(&params)
            .expect_err("nothing to sample");
        assert_eq!(error, ConsolidationError::DegenerateGeometry { total_depth: 0.0 });
    }

    #[test]
    fn invalid_parameters_are_reported_before_computing() {
        let mut params = ConsolidationParams::default();
        params.layers.clay.consolidation_coefficient = 0.0;
        let error = ConsolidationEngine::default()
            .compute(&params)
            .expect_err("zero c_v rejected");
        assert_eq!(
            error,
            ConsolidationError::InvalidParameter {
                source: ParameterError::NonPositiveConsolidationCoefficient { value: 0.0 }
            }
        );
    }

    #[test]
    fn time_history_keeps_input_order() {
        let times = [TimeState::START, TimeState::new(50.0), TimeState::COMPLETE];
        let profiles = ConsolidationEngine::default()
            .time_history(&ConsolidationParams::default(), &times)
            .expect("valid parameters");
        let averages: Vec<f64> = profiles.iter().map(|p| p.average_consolidation).collect();
        assert_eq!(averages[0], 0.0);
        assert!(averages[1] > 0.0 && averages[1] < 1.0);
        assert_eq!(averages[2], 1.0);

        let error = ConsolidationEngine::default()
            .time_history(&ConsolidationParams::default(), &[TimeState::new(150.0)])
            .expect_err("out of range time");
        assert!(matches!(error, ConsolidationError::InvalidParameter { .. }));
    }

    #[test]
    fn oversampled_columns_are_rejected_before_allocating() {
        let tiny_step = ConsolidationEngine::new(EngineSettings {
            depth_step: 1.0e-300,
            ..EngineSettings::default()
        });
        let error = tiny_step
            .compute(&ConsolidationParams::default())
            .expect_err("sample count is capped");
        assert!(matches!(
            error,
            ConsolidationError::InvalidParameter {
                source: ParameterError::TooManySamples { max: 1_000_000, .. }
            }
        ));

        let mut deep = ConsolidationParams::default();
        deep.layers.lower_sand.thickness = 1.0e12;
        let error = ConsolidationEngine::default()
            .compute(&deep)
            .expect_err("sample count is capped");
        match error {
            ConsolidationError::InvalidParameter {
                source: ParameterError::TooManySamples { requested, .. },
            } => assert!(requested > 1.0e13),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn sample_budget_counts_every_layer() {
        // 41 + 81 + 41 samples for the reference column.
        let exact = ConsolidationEngine::new(EngineSettings {
            max_samples: 163,
            ..EngineSettings::default()
        });
        assert_eq!(exact.compute(&ConsolidationParams::default()).map(|p| p.len()), Ok(163));

        let short = ConsolidationEngine::new(EngineSettings {
            max_samples: 162,
            ..EngineSettings::default()
        });
        assert!(short.compute(&ConsolidationParams::default()).is_err());
    }

    #[test]
    fn mismatched_columns_do_not_panic() {
        let mut profile = compute(&ConsolidationParams::default());
        let last = profile.len() - 1;
        profile.total_stress = profile.total_stress.slice(ndarray::s![..last]).to_owned();
        assert!(profile.sample(last).is_none());
        assert!(profile.sample(last - 1).is_some());
        assert_eq!(profile.samples().count(), last);
    }

    #[test]
    fn renderer_metadata() {
        let profile = compute(&ConsolidationParams::default());
        assert_eq!(profile.total_depth, 8.0);
        assert_relative_eq!(profile.load_arrow_offset, 0.8);
        assert_eq!(profile.submerged_unit_weights, [9.0, 11.0, 9.0]);
    }
}
