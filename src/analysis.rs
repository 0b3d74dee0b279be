use terzaghi::{
    piston_state, ConsolidationEngine, ConsolidationError, ConsolidationParams, DepthProfile,
    LayerKind, LoadShare, ProfileSample, SoilType, Tap,
};

/// Summary of a consolidation run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    /// Parameters that generated the result, exposed for reporting.
    pub params: ConsolidationParams,
    /// Full depth profile for the renderer.
    pub profile: DepthProfile,
    /// Sample at the top of the clay, where drainage starts.
    pub clay_top: Option<ProfileSample>,
    /// Sample at mid-depth of the clay, the last point to drain.
    pub clay_middle: Option<ProfileSample>,
    /// Deepest sample of the column.
    pub base: Option<ProfileSample>,
    /// Piston–spring analogy for a draining cohesive soil at the same time.
    pub analogy: LoadShare,
}

/// Evaluate the profile for `params` and pick out the depths worth reporting.
///
/// The pore pressure model follows Terzaghi's one-dimensional theory described at
/// <https://en.wikipedia.org/wiki/Consolidation_(soil)>.
pub fn run_analysis(
    engine: &ConsolidationEngine,
    params: &ConsolidationParams,
) -> Result<AnalysisSummary, ConsolidationError> {
    let profile = engine.compute(params)?;

    let clay = params.layers.bounds(LayerKind::Clay);
    let clay_top = profile.sample_near(LayerKind::Clay, clay.top);
    let clay_middle = profile.sample_near(LayerKind::Clay, (clay.top + clay.bottom) / 2.0);
    let base = profile.len().checked_sub(1).and_then(|last| profile.sample(last));
    let analogy = piston_state(params.load, SoilType::Cohesive, Tap::Open, params.time)?;

    Ok(AnalysisSummary {
        params: *params,
        profile,
        clay_top,
        clay_middle,
        base,
        analogy,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::scenario::reference_scenario;

    #[test]
    fn produces_expected_results() {
        let summary = run_analysis(&ConsolidationEngine::default(), &reference_scenario())
            .expect("reference scenario is valid");

        let top = summary.clay_top.expect("clay sampled");
        assert_relative_eq!(top.depth, 2.0);
        assert_relative_eq!(top.total_stress, 138.0);
        assert_relative_eq!(top.excess_pore_pressure, 0.0, epsilon = 1.0e-9);

        let middle = summary.clay_middle.expect("clay sampled");
        assert_relative_eq!(middle.depth, 4.0);
        assert!(middle.excess_pore_pressure > 0.0 && middle.excess_pore_pressure < 100.0);

        let base = summary.base.expect("profile not empty");
        assert_relative_eq!(base.depth, 8.0);
        assert_relative_eq!(base.pore_pressure, 80.0);

        assert_relative_eq!(
            summary.analogy.spring / 100.0,
            summary.profile.average_consolidation,
            epsilon = 1.0e-12
        );
    }
}
