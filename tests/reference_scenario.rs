#![warn(clippy::pedantic)]

use terzaghi::{
    ConsolidationEngine, ConsolidationError, ConsolidationParams, DepthProfile, LayerKind,
    ParameterError, TimeState, WaterTable,
};

#[derive(Debug, Clone, Copy)]
struct Checkpoints {
    clay_top: f64,
    clay_middle: f64,
}

fn build_reference_column() -> (ConsolidationParams, Checkpoints) {
    let params = ConsolidationParams::default();
    let clay = params.layers.bounds(LayerKind::Clay);
    (
        params,
        Checkpoints {
            clay_top: clay.top,
            clay_middle: (clay.top + clay.bottom) / 2.0,
        },
    )
}

fn evaluate(params: &ConsolidationParams) -> DepthProfile {
    ConsolidationEngine::default()
        .compute(params)
        .expect("reference column evaluates")
}

#[test]
fn builds_expected_column() {
    let (params, checkpoints) = build_reference_column();

    assert!((params.layers.total_depth() - 8.0).abs() < f64::EPSILON);
    assert!((checkpoints.clay_top - 2.0).abs() < f64::EPSILON);
    assert!((checkpoints.clay_middle - 4.0).abs() < f64::EPSILON);
    assert!((params.load.surface_load - 100.0).abs() < f64::EPSILON);
    assert!(params.water_table.depth.abs() < f64::EPSILON);
}

#[test]
fn pore_pressure_right_after_loading() {
    let (params, checkpoints) = build_reference_column();
    let profile = evaluate(&params.at_time(TimeState::START));

    let middle = profile
        .sample_near(LayerKind::Clay, checkpoints.clay_middle)
        .expect("mid-clay sample");
    assert!((middle.depth - 4.0).abs() < 1.0e-12);
    assert!((middle.pore_pressure - 140.0).abs() < 1.0e-9);
    assert!((profile.average_consolidation).abs() < f64::EPSILON);
}

#[test]
fn pore_pressure_after_full_drainage() {
    let (params, checkpoints) = build_reference_column();
    let profile = evaluate(&params.at_time(TimeState::COMPLETE));

    let middle = profile
        .sample_near(LayerKind::Clay, checkpoints.clay_middle)
        .expect("mid-clay sample");
    assert!((middle.pore_pressure - 40.0).abs() < 1.0e-9);
    assert!((middle.effective_stress - (180.0 - 40.0)).abs() < 1.0e-9);
    assert!((profile.average_consolidation - 1.0).abs() < f64::EPSILON);
}

#[test]
fn total_stress_at_clay_top_uses_saturated_sand() {
    let (params, checkpoints) = build_reference_column();
    let profile = evaluate(&params);

    let above = profile
        .sample_near(LayerKind::UpperSand, checkpoints.clay_top)
        .expect("sand sample");
    let below = profile
        .sample_near(LayerKind::Clay, checkpoints.clay_top)
        .expect("clay sample");
    assert!((above.total_stress - 138.0).abs() < 1.0e-9);
    assert!((below.total_stress - 138.0).abs() < 1.0e-9);
}

#[test]
fn clay_drains_from_its_boundaries_inward() {
    let (params, checkpoints) = build_reference_column();
    let profile = evaluate(&params.at_time(TimeState::new(25.0)));

    let quarter = profile
        .sample_near(LayerKind::Clay, checkpoints.clay_top + 1.0)
        .expect("clay sample");
    let middle = profile
        .sample_near(LayerKind::Clay, checkpoints.clay_middle)
        .expect("clay sample");
    assert!(quarter.excess_pore_pressure < middle.excess_pore_pressure);
    assert!(middle.excess_pore_pressure < 100.0);
    assert!(quarter.local_consolidation > middle.local_consolidation);
}

#[test]
fn lowered_water_table_reduces_pore_pressure() {
    let (mut params, checkpoints) = build_reference_column();
    params.water_table = WaterTable::new(1.0);
    let profile = evaluate(&params.at_time(TimeState::COMPLETE));

    let middle = profile
        .sample_near(LayerKind::Clay, checkpoints.clay_middle)
        .expect("mid-clay sample");
    assert!((middle.pore_pressure - 30.0).abs() < 1.0e-9);
    // One metre of dry sand (18) replaces saturated sand (19).
    assert!((middle.total_stress - 179.0).abs() < 1.0e-9);
}

#[test]
fn rejects_water_table_below_upper_sand() {
    let (mut params, _) = build_reference_column();
    params.water_table = WaterTable::new(3.0);
    let error = ConsolidationEngine::default()
        .compute(&params)
        .expect_err("water table in the clay is rejected");
    assert_eq!(
        error,
        ConsolidationError::from(ParameterError::WaterTableOutOfRange {
            depth: 3.0,
            max: 2.0
        })
    );
}

#[test]
fn profile_serializes_for_renderers() {
    let (params, _) = build_reference_column();
    let profile = evaluate(&params.at_time(TimeState::new(50.0)));
    let json = serde_json::to_value(&profile).expect("profile serializes");

    assert_eq!(json["layers"][0], "upper_sand");
    assert!((json["total_depth"].as_f64().expect("number") - 8.0).abs() < f64::EPSILON);
    assert!(json["series"]["converged"].as_bool().expect("bool"));
}
