use terzaghi::{
    piston_state, ConsolidationEngine, ConsolidationParams, LayerKind, SoilType, Tap, TimeState,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let params = ConsolidationParams::default();
    let clay = params.layers.bounds(LayerKind::Clay);
    let middle = (clay.top + clay.bottom) / 2.0;

    // Step the normalized time the way a slider would
    let times: Vec<TimeState> = (0..=10)
        .map(|step| TimeState::new(f64::from(step) * 10.0))
        .collect();
    let profiles = ConsolidationEngine::default().time_history(&params, &times)?;

    println!("   t   T_v      U    u_mid  spring");
    for (time, profile) in times.iter().zip(&profiles) {
        let excess = profile
            .sample_near(LayerKind::Clay, middle)
            .map_or(0.0, |sample| sample.excess_pore_pressure);
        let share = piston_state(params.load, SoilType::Cohesive, Tap::Open, *time)?;
        println!(
            "{:4.0} {:5.3} {:6.1} % {:6.1} {:7.1}",
            time.time,
            profile.time_factor,
            profile.average_consolidation * 100.0,
            excess,
            share.spring
        );
    }

    Ok(())
}
