use terzaghi::{ConsolidationEngine, ConsolidationParams, LayerKind, TimeState};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Classroom column: 2 m sand over 4 m clay over 2 m sand, 100 kPa surface load
    let params = ConsolidationParams::default().at_time(TimeState::new(30.0));

    // Evaluate the profile
    let profile = ConsolidationEngine::default().compute(&params)?;

    // Print the state at mid-depth of the clay
    let clay = params.layers.bounds(LayerKind::Clay);
    if let Some(sample) = profile.sample_near(LayerKind::Clay, (clay.top + clay.bottom) / 2.0) {
        println!(
            "z = {:.2} m: u = {:.1} kPa, σ' = {:.1} kPa",
            sample.depth, sample.pore_pressure, sample.effective_stress
        );
    }
    println!("U = {:.1} %", profile.average_consolidation * 100.0);

    Ok(())
}
