use crate::analysis::AnalysisSummary;
use std::fmt::Write;
use terzaghi::ProfileSample;

/// Render a textual summary of a consolidation run.
///
/// The report walks through the key numbers so students can cross-check them with the
/// hand calculation of Terzaghi's effective stress principle, `σ' = σ − u`
/// (<https://en.wikipedia.org/wiki/Effective_stress>).
#[must_use]
pub fn render_summary(summary: &AnalysisSummary) -> String {
    let mut output = String::new();
    let params = &summary.params;
    let profile = &summary.profile;

    // State the problem first so the numbers below have a context.
    writeln!(
        &mut output,
        "Consolidation profile (load = {:.1} kPa, water table = {:.2} m, t = {:.0}/100)",
        params.load.surface_load, params.water_table.depth, params.time.time
    )
    .expect("writing to string cannot fail");

    let [upper, clay, lower] = profile.submerged_unit_weights;
    writeln!(
        &mut output,
        "Layers: sand {:.2} m / clay {:.2} m / sand {:.2} m (total {:.2} m); \
         γ' = {upper:.2} / {clay:.2} / {lower:.2} kN/m³",
        params.layers.upper_sand.thickness,
        params.layers.clay.thickness,
        params.layers.lower_sand.thickness,
        profile.total_depth
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Time factor T_v = {:.4} ({:.1} days); average degree of consolidation U = {:.1} %",
        profile.time_factor,
        profile.elapsed_days,
        profile.average_consolidation * 100.0
    )
    .expect("writing to string cannot fail");

    for (label, sample) in [
        ("Top of clay", summary.clay_top),
        ("Middle of clay", summary.clay_middle),
        ("Base of column", summary.base),
    ] {
        match sample {
            Some(sample) => write_sample(&mut output, label, &sample),
            None => {
                writeln!(&mut output, "{label}: not sampled")
                    .expect("writing to string cannot fail");
            }
        }
    }

    writeln!(
        &mut output,
        "Piston analogy (cohesive, tap open): water {:.1} kPa, spring {:.1} kPa",
        summary.analogy.water, summary.analogy.spring
    )
    .expect("writing to string cannot fail");

    // A truncated series is worth flagging: the clay pressures may be slightly off.
    if !profile.series.converged {
        writeln!(
            &mut output,
            "Warning: Fourier series stopped at {} modes before reaching the tolerance",
            profile.series.max_modes_used
        )
        .expect("writing to string cannot fail");
    }

    output
}

/// Append one line describing `sample`.
fn write_sample(output: &mut String, label: &str, sample: &ProfileSample) {
    writeln!(
        output,
        "{label} (z = {:.2} m): σ = {:.1} kPa, u = {:.1} kPa (excess {:.1}), σ' = {:.1} kPa",
        sample.depth,
        sample.total_stress,
        sample.pore_pressure,
        sample.excess_pore_pressure,
        sample.effective_stress
    )
    .expect("writing to string cannot fail");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::run_analysis;
    use terzaghi::{ConsolidationEngine, ConsolidationParams};

    #[test]
    fn formats_human_readable_report() {
        let summary = run_analysis(
            &ConsolidationEngine::default(),
            &ConsolidationParams::default(),
        )
        .expect("reference scenario is valid");
        let report = render_summary(&summary);
        assert!(report.contains("Consolidation profile (load = 100.0 kPa"));
        assert!(report.contains("γ' = 9.00 / 11.00 / 9.00"));
        assert!(report.contains("Middle of clay (z = 4.00 m): σ = 180.0 kPa, u = 140.0 kPa"));
        assert!(report.contains("U = 0.0 %"));
        assert!(!report.contains("Warning"));
    }
}
