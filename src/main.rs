mod analysis;
mod report;
mod scenario;

use analysis::run_analysis;
use report::render_summary;
use scenario::load_scenario;
use std::error::Error;
use std::path::PathBuf;
use terzaghi::ConsolidationEngine;

fn main() -> Result<(), Box<dyn Error>> {
    // Usage: terzaghi [PARAMS.json] [--json]
    let mut path = None;
    let mut emit_json = false;
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            emit_json = true;
        } else {
            path = Some(PathBuf::from(arg));
        }
    }

    // Gather the soil column, load, water table and time. Without a file this is the
    // classroom sand-clay-sand example.
    let params = load_scenario(path.as_deref())?;

    // Evaluate the total stress, pore pressure and effective stress with depth. See
    // https://en.wikipedia.org/wiki/Effective_stress for the principle behind it.
    let engine = ConsolidationEngine::default();
    let summary = run_analysis(&engine, &params)?;

    // Either hand the arrays to a plotting tool or print a readable summary.
    if emit_json {
        println!("{}", serde_json::to_string_pretty(&summary.profile)?);
    } else {
        println!("{}", render_summary(&summary));
    }

    Ok(())
}
