use std::fs;
use std::path::Path;

use terzaghi::ConsolidationParams;
use thiserror::Error;

/// Error returned when a scenario file cannot be used.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Returned when the file cannot be read.
    #[error("cannot read scenario {path}: {source}")]
    Read {
        /// Path that was requested.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the file is not a valid parameter document.
    #[error("cannot parse scenario {path}: {source}")]
    Parse {
        /// Path that was requested.
        path: String,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Load the parameters for this run.
///
/// Without a path the reference classroom scenario is used: 2 m of sand over 4 m of clay
/// over 2 m of sand with a 100 kPa load, the water table at the surface and the clock
/// stopped at 30 % of the time to 99 % consolidation. A JSON document may give any
/// subset of the fields; the rest fall back to [`ConsolidationParams::default`].
pub fn load_scenario(path: Option<&Path>) -> Result<ConsolidationParams, ScenarioError> {
    let Some(path) = path else {
        return Ok(reference_scenario());
    };
    let display = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| ScenarioError::Read {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ScenarioError::Parse {
        path: display,
        source,
    })
}

/// Reference scenario shown when the binary runs without arguments.
pub fn reference_scenario() -> ConsolidationParams {
    ConsolidationParams::default().at_time(terzaghi::TimeState::new(30.0))
}
