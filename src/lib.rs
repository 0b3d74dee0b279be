#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod analogy;
pub mod engine;
pub mod errors;
pub mod params;
pub mod soil;
pub mod terzaghi;

pub use analogy::{piston_state, LoadShare, SoilType, Tap};
pub use engine::{
    ConsolidationEngine, DepthProfile, ProfileSample, SeriesDiagnostics, LOAD_ARROW_MARGIN,
};
pub use errors::{ConsolidationError, ParameterError};
pub use params::{
    ConsolidationParams, DrainagePath, EngineSettings, LoadCondition, LoadResponse, TimeState,
    WaterTable,
};
pub use soil::{
    ClayLayer, LayerBounds, LayerKind, LayerStack, SoilLayer, UNIT_WEIGHT_OF_WATER,
};
pub use terzaghi::{
    average_degree_of_consolidation, excess_pore_pressure, ClayTimeScale, SeriesControl,
    SeriesSum, TIME_FACTOR_99,
};
