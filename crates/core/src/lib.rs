//! Firefront simulation core
//!
//! Event-driven wildfire spread prediction over a fixed grid of terrain
//! points: given one ignition location and a single weather snapshot, the
//! core computes for every point the simulated time it first ignites and
//! the time it finishes burning.
//!
//! The pipeline, leaves first:
//! - [`NeighborIndex`] — spatial hash lookup of up to 8 nearest candidates
//! - [`RateOfSpreadModel`] — fuel/slope/moisture/wind scoring of one jump,
//!   including firebreak blocking and wind-driven spotting
//! - [`BurnoutModel`] — burn duration of a newly ignited point
//! - [`SpreadSimulator`] — Dijkstra-style relaxation loop committing
//!   ignition times in non-decreasing order
//!
//! Grid persistence, weather retrieval, and result rendering are external
//! collaborators behind the [`GridRepository`] and [`WeatherProvider`]
//! seams.

pub mod core_types;
pub mod error;
pub mod simulation;
pub mod spread;

pub use core_types::{
    GeoPosition, GridPoint, NeighborConfig, NeighborHit, NeighborIndex, PointId, StaticWeather,
    WeatherProvider, WeatherSnapshot,
};
pub use error::{GridError, SimulationError, WeatherError};
pub use simulation::{
    GridRepository, InMemoryGrid, PointState, SimulationRun, SimulatorConfig, SpreadSimulator,
    SIMULATION_HORIZON_SECS,
};
pub use spread::{
    BurnoutModel, RateOfSpreadModel, Rejection, SoilClass, SpreadDecision, SpreadTables,
    FIREBREAK_DISTANCE_KM, MIN_SPREAD_THRESHOLD, STRONG_WIND_MPS,
};
