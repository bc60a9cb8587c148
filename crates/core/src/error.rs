//! Error taxonomy of the simulation core
//!
//! Only an unknown ignition id aborts a run, and it does so before any
//! per-point state exists. Missing categorical codes degrade to neutral or
//! non-flammable factors inside the spread model, and a failed weather
//! lookup substitutes documented defaults with the result flagged as
//! degraded.

use crate::core_types::point::PointId;
use thiserror::Error;

/// Fatal, whole-run rejection raised before any state mutation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("unknown ignition point id {0}")]
    UnknownIgnitionPoint(PointId),
}

/// Non-fatal weather lookup failure
///
/// `Unavailable` means the provider answered but holds no observation near
/// the requested coordinates; `Transport` covers everything between the
/// core and the provider. The simulator treats both the same way
/// (substitute defaults, flag the run), but callers surfacing the failure
/// need the distinction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WeatherError {
    #[error("no weather observation available near ({lat_deg}, {lon_deg})")]
    Unavailable { lat_deg: f64, lon_deg: f64 },
    #[error("weather lookup failed: {0}")]
    Transport(String),
}

/// Grid snapshot could not be loaded
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid source unavailable: {0}")]
    Unavailable(String),
    #[error("grid data malformed: {0}")]
    Malformed(String),
}
