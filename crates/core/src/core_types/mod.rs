//! Core data model: grid points, weather, spatial index

pub mod point;
pub mod spatial;
pub mod weather;

pub use point::{GeoPosition, GridPoint, PointId};
pub use spatial::{NeighborConfig, NeighborHit, NeighborIndex};
pub use weather::{StaticWeather, WeatherProvider, WeatherSnapshot};
