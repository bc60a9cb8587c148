//! Weather snapshot and the provider seam
//!
//! One [`WeatherSnapshot`] is resolved per simulation run, nearest to the
//! ignition point, and applied uniformly to every point and every simulated
//! hour. Uniform weather is a deliberate simplification of the model, not a
//! defect; spatial or temporal variation would require a different
//! [`WeatherProvider`] contract.

use crate::error::WeatherError;
use serde::{Deserialize, Serialize};

/// Humidity substituted when no weather observation is available
pub const DEFAULT_HUMIDITY_PERCENT: f64 = 50.0;
/// Wind speed substituted when no weather observation is available (calm)
pub const DEFAULT_WIND_SPEED_MPS: f64 = 0.0;
/// Wind direction substituted when no weather observation is available
pub const DEFAULT_WIND_DIRECTION_DEG: f64 = 0.0;

/// Point-in-time weather observation from a single station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Relative humidity in percent (0-100)
    pub humidity_percent: f64,
    /// Wind speed in meters per second
    pub wind_speed_mps: f64,
    /// Direction the wind blows FROM, degrees clockwise of north (0-360)
    pub wind_direction_deg: f64,
    /// Identifier of the reporting station, if known
    pub station_id: Option<String>,
}

impl WeatherSnapshot {
    pub fn new(humidity_percent: f64, wind_speed_mps: f64, wind_direction_deg: f64) -> Self {
        WeatherSnapshot {
            humidity_percent,
            wind_speed_mps,
            wind_direction_deg,
            station_id: None,
        }
    }

    /// Documented fallback used when the weather lookup fails
    ///
    /// Moderate humidity, calm wind, no station. Runs using this snapshot
    /// are flagged as degraded in their result.
    pub fn degraded_default() -> Self {
        WeatherSnapshot {
            humidity_percent: DEFAULT_HUMIDITY_PERCENT,
            wind_speed_mps: DEFAULT_WIND_SPEED_MPS,
            wind_direction_deg: DEFAULT_WIND_DIRECTION_DEG,
            station_id: None,
        }
    }
}

/// Source of the single weather observation consumed by a run
///
/// Implementations resolve the observation nearest to the given
/// coordinates. Failure is non-fatal to the simulation: the run substitutes
/// [`WeatherSnapshot::degraded_default`] and flags its result. The two
/// [`WeatherError`] variants let callers distinguish "no station in range"
/// from transport problems.
pub trait WeatherProvider {
    fn nearest_weather(&self, lat_deg: f64, lon_deg: f64) -> Result<WeatherSnapshot, WeatherError>;
}

/// Fixed snapshot provider for tests, demos, and offline replay
#[derive(Debug, Clone)]
pub struct StaticWeather(pub WeatherSnapshot);

impl WeatherProvider for StaticWeather {
    fn nearest_weather(
        &self,
        _lat_deg: f64,
        _lon_deg: f64,
    ) -> Result<WeatherSnapshot, WeatherError> {
        Ok(self.0.clone())
    }
}
