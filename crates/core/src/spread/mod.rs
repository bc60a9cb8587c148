//! Rate-of-spread scoring between a burning point and one neighbor
//!
//! The model is a pure function of the neighbor's categorical codes, the
//! run's weather snapshot, and the source→neighbor geometry. It either
//! rejects the jump or yields a travel time; all per-run state lives in the
//! simulator.

pub mod burnout;
pub mod tables;

pub use burnout::BurnoutModel;
pub use tables::{SoilClass, SpreadTables};

use crate::core_types::point::GridPoint;
use crate::core_types::weather::WeatherSnapshot;
use tracing::debug;

/// Ordinary adjacent spread is blocked beyond this distance
pub const FIREBREAK_DISTANCE_KM: f64 = 1.5;
/// Wind speed from which embers cross firebreak gaps (spotting)
pub const STRONG_WIND_MPS: f64 = 10.0;
/// Minimum combined score for a jump to be accepted
pub const MIN_SPREAD_THRESHOLD: f64 = 2.0;
/// Fixed wind-factor deduction for spread against the wind (>150° off)
pub const HEADWIND_PENALTY: f64 = 0.5;
/// Wind factor never drops below this floor
const WIND_FACTOR_FLOOR: f64 = 0.5;

/// Why a candidate jump was not taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Target fuel score resolved to 0 (non-flammable or unknown code)
    NoFuel,
    /// Jump longer than the firebreak distance without strong wind
    FirebreakBlocked,
    /// Combined score below [`MIN_SPREAD_THRESHOLD`]
    BelowThreshold,
}

/// Outcome of evaluating one candidate jump
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpreadDecision {
    Rejected(Rejection),
    Accepted {
        /// Seconds the fire needs to cover the jump
        travel_time_secs: f64,
        /// Target's fuel score, reused by the burnout model
        fuel_score: f64,
    },
}

/// Heuristic spread scoring over injected lookup tables
#[derive(Debug, Clone)]
pub struct RateOfSpreadModel {
    tables: SpreadTables,
}

impl RateOfSpreadModel {
    pub fn new(tables: SpreadTables) -> Self {
        RateOfSpreadModel { tables }
    }

    pub fn tables(&self) -> &SpreadTables {
        &self.tables
    }

    /// Fuel score of a point, exposed for the ignition point's own burnout
    pub fn fuel_score_of(&self, point: &GridPoint) -> f64 {
        self.tables.fuel_score(point.fuel_code.as_deref())
    }

    /// Score one jump from a burning source toward `target`
    ///
    /// `bearing_deg` is the initial source→target bearing; `distance_km`
    /// the geodesic jump length. Returns the travel time on acceptance;
    /// the caller adds the source's ignition time.
    pub fn evaluate(
        &self,
        target: &GridPoint,
        weather: &WeatherSnapshot,
        bearing_deg: f64,
        distance_km: f64,
    ) -> SpreadDecision {
        let fuel_score = self.fuel_score_of(target);
        if fuel_score <= 0.0 {
            if target.fuel_code.is_none() {
                debug!(point = %target.id, "missing fuel code, treating as non-flammable");
            }
            return SpreadDecision::Rejected(Rejection::NoFuel);
        }

        let mut slope_factor = self.tables.slope_factor(target.slope_code.as_deref());
        let mut moisture_factor = self.moisture_factor(target, weather);
        let wind_factor = wind_factor(weather, bearing_deg);

        // Firebreak gap: blocked for ordinary spread, crossable as
        // wind-driven spotting with dampened terrain/moisture influence.
        if distance_km > FIREBREAK_DISTANCE_KM {
            if weather.wind_speed_mps < STRONG_WIND_MPS {
                return SpreadDecision::Rejected(Rejection::FirebreakBlocked);
            }
            slope_factor = slope_factor.sqrt();
            moisture_factor = moisture_factor.sqrt();
        }

        let ros_score = fuel_score * slope_factor * moisture_factor * wind_factor;
        if ros_score < MIN_SPREAD_THRESHOLD {
            return SpreadDecision::Rejected(Rejection::BelowThreshold);
        }

        SpreadDecision::Accepted {
            travel_time_secs: distance_km * 3600.0 / ros_score,
            fuel_score,
        }
    }

    /// Humidity-banded base adjusted by the target's soil class
    fn moisture_factor(&self, target: &GridPoint, weather: &WeatherSnapshot) -> f64 {
        let humidity = weather.humidity_percent;
        let base = if humidity < 35.0 {
            1.5
        } else if humidity < 50.0 {
            1.2
        } else if humidity > 80.0 {
            0.4
        } else if humidity > 70.0 {
            0.6
        } else {
            1.0
        };

        match self.tables.soil_class(target.moisture_soil_code.as_deref()) {
            // Non-combustible soil blocks spread outright, whatever the
            // humidity says.
            Some(SoilClass::NonCombustible) => 0.0,
            Some(class) => base * class.adjustment(),
            None => {
                if target.moisture_soil_code.is_some() {
                    debug!(point = %target.id, "unrecognized soil code, keeping humidity base");
                }
                base
            }
        }
    }
}

/// Wind alignment factor for one jump
///
/// Alignment is the minimal angle between the snapshot's wind direction and
/// the jump bearing. Calm air carries no directional information, so it
/// contributes a neutral factor in every direction.
fn wind_factor(weather: &WeatherSnapshot, bearing_deg: f64) -> f64 {
    let speed = weather.wind_speed_mps;
    if speed <= 0.0 {
        return 1.0;
    }

    let raw = (weather.wind_direction_deg - bearing_deg).abs() % 360.0;
    let angle_diff = if raw > 180.0 { 360.0 - raw } else { raw };

    let factor = if angle_diff < 45.0 {
        1.0 + speed / 4.0
    } else if angle_diff < 90.0 {
        1.0 + speed / 8.0
    } else if angle_diff > 150.0 {
        1.0 - HEADWIND_PENALTY
    } else {
        1.0
    };
    factor.max(WIND_FACTOR_FLOOR)
}
