//! Grid point data model and geodesic math
//!
//! A simulation run operates on an immutable set of [`GridPoint`]s. Each
//! point carries a geographic position plus the categorical terrain codes
//! the rate-of-spread model consumes. Positions use f64 throughout:
//! degree-scale deltas between points a few hundred meters apart lose
//! precision in f32.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean Earth radius in kilometers (IUGG R1)
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Opaque identifier of a grid point, unique within one grid snapshot
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct PointId(pub u64);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geographic position in decimal degrees (WGS-84 lat/lon)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl GeoPosition {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        GeoPosition { lat_deg, lon_deg }
    }

    /// Great-circle distance to `other` in kilometers (haversine)
    pub fn distance_km(&self, other: &GeoPosition) -> f64 {
        let lat1 = self.lat_deg.to_radians();
        let lat2 = other.lat_deg.to_radians();
        let dlat = (other.lat_deg - self.lat_deg).to_radians();
        let dlon = (other.lon_deg - self.lon_deg).to_radians();

        let a = (dlat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }

    /// Initial great-circle bearing toward `other`, degrees in [0, 360)
    ///
    /// 0 = north, 90 = east. Compared against the weather snapshot's wind
    /// direction (meteorological "from" convention) by the spread model.
    pub fn bearing_deg_to(&self, other: &GeoPosition) -> f64 {
        let lat1 = self.lat_deg.to_radians();
        let lat2 = other.lat_deg.to_radians();
        let dlon = (other.lon_deg - self.lon_deg).to_radians();

        let y = dlon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
        let bearing = y.atan2(x).to_degrees();
        (bearing + 360.0) % 360.0
    }
}

/// One terrain/fuel sample of the simulation grid
///
/// Loaded once per run from a [`GridRepository`](crate::GridRepository)
/// snapshot and read-only for the run's duration, so a single grid can be
/// shared across concurrent runs without locking.
///
/// The three categorical codes come from external land-cover datasets and
/// may be absent; the spread model degrades missing codes to neutral or
/// non-flammable factors instead of failing the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub id: PointId,
    pub position: GeoPosition,
    /// Vegetation/fuel classification code
    pub fuel_code: Option<String>,
    /// Terrain steepness category
    pub slope_code: Option<String>,
    /// Soil moisture classification code
    pub moisture_soil_code: Option<String>,
}

impl GridPoint {
    pub fn new(id: u64, lat_deg: f64, lon_deg: f64) -> Self {
        GridPoint {
            id: PointId(id),
            position: GeoPosition::new(lat_deg, lon_deg),
            fuel_code: None,
            slope_code: None,
            moisture_soil_code: None,
        }
    }

    pub fn with_codes(
        mut self,
        fuel: Option<&str>,
        slope: Option<&str>,
        soil: Option<&str>,
    ) -> Self {
        self.fuel_code = fuel.map(str::to_owned);
        self.slope_code = slope.map(str::to_owned);
        self.moisture_soil_code = soil.map(str::to_owned);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn haversine_one_degree_latitude() {
        let a = GeoPosition::new(0.0, 0.0);
        let b = GeoPosition::new(1.0, 0.0);
        // 1 degree of latitude is ~111.2 km on the IUGG sphere
        assert_relative_eq!(a.distance_km(&b), 111.195, max_relative = 1e-3);
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let a = GeoPosition::new(37.54, 127.07);
        let b = GeoPosition::new(37.55, 127.09);
        assert_relative_eq!(a.distance_km(&b), b.distance_km(&a), max_relative = 1e-12);
        assert_eq!(a.distance_km(&a), 0.0);
    }

    #[test]
    fn bearing_cardinal_directions() {
        let origin = GeoPosition::new(0.0, 0.0);
        assert_relative_eq!(
            origin.bearing_deg_to(&GeoPosition::new(1.0, 0.0)),
            0.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            origin.bearing_deg_to(&GeoPosition::new(0.0, 1.0)),
            90.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            origin.bearing_deg_to(&GeoPosition::new(-1.0, 0.0)),
            180.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            origin.bearing_deg_to(&GeoPosition::new(0.0, -1.0)),
            270.0,
            epsilon = 1e-9
        );
    }
}
