//! Injectable lookup tables for the rate-of-spread model
//!
//! The categorical code mappings live in data rather than in match arms so
//! a deployment can tune them to its land-cover dataset without touching
//! the model, and so the model can be unit-tested against a minimal table.

use rustc_hash::FxHashMap;

/// Neutral slope factor applied when the code is unknown or absent
pub const NEUTRAL_SLOPE_FACTOR: f64 = 1.0;

/// Soil moisture classification consumed by the moisture factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoilClass {
    /// Sandy/rocky soils that dry out fast (moisture factor ×1.2)
    DryLeaning,
    /// Water-retaining soils (moisture factor ×0.8)
    WetLeaning,
    /// Water bodies, paved and urban soils: moisture factor forced to 0
    /// regardless of humidity
    NonCombustible,
}

impl SoilClass {
    pub fn adjustment(self) -> f64 {
        match self {
            SoilClass::DryLeaning => 1.2,
            SoilClass::WetLeaning => 0.8,
            SoilClass::NonCombustible => 0.0,
        }
    }
}

/// Immutable categorical-code lookups, injected into the spread model
///
/// Unknown codes never fail: fuel degrades to 0 (non-flammable), slope to
/// [`NEUTRAL_SLOPE_FACTOR`], soil to no adjustment.
#[derive(Debug, Clone)]
pub struct SpreadTables {
    fuel_scores: FxHashMap<String, f64>,
    slope_factors: FxHashMap<String, f64>,
    soil_classes: FxHashMap<String, SoilClass>,
}

impl SpreadTables {
    pub fn new(
        fuel_scores: FxHashMap<String, f64>,
        slope_factors: FxHashMap<String, f64>,
        soil_classes: FxHashMap<String, SoilClass>,
    ) -> Self {
        SpreadTables {
            fuel_scores,
            slope_factors,
            soil_classes,
        }
    }

    /// Fuel score in {0, 2, 3, 4, 5}; unknown or absent code is
    /// non-flammable
    pub fn fuel_score(&self, code: Option<&str>) -> f64 {
        code.and_then(|c| self.fuel_scores.get(c).copied())
            .unwrap_or(0.0)
    }

    /// Terrain slope factor; unknown or absent code is neutral
    pub fn slope_factor(&self, code: Option<&str>) -> f64 {
        code.and_then(|c| self.slope_factors.get(c).copied())
            .unwrap_or(NEUTRAL_SLOPE_FACTOR)
    }

    /// Soil classification; unknown or absent code leaves the
    /// humidity-derived moisture base unchanged
    pub fn soil_class(&self, code: Option<&str>) -> Option<SoilClass> {
        code.and_then(|c| self.soil_classes.get(c).copied())
    }
}

impl Default for SpreadTables {
    /// Representative land-cover keyed dataset
    fn default() -> Self {
        let fuel_scores = [
            ("grassland", 5.0),
            ("shrubland", 4.0),
            ("conifer_forest", 4.0),
            ("mixed_forest", 3.0),
            ("broadleaf_forest", 2.0),
            ("cropland", 2.0),
            ("bare_ground", 0.0),
            ("water", 0.0),
            ("urban", 0.0),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v))
        .collect();

        let slope_factors = [
            ("flat", 0.5),
            ("gentle", 0.8),
            ("moderate", 1.0),
            ("steep", 1.5),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v))
        .collect();

        let soil_classes = [
            ("sandy", SoilClass::DryLeaning),
            ("rocky", SoilClass::DryLeaning),
            ("loam", SoilClass::WetLeaning),
            ("clay", SoilClass::WetLeaning),
            ("water", SoilClass::NonCombustible),
            ("urban", SoilClass::NonCombustible),
            ("paved", SoilClass::NonCombustible),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v))
        .collect();

        SpreadTables::new(fuel_scores, slope_factors, soil_classes)
    }
}
