//! Burn duration of a newly ignited point
//!
//! A point burns for a time proportional to its fuel score, shortened by
//! damp air and by how far the fire jumped to reach it. Spot fires started
//! by long ember jumps land with less heat and die out faster.

/// Seconds of burning per unit of fuel score
pub const BURN_SECONDS_PER_FUEL_UNIT: f64 = 1200.0;
/// Jump length treated as one spotting unit
pub const SPOTTING_UNIT_KM: f64 = 1.2;

/// Pure burn-duration heuristic
#[derive(Debug, Clone, Copy, Default)]
pub struct BurnoutModel;

impl BurnoutModel {
    /// Burn duration in seconds for a point that just ignited
    ///
    /// `jump_distance_km` is the length of the jump that ignited the
    /// point, 0 for the run's ignition point itself. Humidity penalties
    /// use the two-threshold banding (70 % / 80 %).
    pub fn burn_duration_secs(
        &self,
        fuel_score: f64,
        humidity_percent: f64,
        jump_distance_km: f64,
    ) -> f64 {
        let mut duration = fuel_score * BURN_SECONDS_PER_FUEL_UNIT;

        if humidity_percent > 80.0 {
            duration *= 0.5;
        } else if humidity_percent > 70.0 {
            duration *= 0.7;
        }

        let jump_units = jump_distance_km / SPOTTING_UNIT_KM;
        if jump_units >= 2.0 {
            duration /= (jump_units - 1.0).max(1.0);
        }

        duration
    }
}
