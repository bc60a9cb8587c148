//! Reference spread scenarios on small hand-built grids
//!
//! Expected travel times are derived by hand from the scoring rules:
//! score = fuel x slope x moisture x wind, travel = km x 3600 / score.

use approx::assert_relative_eq;
use firefront_core::{
    GridPoint, NeighborConfig, PointId, SimulationError, SimulatorConfig, SpreadSimulator,
    SpreadTables, StaticWeather, WeatherSnapshot,
};

/// Degrees per kilometer of latitude (and of longitude at the equator)
const DEG_PER_KM: f64 = 1.0 / 111.19493;

fn simulator(points: Vec<GridPoint>) -> SpreadSimulator {
    SpreadSimulator::new(
        points,
        SpreadTables::default(),
        NeighborConfig::default(),
        SimulatorConfig::default(),
    )
}

fn grass_point(id: u64, lat_km: f64, lon_km: f64) -> GridPoint {
    GridPoint::new(id, lat_km * DEG_PER_KM, lon_km * DEG_PER_KM).with_codes(
        Some("grassland"),
        None,
        None,
    )
}

/// 3x3 uniform grassland grid, 1 km spacing, calm air at 50 % humidity:
/// score 5 everywhere, so the four edge-adjacent neighbors of the center
/// ignite after exactly 1 km x 3600 / 5 = 720 s.
#[test]
fn uniform_grid_center_ignition_reference_times() {
    let mut points = Vec::new();
    let mut id = 0;
    for row in -1..=1 {
        for col in -1..=1 {
            points.push(grass_point(id, f64::from(row), f64::from(col)));
            id += 1;
        }
    }
    let sim = simulator(points);
    let weather = StaticWeather(WeatherSnapshot::new(50.0, 0.0, 0.0));

    let center = PointId(4);
    let run = sim.run(center, &weather).unwrap();

    assert_eq!(run.state(center).unwrap().ignition_time, Some(0.0));
    assert!(!run.degraded_weather);
    assert_eq!(run.ignited_count(), 9);

    // Edge-adjacent neighbors of the center: ids 1, 3, 5, 7
    for id in [1, 3, 5, 7] {
        let state = run.state(PointId(id)).unwrap();
        assert_relative_eq!(
            state.ignition_time.unwrap(),
            720.0,
            max_relative = 1e-4
        );
        // Burnout: fuel 5 x 1200 s, no humidity or spotting penalty
        assert_relative_eq!(
            state.burnout_time.unwrap() - state.ignition_time.unwrap(),
            6000.0,
            max_relative = 1e-6
        );
    }

    // Diagonal neighbors are sqrt(2) km out, still inside the firebreak
    // distance, so they ignite straight from the center
    for id in [0, 2, 6, 8] {
        let state = run.state(PointId(id)).unwrap();
        assert_relative_eq!(
            state.ignition_time.unwrap(),
            720.0 * 2.0_f64.sqrt(),
            max_relative = 1e-4
        );
    }
}

/// An ignition id absent from the grid rejects the whole run up front.
#[test]
fn unknown_ignition_id_fails_without_state() {
    let sim = simulator(vec![grass_point(0, 0.0, 0.0), grass_point(1, 1.0, 0.0)]);
    let weather = StaticWeather(WeatherSnapshot::new(50.0, 0.0, 0.0));

    let result = sim.run(PointId(777), &weather);
    assert_eq!(result, Err(SimulationError::UnknownIgnitionPoint(PointId(777))));
}

/// A neighbor on non-combustible soil never ignites, regardless of
/// adjacency, humidity, or wind strength.
#[test]
fn non_combustible_soil_never_ignites() {
    let origin = grass_point(0, 0.0, 0.0);
    let lake_shore = GridPoint::new(1, DEG_PER_KM, 0.0).with_codes(
        Some("grassland"),
        Some("steep"),
        Some("water"),
    );
    let sim = simulator(vec![origin, lake_shore]);

    for wind_speed in [0.0, 15.0] {
        let weather = StaticWeather(WeatherSnapshot::new(20.0, wind_speed, 180.0));
        let run = sim.run(PointId(0), &weather).unwrap();
        let state = run.state(PointId(1)).unwrap();
        assert_eq!(state.ignition_time, None, "wind {wind_speed}");
        assert_eq!(state.burnout_time, None);
    }
}

/// First-commit-wins: when a faster two-hop path to a point exists, the
/// direct commit made earlier in pop order still stands and is never
/// relaxed downward.
#[test]
fn committed_ignition_time_is_never_relaxed() {
    // Wind blows from due south (180). Point C sits 1 km north of the
    // origin A, dead against the wind (factor 0.5, travel 1440 s). Point B
    // sits 0.7 km east (crosswind, factor 1, travel 504 s); the B->C hop
    // is 1.221 km at a neutral bearing (travel ~879 s), so the two-hop
    // arrival (~1383 s) would beat the direct one.
    let a = grass_point(0, 0.0, 0.0);
    let b = grass_point(1, 0.0, 0.7);
    let c = grass_point(2, 1.0, 0.0);
    let sim = simulator(vec![a, b, c]);
    let weather = StaticWeather(WeatherSnapshot::new(50.0, 8.0, 180.0));

    let run = sim.run(PointId(0), &weather).unwrap();

    let b_time = run.state(PointId(1)).unwrap().ignition_time.unwrap();
    let c_time = run.state(PointId(2)).unwrap().ignition_time.unwrap();
    assert_relative_eq!(b_time, 504.0, max_relative = 1e-4);

    // The two-hop alternative really is faster than the direct commit...
    let b_to_c_travel = (0.7_f64.powi(2) + 1.0).sqrt() * 3600.0 / 5.0;
    assert!(b_time + b_to_c_travel < 1440.0 - 10.0);

    // ...yet C keeps the direct arrival time committed during A's expansion
    assert_relative_eq!(c_time, 1440.0, max_relative = 1e-4);
}

/// Jumps longer than the firebreak distance only go through as wind-driven
/// spotting at 10 m/s or more.
#[test]
fn firebreak_gap_needs_strong_wind() {
    // Two grass points 2 km apart, gap wider than the 1.5 km firebreak
    let sim = simulator(vec![grass_point(0, 0.0, 0.0), grass_point(1, 2.0, 0.0)]);

    let weak = StaticWeather(WeatherSnapshot::new(50.0, 9.0, 180.0));
    let run = sim.run(PointId(0), &weak).unwrap();
    assert_eq!(run.state(PointId(1)).unwrap().ignition_time, None);

    // Wind direction aligned with the jump bearing at 12 m/s: spotting
    // permitted
    let strong = StaticWeather(WeatherSnapshot::new(50.0, 12.0, 0.0));
    let run = sim.run(PointId(0), &strong).unwrap();
    assert!(run.state(PointId(1)).unwrap().ignition_time.is_some());
}
