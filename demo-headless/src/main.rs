//! Headless spread-simulation demo
//!
//! Builds a synthetic land-cover grid (or loads one from JSON), runs one
//! simulation from the chosen ignition point, and prints a per-point
//! report.

use clap::Parser;
use firefront_core::{
    GridPoint, NeighborConfig, PointId, SimulatorConfig, SpreadSimulator, SpreadTables,
    StaticWeather, WeatherSnapshot, SIMULATION_HORIZON_SECS,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::PathBuf;

/// Degrees per kilometer of latitude
const DEG_PER_KM: f64 = 1.0 / 111.19493;

/// Wildfire spread simulation demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "firefront-demo")]
#[command(about = "Wildfire spread simulation demo", long_about = None)]
struct Args {
    /// Grid rows (ignored when --points is given)
    #[arg(long, default_value_t = 20)]
    rows: u64,

    /// Grid columns (ignored when --points is given)
    #[arg(long, default_value_t = 20)]
    cols: u64,

    /// Point spacing in kilometers
    #[arg(long, default_value_t = 0.8)]
    spacing_km: f64,

    /// JSON file holding an array of grid points
    #[arg(long)]
    points: Option<PathBuf>,

    /// Ignition point id (defaults to the grid center)
    #[arg(short, long)]
    ignite: Option<u64>,

    /// Relative humidity in %
    #[arg(long, default_value_t = 40.0)]
    humidity: f64,

    /// Wind speed in m/s
    #[arg(short, long, default_value_t = 5.0)]
    wind_speed: f64,

    /// Wind direction in degrees, meteorological "from" convention
    #[arg(long, default_value_t = 270.0)]
    wind_direction: f64,

    /// Simulated-time horizon in seconds
    #[arg(long, default_value_t = SIMULATION_HORIZON_SECS)]
    horizon_secs: f64,

    /// Cap on queue pops (0 = uncapped)
    #[arg(long, default_value_t = 0)]
    max_pops: usize,

    /// Seed for the synthetic land-cover assignment
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Maximum per-point rows printed in the report
    #[arg(long, default_value_t = 25)]
    report_rows: usize,
}

fn synthetic_grid(args: &Args) -> Vec<GridPoint> {
    let fuels = [
        "grassland",
        "shrubland",
        "conifer_forest",
        "mixed_forest",
        "broadleaf_forest",
        "water",
    ];
    let slopes = ["flat", "gentle", "moderate", "steep"];
    let soils = ["sandy", "rocky", "loam", "clay"];

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut points = Vec::with_capacity((args.rows * args.cols) as usize);
    for row in 0..args.rows {
        for col in 0..args.cols {
            let id = row * args.cols + col;
            let fuel = fuels[rng.random_range(0..fuels.len())];
            let slope = slopes[rng.random_range(0..slopes.len())];
            let soil = soils[rng.random_range(0..soils.len())];
            points.push(
                GridPoint::new(
                    id,
                    row as f64 * args.spacing_km * DEG_PER_KM,
                    col as f64 * args.spacing_km * DEG_PER_KM,
                )
                .with_codes(Some(fuel), Some(slope), Some(soil)),
            );
        }
    }
    points
}

fn load_grid(path: &PathBuf) -> Result<Vec<GridPoint>, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let points = match &args.points {
        Some(path) => load_grid(path)?,
        None => synthetic_grid(&args),
    };
    let point_count = points.len();

    let ignition = PointId(
        args.ignite
            .unwrap_or_else(|| (args.rows / 2) * args.cols + args.cols / 2),
    );

    let sim = SpreadSimulator::new(
        points,
        SpreadTables::default(),
        NeighborConfig::default(),
        SimulatorConfig {
            horizon_secs: args.horizon_secs,
            max_queue_pops: (args.max_pops > 0).then_some(args.max_pops),
        },
    );

    let weather = StaticWeather(WeatherSnapshot::new(
        args.humidity,
        args.wind_speed,
        args.wind_direction,
    ));

    println!(
        "Running: {point_count} points, ignition {ignition}, \
         humidity {:.0}%, wind {:.1} m/s from {:.0}°",
        args.humidity, args.wind_speed, args.wind_direction
    );

    let run = sim.run(ignition, &weather)?;

    let ignited = run.ignited_count();
    let last_ignition = run
        .states
        .values()
        .filter_map(|s| s.ignition_time)
        .fold(0.0_f64, f64::max);
    println!(
        "Ignited {ignited}/{point_count} points; last ignition at {:.0} s{}{}",
        last_ignition,
        if run.degraded_weather {
            " [degraded weather]"
        } else {
            ""
        },
        if run.truncated { " [truncated]" } else { "" },
    );

    // Per-point report, earliest ignitions first
    let mut rows: Vec<(PointId, f64, f64)> = run
        .states
        .iter()
        .filter_map(|(id, s)| Some((*id, s.ignition_time?, s.burnout_time?)))
        .collect();
    rows.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

    println!("{:>8} {:>12} {:>12}", "point", "ignition(s)", "burnout(s)");
    for (id, ignition_time, burnout_time) in rows.iter().take(args.report_rows) {
        println!("{id:>8} {ignition_time:>12.1} {burnout_time:>12.1}");
    }
    if rows.len() > args.report_rows {
        println!("... {} more ignited points", rows.len() - args.report_rows);
    }

    Ok(())
}
