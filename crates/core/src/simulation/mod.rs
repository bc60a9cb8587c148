//! Event-driven spread simulation
//!
//! [`SpreadSimulator`] drives a single-source relaxation loop over the grid
//! snapshot: pop the earliest scheduled ignition, score every uncommitted
//! neighbor candidate, commit accepted ones and schedule them in turn.
//! Travel times are non-negative and the queue pops in non-decreasing time
//! order, so the first committed ignition time of a point is final
//! (first-commit-wins) and is never relaxed to a smaller value afterwards.
//!
//! One simulator owns the immutable grid and its spatial index; every call
//! to [`SpreadSimulator::run`] allocates private per-run state, which makes
//! independent runs embarrassingly parallel (see
//! [`SpreadSimulator::run_many`]).

pub mod event_queue;

pub use event_queue::{EventQueue, QueueEntry};

use crate::core_types::point::{GridPoint, PointId};
use crate::core_types::spatial::{NeighborConfig, NeighborIndex};
use crate::core_types::weather::{WeatherProvider, WeatherSnapshot};
use crate::error::{GridError, SimulationError};
use crate::spread::{BurnoutModel, RateOfSpreadModel, SpreadDecision, SpreadTables};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Simulated-time horizon: points igniting later are committed but no
/// longer expanded (6 hours)
pub const SIMULATION_HORIZON_SECS: f64 = 21_600.0;

/// Per-run tuning knobs
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Simulated seconds after which a popped event no longer expands
    pub horizon_secs: f64,
    /// Hard cap on queue pops per run. The simulated-time horizon already
    /// bounds well-behaved runs; the cap guards against pathological grids
    /// where the queue keeps growing inside the horizon. `None` disables
    /// the guard.
    pub max_queue_pops: Option<usize>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            horizon_secs: SIMULATION_HORIZON_SECS,
            max_queue_pops: None,
        }
    }
}

/// Per-point outcome of one run
///
/// Ignition is write-once: the simulator never overwrites a committed
/// ignition time. Both fields stay `None` for points the fire never
/// reached. A point is considered burned out once simulated time passes
/// `burnout_time`; that is a derived fact, not a stored state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointState {
    /// Seconds since run start when the point first caught fire
    pub ignition_time: Option<f64>,
    /// Seconds since run start when the point stops burning
    pub burnout_time: Option<f64>,
}

/// Complete result of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    /// Outcome for every grid point, unreached ones included
    pub states: FxHashMap<PointId, PointState>,
    /// The snapshot the run actually used
    pub weather: WeatherSnapshot,
    /// True when the weather lookup failed and defaults were substituted
    pub degraded_weather: bool,
    /// True when the queue-pop cap stopped the run early
    pub truncated: bool,
}

impl SimulationRun {
    pub fn state(&self, id: PointId) -> Option<&PointState> {
        self.states.get(&id)
    }

    /// Number of points that ignited during the run
    pub fn ignited_count(&self) -> usize {
        self.states
            .values()
            .filter(|s| s.ignition_time.is_some())
            .count()
    }
}

/// Source of the immutable point snapshot for a run
pub trait GridRepository {
    fn load_all_points(&self) -> Result<Vec<GridPoint>, GridError>;
}

/// Grid held directly in memory, for tests, demos, and preloaded datasets
#[derive(Debug, Clone)]
pub struct InMemoryGrid(pub Vec<GridPoint>);

impl GridRepository for InMemoryGrid {
    fn load_all_points(&self) -> Result<Vec<GridPoint>, GridError> {
        Ok(self.0.clone())
    }
}

/// Wildfire spread simulator over one grid snapshot
pub struct SpreadSimulator {
    points: Vec<GridPoint>,
    by_id: FxHashMap<PointId, usize>,
    index: NeighborIndex,
    spread: RateOfSpreadModel,
    burnout: BurnoutModel,
    config: SimulatorConfig,
}

impl SpreadSimulator {
    /// Build a simulator over `points`, indexing them once
    pub fn new(
        points: Vec<GridPoint>,
        tables: SpreadTables,
        neighbor_config: NeighborConfig,
        config: SimulatorConfig,
    ) -> Self {
        let by_id = points
            .iter()
            .enumerate()
            .map(|(index, p)| (p.id, index))
            .collect();
        let index = NeighborIndex::build(&points, neighbor_config);
        info!(points = points.len(), "spread simulator ready");
        SpreadSimulator {
            points,
            by_id,
            index,
            spread: RateOfSpreadModel::new(tables),
            burnout: BurnoutModel,
            config,
        }
    }

    /// Load one consistent snapshot from a repository and index it
    pub fn from_repository(
        repository: &dyn GridRepository,
        tables: SpreadTables,
        neighbor_config: NeighborConfig,
        config: SimulatorConfig,
    ) -> Result<Self, GridError> {
        let points = repository.load_all_points()?;
        Ok(SpreadSimulator::new(points, tables, neighbor_config, config))
    }

    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    /// Run one simulation from `ignition_id`
    ///
    /// Fails with [`SimulationError::UnknownIgnitionPoint`] before any
    /// state is created when the id does not resolve. The single weather
    /// lookup happens before the relaxation loop; a failed lookup degrades
    /// to defaults instead of aborting.
    pub fn run(
        &self,
        ignition_id: PointId,
        provider: &dyn WeatherProvider,
    ) -> Result<SimulationRun, SimulationError> {
        let origin = self
            .by_id
            .get(&ignition_id)
            .copied()
            .ok_or_else(|| SimulationError::UnknownIgnitionPoint(ignition_id))?;

        let origin_pos = self.points[origin].position;
        let (weather, degraded_weather) =
            match provider.nearest_weather(origin_pos.lat_deg, origin_pos.lon_deg) {
                Ok(snapshot) => (snapshot, false),
                Err(err) => {
                    warn!(%err, "weather lookup failed, substituting defaults");
                    (WeatherSnapshot::degraded_default(), true)
                }
            };

        let mut states = vec![PointState::default(); self.points.len()];
        let mut queue = EventQueue::default();

        // The ignition point always commits at t=0, whatever its fuel; a
        // zero score just burns out instantly and spreads nowhere.
        let origin_fuel = self.spread.fuel_score_of(&self.points[origin]);
        let origin_duration =
            self.burnout
                .burn_duration_secs(origin_fuel, weather.humidity_percent, 0.0);
        states[origin] = PointState {
            ignition_time: Some(0.0),
            burnout_time: Some(origin_duration),
        };
        queue.push(ignition_id, 0.0);

        let mut pops: usize = 0;
        let mut truncated = false;
        while let Some(entry) = queue.pop() {
            pops += 1;
            if let Some(cap) = self.config.max_queue_pops {
                if pops > cap {
                    warn!(cap, pending = queue.len(), "queue pop cap hit, truncating run");
                    truncated = true;
                    break;
                }
            }
            // Beyond the simulated horizon the event stays committed but
            // stops driving further spread.
            if entry.time_secs > self.config.horizon_secs {
                continue;
            }

            let current = self.by_id[&entry.id];
            for hit in self.index.nearest_neighbors(&self.points, &self.points[current]) {
                // First-commit-wins: the first accepted jump to a point is
                // final. Sound because travel times are non-negative and
                // the queue pops in non-decreasing time order.
                if states[hit.index].ignition_time.is_some() {
                    continue;
                }
                if let SpreadDecision::Accepted {
                    travel_time_secs,
                    fuel_score,
                } = self.spread.evaluate(
                    &self.points[hit.index],
                    &weather,
                    hit.bearing_deg,
                    hit.distance_km,
                ) {
                    let ignition = entry.time_secs + travel_time_secs;
                    let duration = self.burnout.burn_duration_secs(
                        fuel_score,
                        weather.humidity_percent,
                        hit.distance_km,
                    );
                    states[hit.index] = PointState {
                        ignition_time: Some(ignition),
                        burnout_time: Some(ignition + duration),
                    };
                    queue.push(hit.id, ignition);
                }
            }
        }

        let states: FxHashMap<PointId, PointState> = self
            .points
            .iter()
            .zip(states)
            .map(|(point, state)| (point.id, state))
            .collect();
        let ignited = states.values().filter(|s| s.ignition_time.is_some()).count();
        debug!(ignition = %ignition_id, pops, ignited, "run complete");

        Ok(SimulationRun {
            states,
            weather,
            degraded_weather,
            truncated,
        })
    }

    /// Run independent simulations for several ignition points in parallel
    ///
    /// The grid and index are shared immutably; every run owns its state
    /// and queue. Results keep the input order.
    pub fn run_many(
        &self,
        ignition_ids: &[PointId],
        provider: &(dyn WeatherProvider + Sync),
    ) -> Vec<(PointId, Result<SimulationRun, SimulationError>)> {
        ignition_ids
            .par_iter()
            .map(|&id| (id, self.run(id, provider)))
            .collect()
    }
}
