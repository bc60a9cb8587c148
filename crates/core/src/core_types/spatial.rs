//! Spatial hash index for neighbor candidate queries
//!
//! Replaces a naive O(n²) pairwise scan: points are bucketed once into a
//! flat lat/lon hash grid, and each query only touches the cell
//! neighborhood covering the configured search radius before computing true
//! haversine distances. Long-range spread (spotting) is handled by the
//! rate-of-spread rules, not by widening this search.

use crate::core_types::point::{GeoPosition, GridPoint, PointId};
use rustc_hash::FxHashMap;

/// Kilometers per degree of latitude on the IUGG sphere
const KM_PER_DEG_LAT: f64 = 111.195;

/// Caps applied to every neighbor query
#[derive(Debug, Clone)]
pub struct NeighborConfig {
    /// Upper bound on candidate distance in kilometers (exclusive).
    /// Sensible range 2.5-5.0; spread beyond the firebreak distance is
    /// already gated separately by the spread model.
    pub max_distance_km: f64,
    /// Maximum candidates returned per query
    pub max_neighbors: usize,
    /// Hash cell edge length in degrees per axis
    pub cell_size_deg: f64,
}

impl Default for NeighborConfig {
    fn default() -> Self {
        NeighborConfig {
            max_distance_km: 2.5,
            max_neighbors: 8,
            cell_size_deg: 0.03,
        }
    }
}

/// One neighbor candidate with precomputed geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborHit {
    pub id: PointId,
    /// Index of the candidate in the grid's point slice
    pub index: usize,
    pub distance_km: f64,
    /// Initial bearing from the query origin toward the candidate
    pub bearing_deg: f64,
}

/// Immutable hash-grid index over one grid snapshot
///
/// Built once per simulator; queries are read-only and safe to share across
/// concurrent runs.
pub struct NeighborIndex {
    cells: FxHashMap<(i32, i32), Vec<usize>>,
    config: NeighborConfig,
}

impl NeighborIndex {
    /// Bucket every point of the snapshot into its hash cell
    pub fn build(points: &[GridPoint], config: NeighborConfig) -> Self {
        let mut cells: FxHashMap<(i32, i32), Vec<usize>> = FxHashMap::default();
        for (index, point) in points.iter().enumerate() {
            cells
                .entry(Self::cell_of(&point.position, config.cell_size_deg))
                .or_default()
                .push(index);
        }
        NeighborIndex { cells, config }
    }

    fn cell_of(pos: &GeoPosition, cell_size_deg: f64) -> (i32, i32) {
        (
            (pos.lat_deg / cell_size_deg).floor() as i32,
            (pos.lon_deg / cell_size_deg).floor() as i32,
        )
    }

    /// Nearest candidates around `origin`, ascending by distance
    ///
    /// Candidates satisfy `id != origin.id` and
    /// `0 < distance < max_distance_km`; ties on distance break by id so
    /// identical input always yields identical output. At most
    /// `max_neighbors` hits are returned.
    pub fn nearest_neighbors(&self, points: &[GridPoint], origin: &GridPoint) -> Vec<NeighborHit> {
        let cell_size = self.config.cell_size_deg;
        let (cell_lat, cell_lon) = Self::cell_of(&origin.position, cell_size);

        // Cell span covering the search radius on each axis. Longitude
        // degrees shrink with latitude, so the lon span widens toward the
        // poles; the cosine is clamped to keep the span finite.
        let lat_radius_deg = self.config.max_distance_km / KM_PER_DEG_LAT;
        let lon_shrink = origin.position.lat_deg.to_radians().cos().max(0.01);
        let lon_radius_deg = self.config.max_distance_km / (KM_PER_DEG_LAT * lon_shrink);
        let span_lat = (lat_radius_deg / cell_size).ceil() as i32;
        let span_lon = (lon_radius_deg / cell_size).ceil() as i32;

        let mut hits = Vec::new();
        for dlat in -span_lat..=span_lat {
            for dlon in -span_lon..=span_lon {
                let Some(bucket) = self.cells.get(&(cell_lat + dlat, cell_lon + dlon)) else {
                    continue;
                };
                for &index in bucket {
                    let candidate = &points[index];
                    if candidate.id == origin.id {
                        continue;
                    }
                    let distance_km = origin.position.distance_km(&candidate.position);
                    if distance_km <= 0.0 || distance_km >= self.config.max_distance_km {
                        continue;
                    }
                    hits.push(NeighborHit {
                        id: candidate.id,
                        index,
                        distance_km,
                        bearing_deg: origin.position.bearing_deg_to(&candidate.position),
                    });
                }
            }
        }

        hits.sort_by(|a, b| {
            a.distance_km
                .total_cmp(&b.distance_km)
                .then_with(|| a.id.cmp(&b.id))
        });
        hits.truncate(self.config.max_neighbors);
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1 km of latitude in degrees on the IUGG sphere
    const DEG_PER_KM_LAT: f64 = 1.0 / KM_PER_DEG_LAT;

    fn line_of_points(count: u64, spacing_km: f64) -> Vec<GridPoint> {
        (0..count)
            .map(|i| GridPoint::new(i, i as f64 * spacing_km * DEG_PER_KM_LAT, 0.0))
            .collect()
    }

    #[test]
    fn orders_by_distance_and_caps_at_limit() {
        let points = line_of_points(12, 0.2);
        let index = NeighborIndex::build(&points, NeighborConfig::default());

        let hits = index.nearest_neighbors(&points, &points[0]);
        assert_eq!(hits.len(), 8);
        for pair in hits.windows(2) {
            assert!(pair[0].distance_km <= pair[1].distance_km);
        }
        assert_eq!(hits[0].id, PointId(1));
    }

    #[test]
    fn excludes_self_and_out_of_range() {
        let mut points = line_of_points(3, 1.0);
        // A point beyond the 2.5 km default cap
        points.push(GridPoint::new(99, 4.0 * DEG_PER_KM_LAT, 0.0));
        let index = NeighborIndex::build(&points, NeighborConfig::default());

        let hits = index.nearest_neighbors(&points, &points[0]);
        assert!(hits.iter().all(|h| h.id != points[0].id));
        assert!(hits.iter().all(|h| h.distance_km < 2.5));
        assert!(hits.iter().all(|h| h.id != PointId(99)));
    }

    #[test]
    fn distance_ties_break_by_id() {
        // Two candidates exactly 1 km east and west of the origin
        let origin = GridPoint::new(0, 0.0, 0.0);
        let east = GridPoint::new(7, 0.0, DEG_PER_KM_LAT);
        let west = GridPoint::new(3, 0.0, -DEG_PER_KM_LAT);
        let points = vec![origin.clone(), east, west];
        let index = NeighborIndex::build(&points, NeighborConfig::default());

        let hits = index.nearest_neighbors(&points, &origin);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, PointId(3));
        assert_eq!(hits[1].id, PointId(7));
    }

    #[test]
    fn repeated_queries_are_identical() {
        let points = line_of_points(20, 0.4);
        let index = NeighborIndex::build(&points, NeighborConfig::default());

        let first = index.nearest_neighbors(&points, &points[10]);
        for _ in 0..5 {
            assert_eq!(index.nearest_neighbors(&points, &points[10]), first);
        }
    }
}
