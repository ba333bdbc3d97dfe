use super::LookupError;
use crate::grid::ZoneGrid;
use geo::Point;
use rstar::{primitives::GeomWithData, RTree, AABB};
use serde::Serialize;
use std::path::Path;

/// grid point location tagged with its position in the grid's point order.
type IndexedGridPoint = GeomWithData<Point<f64>, usize>;

/// answers "which zone is this location in" from a classified zone grid by
/// taking the zone of the nearest grid point (planar distance in degrees).
pub struct ZoneGridLookup {
    rtree: RTree<IndexedGridPoint>,
    /// zone label index for each grid point, by point order
    point_zones: Vec<usize>,
    zones: Vec<String>,
}

/// result of a nearest zone query.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ZoneMatch {
    pub zone: String,
    /// location of the matched grid point
    pub lat: f64,
    pub lng: f64,
    /// distance from the query to the matched grid point in degrees
    pub distance: f64,
}

impl ZoneGridLookup {
    pub fn new(grid: &ZoneGrid) -> Result<ZoneGridLookup, LookupError> {
        if grid.point_count() == 0 {
            return Err(LookupError::EmptyGrid);
        }
        let zones = grid.zones().map(String::from).collect::<Vec<_>>();
        let mut point_zones = Vec::with_capacity(grid.point_count());
        let mut entries = Vec::with_capacity(grid.point_count());
        for (zone_idx, zone) in zones.iter().enumerate() {
            for point in grid.get(zone).unwrap_or_default() {
                entries.push(GeomWithData::new(
                    Point::new(point.lng, point.lat),
                    point_zones.len(),
                ));
                point_zones.push(zone_idx);
            }
        }
        log::debug!(
            "indexed {} grid points across {} zones",
            entries.len(),
            zones.len()
        );
        Ok(ZoneGridLookup {
            rtree: RTree::bulk_load(entries),
            point_zones,
            zones,
        })
    }

    /// loads a grouped zone grid JSON file and indexes it.
    pub fn from_path(path: &Path) -> Result<ZoneGridLookup, LookupError> {
        let grid = ZoneGrid::read_json(path)?;
        ZoneGridLookup::new(&grid)
    }

    /// finds the zone of the grid point nearest to (lat, lng). when several grid
    /// points are equally near, the one earliest in the grid's point order wins.
    ///
    /// # Arguments
    ///
    /// * `lat` - query latitude
    /// * `lng` - query longitude
    /// * `max_distance` - optional limit, in degrees, on the distance to the matched grid point
    pub fn nearest(
        &self,
        lat: f64,
        lng: f64,
        max_distance: Option<f64>,
    ) -> Result<ZoneMatch, LookupError> {
        let query = Point::new(lng, lat);
        let nearest = self
            .rtree
            .nearest_neighbor(&query)
            .ok_or(LookupError::EmptyGrid)?;
        let best_distance_2 = distance_2(nearest.geom(), &query);

        // collect every point at the same distance to break ties by point order
        let radius = best_distance_2.sqrt() * (1.0 + 1e-9) + 1e-12;
        let envelope = AABB::from_corners(
            Point::new(lng - radius, lat - radius),
            Point::new(lng + radius, lat + radius),
        );
        let best = self
            .rtree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|candidate| distance_2(candidate.geom(), &query) <= best_distance_2)
            .min_by_key(|candidate| candidate.data)
            .unwrap_or(nearest);

        let distance = best_distance_2.sqrt();
        if let Some(max_distance) = max_distance {
            if distance > max_distance {
                return Err(LookupError::NoZoneWithin {
                    lat,
                    lng,
                    max_distance,
                });
            }
        }
        let zone = self.zones[self.point_zones[best.data]].clone();
        Ok(ZoneMatch {
            zone,
            lat: best.geom().y(),
            lng: best.geom().x(),
            distance,
        })
    }
}

fn distance_2(a: &Point<f64>, b: &Point<f64>) -> f64 {
    let dx = a.x() - b.x();
    let dy = a.y() - b.y();
    dx * dx + dy * dy
}
