use super::{Bbox, ContainmentPolicy, GridError, GridPoint, SteppingPolicy, ZoneGrid};
use crate::source::{ZoneFeature, ZoneSource};
use crate::util::polygonal_rtree::PolygonalRTree;
use geo::Point;
use kdam::tqdm;
use serde::{Deserialize, Serialize};

/// default grid spacing in degrees
pub const DEFAULT_STEP: f64 = 0.25;

/// largest number of grid points classified by a single build
pub const MAX_GRID_POINTS: usize = 100_000_000;

/// parameters of a zone grid classification.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GridOptions {
    pub bbox: Bbox,
    /// grid spacing in degrees, applied to both axes
    pub step: f64,
    pub stepping: SteppingPolicy,
    pub containment: ContainmentPolicy,
    /// show a progress bar over the longitude columns
    #[serde(default)]
    pub progress: bool,
}

impl GridOptions {
    pub fn new(bbox: Bbox, step: f64) -> GridOptions {
        GridOptions {
            bbox,
            step,
            stepping: SteppingPolicy::default(),
            containment: ContainmentPolicy::default(),
            progress: false,
        }
    }
}

/// builds a grid of hardiness zones from a zone polygon dataset.
///
/// # Arguments
/// * `source` - the zone polygon dataset to read
/// * `options` - grid extent, spacing and classification policies
///
/// # Result
///
/// the classified grid, or the first error raised while reading or classifying.
pub fn build_zone_grid(source: &ZoneSource, options: &GridOptions) -> Result<ZoneGrid, GridError> {
    validate_step(options.step)?;
    let features = source.build()?;
    classify_features(features, options)
}

/// classifies every point of the grid against in-memory zone features.
///
/// points are visited longitude-major (ascending), latitude-minor (ascending).
/// each point takes the zone of the earliest feature in `features` that contains
/// it; points inside no feature are dropped.
pub fn classify_features(
    features: Vec<ZoneFeature>,
    options: &GridOptions,
) -> Result<ZoneGrid, GridError> {
    validate_step(options.step)?;
    let Bbox {
        minx,
        miny,
        maxx,
        maxy,
    } = options.bbox;
    let lngs = options.stepping.axis(minx, maxx, options.step)?;
    let lats = options.stepping.axis(miny, maxy, options.step)?;
    match lngs.len().checked_mul(lats.len()) {
        Some(total) if total <= MAX_GRID_POINTS => {}
        _ => {
            return Err(GridError::TooManyPoints {
                requested: lngs.len() as f64 * lats.len() as f64,
                limit: MAX_GRID_POINTS,
            })
        }
    }
    log::info!(
        "classifying {} x {} grid over bbox {} at step {} ({} stepping, {} containment)",
        lngs.len(),
        lats.len(),
        options.bbox,
        options.step,
        options.stepping,
        options.containment
    );

    let rtree = PolygonalRTree::new(
        features
            .into_iter()
            .map(|f| (f.geometry, f.zone))
            .collect(),
    );
    log::debug!("built spatial index over {} zone polygons", rtree.len());

    let columns: Box<dyn Iterator<Item = &f64> + '_> = if options.progress {
        Box::new(tqdm!(lngs.iter(), total = lngs.len(), desc = "classify grid"))
    } else {
        Box::new(lngs.iter())
    };

    let mut grid = ZoneGrid::new();
    let mut dropped: usize = 0;
    for lng in columns {
        for lat in lats.iter() {
            let point = Point::new(*lng, *lat);
            match rtree.first_containing(&point, options.containment) {
                Some(zone) => grid.push(GridPoint::new(*lat, *lng, zone.clone())),
                None => dropped += 1,
            }
        }
    }
    if options.progress {
        eprintln!();
    }

    log::info!(
        "classified {} points into {} zones, {} points matched no zone",
        grid.point_count(),
        grid.zone_count(),
        dropped
    );
    Ok(grid)
}

fn validate_step(step: f64) -> Result<(), GridError> {
    if step.is_finite() && step > 0.0 {
        Ok(())
    } else {
        Err(GridError::InvalidStep(step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, MultiPolygon};

    fn square(zone: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> ZoneFeature {
        let polygon = polygon![
            (x: x0, y: y0),
            (x: x0, y: y1),
            (x: x1, y: y1),
            (x: x1, y: y0),
            (x: x0, y: y0),
        ];
        ZoneFeature::new(zone.to_string(), MultiPolygon::new(vec![polygon]))
    }

    fn coords(points: &[GridPoint]) -> Vec<(f64, f64)> {
        points.iter().map(|p| (p.lng, p.lat)).collect()
    }

    #[test]
    fn test_single_point_bbox_evaluates_one_point() {
        let features = vec![square("6a", -100.0, 30.0, -90.0, 40.0)];
        let options = GridOptions::new(Bbox::new(-95.0, 35.0, -95.0, 35.0), 0.25);
        let grid = classify_features(features, &options).unwrap();
        assert_eq!(grid.point_count(), 1);
        assert_eq!(coords(grid.get("6a").unwrap()), vec![(-95.0, 35.0)]);
    }

    #[test]
    fn test_bbox_outside_all_polygons_is_empty() {
        let features = vec![square("6a", 0.0, 0.0, 1.0, 1.0)];
        let options = GridOptions::new(Bbox::new(10.0, 10.0, 12.0, 12.0), 0.5);
        let grid = classify_features(features, &options).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_bbox_inside_one_polygon_has_one_zone() {
        let features = vec![
            square("4a", -20.0, -20.0, -10.0, -10.0),
            square("5b", 0.0, 0.0, 10.0, 10.0),
        ];
        let options = GridOptions::new(Bbox::new(2.0, 2.0, 8.0, 8.0), 0.5);
        let grid = classify_features(features, &options).unwrap();
        assert_eq!(grid.zones().collect::<Vec<_>>(), vec!["5b"]);
        assert_eq!(grid.point_count(), 13 * 13);
        assert!(grid.points().all(|p| p.zone == "5b"));
    }

    #[test]
    fn test_square_example_longitude_major() {
        let features = vec![square("7a", 0.0, 0.0, 10.0, 10.0)];
        let options = GridOptions::new(Bbox::new(0.0, 0.0, 10.0, 10.0), 5.0);
        let grid = classify_features(features, &options).unwrap();
        assert_eq!(grid.zone_count(), 1);
        let expected = vec![
            (0.0, 0.0),
            (0.0, 5.0),
            (0.0, 10.0),
            (5.0, 0.0),
            (5.0, 5.0),
            (5.0, 10.0),
            (10.0, 0.0),
            (10.0, 5.0),
            (10.0, 10.0),
        ];
        assert_eq!(coords(grid.get("7a").unwrap()), expected);
    }

    #[test]
    fn test_interior_containment_drops_boundary_points() {
        let features = vec![square("7a", 0.0, 0.0, 10.0, 10.0)];
        let mut options = GridOptions::new(Bbox::new(0.0, 0.0, 10.0, 10.0), 5.0);
        options.containment = ContainmentPolicy::Interior;
        let grid = classify_features(features, &options).unwrap();
        assert_eq!(coords(grid.get("7a").unwrap()), vec![(5.0, 5.0)]);
    }

    #[test]
    fn test_overlap_resolves_to_first_loaded_polygon() {
        let options = GridOptions::new(Bbox::new(4.0, 4.0, 6.0, 6.0), 1.0);

        let a_first = vec![
            square("a", 0.0, 0.0, 10.0, 10.0),
            square("b", 3.0, 3.0, 7.0, 7.0),
        ];
        let grid = classify_features(a_first, &options).unwrap();
        assert_eq!(grid.zones().collect::<Vec<_>>(), vec!["a"]);

        let b_first = vec![
            square("b", 3.0, 3.0, 7.0, 7.0),
            square("a", 0.0, 0.0, 10.0, 10.0),
        ];
        let grid = classify_features(b_first, &options).unwrap();
        assert_eq!(grid.zones().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_zones_keyed_in_discovery_order() {
        // the western polygon is loaded last but its points are visited first
        let features = vec![
            square("east", 5.0, 0.0, 10.0, 10.0),
            square("west", 0.0, 0.0, 4.0, 10.0),
        ];
        let options = GridOptions::new(Bbox::new(1.0, 1.0, 9.0, 1.0), 2.0);
        let grid = classify_features(features, &options).unwrap();
        assert_eq!(grid.zones().collect::<Vec<_>>(), vec!["west", "east"]);
        assert_eq!(coords(grid.get("west").unwrap()), vec![(1.0, 1.0), (3.0, 1.0)]);
        assert_eq!(
            coords(grid.get("east").unwrap()),
            vec![(5.0, 1.0), (7.0, 1.0), (9.0, 1.0)]
        );
    }

    #[test]
    fn test_invalid_step_fails() {
        for step in [0.0, -0.25, f64::NAN, f64::INFINITY] {
            let options = GridOptions::new(Bbox::new(0.0, 0.0, 1.0, 1.0), step);
            let result = classify_features(vec![], &options);
            assert!(matches!(result, Err(GridError::InvalidStep(_))));
        }
    }

    #[test]
    fn test_tiny_step_fails_instead_of_overflowing() {
        let options = GridOptions::new(Bbox::new(0.0, 0.0, 0.0, 1.0), 1e-300);
        let result = classify_features(vec![], &options);
        assert!(matches!(result, Err(GridError::TooManyPoints { .. })));
    }

    #[test]
    fn test_grid_point_limit() {
        // 10001 coordinates per axis, each within the axis limit
        let options = GridOptions::new(Bbox::new(0.0, 0.0, 1.0, 1.0), 1e-4);
        let result = classify_features(vec![square("6a", 0.0, 0.0, 1.0, 1.0)], &options);
        assert!(matches!(
            result,
            Err(GridError::TooManyPoints { limit, .. }) if limit == MAX_GRID_POINTS
        ));
    }
}
