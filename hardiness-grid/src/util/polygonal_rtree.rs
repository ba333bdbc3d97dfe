use crate::grid::ContainmentPolicy;
use geo::{BoundingRect, MultiPolygon, Point};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{RTree, AABB};
use wkt::ToWkt;

/// envelope of one indexed polygon, tagged with the position of that polygon in load order.
pub type PolygonEnvelope = GeomWithData<Rectangle<(f64, f64)>, usize>;

/// spatial index over polygonal geometries which answers point-in-polygon queries
/// while respecting the order the polygons were loaded in. the rtree only stores
/// bounding rectangles; exact containment is tested against the stored geometry.
pub struct PolygonalRTree<D> {
    rtree: RTree<PolygonEnvelope>,
    entries: Vec<(MultiPolygon<f64>, D)>,
}

impl<D> PolygonalRTree<D> {
    /// builds the index. geometries without a bounding rectangle (empty polygons)
    /// are kept in `entries` so indices stay aligned, but can never be matched.
    pub fn new(entries: Vec<(MultiPolygon<f64>, D)>) -> PolygonalRTree<D> {
        let envelopes = entries
            .iter()
            .enumerate()
            .filter_map(|(index, (geometry, _))| match geometry.bounding_rect() {
                Some(rect) => {
                    let envelope = Rectangle::from_corners(rect.min().x_y(), rect.max().x_y());
                    Some(GeomWithData::new(envelope, index))
                }
                None => {
                    log::warn!(
                        "polygon at index {index} has no extent and will not be indexed: {}",
                        geometry.to_wkt()
                    );
                    None
                }
            })
            .collect::<Vec<_>>();
        let rtree = RTree::bulk_load(envelopes);
        PolygonalRTree { rtree, entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// finds the polygon containing this point with the lowest load-order index.
    ///
    /// # Arguments
    ///
    /// * `point` - (x, y) location to test
    /// * `policy` - whether polygon boundaries count as containing the point
    ///
    /// # Returns
    ///
    /// * the data attached to the first matching polygon, or None if no polygon contains the point
    pub fn first_containing(&self, point: &Point<f64>, policy: ContainmentPolicy) -> Option<&D> {
        let envelope = AABB::from_point(point.x_y());
        self.rtree
            .locate_in_envelope_intersecting(&envelope)
            .map(|candidate| candidate.data)
            .filter(|index| policy.test(&self.entries[*index].0, point))
            .min()
            .map(|index| &self.entries[index].1)
    }
}
