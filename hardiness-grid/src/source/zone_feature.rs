use geo::MultiPolygon;

/// a hardiness zone polygon. features are kept in a Vec in the order they were
/// read, and that position decides which zone wins where polygons overlap.
#[derive(Clone, Debug)]
pub struct ZoneFeature {
    pub zone: String,
    pub geometry: MultiPolygon<f64>,
}

impl ZoneFeature {
    pub fn new(zone: String, geometry: MultiPolygon<f64>) -> ZoneFeature {
        ZoneFeature { zone, geometry }
    }
}
