use serde::{Deserialize, Serialize};

/// a classified grid location. each point repeats its zone so entries are
/// self-describing when lifted out of the grouped output.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GridPoint {
    pub lat: f64,
    pub lng: f64,
    pub zone: String,
}

impl GridPoint {
    pub fn new(lat: f64, lng: f64, zone: String) -> GridPoint {
        GridPoint { lat, lng, zone }
    }

    /// "lat,lng" with both coordinates fixed to 2 decimal places.
    pub fn flat_key(&self) -> String {
        format!("{:.2},{:.2}", self.lat, self.lng)
    }
}
