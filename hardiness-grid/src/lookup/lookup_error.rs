use crate::grid::GridError;

#[derive(thiserror::Error, Debug)]
pub enum LookupError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("zone grid contains no points")]
    EmptyGrid,
    #[error("no zone within {max_distance} degrees of (lat {lat}, lng {lng})")]
    NoZoneWithin { lat: f64, lng: f64, max_distance: f64 },
}
