use clap::ValueEnum;
use geo::{Contains, Intersects, MultiPolygon, Point};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// decides whether a point lying on a polygon boundary belongs to that polygon.
#[derive(Serialize, Deserialize, ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContainmentPolicy {
    /// boundary points are contained
    #[default]
    Covers,
    /// only points strictly inside the polygon are contained
    Interior,
}

impl ContainmentPolicy {
    pub fn test(&self, geometry: &MultiPolygon<f64>, point: &Point<f64>) -> bool {
        match self {
            ContainmentPolicy::Covers => geometry.intersects(point),
            ContainmentPolicy::Interior => geometry.contains(point),
        }
    }
}

impl Display for ContainmentPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainmentPolicy::Covers => write!(f, "covers"),
            ContainmentPolicy::Interior => write!(f, "interior"),
        }
    }
}
