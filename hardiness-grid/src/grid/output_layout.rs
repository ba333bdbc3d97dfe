use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// JSON shape of a written zone grid.
#[derive(Serialize, Deserialize, ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputLayout {
    /// zone -> list of {lat, lng, zone}, zones in discovery order
    #[default]
    Grouped,
    /// "lat,lng" -> zone, in grid traversal order
    Flat,
}

impl Display for OutputLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputLayout::Grouped => write!(f, "grouped"),
            OutputLayout::Flat => write!(f, "flat"),
        }
    }
}
