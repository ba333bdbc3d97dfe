use serde::{Deserialize, Serialize};
use std::{num::ParseFloatError, str::FromStr};

/// rectangle in lon/lat space bounding the grid. the bounds are inclusive and
/// their ordering is not validated; a reversed range produces an empty axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bbox {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

#[derive(thiserror::Error, Debug)]
pub enum BboxError {
    #[error("bbox must be in format: minx,miny,maxx,maxy, got: '{0}'")]
    FieldCount(String),
    #[error("bbox value '{value}' is not a number: {source}")]
    NotANumber {
        value: String,
        source: ParseFloatError,
    },
}

impl Bbox {
    pub fn new(minx: f64, miny: f64, maxx: f64, maxy: f64) -> Bbox {
        Bbox {
            minx,
            miny,
            maxx,
            maxy,
        }
    }
}

/// parses a bounding box from the string format "minx,miny,maxx,maxy".
pub fn parse_bbox(s: &str) -> Result<Bbox, BboxError> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 4 {
        return Err(BboxError::FieldCount(s.to_string()));
    }
    let minx = parse_num(parts[0])?;
    let miny = parse_num(parts[1])?;
    let maxx = parse_num(parts[2])?;
    let maxy = parse_num(parts[3])?;
    Ok(Bbox::new(minx, miny, maxx, maxy))
}

fn parse_num(s: &str) -> Result<f64, BboxError> {
    s.trim()
        .parse::<f64>()
        .map_err(|source| BboxError::NotANumber {
            value: s.to_string(),
            source,
        })
}

impl FromStr for Bbox {
    type Err = BboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_bbox(s)
    }
}

impl std::fmt::Display for Bbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{},{}", self.minx, self.miny, self.maxx, self.maxy)
    }
}
