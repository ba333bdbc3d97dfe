use super::{GridError, GridPoint, OutputLayout};
use indexmap::{map::Entry, IndexMap};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

/// classified grid points grouped by zone. zones iterate in the order they were
/// first discovered and each zone's points in the order they were pushed.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct ZoneGrid(IndexMap<String, Vec<GridPoint>>);

impl ZoneGrid {
    pub fn new() -> ZoneGrid {
        ZoneGrid(IndexMap::new())
    }

    /// appends a point to the list of its zone, creating the list on first occurrence.
    pub fn push(&mut self, point: GridPoint) {
        self.0.entry(point.zone.clone()).or_default().push(point);
    }

    pub fn zone_count(&self) -> usize {
        self.0.len()
    }

    pub fn point_count(&self) -> usize {
        self.0.values().map(|points| points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn zones(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    pub fn get(&self, zone: &str) -> Option<&[GridPoint]> {
        self.0.get(zone).map(|points| points.as_slice())
    }

    /// all points, zone by zone.
    pub fn points(&self) -> impl Iterator<Item = &GridPoint> {
        self.0.values().flatten()
    }

    /// re-keys the grid by "lat,lng" in grid traversal order (ascending longitude,
    /// then ascending latitude). keys are rounded to 2 decimals; when several
    /// points round to the same key the first one in traversal order keeps it.
    pub fn to_flat(&self) -> IndexMap<String, String> {
        let mut flat = IndexMap::with_capacity(self.point_count());
        let mut collisions: usize = 0;
        let ordered = self
            .points()
            .sorted_by(|a, b| a.lng.total_cmp(&b.lng).then(a.lat.total_cmp(&b.lat)));
        for point in ordered {
            match flat.entry(point.flat_key()) {
                Entry::Occupied(_) => collisions += 1,
                Entry::Vacant(entry) => {
                    entry.insert(point.zone.clone());
                }
            }
        }
        if collisions > 0 {
            log::warn!(
                "{collisions} grid points share a rounded \"lat,lng\" key with an earlier point and were left out of the flat layout, use a step that is a multiple of 0.01"
            );
        }
        flat
    }

    /// writes this grid as 2-space indented JSON in the requested layout.
    pub fn write_json(&self, path: &Path, layout: OutputLayout) -> Result<(), GridError> {
        let write_error = |error: String| GridError::Write {
            filepath: path.display().to_string(),
            error,
        };
        let file = File::create(path).map_err(|e| write_error(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        let serialized = match layout {
            OutputLayout::Grouped => serde_json::to_writer_pretty(&mut writer, self),
            OutputLayout::Flat => serde_json::to_writer_pretty(&mut writer, &self.to_flat()),
        };
        serialized.map_err(|e| write_error(e.to_string()))?;
        writer.flush().map_err(|e| write_error(e.to_string()))?;
        log::info!(
            "wrote {} zones, {} points to '{}' in {layout} layout",
            self.zone_count(),
            self.point_count(),
            path.display()
        );
        Ok(())
    }

    /// reads a grid previously written in the grouped layout.
    pub fn read_json(path: &Path) -> Result<ZoneGrid, GridError> {
        let read_error = |error: String| GridError::Read {
            filepath: path.display().to_string(),
            error,
        };
        let file = File::open(path).map_err(|e| read_error(e.to_string()))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| read_error(e.to_string()))
    }
}
