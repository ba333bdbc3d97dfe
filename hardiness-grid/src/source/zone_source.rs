use super::{zone_label, SourceError, ZoneFeature};
use geo::{Geometry, MultiPolygon};
use geojson::GeoJson;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::Path};
use wkt::TryFromWkt;

/// source of the hardiness zone polygon dataset
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ZoneSource {
    /// reads zone polygons from a shapefile with a zone attribute field
    Shapefile { file: String, zone_field: String },
    /// reads zone polygons from a GeoJSON FeatureCollection with a zone property
    GeoJson { file: String, zone_field: String },
    /// reads zone polygons from a CSV file that contains WKT geometry and zone columns
    Csv {
        file: String,
        geometry_column: String,
        zone_field: String,
    },
}

impl ZoneSource {
    /// picks the reader for a dataset by its file extension. CSV files are expected
    /// to carry their WKT in a `geometry` column.
    pub fn from_path(file: &str, zone_field: &str) -> Result<ZoneSource, SourceError> {
        let extension = Path::new(file)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match extension.as_deref() {
            Some("shp") => Ok(ZoneSource::Shapefile {
                file: file.to_string(),
                zone_field: zone_field.to_string(),
            }),
            Some("geojson") | Some("json") => Ok(ZoneSource::GeoJson {
                file: file.to_string(),
                zone_field: zone_field.to_string(),
            }),
            Some("csv") => Ok(ZoneSource::Csv {
                file: file.to_string(),
                geometry_column: String::from("geometry"),
                zone_field: zone_field.to_string(),
            }),
            _ => Err(SourceError::UnknownFormat(file.to_string())),
        }
    }

    pub fn file(&self) -> &str {
        match self {
            ZoneSource::Shapefile { file, .. } => file,
            ZoneSource::GeoJson { file, .. } => file,
            ZoneSource::Csv { file, .. } => file,
        }
    }

    /// loads every zone feature of the dataset in file order.
    pub fn build(&self) -> Result<Vec<ZoneFeature>, SourceError> {
        log::info!("reading zone polygons from '{}'", self.file());
        let features = match self {
            ZoneSource::Shapefile { file, zone_field } => read_zone_shapefile(file, zone_field),
            ZoneSource::GeoJson { file, zone_field } => read_zone_geojson(file, zone_field),
            ZoneSource::Csv {
                file,
                geometry_column,
                zone_field,
            } => read_zone_csv(file, geometry_column, zone_field),
        }?;
        log::info!("loaded {} zone polygons", features.len());
        Ok(features)
    }
}

/// converts a polygonal shapefile record into a MultiPolygon. every other shape
/// type, including a null shape, is rejected.
fn shape_to_multipolygon(
    shape: shapefile::Shape,
    row: usize,
) -> Result<MultiPolygon<f64>, SourceError> {
    let shape_type = shape.shapetype();
    let converted: Result<MultiPolygon<f64>, String> = match shape {
        shapefile::Shape::Polygon(generic_polygon) => {
            generic_polygon.try_into().map_err(|e| format!("{e}"))
        }
        shapefile::Shape::PolygonM(generic_polygon) => {
            generic_polygon.try_into().map_err(|e| format!("{e}"))
        }
        shapefile::Shape::PolygonZ(generic_polygon) => {
            generic_polygon.try_into().map_err(|e| format!("{e}"))
        }
        _ => {
            return Err(SourceError::UnsupportedGeometry {
                geometry_type: shape_type.to_string(),
                row,
            })
        }
    };
    converted.map_err(|error| SourceError::Geometry { row, error })
}

/// reads geometries and zone labels from a shapefile source
fn read_zone_shapefile(filepath: &str, zone_field: &str) -> Result<Vec<ZoneFeature>, SourceError> {
    let rows = shapefile::read(filepath).map_err(|e| SourceError::Read {
        filepath: filepath.to_string(),
        error: e.to_string(),
    })?;

    let mut processed = vec![];
    for (row, (shape, record)) in rows.into_iter().enumerate() {
        let geometry = shape_to_multipolygon(shape, row)?;

        let field = record
            .get(zone_field)
            .ok_or_else(|| SourceError::MissingField {
                filepath: filepath.to_string(),
                field: zone_field.to_string(),
                row,
            })?;
        let label =
            zone_label::from_dbase(field).map_err(|field_type| SourceError::UnsupportedFieldType {
                field: zone_field.to_string(),
                field_type,
                row,
            })?;
        push_feature(&mut processed, label, geometry, row);
    }
    Ok(processed)
}

/// reads geometries and zone labels from a GeoJSON source
fn read_zone_geojson(filepath: &str, zone_field: &str) -> Result<Vec<ZoneFeature>, SourceError> {
    let read_error = |error: String| SourceError::Read {
        filepath: filepath.to_string(),
        error,
    };
    let contents = std::fs::read_to_string(filepath).map_err(|e| read_error(e.to_string()))?;
    let geojson = contents
        .parse::<GeoJson>()
        .map_err(|e| read_error(e.to_string()))?;
    let features = match geojson {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => {
            return Err(read_error(String::from(
                "expected a Feature or FeatureCollection, found a bare Geometry",
            )))
        }
    };

    let mut processed = vec![];
    for (row, feature) in features.into_iter().enumerate() {
        let property = feature
            .property(zone_field)
            .ok_or_else(|| SourceError::MissingField {
                filepath: filepath.to_string(),
                field: zone_field.to_string(),
                row,
            })?;
        let label =
            zone_label::from_json(property).map_err(|field_type| SourceError::UnsupportedFieldType {
                field: zone_field.to_string(),
                field_type,
                row,
            })?;
        let geojson_geometry = feature.geometry.ok_or_else(|| SourceError::Geometry {
            row,
            error: String::from("feature has no geometry"),
        })?;
        let geometry = Geometry::<f64>::try_from(geojson_geometry).map_err(|e| {
            SourceError::Geometry {
                row,
                error: e.to_string(),
            }
        })?;
        push_feature(&mut processed, label, into_multipolygon(geometry, row)?, row);
    }
    Ok(processed)
}

/// reads geometries and zone labels from a CSV source
fn read_zone_csv(
    filepath: &str,
    geometry_column: &str,
    zone_field: &str,
) -> Result<Vec<ZoneFeature>, SourceError> {
    let read_error = |error: String| SourceError::Read {
        filepath: filepath.to_string(),
        error,
    };
    let mut reader = csv::Reader::from_path(filepath).map_err(|e| read_error(e.to_string()))?;
    let header_record = reader
        .headers()
        .map_err(|e| read_error(e.to_string()))?
        .clone();
    let headers = header_record
        .into_iter()
        .enumerate()
        .map(|(i, s)| (s, i))
        .collect::<HashMap<_, _>>();
    let missing_column = |field: &str| SourceError::MissingField {
        filepath: filepath.to_string(),
        field: field.to_string(),
        row: 0,
    };
    let geometry_idx = *headers
        .get(geometry_column)
        .ok_or_else(|| missing_column(geometry_column))?;
    let zone_idx = *headers
        .get(zone_field)
        .ok_or_else(|| missing_column(zone_field))?;

    let mut processed = vec![];
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| read_error(e.to_string()))?;
        let geometry_str = record
            .get(geometry_idx)
            .ok_or_else(|| SourceError::MissingField {
                filepath: filepath.to_string(),
                field: geometry_column.to_string(),
                row,
            })?;
        let geometry = Geometry::<f64>::try_from_wkt_str(geometry_str).map_err(|e| {
            SourceError::Geometry {
                row,
                error: e.to_string(),
            }
        })?;
        let label = record
            .get(zone_idx)
            .map(zone_label::from_csv)
            .ok_or_else(|| SourceError::MissingField {
                filepath: filepath.to_string(),
                field: zone_field.to_string(),
                row,
            })?;
        push_feature(&mut processed, label, into_multipolygon(geometry, row)?, row);
    }
    Ok(processed)
}

/// appends a feature unless its zone label is null, which would make it
/// unreachable as a zone anyway.
fn push_feature(
    features: &mut Vec<ZoneFeature>,
    label: Option<String>,
    geometry: MultiPolygon<f64>,
    row: usize,
) {
    match label {
        Some(zone) => {
            log::debug!("row {row}: zone '{zone}' with {} polygons", geometry.0.len());
            features.push(ZoneFeature::new(zone, geometry));
        }
        None => log::warn!("skipping row {row} which has a null zone label"),
    }
}

fn into_multipolygon(geometry: Geometry<f64>, row: usize) -> Result<MultiPolygon<f64>, SourceError> {
    let unsupported = |geometry_type: &str| SourceError::UnsupportedGeometry {
        geometry_type: geometry_type.to_string(),
        row,
    };
    match geometry {
        Geometry::Polygon(p) => Ok(MultiPolygon::new(vec![p])),
        Geometry::MultiPolygon(mp) => Ok(mp),
        Geometry::Rect(r) => Ok(MultiPolygon::new(vec![r.to_polygon()])),
        Geometry::Triangle(t) => Ok(MultiPolygon::new(vec![t.to_polygon()])),
        Geometry::Point(_) => Err(unsupported("Point")),
        Geometry::Line(_) => Err(unsupported("Line")),
        Geometry::LineString(_) => Err(unsupported("LineString")),
        Geometry::MultiPoint(_) => Err(unsupported("MultiPoint")),
        Geometry::MultiLineString(_) => Err(unsupported("MultiLineString")),
        Geometry::GeometryCollection(_) => Err(unsupported("GeometryCollection")),
    }
}
