#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("failed reading '{filepath}': {error}")]
    Read { filepath: String, error: String },
    #[error("field '{field}' missing from row {row} of '{filepath}'")]
    MissingField {
        filepath: String,
        field: String,
        row: usize,
    },
    #[error("field '{field}' has unsupported field type '{field_type}' at row {row}")]
    UnsupportedFieldType {
        field: String,
        field_type: String,
        row: usize,
    },
    #[error("unexpected geometry type {geometry_type} found at row {row}, must be polygonal")]
    UnsupportedGeometry { geometry_type: String, row: usize },
    #[error("failed to convert geometry at row {row}: {error}")]
    Geometry { row: usize, error: String },
    #[error("cannot infer zone dataset format of '{0}', expected a .shp, .geojson, .json or .csv file")]
    UnknownFormat(String),
}
