use crate::source::SourceError;

#[derive(thiserror::Error, Debug)]
pub enum GridError {
    #[error("grid step must be a positive, finite number of degrees, found {0}")]
    InvalidStep(f64),
    #[error("grid would hold {requested} points, more than the limit of {limit}; use a larger step or a smaller bbox")]
    TooManyPoints { requested: f64, limit: usize },
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("failed writing zone grid to '{filepath}': {error}")]
    Write { filepath: String, error: String },
    #[error("failed reading zone grid from '{filepath}': {error}")]
    Read { filepath: String, error: String },
}
